//! Conversions between the `shared` DTOs and domain types.

pub mod expense_mapper;
pub mod goal_mapper;

use chrono::NaiveDate;

pub(crate) const DTO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date coming from a request body
pub(crate) fn parse_dto_date(field: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DTO_DATE_FORMAT)
        .map_err(|_| format!("Invalid {} '{}': expected YYYY-MM-DD", field, value))
}

pub(crate) fn format_dto_date(date: NaiveDate) -> String {
    date.format(DTO_DATE_FORMAT).to_string()
}
