//! Calendar month values used to scope expense queries.
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use shared::ALL_MONTHS;

/// A `YYYY-MM` calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human-readable label, e.g. "March 2024"
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid month filter '{0}': expected YYYY-MM or 'all'")]
pub struct MonthParseError(pub String);

impl FromStr for YearMonth {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MonthParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

/// Month selector value: one calendar month or the whole history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Month(YearMonth),
}

impl MonthFilter {
    /// Label shown in the month selector
    pub fn label(&self) -> String {
        match self {
            MonthFilter::All => "All history".to_string(),
            MonthFilter::Month(month) => month.label(),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => write!(f, "{}", ALL_MONTHS),
            MonthFilter::Month(month) => write!(f, "{}", month),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_MONTHS) {
            return Ok(MonthFilter::All);
        }
        s.parse::<YearMonth>().map(MonthFilter::Month)
    }
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_month() {
        assert_eq!("2024-02".parse::<YearMonth>(), Ok(YearMonth { year: 2024, month: 2 }));
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-2".parse::<YearMonth>().is_err());
        assert!("202402".parse::<YearMonth>().is_err());
        assert!("2024-02-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_parse_month_filter() {
        assert_eq!("all".parse::<MonthFilter>(), Ok(MonthFilter::All));
        assert_eq!("ALL".parse::<MonthFilter>(), Ok(MonthFilter::All));
        assert_eq!(
            "2023-11".parse::<MonthFilter>(),
            Ok(MonthFilter::Month(YearMonth { year: 2023, month: 11 }))
        );
        assert!("last-month".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(YearMonth { year: 2024, month: 3 }.to_string(), "2024-03");
        assert_eq!(MonthFilter::All.to_string(), "all");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec = YearMonth { year: 2023, month: 12 };
        let jan = YearMonth { year: 2024, month: 1 };
        assert!(dec < jan);
    }

    #[test]
    fn test_labels() {
        assert_eq!(YearMonth { year: 2024, month: 3 }.label(), "March 2024");
        assert_eq!(MonthFilter::All.label(), "All history");
    }

    #[test]
    fn test_contains() {
        let month = YearMonth { year: 2024, month: 2 };
        assert!(month.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()));
    }
}
