//! Expense categories: a fixed default list plus user-registered names.
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Housing",
    "Food",
    "Transportation",
    "Leisure",
    "Health",
    "Education",
    "Investments",
    "Other",
];

pub fn is_default_category(name: &str) -> bool {
    DEFAULT_CATEGORIES.contains(&name)
}

/// Insertion-ordered custom categories, disjoint from the defaults.
/// There is no removal operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRegistry {
    custom: Vec<String>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted names, dropping blanks, duplicates and defaults
    pub fn from_names<I: IntoIterator<Item = String>>(names: I) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.register(&name);
        }
        registry
    }

    pub fn contains(&self, name: &str) -> bool {
        is_default_category(name) || self.custom.iter().any(|c| c == name)
    }

    /// Add `name` (trimmed) unless it is blank or already known.
    /// Returns true when the registry grew.
    pub fn register(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.custom.push(name.to_string());
        true
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Defaults followed by custom entries
    pub fn all_categories(&self) -> Vec<String> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .chain(self.custom.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_new_category_once() {
        let mut registry = CategoryRegistry::new();
        assert!(registry.register("Pets"));
        assert!(!registry.register("Pets"));
        assert_eq!(registry.custom(), &["Pets".to_string()]);
    }

    #[test]
    fn test_register_trims_and_rejects_blank() {
        let mut registry = CategoryRegistry::new();
        assert!(!registry.register("   "));
        assert!(registry.register("  Gifts "));
        assert!(!registry.register("Gifts"));
        assert_eq!(registry.custom(), &["Gifts".to_string()]);
    }

    #[test]
    fn test_register_skips_defaults() {
        let mut registry = CategoryRegistry::new();
        assert!(!registry.register("Food"));
        assert!(registry.custom().is_empty());
        assert!(registry.contains("Food"));
    }

    #[test]
    fn test_all_categories_keeps_insertion_order() {
        let registry = CategoryRegistry::from_names(vec![
            "Pets".to_string(),
            "Gifts".to_string(),
            "Pets".to_string(),
            "Health".to_string(),
        ]);
        let all = registry.all_categories();
        assert_eq!(all.len(), DEFAULT_CATEGORIES.len() + 2);
        assert_eq!(&all[all.len() - 2..], &["Pets".to_string(), "Gifts".to_string()]);
    }
}
