//! Core data structures for byte statistics.
//!
//! A [`CategoryStat`] is one row of the breakdown: a category (file
//! extension or language name), its byte count and its share of the total
//! as a fixed two-decimal string. Stats are always rebuilt from scratch on
//! every fetch and never updated in place.

use serde::{Deserialize, Serialize};

use crate::query::options::Strategy;

/// Byte count and share for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    /// Extension (tree strategy) or language name (languages strategy)
    pub category: String,
    /// Bytes attributed to this category
    pub bytes: u64,
    /// Percentage of the total, formatted with two fraction digits ("37.50")
    pub percentage: String,
}

impl CategoryStat {
    /// Build a stat, computing the percentage against `total_bytes`.
    ///
    /// `total_bytes` must be non-zero; aggregators check this before
    /// building any stat.
    pub fn new(category: impl Into<String>, bytes: u64, total_bytes: u64) -> Self {
        Self {
            category: category.into(),
            bytes,
            percentage: format_percentage(bytes, total_bytes),
        }
    }

    /// Numeric value of the percentage string.
    pub fn percent(&self) -> f64 {
        self.percentage.parse().unwrap_or(0.0)
    }

    /// Size in KiB, two decimals ("12.34").
    pub fn kilobytes(&self) -> String {
        format_kilobytes(self.bytes)
    }
}

/// `bytes / total * 100`, rounded half up to two decimals.
pub fn format_percentage(bytes: u64, total_bytes: u64) -> String {
    format_hundredths(bytes as u128 * 10_000, total_bytes as u128)
}

/// Bytes expressed in KiB, rounded half up to two decimals.
pub fn format_kilobytes(bytes: u64) -> String {
    format_hundredths(bytes as u128 * 100, 1024)
}

/// `numerator / denominator` in hundredths, ties rounded away from zero.
fn format_hundredths(numerator: u128, denominator: u128) -> String {
    if denominator == 0 {
        return "0.00".to_string();
    }
    let hundredths = (2 * numerator + denominator) / (2 * denominator);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Result of aggregating one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageStats {
    /// Strategy that produced these stats
    pub strategy: Strategy,
    /// One entry per category, in first-seen order
    pub categories: Vec<CategoryStat>,
    /// Sum of `bytes` over all categories
    pub total_bytes: u64,
    /// Number of files that contributed (0 for the languages strategy)
    pub file_count: usize,
}

impl LanguageStats {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Look up a category by name.
    pub fn get(&self, category: &str) -> Option<&CategoryStat> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Sum of the rounded percentages (close to 100).
    pub fn percentage_sum(&self) -> f64 {
        self.categories.iter().map(CategoryStat::percent).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(300, 1000), "30.00");
        assert_eq!(format_percentage(375, 1000), "37.50");
        assert_eq!(format_percentage(1, 3), "33.33");
        assert_eq!(format_percentage(2, 3), "66.67");
        assert_eq!(format_percentage(5, 5), "100.00");
        assert_eq!(format_percentage(0, 5), "0.00");
        assert_eq!(format_percentage(3, 0), "0.00");
    }

    #[test]
    fn test_format_percentage_ties_round_up() {
        assert_eq!(format_percentage(1, 800), "0.13");
        assert_eq!(format_percentage(5, 800), "0.63");
        assert_eq!(format_percentage(1, 8), "12.50");
        assert_eq!(format_percentage(1, 80_000), "0.00");
        assert_eq!(format_percentage(1, 20_000), "0.01");
    }

    #[test]
    fn test_format_kilobytes() {
        assert_eq!(format_kilobytes(1024), "1.00");
        assert_eq!(format_kilobytes(1536), "1.50");
        assert_eq!(format_kilobytes(0), "0.00");
        assert_eq!(format_kilobytes(128), "0.13");
        assert_eq!(format_kilobytes(400), "0.39");
    }

    #[test]
    fn test_category_stat() {
        let stat = CategoryStat::new("js", 300, 1000);

        assert_eq!(stat.category, "js");
        assert_eq!(stat.bytes, 300);
        assert_eq!(stat.percentage, "30.00");
        assert!((stat.percent() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialize_category_stat() {
        let stat = CategoryStat::new("py", 700, 1000);
        let json = serde_json::to_value(&stat).unwrap();

        assert_eq!(json["category"], "py");
        assert_eq!(json["bytes"], 700);
        assert_eq!(json["percentage"], "70.00");
    }
}
