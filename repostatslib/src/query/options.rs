//! Input options for collecting and presenting repository statistics.
//!
//! This module contains the configuration types that control what data
//! the library computes and how it is ordered.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which aggregation strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Group blob sizes from the recursive tree by file extension
    #[default]
    Extensions,
    /// Use the host's per-language byte counts as-is
    Languages,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extensions" | "extension" | "ext" | "tree" => Ok(Strategy::Extensions),
            "languages" | "language" | "lang" => Ok(Strategy::Languages),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

/// Field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Order by byte count
    #[default]
    Bytes,
    /// Order by category name (lexicographical)
    Category,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bytes" | "size" | "percentage" => Ok(OrderBy::Bytes),
            "category" | "name" | "label" => Ok(OrderBy::Category),
            _ => Err(format!("Unknown order field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending (A-Z, smallest first)
    Ascending,
    /// Descending (Z-A, largest first)
    #[default]
    Descending,
}

/// Ordering configuration for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by
    pub by: OrderBy,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Ordering {
    /// Largest categories first (default)
    pub fn by_bytes() -> Self {
        Self::default()
    }

    /// Alphabetical by category
    pub fn by_category() -> Self {
        Self {
            by: OrderBy::Category,
            direction: OrderDirection::Ascending,
        }
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_default() {
        assert_eq!(Strategy::default(), Strategy::Extensions);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(Strategy::from_str("tree").unwrap(), Strategy::Extensions);
        assert_eq!(
            Strategy::from_str("Languages").unwrap(),
            Strategy::Languages
        );
        assert!(Strategy::from_str("bogus").is_err());
    }

    #[test]
    fn test_ordering_default() {
        let ordering = Ordering::default();
        assert_eq!(ordering.by, OrderBy::Bytes);
        assert_eq!(ordering.direction, OrderDirection::Descending);
    }

    #[test]
    fn test_ordering_by_category() {
        let ordering = Ordering::by_category();
        assert_eq!(ordering.by, OrderBy::Category);
        assert_eq!(ordering.direction, OrderDirection::Ascending);
    }

    #[test]
    fn test_ordering_direction_builder() {
        let ordering = Ordering::by_bytes().ascending();
        assert_eq!(ordering.by, OrderBy::Bytes);
        assert_eq!(ordering.direction, OrderDirection::Ascending);
    }

    #[test]
    fn test_order_by_from_str() {
        assert_eq!(OrderBy::from_str("bytes").unwrap(), OrderBy::Bytes);
        assert_eq!(OrderBy::from_str("size").unwrap(), OrderBy::Bytes);
        assert_eq!(OrderBy::from_str("name").unwrap(), OrderBy::Category);
        assert!(OrderBy::from_str("invalid").is_err());
    }
}
