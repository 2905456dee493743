//! Query set: processed data ready for table rendering.
//!
//! A QuerySet sits between the aggregated stats and the final table output.
//! It represents data that has been:
//! - Optionally truncated to the largest categories, with the rest folded
//!   into a single `(other)` row
//! - Sorted according to the ordering preference
//!
//! The data pipeline is:
//! 1. Raw Data (LanguageStats)
//! 2. QuerySet (truncated, sorted)
//! 3. StatsTable (formatted strings for display)

use serde::{Deserialize, Serialize};

use crate::data::stats::{format_percentage, CategoryStat, LanguageStats};

use super::options::{OrderBy, OrderDirection, Ordering, Strategy};

/// Label of the row collecting categories beyond the `top` limit.
pub const OTHER_LABEL: &str = "(other)";

/// Query set for aggregated stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsQuerySet {
    /// Strategy that produced the stats
    pub strategy: Strategy,
    /// Ordering applied to `items`
    pub ordering: Ordering,
    /// Data rows (truncated and sorted)
    pub items: Vec<CategoryStat>,
    /// Total bytes across all categories, folded ones included
    pub total_bytes: u64,
    /// Number of categories before truncation
    pub category_count: usize,
    /// Number of files that contributed
    pub file_count: usize,
}

impl StatsQuerySet {
    /// Create a QuerySet from aggregated stats.
    ///
    /// With `top = Some(n)`, only the `n` largest categories are kept and the
    /// remainder is summed into an `(other)` row, which always sorts last.
    pub fn from_stats(stats: &LanguageStats, ordering: Ordering, top: Option<usize>) -> Self {
        let mut items = stats.categories.clone();
        let mut other = None;

        if let Some(limit) = top {
            if items.len() > limit {
                sort_items(&mut items, Ordering::by_bytes());
                let rest = items.split_off(limit);
                let bytes = rest.iter().map(|c| c.bytes).sum();
                other = Some(CategoryStat {
                    category: OTHER_LABEL.to_string(),
                    bytes,
                    percentage: format_percentage(bytes, stats.total_bytes),
                });
            }
        }

        sort_items(&mut items, ordering);
        items.extend(other);

        StatsQuerySet {
            strategy: stats.strategy,
            ordering,
            items,
            total_bytes: stats.total_bytes,
            category_count: stats.categories.len(),
            file_count: stats.file_count,
        }
    }
}

/// Sort items; ties on bytes fall back to the category name.
fn sort_items(items: &mut [CategoryStat], ordering: Ordering) {
    match ordering.by {
        OrderBy::Category => items.sort_by(|a, b| a.category.cmp(&b.category)),
        OrderBy::Bytes => items.sort_by(|a, b| {
            a.bytes
                .cmp(&b.bytes)
                .then_with(|| b.category.cmp(&a.category))
        }),
    }

    if ordering.direction == OrderDirection::Descending {
        items.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> LanguageStats {
        let total = 1000;
        LanguageStats {
            strategy: Strategy::Extensions,
            categories: vec![
                CategoryStat::new("js", 300, total),
                CategoryStat::new("py", 500, total),
                CategoryStat::new("css", 150, total),
                CategoryStat::new("html", 50, total),
            ],
            total_bytes: total,
            file_count: 9,
        }
    }

    fn labels(qs: &StatsQuerySet) -> Vec<&str> {
        qs.items.iter().map(|c| c.category.as_str()).collect()
    }

    #[test]
    fn test_default_ordering_largest_first() {
        let qs = StatsQuerySet::from_stats(&sample_stats(), Ordering::default(), None);

        assert_eq!(labels(&qs), vec!["py", "js", "css", "html"]);
        assert_eq!(qs.total_bytes, 1000);
        assert_eq!(qs.category_count, 4);
        assert_eq!(qs.file_count, 9);
    }

    #[test]
    fn test_order_by_category() {
        let qs = StatsQuerySet::from_stats(&sample_stats(), Ordering::by_category(), None);
        assert_eq!(labels(&qs), vec!["css", "html", "js", "py"]);

        let qs = StatsQuerySet::from_stats(
            &sample_stats(),
            Ordering::by_category().descending(),
            None,
        );
        assert_eq!(labels(&qs), vec!["py", "js", "html", "css"]);
    }

    #[test]
    fn test_ties_break_by_name() {
        let stats = LanguageStats {
            strategy: Strategy::Languages,
            categories: vec![
                CategoryStat::new("b", 10, 30),
                CategoryStat::new("a", 10, 30),
                CategoryStat::new("c", 10, 30),
            ],
            total_bytes: 30,
            file_count: 0,
        };

        let qs = StatsQuerySet::from_stats(&stats, Ordering::default(), None);
        assert_eq!(labels(&qs), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_top_folds_remainder() {
        let qs = StatsQuerySet::from_stats(&sample_stats(), Ordering::by_category(), Some(2));

        assert_eq!(labels(&qs), vec!["js", "py", OTHER_LABEL]);
        let other = qs.items.last().unwrap();
        assert_eq!(other.bytes, 200);
        assert_eq!(other.percentage, "20.00");
        assert_eq!(qs.category_count, 4);

        let sum: u64 = qs.items.iter().map(|c| c.bytes).sum();
        assert_eq!(sum, qs.total_bytes);
    }

    #[test]
    fn test_top_larger_than_categories() {
        let qs = StatsQuerySet::from_stats(&sample_stats(), Ordering::default(), Some(10));

        assert_eq!(qs.items.len(), 4);
        assert!(!labels(&qs).contains(&OTHER_LABEL));
    }
}
