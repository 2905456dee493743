//! Aggregation strategies: turn raw repository data into category stats.
//!
//! Two strategies share the [`Aggregator`] trait:
//!
//! - [`ExtensionAggregator`] groups blob sizes from a tree listing by file
//!   extension, after applying the path filter.
//! - [`LanguageAggregator`] takes the host's language → bytes map directly.
//!   The ignore list only applies here when explicitly enabled.
//!
//! Both fail with [`RepoStatsError::EmptyAggregation`] when nothing is left
//! to divide by.

use std::collections::{BTreeMap, HashMap};

use crate::data::entry::FileEntry;
use crate::data::stats::{CategoryStat, LanguageStats};
use crate::error::RepoStatsError;
use crate::query::options::Strategy;
use crate::source::filter::FilterConfig;
use crate::Result;

/// Language name → byte count, as reported by the host.
pub type LanguageBytes = BTreeMap<String, u64>;

/// A way of computing category stats from some repository data.
pub trait Aggregator {
    /// Raw data this strategy consumes
    type Input: ?Sized;

    /// Strategy identifier recorded in the result
    fn strategy(&self) -> Strategy;

    /// Compute stats. Never returns an empty result: zero total bytes is
    /// reported as `EmptyAggregation`.
    fn aggregate(&self, input: &Self::Input) -> Result<LanguageStats>;
}

/// Lower-cased text after the last `.` of a path, if any.
///
/// This is a plain string split, not a file-name aware one: the dot may sit
/// in a directory name (`a.d/Makefile` yields `d/makefile`).
pub fn extension_of(path: &str) -> Option<String> {
    let (_, ext) = path.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Sums bytes per key, remembering first-seen order.
#[derive(Default)]
struct Tally {
    order: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, key: String, bytes: u64) {
        match self.index.get(&key) {
            Some(&i) => self.order[i].1 += bytes,
            None => {
                self.index.insert(key.clone(), self.order.len());
                self.order.push((key, bytes));
            }
        }
    }

    fn finish(self, strategy: Strategy, file_count: usize) -> Result<LanguageStats> {
        let total_bytes: u64 = self.order.iter().map(|(_, bytes)| bytes).sum();
        if total_bytes == 0 {
            return Err(RepoStatsError::EmptyAggregation);
        }

        let categories = self
            .order
            .into_iter()
            .map(|(category, bytes)| CategoryStat::new(category, bytes, total_bytes))
            .collect();

        Ok(LanguageStats {
            strategy,
            categories,
            total_bytes,
            file_count,
        })
    }
}

/// Tree-based aggregation by file extension.
#[derive(Debug, Clone, Default)]
pub struct ExtensionAggregator {
    filter: FilterConfig,
}

impl ExtensionAggregator {
    pub fn new(filter: FilterConfig) -> Self {
        Self { filter }
    }
}

impl Aggregator for ExtensionAggregator {
    type Input = [FileEntry];

    fn strategy(&self) -> Strategy {
        Strategy::Extensions
    }

    fn aggregate(&self, entries: &[FileEntry]) -> Result<LanguageStats> {
        let mut tally = Tally::default();
        let mut file_count = 0;
        let mut skipped = 0;

        for entry in entries {
            if !entry.is_blob() {
                continue;
            }
            if !self.filter.matches(&entry.path) {
                skipped += 1;
                continue;
            }
            if let Some(ext) = extension_of(&entry.path) {
                tally.add(ext, entry.size_bytes);
                file_count += 1;
            }
        }

        tracing::debug!(
            files = file_count,
            ignored = skipped,
            categories = tally.order.len(),
            "aggregated tree by extension"
        );

        tally.finish(self.strategy(), file_count)
    }
}

/// Direct aggregation of a language → bytes map.
#[derive(Debug, Clone, Default)]
pub struct LanguageAggregator {
    filter: Option<FilterConfig>,
}

impl LanguageAggregator {
    /// Aggregate the map unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop languages whose name is excluded by `filter`.
    pub fn with_filter(filter: FilterConfig) -> Self {
        Self {
            filter: Some(filter),
        }
    }
}

impl Aggregator for LanguageAggregator {
    type Input = LanguageBytes;

    fn strategy(&self) -> Strategy {
        Strategy::Languages
    }

    fn aggregate(&self, languages: &LanguageBytes) -> Result<LanguageStats> {
        let mut tally = Tally::default();

        for (language, &bytes) in languages {
            if let Some(filter) = &self.filter {
                if !filter.matches(language) {
                    continue;
                }
            }
            tally.add(language.clone(), bytes);
        }

        tracing::debug!(
            languages = tally.order.len(),
            filtered = self.filter.is_some(),
            "aggregated language map"
        );

        tally.finish(self.strategy(), 0)
    }
}
