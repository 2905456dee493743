//! High-level statistics API.
//!
//! This module provides the main entry point for computing the byte
//! breakdown of a repository: fetch from a [`RepoSource`], then run the
//! selected aggregation strategy.

use crate::data::aggregate::{Aggregator, ExtensionAggregator, LanguageAggregator};
use crate::data::stats::LanguageStats;
use crate::query::options::Strategy;
use crate::source::filter::FilterConfig;
use crate::source::repo::{RepoRef, RepoSource};
use crate::Result;

/// Options for collecting statistics.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Aggregation strategy
    pub strategy: Strategy,
    /// Path filter (ignore rules and include globs)
    pub filter: FilterConfig,
    /// Branch or revision to read; `None` lets the source decide
    pub reference: Option<String>,
    /// Apply the filter to language names in the languages strategy
    pub apply_ignore_to_languages: bool,
}

impl StatsOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set aggregation strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set path filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Read a specific branch or revision.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Also apply the filter in the languages strategy.
    pub fn apply_ignore_to_languages(mut self, enabled: bool) -> Self {
        self.apply_ignore_to_languages = enabled;
        self
    }
}

/// Fetch a repository's data and aggregate it.
///
/// # Example
///
/// ```rust,ignore
/// use repostatslib::{collect_stats, GitHubClient, RepoRef, StatsOptions};
///
/// let client = GitHubClient::from_env()?;
/// let repo = RepoRef::parse("rust-lang/cargo")?;
/// let stats = collect_stats(&client, &repo, &StatsOptions::new())?;
/// for c in &stats.categories {
///     println!("{}: {}%", c.category, c.percentage);
/// }
/// ```
pub fn collect_stats(
    source: &dyn RepoSource,
    repo: &RepoRef,
    options: &StatsOptions,
) -> Result<LanguageStats> {
    tracing::info!(
        source = %source.describe(repo),
        strategy = ?options.strategy,
        "collecting repository statistics"
    );

    match options.strategy {
        Strategy::Extensions => {
            let listing = source.fetch_tree(repo, options.reference.as_deref())?;
            if listing.truncated {
                tracing::warn!(
                    repo = %repo,
                    reference = %listing.reference,
                    "tree listing was truncated by the host; statistics are partial"
                );
            }
            ExtensionAggregator::new(options.filter.clone()).aggregate(&listing.entries)
        }
        Strategy::Languages => {
            let languages = source.fetch_languages(repo)?;
            // Include globs describe paths, so only the ignore list applies to names
            let aggregator = if options.apply_ignore_to_languages {
                LanguageAggregator::with_filter(
                    FilterConfig::permissive().ignore_list(options.filter.ignore.clone()),
                )
            } else {
                LanguageAggregator::new()
            };
            aggregator.aggregate(&languages)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use crate::data::aggregate::LanguageBytes;
    use crate::data::entry::{FileEntry, TreeListing};
    use crate::error::RepoStatsError;
    use crate::source::repo::{RepoRef, RepoSource};
    use crate::Result;

    /// In-memory source that counts how often it was hit.
    #[derive(Default)]
    pub struct FakeSource {
        pub entries: Vec<FileEntry>,
        pub languages: LanguageBytes,
        pub fail: bool,
        pub calls: Cell<usize>,
    }

    impl FakeSource {
        pub fn with_entries(entries: Vec<FileEntry>) -> Self {
            Self {
                entries,
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    impl RepoSource for FakeSource {
        fn describe(&self, repo: &RepoRef) -> String {
            format!("fake:{}", repo)
        }

        fn fetch_tree(&self, _repo: &RepoRef, reference: Option<&str>) -> Result<TreeListing> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(RepoStatsError::FetchFailed {
                    message: "Failed to fetch repository contents".to_string(),
                });
            }
            Ok(TreeListing::new(
                reference.unwrap_or("main"),
                self.entries.clone(),
            ))
        }

        fn fetch_languages(&self, _repo: &RepoRef) -> Result<LanguageBytes> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(RepoStatsError::FetchFailed {
                    message: "Failed to fetch repository languages".to_string(),
                });
            }
            Ok(self.languages.clone())
        }
    }
}
