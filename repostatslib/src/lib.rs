//! # repostatslib
//!
//! Byte statistics per file extension or per language for a repository,
//! fetched from the GitHub API or read from a local git checkout.
//!
//! ## Overview
//!
//! The library turns a repository's file tree into a percentage breakdown:
//!
//! - **Tree strategy**: every blob in the recursive tree is grouped by its
//!   extension and its size summed
//! - **Languages strategy**: GitHub's own language → bytes map is used as-is
//!
//! Paths can be excluded with ignore rules (`.md` suffix, `/build` folder,
//! `node_modules` name) before aggregation.
//!
//! ## Pipeline
//!
//! 1. **source**: fetch a tree or language map, filter paths
//! 2. **data**: aggregate into `CategoryStat`s
//! 3. **query**: order and truncate
//! 4. **output**: format rows with bars and colors
//!
//! ## Example
//!
//! ```rust
//! use repostatslib::{Aggregator, ExtensionAggregator, FileEntry, FilterConfig};
//!
//! let entries = vec![
//!     FileEntry::blob("a.js", 300),
//!     FileEntry::blob("b.py", 700),
//!     FileEntry::blob("node_modules/c.js", 1000),
//! ];
//!
//! // The default filter already ignores node_modules
//! let stats = ExtensionAggregator::new(FilterConfig::new())
//!     .aggregate(&entries)
//!     .unwrap();
//!
//! assert_eq!(stats.total_bytes, 1000);
//! assert_eq!(stats.get("js").unwrap().percentage, "30.00");
//! assert_eq!(stats.get("py").unwrap().percentage, "70.00");
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod session;
pub mod source;

pub use data::{
    collect_stats, extension_of, Aggregator, CategoryStat, EntryKind, ExtensionAggregator,
    FileEntry, LanguageAggregator, LanguageBytes, LanguageStats, StatsOptions, TreeListing,
};
pub use error::RepoStatsError;
pub use output::{ansi256_for, color_for, StatsTable, TableRow, DEFAULT_BAR_WIDTH};
pub use query::{OrderBy, OrderDirection, Ordering, StatsQuerySet, Strategy};
pub use session::StatsSession;
pub use source::{
    should_include, FilterConfig, GitHubClient, IgnoreList, LocalRepository, RepoRef, RepoSource,
    COMMON_IGNORE_ITEMS, DEFAULT_IGNORES,
};

/// Result type for repostatslib operations
pub type Result<T> = std::result::Result<T, RepoStatsError>;
