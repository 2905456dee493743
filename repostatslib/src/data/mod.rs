//! Data collection: aggregate repository data into statistics.
//!
//! This module handles the second stage of the pipeline - turning tree
//! entries or language maps into per-category byte counts. It provides:
//!
//! - **Entries**: Tree entry types (`FileEntry`, `TreeListing`)
//! - **Statistics**: Result types (`CategoryStat`, `LanguageStats`)
//! - **Aggregation**: The `Aggregator` trait and its two strategies
//! - **Collection**: High-level API (`collect_stats`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use repostatslib::data::{collect_stats, StatsOptions};
//!
//! let stats = collect_stats(&client, &repo, &StatsOptions::new())?;
//! println!("Total bytes: {}", stats.total_bytes);
//! ```

pub mod aggregate;
pub mod collect;
pub mod entry;
pub mod stats;

pub use aggregate::{extension_of, Aggregator, ExtensionAggregator, LanguageAggregator, LanguageBytes};
pub use collect::{collect_stats, StatsOptions};
pub use entry::{EntryKind, FileEntry, TreeListing};
pub use stats::{format_kilobytes, format_percentage, CategoryStat, LanguageStats};
