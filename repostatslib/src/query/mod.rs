//! Query processing: order and truncate aggregated data.
//!
//! This module handles the third stage of the pipeline - transforming
//! aggregated stats into a query-ready format. It provides:
//!
//! - **Options**: Strategy selection and ordering (`Strategy`, `Ordering`)
//! - **QuerySet**: Processed data ready for presentation
//!
//! ## Example
//!
//! ```rust,ignore
//! use repostatslib::query::{Ordering, StatsQuerySet};
//!
//! let queryset = StatsQuerySet::from_stats(&stats, Ordering::by_bytes(), Some(10));
//! ```

pub mod options;
pub mod queryset;

pub use options::{OrderBy, OrderDirection, Ordering, Strategy};
pub use queryset::{StatsQuerySet, OTHER_LABEL};
