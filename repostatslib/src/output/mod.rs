//! Output formatting: present data as bar tables.
//!
//! This module handles the fourth and final stage of the pipeline -
//! formatting query results for display. It provides:
//!
//! - **StatsTable**: Table-ready rows with bars, percentages and sizes
//! - **Colors**: Per-category colors with a neutral default
//!
//! ## Example
//!
//! ```rust,ignore
//! use repostatslib::output::StatsTable;
//!
//! let table = StatsTable::from_queryset(&queryset, 40);
//! // table.rows: [TableRow { label: "rs", bar: "████░░…", percentage: "62.50", .. }]
//! ```

pub mod color;
pub mod table;

pub use color::{ansi256_for, color_for, DEFAULT_COLOR};
pub use table::{render_bar, StatsTable, TableRow, DEFAULT_BAR_WIDTH};
