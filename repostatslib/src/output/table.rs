//! Table-ready data structures for stats output.
//!
//! This module provides `StatsTable`, a presentation-ready data structure
//! that can be directly consumed by templates or serialized to JSON.
//!
//! The data flow is:
//! 1. Raw Data (LanguageStats)
//! 2. QuerySet (truncated, sorted)
//! 3. StatsTable (formatted strings for display)
//!
//! StatsTable is a pure presentation layer - it only formats data, no
//! filtering or sorting logic.

use serde::{Deserialize, Serialize};

use crate::data::stats::format_kilobytes;
use crate::query::options::Strategy;
use crate::query::queryset::StatsQuerySet;

use super::color::color_for;

/// Default bar width in characters.
pub const DEFAULT_BAR_WIDTH: usize = 40;

const BAR_FILL: char = '█';
const BAR_EMPTY: char = '░';

/// A single data row: label, proportional bar, percentage and size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Category name
    pub label: String,
    /// Unstyled bar (`bar_width` characters)
    pub bar: String,
    /// Two-decimal percentage, no `%` sign
    pub percentage: String,
    /// Raw byte count
    pub bytes: u64,
    /// Human-readable size ("12.34 KB")
    pub size: String,
    /// Hex color for the bar
    pub color: String,
}

/// Table-ready stats data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsTable {
    /// Optional title (e.g., "Statistics: octocat/hello-world")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column headers: [label, bar, percentage, size]
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Summary line
    pub footer: String,
}

impl StatsTable {
    /// Create a StatsTable from a StatsQuerySet.
    pub fn from_queryset(qs: &StatsQuerySet, bar_width: usize) -> Self {
        let label_header = match qs.strategy {
            Strategy::Extensions => "Extension",
            Strategy::Languages => "Language",
        };
        let headers = vec![
            label_header.to_string(),
            "Share".to_string(),
            "%".to_string(),
            "Size".to_string(),
        ];

        let rows = qs
            .items
            .iter()
            .map(|item| TableRow {
                label: item.category.clone(),
                bar: render_bar(item.percent(), bar_width),
                percentage: item.percentage.clone(),
                bytes: item.bytes,
                size: format!("{} KB", item.kilobytes()),
                color: color_for(&item.category).to_string(),
            })
            .collect();

        StatsTable {
            title: None,
            headers,
            rows,
            footer: build_footer(qs),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

fn build_footer(qs: &StatsQuerySet) -> String {
    let unit = match qs.strategy {
        Strategy::Extensions => "extensions",
        Strategy::Languages => "languages",
    };
    let size = format_kilobytes(qs.total_bytes);
    match qs.strategy {
        Strategy::Extensions => format!(
            "Total ({} {}, {} files, {} KB)",
            qs.category_count, unit, qs.file_count, size
        ),
        Strategy::Languages => format!("Total ({} {}, {} KB)", qs.category_count, unit, size),
    }
}

/// Bar of `width` cells with `percent` of them filled.
///
/// Any non-zero share gets at least one filled cell so small categories
/// stay visible.
pub fn render_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let mut filled = ((percent / 100.0) * width as f64).round() as usize;
    if filled == 0 && percent > 0.0 && width > 0 {
        filled = 1;
    }
    let filled = filled.min(width);

    let mut bar = String::with_capacity(width * BAR_FILL.len_utf8());
    bar.extend(std::iter::repeat(BAR_FILL).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(width - filled));
    bar
}
