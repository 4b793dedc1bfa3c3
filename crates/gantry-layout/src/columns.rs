//! Table column sizing.
//!
//! Two entry points with different costs: [`estimate_column_width`] measures every cell of a
//! column, [`estimate_table_width`] only sums overrides and density defaults.

use crate::density::{DensityProfile, profile};
use crate::text::TextMeasurer;
use gantry_core::{ColumnKey, ColumnWidths, Density, FlatTask, Task, TaskKind};
use std::fmt::Write as _;

/// The string a table cell shows for `task`, or an empty string when the task kind suppresses it.
pub fn cell_text(column: ColumnKey, task: &Task, date_format: &str) -> String {
    match column {
        ColumnKey::Name => task.name.clone(),
        ColumnKey::StartDate => format_date(task.start, date_format),
        ColumnKey::EndDate => match task.kind {
            TaskKind::Milestone => String::new(),
            _ => format_date(task.end, date_format),
        },
        ColumnKey::Duration => match task.kind {
            TaskKind::Milestone => String::new(),
            TaskKind::Summary => format!("{} days", task.duration_days),
            TaskKind::Task => task.duration_days.to_string(),
        },
        ColumnKey::Progress => format!("{}%", task.progress.round() as i64),
        ColumnKey::Color => String::new(),
    }
}

fn format_date(date: chrono::NaiveDate, date_format: &str) -> String {
    // `DelayedFormat` reports a bad pattern as `fmt::Error` instead of panicking when written.
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        tracing::debug!(date_format, "invalid date format; falling back to ISO dates");
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Indent + expand control + type icon + gaps in front of a name at `depth`.
fn name_decoration_width(p: &DensityProfile, depth: usize) -> f64 {
    depth as f64 * p.indent_per_level
        + p.expand_control_width
        + p.type_icon_width
        + 2.0 * p.element_gap
}

/// Content-fitted width of one column, in whole pixels.
pub fn estimate_column_width(
    column: ColumnKey,
    rows: &[FlatTask<'_>],
    density: Density,
    date_format: &str,
    measurer: &dyn TextMeasurer,
) -> u32 {
    let p = profile(density);
    if column == ColumnKey::Color {
        return to_px(p.color_swatch_width);
    }

    let mut max_text = measurer.text_width(column.header_label(), p.header_font_size);
    for row in rows {
        let text = cell_text(column, row.task, date_format);
        if text.is_empty() {
            continue;
        }
        max_text = max_text.max(measurer.text_width(&text, p.font_size));
    }

    let width = if column == ColumnKey::Name {
        // Max text plus max decoration, even when they come from different rows.
        let max_extra = rows
            .iter()
            .map(|r| name_decoration_width(p, r.depth))
            .fold(name_decoration_width(p, 0), f64::max);
        max_text + max_extra + p.cell_padding_x
    } else {
        max_text + 2.0 * p.cell_padding_x
    };
    to_px(width)
}

fn to_px(width: f64) -> u32 {
    if width.is_finite() && width > 0.0 {
        width.ceil() as u32
    } else {
        0
    }
}

/// Runs the content-fit pass for every selected column.
pub fn fit_column_widths(
    columns: &[ColumnKey],
    rows: &[FlatTask<'_>],
    density: Density,
    date_format: &str,
    measurer: &dyn TextMeasurer,
) -> ColumnWidths {
    columns
        .iter()
        .map(|&c| {
            let w = estimate_column_width(c, rows, density, date_format, measurer);
            (c, f64::from(w))
        })
        .collect()
}

/// The width a column is laid out at: the explicit override if present, else the density default.
pub fn column_width(column: ColumnKey, overrides: &ColumnWidths, density: Density) -> f64 {
    overrides
        .get(&column)
        .copied()
        .unwrap_or_else(|| profile(density).default_column_width(column))
}

/// Sum of the selected columns' widths; `0` for a timeline-only export.
pub fn estimate_table_width(
    columns: &[ColumnKey],
    overrides: &ColumnWidths,
    density: Density,
) -> f64 {
    columns
        .iter()
        .map(|&c| column_width(c, overrides, density))
        .sum()
}
