//! Effective date window of an export.

use crate::text::TextMeasurer;
use crate::zoom::BASE_PIXELS_PER_DAY;
use chrono::NaiveDate;
use gantry_core::time::shift_days;
use gantry_core::{DateRange, DateRangeMode, ExportOptions, LabelPosition, Task};

/// Symmetric padding around the project span in `All` mode.
pub const BASE_PADDING_DAYS: i64 = 7;
pub const FALLBACK_DAYS_BEFORE: i64 = 7;
pub const FALLBACK_DAYS_AFTER: i64 = 30;
/// Space between a bar edge and an outside label.
pub const LABEL_GAP_PX: f64 = 6.0;

/// Inputs for the label-overflow pass of [`resolve_date_range`].
#[derive(Clone, Copy)]
pub struct LabelPadding<'a> {
    pub tasks: &'a [Task],
    pub effective_zoom: f64,
    pub position: LabelPosition,
    pub font_size: f64,
    /// Width of a milestone marker; milestones have no bar of their own.
    pub milestone_width: f64,
    pub measurer: &'a dyn TextMeasurer,
}

/// `today - 7 .. today + 30`; keeps the resolver total before a viewport or project exists.
pub fn fallback_range(today: NaiveDate) -> DateRange {
    DateRange::new(
        shift_days(today, -FALLBACK_DAYS_BEFORE),
        shift_days(today, FALLBACK_DAYS_AFTER),
    )
}

pub fn resolve_date_range(
    options: &ExportOptions,
    project_range: Option<DateRange>,
    visible_range: Option<DateRange>,
    label_padding: Option<&LabelPadding<'_>>,
    today: NaiveDate,
) -> DateRange {
    match options.date_range {
        DateRangeMode::Visible => visible_range.unwrap_or_else(|| fallback_range(today)),
        DateRangeMode::Custom {
            start: Some(start),
            end: Some(end),
        } => DateRange::new(start, end),
        DateRangeMode::Custom { .. } => fallback_range(today),
        DateRangeMode::All => {
            let Some(project) = project_range else {
                return fallback_range(today);
            };
            let base = project.padded(BASE_PADDING_DAYS, BASE_PADDING_DAYS);
            match label_padding {
                Some(padding) => {
                    let (left, right) = label_overflow_days(base, padding);
                    base.padded(left, right)
                }
                None => base,
            }
        }
    }
}

/// Whole days between `start` and `end`, never negative.
pub fn duration_days(range: DateRange) -> i64 {
    range.span_days().max(0)
}

/// Extra `(left, right)` days needed so no outside label is clipped by `range`.
pub fn label_overflow_days(range: DateRange, padding: &LabelPadding<'_>) -> (i64, i64) {
    let px_per_day = BASE_PIXELS_PER_DAY * padding.effective_zoom;
    if !(px_per_day.is_finite() && px_per_day > 0.0) || padding.position == LabelPosition::Hidden
    {
        return (0, 0);
    }

    let days_for = |px: f64| -> i64 {
        if px <= 0.0 {
            0
        } else {
            (px / px_per_day).ceil() as i64
        }
    };

    let mut left = 0_i64;
    let mut right = 0_i64;
    for task in padding.tasks {
        let label = task.name.trim_end();
        if label.is_empty() {
            continue;
        }
        let text_width = padding.measurer.text_width(label, padding.font_size);
        let end = task.effective_end();

        // Overflow measured from the bar edge (milestones: from the marker center).
        let (overflow_left, overflow_right) = if task.is_milestone() {
            let half = padding.milestone_width / 2.0;
            let outside = half + LABEL_GAP_PX + text_width;
            match padding.position {
                LabelPosition::Left => (outside, 0.0),
                LabelPosition::Right | LabelPosition::Inside => (0.0, outside),
                LabelPosition::Hidden => (0.0, 0.0),
            }
        } else {
            let outside = LABEL_GAP_PX + text_width;
            match padding.position {
                LabelPosition::Left => (outside, 0.0),
                LabelPosition::Right => (0.0, outside),
                LabelPosition::Inside => {
                    let bar_width = (end - task.start).num_days() as f64 * px_per_day;
                    if text_width + 2.0 * LABEL_GAP_PX > bar_width {
                        (0.0, outside)
                    } else {
                        (0.0, 0.0)
                    }
                }
                LabelPosition::Hidden => (0.0, 0.0),
            }
        };

        let room_left = (task.start - range.start).num_days();
        let room_right = (range.end - end).num_days();
        left = left.max(days_for(overflow_left) - room_left);
        right = right.max(days_for(overflow_right) - room_right);
    }

    tracing::trace!(left, right, zoom = padding.effective_zoom, "label overflow days");
    (left.max(0), right.max(0))
}
