//! Canvas size of an image-style export.
//!
//! Everything here is a pure function of its arguments: no clock, no randomness, no caches.

use crate::columns::estimate_table_width;
use crate::date_range::{LabelPadding, duration_days, resolve_date_range};
use crate::density::profile;
use crate::model::ResolvedGeometry;
use crate::text::TextMeasurer;
use crate::zoom::{BASE_PIXELS_PER_DAY, MIN_ZOOM, resolve_zoom, timeline_share};
use gantry_core::{
    ColumnWidths, DateRange, DateRangeMode, ExportOptions, LabelPosition, Task, ViewState,
    ZoomMode, flatten_expanded,
};

/// Height of the timeline header band (scale rows), when enabled.
pub const HEADER_HEIGHT: f64 = 48.0;
/// Upper bound on label-padding refinement rounds in fit-to-width mode.
pub const MAX_LABEL_PADDING_ROUNDS: usize = 8;

/// The intermediate values behind a [`ResolvedGeometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineResolution {
    pub date_range: DateRange,
    pub duration_days: i64,
    pub effective_zoom: f64,
    pub table_width: f64,
    pub timeline_width: f64,
    pub total_width: f64,
    pub total_height: f64,
    pub row_count: usize,
    pub row_height: f64,
    pub header_height: f64,
}

impl TimelineResolution {
    pub fn pixels_per_day(&self) -> f64 {
        BASE_PIXELS_PER_DAY * self.effective_zoom
    }

    pub fn geometry(&self) -> ResolvedGeometry {
        ResolvedGeometry {
            width: round_px(self.total_width),
            height: round_px(self.total_height),
            effective_zoom: self.effective_zoom,
        }
    }
}

fn round_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round() as u32
    } else {
        0
    }
}

/// Longest range label padding may grow to.
///
/// In fit-to-width mode every added day shrinks the zoom, and a smaller zoom needs more days for
/// the same label. Stopping where the zoom would fall below [`MIN_ZOOM`] keeps that feedback
/// bounded; labels that still overflow are clipped. Other modes have a fixed zoom and no cap.
fn max_padded_days(options: &ExportOptions, base_days: i64, table_width: f64) -> Option<i64> {
    match options.zoom {
        ZoomMode::FitToWidth { width } => {
            let share = timeline_share(width, table_width);
            let at_min_zoom = (share / (BASE_PIXELS_PER_DAY * MIN_ZOOM)).floor();
            let at_min_zoom = if at_min_zoom.is_finite() {
                at_min_zoom as i64
            } else {
                0
            };
            Some(base_days.max(at_min_zoom))
        }
        ZoomMode::CurrentView | ZoomMode::Custom { .. } => None,
    }
}

/// The union of `current` and `padded`, with the added days limited to `budget`.
///
/// The left edge takes its share of the budget first.
fn widen_within(current: DateRange, padded: DateRange, budget: Option<i64>) -> DateRange {
    let grow_left = (current.start - padded.start).num_days().max(0);
    let grow_right = (padded.end - current.end).num_days().max(0);
    let (grow_left, grow_right) = match budget {
        Some(budget) => {
            let room = (budget - duration_days(current)).max(0);
            let left = grow_left.min(room);
            (left, grow_right.min(room - left))
        }
        None => (grow_left, grow_right),
    };
    current.padded(grow_left, grow_right)
}

pub fn resolve_dimensions(
    tasks: &[Task],
    options: &ExportOptions,
    column_widths: &ColumnWidths,
    view: &ViewState,
    project_range: Option<DateRange>,
    measurer: &dyn TextMeasurer,
) -> ResolvedGeometry {
    resolve_timeline(
        tasks,
        options,
        column_widths,
        view,
        project_range,
        measurer,
    )
    .geometry()
}

/// Same computation as [`resolve_dimensions`], keeping the intermediate values.
pub fn resolve_timeline(
    tasks: &[Task],
    options: &ExportOptions,
    column_widths: &ColumnWidths,
    view: &ViewState,
    project_range: Option<DateRange>,
    measurer: &dyn TextMeasurer,
) -> TimelineResolution {
    let density = profile(options.density);
    let row_count = flatten_expanded(tasks).len();

    let table_width = estimate_table_width(&options.columns, column_widths, options.density);

    // Provisional range and zoom, without label padding.
    let mut date_range = resolve_date_range(
        options,
        project_range,
        view.visible_range,
        None,
        view.today,
    );
    let mut days = duration_days(date_range);
    let mut effective_zoom = resolve_zoom(options, view.zoom, days, table_width);

    // Label padding depends on the zoom, and in fit-to-width mode the zoom depends on the padded
    // duration. The range only ever widens and is capped by `max_padded_days`, so the loop
    // settles or hits the round limit.
    let wants_label_padding = options.date_range == DateRangeMode::All
        && options.label_position != LabelPosition::Hidden
        && project_range.is_some()
        && !tasks.is_empty();
    let day_budget = max_padded_days(options, duration_days(date_range), table_width);
    if wants_label_padding {
        for round in 0..MAX_LABEL_PADDING_ROUNDS {
            let padding = LabelPadding {
                tasks,
                effective_zoom,
                position: options.label_position,
                font_size: density.font_size,
                milestone_width: density.type_icon_width,
                measurer,
            };
            let padded = resolve_date_range(
                options,
                project_range,
                view.visible_range,
                Some(&padding),
                view.today,
            );
            let next = widen_within(date_range, padded, day_budget);
            if next == date_range {
                break;
            }
            tracing::trace!(round, range = %next, "label padding widened the range");
            date_range = next;
            days = duration_days(date_range);
            effective_zoom = resolve_zoom(options, view.zoom, days, table_width);
        }
    }

    let (total_width, timeline_width) = match options.zoom {
        ZoomMode::FitToWidth { width } => (width, timeline_share(width, table_width)),
        ZoomMode::CurrentView | ZoomMode::Custom { .. } => {
            let timeline = days as f64 * BASE_PIXELS_PER_DAY * effective_zoom;
            (table_width + timeline, timeline)
        }
    };

    let header_height = if options.include_header() {
        HEADER_HEIGHT
    } else {
        0.0
    };
    let total_height = row_count as f64 * density.row_height + header_height;

    tracing::debug!(
        range = %date_range,
        days,
        zoom = effective_zoom,
        table_width,
        timeline_width,
        total_width,
        total_height,
        "resolved export dimensions"
    );

    TimelineResolution {
        date_range,
        duration_days: days,
        effective_zoom,
        table_width,
        timeline_width,
        total_width,
        total_height,
        row_count,
        row_height: density.row_height,
        header_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DeterministicTextMeasurer;
    use chrono::NaiveDate;
    use gantry_core::ColumnKey;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn view() -> ViewState {
        ViewState::new(d(2030, 1, 1)).with_zoom(0.5)
    }

    fn tasks(n: usize) -> Vec<Task> {
        (0..n)
            .map(|i| Task::new(format!("t{i}"), "x", d(2025, 1, 1), d(2025, 1, 31)))
            .collect()
    }

    #[test]
    fn custom_zoom_width_is_table_plus_days() {
        let m = DeterministicTextMeasurer::default();
        let t = tasks(3);
        let o = ExportOptions::default()
            .with_zoom(ZoomMode::Custom { zoom: 2.0 })
            .with_columns([ColumnKey::Duration]);
        let g = resolve_dimensions(
            &t,
            &o,
            &ColumnWidths::new(),
            &view(),
            DateRange::project_span(&t),
            &m,
        );
        // 30 days + 14 padding = 44 days * 25 * 2 = 2200, plus the 80px duration column.
        assert_eq!(g.width, 2280);
        assert_eq!(g.height, 3 * 36 + 48);
        assert_eq!(g.effective_zoom, 2.0);
    }

    #[test]
    fn current_view_zoom_passes_through() {
        let m = DeterministicTextMeasurer::default();
        let t = tasks(1);
        let o = ExportOptions::default().with_columns([]);
        let g = resolve_dimensions(
            &t,
            &o,
            &ColumnWidths::new(),
            &view(),
            DateRange::project_span(&t),
            &m,
        );
        assert_eq!(g.effective_zoom, 0.5);
        assert_eq!(g.width, 44 * 25 / 2);
    }

    #[test]
    fn hidden_labels_skip_the_padding_pass() {
        let m = DeterministicTextMeasurer::default();
        let t = vec![Task::new(
            "a",
            "a very long task name that would overflow at this zoom",
            d(2025, 1, 1),
            d(2025, 1, 2),
        )];
        let o = ExportOptions::default()
            .with_zoom(ZoomMode::Custom { zoom: 0.05 })
            .with_label_position(LabelPosition::Hidden);
        let r = resolve_timeline(
            &t,
            &o,
            &ColumnWidths::new(),
            &view(),
            DateRange::project_span(&t),
            &m,
        );
        assert_eq!(r.duration_days, 15);

        let shown = o.with_label_position(LabelPosition::Right);
        let r2 = resolve_timeline(
            &t,
            &shown,
            &ColumnWidths::new(),
            &view(),
            DateRange::project_span(&t),
            &m,
        );
        assert!(r2.duration_days > 15);
        assert_eq!(r2.date_range.start, r.date_range.start);
    }

    #[test]
    fn fit_to_width_label_padding_stops_at_the_minimum_zoom() {
        let m = DeterministicTextMeasurer::default();
        let t = vec![Task::new(
            "a",
            "a very long task name that would overflow at this zoom",
            d(2025, 1, 1),
            d(2025, 1, 2),
        )];
        // The 520px default table leaves the 100px timeline floor.
        let o = ExportOptions::default()
            .with_zoom(ZoomMode::FitToWidth { width: 300.0 })
            .with_label_position(LabelPosition::Right);
        let r = resolve_timeline(
            &t,
            &o,
            &ColumnWidths::new(),
            &view(),
            DateRange::project_span(&t),
            &m,
        );
        assert_eq!(r.timeline_width, 100.0);
        assert_eq!(r.duration_days, 80);
        assert!((r.effective_zoom - MIN_ZOOM).abs() < 1e-12);
        assert_eq!(r.date_range.start, d(2024, 12, 25));
        assert_eq!(r.date_range.end, d(2025, 3, 15));
    }

    #[test]
    fn fit_to_width_cap_never_trims_the_base_range() {
        let o = ExportOptions::default().with_zoom(ZoomMode::FitToWidth { width: 300.0 });
        assert_eq!(max_padded_days(&o, 500, 520.0), Some(500));
        assert_eq!(max_padded_days(&o, 10, 520.0), Some(80));
        let custom = o.with_zoom(ZoomMode::Custom { zoom: 1.0 });
        assert_eq!(max_padded_days(&custom, 10, 520.0), None);
    }

    #[test]
    fn widening_spends_the_budget_on_the_left_first() {
        let current = DateRange::new(d(2025, 1, 10), d(2025, 1, 20));
        let padded = DateRange::new(d(2025, 1, 1), d(2025, 1, 31));
        let r = widen_within(current, padded, Some(25));
        assert_eq!(r, DateRange::new(d(2025, 1, 1), d(2025, 1, 26)));
        let r = widen_within(current, padded, Some(5));
        assert_eq!(r, current);
        assert_eq!(widen_within(current, padded, None), padded);
    }

    #[test]
    fn empty_snapshot_is_header_only() {
        let m = DeterministicTextMeasurer::default();
        let o = ExportOptions::default();
        let g = resolve_dimensions(&[], &o, &ColumnWidths::new(), &view(), None, &m);
        assert_eq!(g.height, 48);
        let g = resolve_dimensions(
            &[],
            &o.clone().with_header(false),
            &ColumnWidths::new(),
            &view(),
            None,
            &m,
        );
        assert_eq!(g.height, 0);
    }
}
