use gantry_core::{ExportOptions, ZoomMode};

pub use gantry_core::options::{MAX_ZOOM, MIN_ZOOM};

/// 100% zoom: one calendar day is 25px wide.
pub const BASE_PIXELS_PER_DAY: f64 = 25.0;
/// The timeline never shrinks below this many pixels in fit-to-width mode.
pub const MIN_TIMELINE_WIDTH: f64 = 100.0;

/// The timeline's share of a fit-to-width total.
pub fn timeline_share(fit_width: f64, table_width: f64) -> f64 {
    (fit_width - table_width).max(MIN_TIMELINE_WIDTH)
}

/// The zoom the export lays its timeline out at.
///
/// Not clamped: use [`clamp_zoom`] where the value comes straight from user input.
pub fn resolve_zoom(
    options: &ExportOptions,
    current_view_zoom: f64,
    duration_days: i64,
    table_width: f64,
) -> f64 {
    match options.zoom {
        ZoomMode::CurrentView => current_view_zoom,
        ZoomMode::Custom { zoom } => zoom,
        ZoomMode::FitToWidth { width } => {
            if duration_days <= 0 {
                return 1.0;
            }
            timeline_share(width, table_width) / (duration_days as f64 * BASE_PIXELS_PER_DAY)
        }
    }
}

/// Clamps a user-entered zoom to the supported 5%..300% range. Non-finite input becomes 100%.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if !zoom.is_finite() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Zoom indicator text shown next to the preview, e.g. `"37%"`.
pub fn format_zoom_percent(zoom: f64) -> String {
    format!("{}%", (zoom * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(width: f64) -> ExportOptions {
        ExportOptions::default().with_zoom(ZoomMode::FitToWidth { width })
    }

    #[test]
    fn current_view_and_custom_pass_through() {
        let o = ExportOptions::default();
        assert_eq!(resolve_zoom(&o, 0.37, 10, 500.0), 0.37);
        let o = o.with_zoom(ZoomMode::Custom { zoom: 2.5 });
        assert_eq!(resolve_zoom(&o, 0.37, 10, 500.0), 2.5);
        // No clamping inside the resolver.
        let o = ExportOptions::default().with_zoom(ZoomMode::Custom { zoom: 9.0 });
        assert_eq!(resolve_zoom(&o, 1.0, 10, 0.0), 9.0);
    }

    #[test]
    fn fit_to_width_divides_timeline_share_by_days() {
        // (1300 - 300) / (40 * 25) = 1.0
        assert_eq!(resolve_zoom(&fit(1300.0), 0.5, 40, 300.0), 1.0);
        // (800 - 300) / (10 * 25) = 2.0
        assert_eq!(resolve_zoom(&fit(800.0), 0.5, 10, 300.0), 2.0);
    }

    #[test]
    fn fit_to_width_with_no_duration_is_exactly_one() {
        for days in [0, -1, -365] {
            assert_eq!(resolve_zoom(&fit(1000.0), 0.2, days, 0.0), 1.0);
        }
    }

    #[test]
    fn oversized_table_floors_timeline_share() {
        assert_eq!(timeline_share(400.0, 900.0), 100.0);
        assert_eq!(resolve_zoom(&fit(400.0), 1.0, 4, 900.0), 1.0);
    }

    #[test]
    fn clamp_zoom_bounds_user_input() {
        assert_eq!(clamp_zoom(0.01), MIN_ZOOM);
        assert_eq!(clamp_zoom(5.0), MAX_ZOOM);
        assert_eq!(clamp_zoom(1.5), 1.5);
        assert_eq!(clamp_zoom(f64::NAN), 1.0);
    }

    #[test]
    fn percent_label_rounds() {
        assert_eq!(format_zoom_percent(0.374), "37%");
        assert_eq!(format_zoom_percent(1.0), "100%");
    }
}
