//! Translates a physical sheet into the fit-to-width pixel target used by image exports.

use crate::columns::estimate_table_width;
use crate::zoom::MIN_TIMELINE_WIDTH;
use gantry_core::{ColumnWidths, ExportOptions, PageOptions};

/// CSS reference resolution: 96 px per inch.
pub const PX_PER_MM: f64 = 96.0 / 25.4;

pub fn mm_to_px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

/// Printable sheet area in whole pixels, `(width, height)`.
pub fn printable_area_px(page: &PageOptions) -> (f64, f64) {
    (
        mm_to_px(page.printable_width_mm()).floor(),
        mm_to_px(page.printable_height_mm()).floor(),
    )
}

/// The total width the dimension calculator must fit so the chart fills one sheet width.
///
/// Normally the printable width itself. When the selected columns leave less than the minimum
/// timeline width, the target grows to `table + 100px` and the document writer scales the chart
/// down onto the sheet instead.
pub fn resolve_page_fit_to_width(
    options: &ExportOptions,
    page: &PageOptions,
    column_widths: &ColumnWidths,
) -> f64 {
    let (printable_width, _) = printable_area_px(page);
    let table_width = estimate_table_width(&options.columns, column_widths, options.density);
    let target = printable_width.max(table_width + MIN_TIMELINE_WIDTH);
    tracing::debug!(
        printable_width,
        table_width,
        target,
        orientation = ?page.orientation,
        "resolved page fit target"
    );
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::{ColumnKey, Margins, Orientation, PageSize};

    #[test]
    fn a4_landscape_without_margins() {
        let page = PageOptions::default()
            .with_size(PageSize::A4)
            .with_orientation(Orientation::Landscape)
            .with_margins(Margins::uniform(0.0));
        // 297mm at 96dpi = 1122.52px
        assert_eq!(printable_area_px(&page), (1122.0, 793.0));
        let o = ExportOptions::default().with_columns([]);
        assert_eq!(
            resolve_page_fit_to_width(&o, &page, &ColumnWidths::new()),
            1122.0
        );
    }

    #[test]
    fn wide_tables_raise_the_target() {
        let page = PageOptions::default()
            .with_size(PageSize::A5)
            .with_orientation(Orientation::Portrait);
        let mut widths = ColumnWidths::new();
        widths.insert(ColumnKey::Name, 900.0);
        let o = ExportOptions::default().with_columns([ColumnKey::Name]);
        assert_eq!(resolve_page_fit_to_width(&o, &page, &widths), 1000.0);
    }

    #[test]
    fn one_inch_is_96px() {
        assert!((mm_to_px(25.4) - 96.0).abs() < 1e-9);
    }
}
