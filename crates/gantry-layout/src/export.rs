//! One entry point per output format.
//!
//! The live preview and the final exporters both call [`resolve_export_layout`]; the named
//! wrappers only exist so call sites read naturally. Paginated documents run the page-fit
//! reconciler first and then go through the very same dimension calculator as image exports.

use crate::columns::column_width;
use crate::dimensions::{TimelineResolution, resolve_timeline};
use crate::model::{ExportLayout, PageLayout, ResolvedColumn};
use crate::page_fit::{printable_area_px, resolve_page_fit_to_width};
use crate::text::TextMeasurer;
use crate::{LayoutOptions, Result};
use gantry_core::{
    ColumnWidths, DateRange, ExportOptions, PageOptions, Task, ViewState, ZoomMode,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Raster,
    Vector,
    Document(PageOptions),
}

impl ExportFormat {
    pub fn page(&self) -> Option<&PageOptions> {
        match self {
            ExportFormat::Document(page) => Some(page),
            ExportFormat::Raster | ExportFormat::Vector => None,
        }
    }
}

/// The inputs shared by preview and export for one chart.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub tasks: &'a [Task],
    pub options: &'a ExportOptions,
    pub column_widths: &'a ColumnWidths,
    pub view: &'a ViewState,
}

impl<'a> ExportRequest<'a> {
    pub fn new(
        tasks: &'a [Task],
        options: &'a ExportOptions,
        column_widths: &'a ColumnWidths,
        view: &'a ViewState,
    ) -> Self {
        Self {
            tasks,
            options,
            column_widths,
            view,
        }
    }

    pub fn project_range(&self) -> Option<DateRange> {
        DateRange::project_span(self.tasks)
    }

    fn timeline(&self, options: &ExportOptions, measurer: &dyn TextMeasurer) -> TimelineResolution {
        resolve_timeline(
            self.tasks,
            options,
            self.column_widths,
            self.view,
            self.project_range(),
            measurer,
        )
    }
}

pub fn resolve_export_layout(
    request: &ExportRequest<'_>,
    format: &ExportFormat,
    measurer: &dyn TextMeasurer,
) -> ExportLayout {
    match format {
        ExportFormat::Raster | ExportFormat::Vector => {
            let timeline = request.timeline(request.options, measurer);
            assemble(request.options, request.column_widths, &timeline, None)
        }
        ExportFormat::Document(page) => {
            let (printable_width, printable_height) = printable_area_px(page);
            let (fit_target, timeline) = if page.fit_to_page {
                let target =
                    resolve_page_fit_to_width(request.options, page, request.column_widths);
                let fitted = request
                    .options
                    .clone()
                    .with_zoom(ZoomMode::FitToWidth { width: target });
                (Some(target), request.timeline(&fitted, measurer))
            } else {
                (None, request.timeline(request.options, measurer))
            };

            let scale = if page.fit_to_page
                && timeline.total_width > 0.0
                && printable_width < timeline.total_width
            {
                printable_width / timeline.total_width
            } else {
                1.0
            };
            let (sheet_width_mm, sheet_height_mm) = page.sheet_mm();
            let page_layout = PageLayout {
                sheet_width_mm,
                sheet_height_mm,
                printable_width_px: printable_width,
                printable_height_px: printable_height,
                fit_target_px: fit_target,
                scale,
                pages_across: pages_for(timeline.total_width * scale, printable_width),
                pages_down: pages_for(timeline.total_height * scale, printable_height),
            };
            tracing::debug!(
                scale,
                pages_across = page_layout.pages_across,
                pages_down = page_layout.pages_down,
                "resolved document pagination"
            );
            assemble(
                request.options,
                request.column_widths,
                &timeline,
                Some(page_layout),
            )
        }
    }
}

fn pages_for(extent: f64, per_page: f64) -> u32 {
    if !(per_page > 0.0 && extent.is_finite() && extent > 0.0) {
        return 1;
    }
    // Sub-pixel remainders from float division must not start a new sheet.
    let pages = ((extent - 1e-6) / per_page).ceil();
    pages.max(1.0) as u32
}

fn assemble(
    options: &ExportOptions,
    column_widths: &ColumnWidths,
    timeline: &TimelineResolution,
    page: Option<PageLayout>,
) -> ExportLayout {
    let columns = options
        .columns
        .iter()
        .map(|&key| ResolvedColumn {
            key,
            width: column_width(key, column_widths, options.density),
        })
        .collect();

    ExportLayout {
        geometry: timeline.geometry(),
        date_range: timeline.date_range,
        duration_days: timeline.duration_days,
        pixels_per_day: timeline.pixels_per_day(),
        table_width: timeline.table_width,
        timeline_width: timeline.timeline_width,
        header_height: timeline.header_height,
        row_height: timeline.row_height,
        row_count: timeline.row_count,
        columns,
        page,
    }
}

/// Layout for the on-screen preview of `format`.
pub fn preview_layout(
    request: &ExportRequest<'_>,
    format: &ExportFormat,
    options: &LayoutOptions,
) -> ExportLayout {
    resolve_export_layout(request, format, options.text_measurer.as_ref())
}

/// Layout for the final artifact of `format`, after boundary validation of the options.
pub fn export_layout(
    request: &ExportRequest<'_>,
    format: &ExportFormat,
    options: &LayoutOptions,
) -> Result<ExportLayout> {
    request.options.validate()?;
    if let Some(page) = format.page() {
        page.validate()?;
    }
    Ok(resolve_export_layout(
        request,
        format,
        options.text_measurer.as_ref(),
    ))
}
