#![forbid(unsafe_code)]

//! `gantry` resolves the geometry of Gantt chart exports without a UI.
//!
//! The same call produces the live preview size and the size of the written PNG, SVG or PDF,
//! so the dialog never promises a layout the exporter does not deliver.
//!
//! # Features
//!
//! - `layout`: enable the resolution engine (`gantry::layout`)

pub use gantry_core::*;

#[cfg(feature = "layout")]
pub mod layout {
    pub use gantry_layout::model::{ExportLayout, PageLayout, ResolvedColumn, ResolvedGeometry};
    pub use gantry_layout::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use gantry_layout::zoom::{MAX_ZOOM, MIN_ZOOM, clamp_zoom, format_zoom_percent};
    pub use gantry_layout::{
        ExportFormat, ExportRequest, LayoutOptions, export_layout, preview_layout,
        resolve_dimensions, resolve_export_layout,
    };

    use chrono::NaiveDate;
    use gantry_core::{
        ColumnWidths, DateRange, ExportConfig, ExportOptions, PageOptions, Task, ViewState,
        flatten_expanded,
    };
    use std::str::FromStr;
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] gantry_core::Error),
        #[error(transparent)]
        Layout(#[from] gantry_layout::Error),
        #[error("unknown output format {value:?} (expected png, svg or pdf)")]
        UnknownFormat { value: String },
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Output family of an export, before page options are attached.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum OutputKind {
        #[default]
        Raster,
        Vector,
        Document,
    }

    impl OutputKind {
        pub fn with_page(self, page: PageOptions) -> ExportFormat {
            match self {
                OutputKind::Raster => ExportFormat::Raster,
                OutputKind::Vector => ExportFormat::Vector,
                OutputKind::Document => ExportFormat::Document(page),
            }
        }
    }

    impl FromStr for OutputKind {
        type Err = HeadlessError;

        fn from_str(s: &str) -> Result<Self> {
            match s.trim().to_ascii_lowercase().as_str() {
                "png" | "jpg" | "jpeg" | "raster" => Ok(OutputKind::Raster),
                "svg" | "vector" => Ok(OutputKind::Vector),
                "pdf" | "document" => Ok(OutputKind::Document),
                _ => Err(HeadlessError::UnknownFormat {
                    value: s.to_string(),
                }),
            }
        }
    }

    /// Content-fitted widths for `options.columns`, for callers that auto-size the table.
    pub fn fit_columns(
        tasks: &[Task],
        options: &ExportOptions,
        measurer: &dyn TextMeasurer,
    ) -> ColumnWidths {
        let rows = flatten_expanded(tasks);
        gantry_layout::fit_column_widths(
            &options.columns,
            &rows,
            options.density,
            &options.date_format,
            measurer,
        )
    }

    /// Convenience wrapper that bundles a site config, a text measurer and a pinned "today".
    ///
    /// Preview and export callers each hold one of these (or share it); both end up in
    /// [`resolve_export_layout`] with identical arguments. All work is CPU-bound and does not
    /// perform I/O.
    #[derive(Clone, Debug, Default)]
    pub struct HeadlessExporter {
        pub site_config: ExportConfig,
        pub layout: LayoutOptions,
        pub today: Option<NaiveDate>,
    }

    impl HeadlessExporter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_site_config(mut self, site_config: ExportConfig) -> Self {
            self.site_config = site_config;
            self
        }

        pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
            self.layout.text_measurer = measurer;
            self
        }

        pub fn with_today(mut self, today: NaiveDate) -> Self {
            self.today = Some(today);
            self
        }

        /// Site defaults with `overrides` merged on top.
        pub fn effective_config(&self, overrides: &ExportConfig) -> ExportConfig {
            ExportConfig::layered(&self.site_config, overrides)
        }

        /// The live view an export is resolved against.
        ///
        /// "Today" comes from [`Self::with_today`], then the config's `today` key, then the
        /// local clock.
        pub fn view_state(
            &self,
            config: &ExportConfig,
            zoom: f64,
            visible_range: Option<DateRange>,
        ) -> Result<ViewState> {
            let today = match self.today {
                Some(today) => today,
                None => match config.fixed_today()? {
                    Some(today) => today,
                    None => ViewState::today_local().today,
                },
            };
            Ok(ViewState::new(today)
                .with_zoom(zoom)
                .with_visible_range(visible_range))
        }

        pub fn preview(&self, request: &ExportRequest<'_>, format: &ExportFormat) -> ExportLayout {
            preview_layout(request, format, &self.layout)
        }

        pub fn export(
            &self,
            request: &ExportRequest<'_>,
            format: &ExportFormat,
        ) -> Result<ExportLayout> {
            Ok(export_layout(request, format, &self.layout)?)
        }

        pub fn fit_columns(&self, tasks: &[Task], options: &ExportOptions) -> ColumnWidths {
            fit_columns(tasks, options, self.layout.text_measurer.as_ref())
        }

        /// Reads `export`/`page` sections from the layered config and resolves the export layout.
        pub fn export_with_config(
            &self,
            tasks: &[Task],
            overrides: &ExportConfig,
            kind: OutputKind,
            column_widths: &ColumnWidths,
            view: &ViewState,
        ) -> Result<ExportLayout> {
            let config = self.effective_config(overrides);
            let options = config.export_options()?;
            let format = match kind {
                OutputKind::Document => kind.with_page(config.page_options()?),
                OutputKind::Raster | OutputKind::Vector => kind.with_page(PageOptions::default()),
            };
            tracing::debug!(?kind, tasks = tasks.len(), "resolving export from config");
            let request = ExportRequest::new(tasks, &options, column_widths, view);
            self.export(&request, &format)
        }
    }
}
