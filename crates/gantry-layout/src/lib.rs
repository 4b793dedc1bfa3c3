#![forbid(unsafe_code)]

//! Export layout resolution for gantry (headless).
//!
//! Turns a task snapshot, [`gantry_core::ExportOptions`] and the live [`gantry_core::ViewState`]
//! into the canvas size, effective zoom and date window an exporter draws with. Preview and
//! export share [`export::resolve_export_layout`], so what the dialog shows is what gets written.

pub mod columns;
pub mod date_range;
pub mod density;
pub mod dimensions;
pub mod export;
pub mod model;
pub mod page_fit;
pub mod text;
pub mod zoom;

pub use columns::{estimate_column_width, estimate_table_width, fit_column_widths};
pub use date_range::{LabelPadding, duration_days, fallback_range, resolve_date_range};
pub use dimensions::{TimelineResolution, resolve_dimensions, resolve_timeline};
pub use export::{
    ExportFormat, ExportRequest, export_layout, preview_layout, resolve_export_layout,
};
pub use model::{ExportLayout, PageLayout, ResolvedColumn, ResolvedGeometry};
pub use page_fit::{printable_area_px, resolve_page_fit_to_width};
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
pub use zoom::{clamp_zoom, format_zoom_percent, resolve_zoom};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] gantry_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions").finish_non_exhaustive()
    }
}
