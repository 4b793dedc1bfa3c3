use gantry_core::{ColumnKey, DateRange};
use serde::{Deserialize, Serialize};

/// Final canvas size of an export plus the zoom its timeline is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGeometry {
    pub width: u32,
    pub height: u32,
    pub effective_zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedColumn {
    pub key: ColumnKey,
    pub width: f64,
}

/// Sheet metrics of a paginated export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub sheet_width_mm: f64,
    pub sheet_height_mm: f64,
    pub printable_width_px: f64,
    pub printable_height_px: f64,
    /// The fit-to-width target handed to the dimension calculator, when fitting to the page.
    pub fit_target_px: Option<f64>,
    /// Factor applied to the chart when placing it on the sheet (`<= 1`).
    pub scale: f64,
    pub pages_across: u32,
    pub pages_down: u32,
}

/// Everything a renderer or encoder needs to lay out one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLayout {
    pub geometry: ResolvedGeometry,
    pub date_range: DateRange,
    pub duration_days: i64,
    pub pixels_per_day: f64,
    pub table_width: f64,
    pub timeline_width: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub row_count: usize,
    pub columns: Vec<ResolvedColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageLayout>,
}
