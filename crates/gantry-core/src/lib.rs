#![forbid(unsafe_code)]

//! Data model for the gantry export layout engine (headless).
//!
//! Design goals:
//! - plain, immutable input records (tasks, export options, page options)
//! - closed enums for every "mode" field so unknown values fail at the deserialization boundary
//! - deterministic inputs: "today" is injected through [`ViewState`], never read implicitly

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod options;
pub mod page;
pub mod time;

pub use config::ExportConfig;
pub use error::{Error, Result};
pub use hierarchy::{FlatTask, flatten_expanded};
pub use model::{Task, TaskKind, validate_tasks};
pub use options::{
    ChartLayers, ColumnKey, ColumnWidths, DateRangeMode, Density, ExportOptions, LabelPosition,
    ZoomMode,
};
pub use page::{MarginPreset, Margins, Orientation, PageOptions, PageSize};
pub use time::DateRange;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Live-view facts read by the engine.
///
/// Every value the resolution pipeline would otherwise pull from ambient state (the zoom the
/// interactive chart happens to be at, the measured viewport, the current date) lives here so a
/// resolution call is a pure function of its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub zoom: f64,
    #[serde(default)]
    pub visible_range: Option<DateRange>,
    pub today: NaiveDate,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            zoom: 1.0,
            visible_range: None,
            today,
        }
    }

    /// Uses the local calendar date as "today".
    pub fn today_local() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_visible_range(mut self, range: Option<DateRange>) -> Self {
        self.visible_range = range;
        self
    }
}
