use crate::{Error, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Smallest zoom a user can pick (5%).
pub const MIN_ZOOM: f64 = 0.05;
/// Largest zoom a user can pick (300%).
pub const MAX_ZOOM: f64 = 3.0;

/// How the export chooses its timeline zoom.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ZoomMode {
    /// Reuse whatever zoom the interactive chart is at.
    #[default]
    CurrentView,
    /// An explicit ratio where `1.0` is 100%.
    Custom { zoom: f64 },
    /// Back-solve the zoom so table + timeline add up to `width` pixels.
    FitToWidth { width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DateRangeMode {
    #[default]
    All,
    Visible,
    Custom {
        #[serde(default)]
        start: Option<NaiveDate>,
        #[serde(default)]
        end: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Name,
    StartDate,
    EndDate,
    Duration,
    Progress,
    Color,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 6] = [
        ColumnKey::Name,
        ColumnKey::StartDate,
        ColumnKey::EndDate,
        ColumnKey::Duration,
        ColumnKey::Progress,
        ColumnKey::Color,
    ];

    pub fn header_label(self) -> &'static str {
        match self {
            ColumnKey::Name => "Task Name",
            ColumnKey::StartDate => "Start",
            ColumnKey::EndDate => "End",
            ColumnKey::Duration => "Duration",
            ColumnKey::Progress => "Progress",
            ColumnKey::Color => "",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::Name => "name",
            ColumnKey::StartDate => "startDate",
            ColumnKey::EndDate => "endDate",
            ColumnKey::Duration => "duration",
            ColumnKey::Progress => "progress",
            ColumnKey::Color => "color",
        }
    }
}

impl FromStr for ColumnKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        ColumnKey::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::InvalidOptions {
                message: format!("unknown column {key:?}"),
            })
    }
}

/// Per-column pixel widths chosen by the user (drag-resized) or by a content-fit pass.
pub type ColumnWidths = IndexMap<ColumnKey, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Density {
    Compact,
    #[default]
    Normal,
    Comfortable,
}

impl FromStr for Density {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Density::Compact),
            "normal" => Ok(Density::Normal),
            "comfortable" => Ok(Density::Comfortable),
            other => Err(Error::InvalidOptions {
                message: format!("unknown density {other:?}"),
            }),
        }
    }
}

/// Where task names are drawn relative to their bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelPosition {
    /// Inside the bar; labels that do not fit spill to the right.
    Inside,
    Left,
    #[default]
    Right,
    Hidden,
}

/// Optional chart layers. Only `header` affects geometry; the rest are passed through to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartLayers {
    pub grid: bool,
    pub weekends: bool,
    pub holidays: bool,
    pub dependencies: bool,
    pub today_marker: bool,
    pub header: bool,
}

impl Default for ChartLayers {
    fn default() -> Self {
        Self {
            grid: true,
            weekends: true,
            holidays: true,
            dependencies: true,
            today_marker: true,
            header: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub zoom: ZoomMode,
    pub date_range: DateRangeMode,
    pub columns: Vec<ColumnKey>,
    pub density: Density,
    pub label_position: LabelPosition,
    pub layers: ChartLayers,
    /// strftime pattern for the start/end columns.
    pub date_format: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            zoom: ZoomMode::default(),
            date_range: DateRangeMode::default(),
            columns: vec![
                ColumnKey::Name,
                ColumnKey::StartDate,
                ColumnKey::EndDate,
                ColumnKey::Duration,
            ],
            density: Density::default(),
            label_position: LabelPosition::default(),
            layers: ChartLayers::default(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl ExportOptions {
    pub fn with_zoom(mut self, zoom: ZoomMode) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_date_range(mut self, date_range: DateRangeMode) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnKey>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn with_label_position(mut self, label_position: LabelPosition) -> Self {
        self.label_position = label_position;
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.layers.header = header;
        self
    }

    pub fn include_header(&self) -> bool {
        self.layers.header
    }

    /// Boundary check for options coming from config files or the command line.
    ///
    /// The resolution pipeline itself never calls this; it maps every input to a defined output.
    pub fn validate(&self) -> Result<()> {
        match self.zoom {
            ZoomMode::Custom { zoom } if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) => {
                return Err(invalid(format!(
                    "zoom must be between {MIN_ZOOM} and {MAX_ZOOM}, got {zoom}"
                )));
            }
            ZoomMode::FitToWidth { width } if !(width.is_finite() && width > 0.0) => {
                return Err(invalid(format!(
                    "fit-to-width target must be a positive pixel width, got {width}"
                )));
            }
            _ => {}
        }

        if let DateRangeMode::Custom {
            start: Some(start),
            end: Some(end),
        } = self.date_range
        {
            if end < start {
                return Err(invalid(format!(
                    "custom date range ends before it starts ({start}..{end})"
                )));
            }
        }

        for (idx, key) in self.columns.iter().enumerate() {
            if self.columns[..idx].contains(key) {
                return Err(invalid(format!("column {:?} selected twice", key.as_str())));
            }
        }

        if self.date_format.trim().is_empty() {
            return Err(invalid("date format must not be empty".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidOptions { message }
}
