//! Physical page description for paginated (document) exports.
//!
//! All lengths are millimeters; conversion to pixels happens in the page-fit reconciler.

use crate::{Error, Result};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Height reserved at the top of each sheet when the header band is enabled.
pub const HEADER_BAND_MM: f64 = 10.0;
/// Height reserved at the bottom of each sheet when the footer band is enabled.
pub const FOOTER_BAND_MM: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PageSize {
    /// Portrait `(width, height)` in millimeters.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
            PageSize::Tabloid => (279.4, 431.8),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            PageSize::A3 => Some("a3"),
            PageSize::A4 => Some("a4"),
            PageSize::A5 => Some("a5"),
            PageSize::Letter => Some("letter"),
            PageSize::Legal => Some("legal"),
            PageSize::Tabloid => Some("tabloid"),
            PageSize::Custom { .. } => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(PageSize::A3),
            "a4" => Ok(PageSize::A4),
            "a5" => Ok(PageSize::A5),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            "tabloid" | "ledger" => Ok(PageSize::Tabloid),
            other => Err(Error::InvalidPage {
                message: format!("unknown page size {other:?}"),
            }),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => {
                let (width, height) = self.dimensions_mm();
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", &width)?;
                map.serialize_entry("height", &height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Name(String),
            Mm { width: f64, height: f64 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Name(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Mm { width, height } => Ok(PageSize::Custom {
                width_mm: width,
                height_mm: height,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarginPreset {
    None,
    Narrow,
    #[default]
    Normal,
    Wide,
}

impl MarginPreset {
    pub fn mm(self) -> f64 {
        match self {
            MarginPreset::None => 0.0,
            MarginPreset::Narrow => 6.35,
            MarginPreset::Normal => 12.7,
            MarginPreset::Wide => 25.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Margins {
    Preset(MarginPreset),
    Explicit {
        top: f64,
        right: f64,
        bottom: f64,
        left: f64,
    },
}

impl Default for Margins {
    fn default() -> Self {
        Margins::Preset(MarginPreset::default())
    }
}

impl Margins {
    pub fn uniform(mm: f64) -> Self {
        Margins::Explicit {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }

    /// `(top, right, bottom, left)` in millimeters.
    pub fn sides_mm(&self) -> (f64, f64, f64, f64) {
        match *self {
            Margins::Preset(p) => {
                let v = p.mm();
                (v, v, v, v)
            }
            Margins::Explicit {
                top,
                right,
                bottom,
                left,
            } => (top, right, bottom, left),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageOptions {
    pub size: PageSize,
    pub orientation: Orientation,
    pub margins: Margins,
    pub header: bool,
    pub footer: bool,
    /// Scale the chart onto a single sheet width instead of tiling it across sheets.
    pub fit_to_page: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            size: PageSize::default(),
            orientation: Orientation::default(),
            margins: Margins::default(),
            header: false,
            footer: false,
            fit_to_page: true,
        }
    }
}

impl PageOptions {
    pub fn with_size(mut self, size: PageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_header_footer(mut self, header: bool, footer: bool) -> Self {
        self.header = header;
        self.footer = footer;
        self
    }

    pub fn with_fit_to_page(mut self, fit_to_page: bool) -> Self {
        self.fit_to_page = fit_to_page;
        self
    }

    /// Sheet `(width, height)` in millimeters after applying orientation.
    pub fn sheet_mm(&self) -> (f64, f64) {
        let (w, h) = self.size.dimensions_mm();
        let (short, long) = if w <= h { (w, h) } else { (h, w) };
        match self.orientation {
            Orientation::Landscape => (long, short),
            Orientation::Portrait => (short, long),
        }
    }

    /// Sheet width minus the left and right margins. Header/footer bands only shrink the height.
    pub fn printable_width_mm(&self) -> f64 {
        let (w, _) = self.sheet_mm();
        let (_, right, _, left) = self.margins.sides_mm();
        (w - left - right).max(0.0)
    }

    pub fn printable_height_mm(&self) -> f64 {
        let (_, h) = self.sheet_mm();
        let (top, _, bottom, _) = self.margins.sides_mm();
        let mut bands = 0.0;
        if self.header {
            bands += HEADER_BAND_MM;
        }
        if self.footer {
            bands += FOOTER_BAND_MM;
        }
        (h - top - bottom - bands).max(0.0)
    }

    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.size.dimensions_mm();
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(Error::InvalidPage {
                message: format!("page dimensions must be positive, got {w}x{h}mm"),
            });
        }
        let (top, right, bottom, left) = self.margins.sides_mm();
        if [top, right, bottom, left]
            .iter()
            .any(|m| !(m.is_finite() && *m >= 0.0))
        {
            return Err(Error::InvalidPage {
                message: "margins must be finite and non-negative".to_string(),
            });
        }
        if self.printable_width_mm() <= 0.0 || self.printable_height_mm() <= 0.0 {
            return Err(Error::InvalidPage {
                message: "margins and bands leave no printable area".to_string(),
            });
        }
        Ok(())
    }
}
