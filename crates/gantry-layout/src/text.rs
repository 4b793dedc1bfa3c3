//! Text metrics seam.
//!
//! The engine never shapes text itself; column widths and label padding go through
//! [`TextMeasurer`] so hosts can plug in real font metrics.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 13.0,
            bold: false,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// The font-metrics primitive. Implementations must be deterministic for a given text/style pair.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Pixel width of `text` at `font_size` in the default family.
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        self.measure(text, &TextStyle::sized(font_size)).width
    }
}

/// Font-free measurer: every terminal column of a line counts as `char_width_factor` em.
///
/// East Asian wide characters count as two columns (via `unicode-width`), so CJK task names get
/// roughly the room a real font would give them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            line_height_factor: 1.2,
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let font_size = style.font_size.max(1.0);
        let (columns, line_count) = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).width())
            .fold((0_usize, 0_usize), |(widest, n), w| (widest.max(w), n + 1));

        TextMetrics {
            width: columns as f64 * font_size * self.char_width_factor,
            height: line_count as f64 * font_size * self.line_height_factor,
            line_count,
        }
    }
}

#[cfg(test)]
mod tests;
