use gantry_core::{ColumnKey, Density};

/// Row and column sizing for one density preset. All values are CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityProfile {
    pub row_height: f64,
    pub font_size: f64,
    pub header_font_size: f64,
    pub cell_padding_x: f64,
    pub indent_per_level: f64,
    pub expand_control_width: f64,
    pub type_icon_width: f64,
    pub element_gap: f64,
    pub color_swatch_width: f64,
    pub name_width: f64,
    pub date_width: f64,
    pub duration_width: f64,
    pub progress_width: f64,
}

impl DensityProfile {
    /// The width a column gets before any content-fit pass has run.
    pub fn default_column_width(&self, column: ColumnKey) -> f64 {
        match column {
            ColumnKey::Name => self.name_width,
            ColumnKey::StartDate | ColumnKey::EndDate => self.date_width,
            ColumnKey::Duration => self.duration_width,
            ColumnKey::Progress => self.progress_width,
            ColumnKey::Color => self.color_swatch_width,
        }
    }
}

pub const COMPACT: DensityProfile = DensityProfile {
    row_height: 28.0,
    font_size: 11.0,
    header_font_size: 11.0,
    cell_padding_x: 6.0,
    indent_per_level: 12.0,
    expand_control_width: 12.0,
    type_icon_width: 12.0,
    element_gap: 4.0,
    color_swatch_width: 24.0,
    name_width: 200.0,
    date_width: 90.0,
    duration_width: 70.0,
    progress_width: 70.0,
};

pub const NORMAL: DensityProfile = DensityProfile {
    row_height: 36.0,
    font_size: 13.0,
    header_font_size: 12.0,
    cell_padding_x: 8.0,
    indent_per_level: 16.0,
    expand_control_width: 14.0,
    type_icon_width: 14.0,
    element_gap: 4.0,
    color_swatch_width: 28.0,
    name_width: 240.0,
    date_width: 100.0,
    duration_width: 80.0,
    progress_width: 80.0,
};

pub const COMFORTABLE: DensityProfile = DensityProfile {
    row_height: 44.0,
    font_size: 14.0,
    header_font_size: 13.0,
    cell_padding_x: 12.0,
    indent_per_level: 20.0,
    expand_control_width: 16.0,
    type_icon_width: 16.0,
    element_gap: 6.0,
    color_swatch_width: 32.0,
    name_width: 280.0,
    date_width: 110.0,
    duration_width: 90.0,
    progress_width: 90.0,
};

pub fn profile(density: Density) -> &'static DensityProfile {
    match density {
        Density::Compact => &COMPACT,
        Density::Normal => &NORMAL,
        Density::Comfortable => &COMFORTABLE,
    }
}
