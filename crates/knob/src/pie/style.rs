use serde::{Deserialize, Serialize};

/// Pie menu geometry in unscaled pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieStyle {
    /// Distance from the center to each label's center.
    pub pie_radius: f64,
    pub icon_radius: f64,
    pub border_thickness: f64,
    /// Width of the ring the labels sit on.
    pub area_thickness: f64,
    /// Pointer distance from the center below which no label is active.
    pub deadzone_radius: f64,
}

impl Default for PieStyle {
    fn default() -> Self {
        Self {
            pie_radius: 120.0,
            icon_radius: 36.0,
            border_thickness: 3.0,
            area_thickness: 84.0,
            deadzone_radius: 40.0,
        }
    }
}

impl PieStyle {
    /// Half the side of the square the whole menu is painted in.
    pub fn widget_radius(&self) -> f64 {
        self.pie_radius + self.icon_radius + self.border_thickness
    }

    /// Outer edge of the ring the labels sit on.
    pub fn outer_radius(&self) -> f64 {
        self.pie_radius + self.area_thickness / 2.0
    }
}
