use crate::error::{RenderError, Result};

/// Points per inch, used to turn point sizes into pixels at a given DPI
pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Fruchterman-Reingold force-directed placement
    Spring,
    /// Evenly spaced on a circle, in node insertion order
    Circular,
}

impl LayoutKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spring" | "force" => Some(LayoutKind::Spring),
            "circular" | "circle" => Some(LayoutKind::Circular),
            _ => None,
        }
    }
}

/// Options for laying out and rasterizing a topology
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    pub dpi: u32,
    /// Label size in points
    pub font_size: f64,
    /// Spreads nodes apart. The canvas grows by the same factor while node
    /// and label sizes stay fixed.
    pub scale: f64,
    pub layout: LayoutKind,
    /// Seed for the spring layout. `None` gives a different picture each run.
    pub seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width_in: 6.4,
            height_in: 4.8,
            dpi: 100,
            font_size: 12.0,
            scale: 1.0,
            layout: LayoutKind::Spring,
            seed: None,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width_in),
            ("height", self.height_in),
            ("font size", self.font_size),
            ("scale", self.scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(RenderError::InvalidOptions(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.dpi == 0 {
            return Err(RenderError::InvalidOptions("dpi must be positive".to_string()));
        }
        let (width, height) = self.pixel_size();
        if width > 20_000 || height > 20_000 {
            return Err(RenderError::InvalidOptions(format!(
                "image of {}x{} pixels is too large",
                width, height
            )));
        }
        let font_px = self.points_to_pixels(self.font_size);
        if font_px > height as f64 {
            return Err(RenderError::InvalidOptions(format!(
                "font size of {}pt ({:.0}px) does not fit a {}px tall image",
                self.font_size, font_px, height
            )));
        }
        Ok(())
    }

    /// Output image size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let dots = self.dpi as f64 * self.scale;
        (
            (self.width_in * dots).round().max(1.0) as u32,
            (self.height_in * dots).round().max(1.0) as u32,
        )
    }

    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }
}
