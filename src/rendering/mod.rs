//! Chart rendering: time axis, scene layout, SVG painting, rasterization

pub mod axis;
pub mod layout;
pub mod paint;
#[cfg(feature = "raster")]
pub mod raster;

use serde::Serialize;

/// Axis-aligned rectangle in page pixels, origin at the top left
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// A fully painted chart: page pixel dimensions plus the SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub width: u32,
    pub height: u32,
    pub svg: String,
}

impl RenderedChart {
    /// The SVG document as bytes, ready to write to disk
    pub fn svg_bytes(&self) -> Vec<u8> {
        self.svg.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 60.0);
        assert_eq!(r.center_y(), 40.0);
    }
}
