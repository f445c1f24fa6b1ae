use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price::ChartPoint;

/// Fixed logical drawing surface for the price chart.
///
/// All geometry is computed in these units; the frontend scales the
/// viewBox to device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartCanvas {
    pub width: f64,
    pub height: f64,
    /// Inner padding, applied on all four sides.
    pub padding: f64,
}

impl Default for ChartCanvas {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 260.0,
            padding: 36.0,
        }
    }
}

impl ChartCanvas {
    pub fn plot_width(&self) -> f64 {
        self.width - self.padding * 2.0
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.padding * 2.0
    }

    /// y of the bottom edge of the plotting area.
    pub fn baseline_y(&self) -> f64 {
        self.height - self.padding
    }
}

/// Lowest and highest close of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// `None` for an empty series.
    pub fn of(points: &[ChartPoint]) -> Option<Self> {
        let first = points.first()?.close;
        Some(points.iter().skip(1).fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: acc.min.min(p.close),
                max: acc.max.max(p.close),
            },
        ))
    }

    /// `max - min`, floored to 1 for a flat series so the vertical mapping never divides by zero.
    pub fn span(&self) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            1.0
        } else {
            range
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartCoord {
    pub x: f64,
    pub y: f64,
}

/// Renderable line/area geometry for a series of at least two points.
///
/// Derived from the input points on every call; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub canvas: ChartCanvas,
    pub min: f64,
    pub max: f64,
    /// One coordinate per input point, in input order.
    pub coords: Vec<ChartCoord>,
    /// SVG `points` attribute for the line: `"x,y x,y ..."`.
    pub polyline: String,
    /// The polyline closed along the bottom edge, for the filled area under it.
    pub area: String,
}

impl ChartGeometry {
    pub fn x_positions(&self) -> Vec<f64> {
        self.coords.iter().map(|c| c.x).collect()
    }

    pub fn range(&self) -> PriceRange {
        PriceRange {
            min: self.min,
            max: self.max,
        }
    }

    /// Vertical position of an arbitrary close value on this chart.
    pub fn y_for(&self, close: f64) -> f64 {
        let range = self.range();
        self.canvas.baseline_y() - ((close - range.min) / range.span()) * self.canvas.plot_height()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Pointer hover state of a single chart instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<usize>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn set(&mut self, index: usize) {
        self.hovered = Some(index);
    }

    pub fn clear(&mut self) {
        self.hovered = None;
    }

    /// Index of the point to highlight for a series of `len` points.
    ///
    /// Falls back to the last (most recent) point when nothing is hovered
    /// or the hovered index no longer exists.
    pub fn active_index(&self, len: usize) -> Option<usize> {
        match self.hovered {
            Some(i) if i < len => Some(i),
            _ => len.checked_sub(1),
        }
    }
}

/// Everything the frontend needs to draw the hover marker and tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub index: usize,
    pub date: NaiveDate,
    pub close: f64,
    /// Marker position in canvas units.
    pub x: f64,
    pub y: f64,
    /// Horizontal placement as a fraction of the plot width, clamped to `[0.05, 0.95]`.
    pub fraction: f64,
}
