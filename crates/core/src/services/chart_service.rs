use crate::errors::CoreError;
use crate::models::chart::{ChartCanvas, ChartCoord, ChartGeometry, HoverState, PriceRange, Tooltip};
use crate::models::price::ChartPoint;

const TOOLTIP_MIN_FRACTION: f64 = 0.05;
const TOOLTIP_MAX_FRACTION: f64 = 0.95;

/// Computes close-price chart geometry and hover state.
///
/// The core computes all the numbers; the frontend only draws the polyline,
/// the area fill, the marker and the tooltip it is handed.
pub struct ChartService {
    canvas: ChartCanvas,
}

impl ChartService {
    pub fn new(canvas: ChartCanvas) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> ChartCanvas {
        self.canvas
    }

    /// Lay out `points` (oldest first) on the canvas.
    ///
    /// Points are spread evenly from `padding` to `width - padding`; higher
    /// closes sit higher on the chart. Fewer than two points cannot form a
    /// line and are reported as errors so the caller renders a placeholder.
    pub fn geometry(&self, points: &[ChartPoint]) -> Result<ChartGeometry, CoreError> {
        let range = PriceRange::of(points).ok_or(CoreError::EmptySeries)?;
        if points.len() < 2 {
            return Err(CoreError::InsufficientData {
                points: points.len(),
            });
        }

        let c = self.canvas;
        let step_x = c.plot_width() / (points.len() - 1).max(1) as f64;
        let span = range.span();

        let coords: Vec<ChartCoord> = points
            .iter()
            .enumerate()
            .map(|(i, p)| ChartCoord {
                x: c.padding + i as f64 * step_x,
                y: c.baseline_y() - ((p.close - range.min) / span) * c.plot_height(),
            })
            .collect();

        let polyline = coords
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let area = format!(
            "{polyline} {},{} {},{}",
            c.width - c.padding,
            c.baseline_y(),
            c.padding,
            c.baseline_y()
        );

        Ok(ChartGeometry {
            canvas: c,
            min: range.min,
            max: range.max,
            coords,
            polyline,
            area,
        })
    }

    /// Map a device pointer x onto the logical x-axis of the hover capture
    /// area, which spans the plot width starting at `padding`.
    pub fn pointer_to_logical(&self, client_x: f64, rect_left: f64, rect_width: f64) -> f64 {
        if !rect_width.is_finite() || rect_width <= 0.0 {
            return self.canvas.padding;
        }
        let scale_x = self.canvas.plot_width() / rect_width;
        self.canvas.padding + (client_x - rect_left) * scale_x
    }

    /// Index of the position closest to `pointer_x`.
    ///
    /// Linear scan with a strict comparison: on an exact tie the lower index wins.
    pub fn nearest_index(pointer_x: f64, positions: &[f64]) -> Option<usize> {
        let (first, rest) = positions.split_first()?;
        let mut nearest = 0;
        let mut min_diff = (first - pointer_x).abs();
        for (i, x) in rest.iter().enumerate() {
            let diff = (x - pointer_x).abs();
            if diff < min_diff {
                min_diff = diff;
                nearest = i + 1;
            }
        }
        Some(nearest)
    }

    pub fn pointer_move(&self, hover: &mut HoverState, pointer_x: f64, geometry: &ChartGeometry) {
        if let Some(i) = Self::nearest_index(pointer_x, &geometry.x_positions()) {
            hover.set(i);
        }
    }

    pub fn pointer_leave(&self, hover: &mut HoverState) {
        hover.clear();
    }

    /// Horizontal tooltip placement as a fraction of the plot width.
    /// Centered (0.5) when there is no active point.
    pub fn tooltip_fraction(&self, geometry: &ChartGeometry, active: Option<usize>) -> f64 {
        match active.and_then(|i| geometry.coords.get(i)) {
            Some(coord) => ((coord.x - self.canvas.padding) / self.canvas.plot_width())
                .clamp(TOOLTIP_MIN_FRACTION, TOOLTIP_MAX_FRACTION),
            None => 0.5,
        }
    }

    /// Tooltip for the active point: the hovered one, else the most recent.
    pub fn tooltip(
        &self,
        geometry: &ChartGeometry,
        points: &[ChartPoint],
        hover: &HoverState,
    ) -> Option<Tooltip> {
        let len = points.len().min(geometry.len());
        let index = hover.active_index(len)?;
        let point = &points[index];
        let coord = geometry.coords[index];
        Some(Tooltip {
            index,
            date: point.date,
            close: point.close,
            x: coord.x,
            y: geometry.y_for(point.close),
            fraction: self.tooltip_fraction(geometry, Some(index)),
        })
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(ChartCanvas::default())
    }
}
