use crate::models::{ImpactEstimate, ImpactPoint};

/// Fraction of the data span added above and below the y-axis.
const Y_PADDING: f64 = 0.05;

/// Minimum y span so a flat chart still has a visible axis.
const MIN_Y_SPAN: f64 = 0.01;

/// Chart description consumed by the dashboard canvas renderer.
/// Holds data and styling only; drawing happens client-side.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImpactChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: LineSeries,
    pub marker: Marker,
    pub reference: ReferenceLine,
    pub bounds: Bounds,
    pub grid_alpha: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct LineSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub width: f64,
    pub points: Vec<ImpactPoint>,
}

/// Highlighted current point.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Marker {
    pub label: String,
    pub color: &'static str,
    pub x: f64,
    pub y: f64,
}

/// Horizontal line at the unadjusted base return.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReferenceLine {
    pub label: &'static str,
    pub color: &'static str,
    pub dashed: bool,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Smallest box holding every series point, the marker and the
    /// reference line, with vertical padding.
    fn covering(points: &[ImpactPoint], marker: &Marker, reference_y: f64) -> Self {
        let mut x_min = marker.x;
        let mut x_max = marker.x;
        let mut y_min = marker.y.min(reference_y);
        let mut y_max = marker.y.max(reference_y);

        for p in points {
            x_min = x_min.min(p.index_level);
            x_max = x_max.max(p.index_level);
            y_min = y_min.min(p.adjusted_return);
            y_max = y_max.max(p.adjusted_return);
        }

        let span = (y_max - y_min).max(MIN_Y_SPAN);
        Self {
            x_min,
            x_max,
            y_min: y_min - span * Y_PADDING,
            y_max: y_max + span * Y_PADDING,
        }
    }
}

/// Build the chart for a point estimate and its sweep.
pub fn impact_chart(estimate: &ImpactEstimate, points: Vec<ImpactPoint>) -> ImpactChart {
    let params = &estimate.parameters;
    let marker = Marker {
        label: format!("Current VIX={:.1}", params.index_level),
        color: "blue",
        x: params.index_level,
        y: estimate.adjusted_return,
    };
    let bounds = Bounds::covering(&points, &marker, params.base_return);

    ImpactChart {
        title: "Impact of VIX on Market Returns",
        x_label: "VIX Level",
        y_label: "Adjusted Market Return",
        series: LineSeries {
            label: "Adjusted Market Return",
            color: "darkred",
            width: 2.0,
            points,
        },
        marker,
        reference: ReferenceLine {
            label: "Original Market Return",
            color: "gray",
            dashed: true,
            y: params.base_return,
        },
        bounds,
        grid_alpha: 0.3,
    }
}
