use crate::data::histogram::Histogram;
use crate::data::model::{KickTable, OrbitTable};

// ---------------------------------------------------------------------------
// Plot constants
// ---------------------------------------------------------------------------

/// Bins used for every kick histogram.
pub const HISTOGRAM_BINS: usize = 50;

/// Orbital period window, in days.
pub const PERIOD_BOUNDS: (f64, f64) = (3.0, 400.0);

pub const ECCENTRICITY_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Scatter marker size (area, matplotlib `s` units).
pub const MARKER_SIZE: f32 = 1.0;

// ---------------------------------------------------------------------------
// Figure description – what to draw, independent of the GUI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Log,
}

/// Axis configuration. `bounds` of `None` means auto-fit to the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub label: &'static str,
    pub scale: Scale,
    pub bounds: Option<(f64, f64)>,
}

impl Axis {
    pub fn auto(label: &'static str) -> Self {
        Self {
            label,
            scale: Scale::Linear,
            bounds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FigureKind {
    /// Outline-only histogram.
    StepHistogram(Histogram),
    Scatter {
        points: Vec<[f64; 2]>,
        marker_size: f32,
    },
}

/// One figure: a single plot shown in its own window turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub kind: FigureKind,
    /// Index into the default colour cycle.
    pub color_index: usize,
}

impl Figure {
    fn step_histogram(title: &str, x_label: &'static str, values: &[f64]) -> Self {
        let hist = Histogram::new(values, HISTOGRAM_BINS);
        log::debug!(
            "{title}: {} samples in {} bins over [{}, {}]",
            hist.total(),
            hist.bins(),
            hist.edges[0],
            hist.edges[hist.bins()]
        );
        Figure {
            title: title.to_string(),
            x_axis: Axis::auto(x_label),
            y_axis: Axis::auto("count"),
            kind: FigureKind::StepHistogram(hist),
            color_index: 0,
        }
    }

    fn period_eccentricity(title: &str, orbits: &OrbitTable) -> Self {
        let points: Vec<[f64; 2]> = orbits.points().map(|(p, e)| [p, e]).collect();
        log::debug!("{title}: {} points", points.len());
        let off_axis = orbits.period.iter().filter(|&&p| p <= 0.0).count();
        if off_axis > 0 {
            log::warn!("{title}: {off_axis} non-positive periods cannot be shown on a log axis");
        }
        Figure {
            title: title.to_string(),
            x_axis: Axis {
                label: "period [days]",
                scale: Scale::Log,
                bounds: Some(PERIOD_BOUNDS),
            },
            y_axis: Axis {
                label: "eccentricity",
                scale: Scale::Linear,
                bounds: Some(ECCENTRICITY_BOUNDS),
            },
            kind: FigureKind::Scatter {
                points,
                marker_size: MARKER_SIZE,
            },
            color_index: 0,
        }
    }
}

/// The five figures, in display order: kick strength, azimuthal angle and
/// polar angle histograms, then the orbit and grid period–eccentricity
/// scatter plots.
pub fn build_figures(kicks: &KickTable, orbits: &OrbitTable, grid: &OrbitTable) -> Vec<Figure> {
    vec![
        Figure::step_histogram("Kick strength", "w", &kicks.w),
        Figure::step_histogram("Kick azimuthal angle", "theta", &kicks.theta),
        Figure::step_histogram("Kick polar angle", "phi", &kicks.phi),
        Figure::period_eccentricity("Orbits after kick", orbits),
        Figure::period_eccentricity("Grid of orbits", grid),
    ]
}
