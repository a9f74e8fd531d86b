// ---------------------------------------------------------------------------
// Fixed-count histogram with equal-width bins
// ---------------------------------------------------------------------------

/// Equal-width histogram over the finite range of a sample.
///
/// Binning rules:
/// * non-finite samples are skipped
/// * the range is `[min, max]` of the remaining samples, widened to
///   `[v - 0.5, v + 0.5]` when all samples are equal and `[0, 1]` when
///   there are none
/// * bins are half-open `[lo, hi)`, except the last which is closed
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` monotonically increasing edges.
    pub edges: Vec<f64>,
    /// One count per bin.
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = finite_range(values);

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();
        edges[bins] = hi;

        let mut counts = vec![0u64; bins];
        for &v in values.iter().filter(|v| v.is_finite()) {
            counts[bin_index(&edges, width, v)] += 1;
        }

        Histogram { edges, counts }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Number of samples that landed in a bin.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Unfilled step outline: starts and ends on the baseline, rises and
    /// falls at every bin edge.
    pub fn step_outline(&self) -> Vec<[f64; 2]> {
        let mut points = Vec::with_capacity(2 * self.counts.len() + 2);
        points.push([self.edges[0], 0.0]);
        for (i, &count) in self.counts.iter().enumerate() {
            let height = count as f64;
            points.push([self.edges[i], height]);
            points.push([self.edges[i + 1], height]);
        }
        if let Some(&last) = self.edges.last() {
            points.push([last, 0.0]);
        }
        points
    }
}

/// Bin of `v` (inside `[edges[0], edges[bins]]`). The division is only a
/// first guess; the edges decide, so a value equal to an interior edge
/// always opens the upper bin.
fn bin_index(edges: &[f64], width: f64, v: f64) -> usize {
    let last = edges.len() - 2;
    let mut idx = (((v - edges[0]) / width) as usize).min(last);
    if idx > 0 && v < edges[idx] {
        idx -= 1;
    } else if idx < last && v >= edges[idx + 1] {
        idx += 1;
    }
    idx
}

fn finite_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        (0.0, 1.0)
    } else if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}
