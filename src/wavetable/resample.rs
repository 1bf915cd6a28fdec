use crate::contour::Contour;
use crate::math::interpolate::{lerp, lerp_at};
use crate::math::{Point2, TOLERANCE};

use super::{DepthRange, Wavetable};

/// Resamples a contour into a fixed-length wavetable.
///
/// Points are stably sorted by horizontal position, sampled at `table_size`
/// evenly spaced positions between the first and last, linearly
/// interpolated, and normalized through `range`. Positions outside the data
/// clamp to the boundary depth. A contour with no horizontal extent yields a
/// constant table; an empty contour yields silence.
#[derive(Debug)]
pub struct ResampleContour<'a> {
    contour: &'a Contour,
    table_size: usize,
    range: DepthRange,
}

impl<'a> ResampleContour<'a> {
    /// Creates a new resampling against an explicit depth range.
    #[must_use]
    pub fn new(contour: &'a Contour, table_size: usize, range: DepthRange) -> Self {
        Self {
            contour,
            table_size,
            range,
        }
    }

    /// Creates a new resampling normalized against the contour's own range.
    #[must_use]
    pub fn local(contour: &'a Contour, table_size: usize) -> Self {
        let range = DepthRange::of_contour(contour).unwrap_or(DepthRange::new(0.0, 0.0));
        Self::new(contour, table_size, range)
    }

    /// Executes the resampling. The result always has `table_size` samples.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Wavetable {
        let n = self.table_size;
        let mut points: Vec<Point2> = self.contour.points.clone();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
            return Wavetable::zeroed(n);
        };

        if last.x - first.x < TOLERANCE {
            return Wavetable::from_samples(vec![self.range.normalize(first.y); n]);
        }

        let denom = n.saturating_sub(1).max(1) as f64;
        let mut j = 0;
        let samples = (0..n)
            .map(|i| {
                let x = lerp(first.x, last.x, i as f64 / denom);
                let depth = if x <= first.x {
                    first.y
                } else if x >= last.x {
                    last.y
                } else {
                    // Targets increase monotonically, so the bracket only moves forward.
                    while j + 2 < points.len() && points[j + 1].x < x {
                        j += 1;
                    }
                    let (a, b) = (points[j], points[j + 1]);
                    lerp_at(a.x, a.y, b.x, b.y, x)
                };
                self.range.normalize(depth)
            })
            .collect();

        Wavetable::from_samples(samples)
    }
}
