mod resample;

pub use resample::ResampleContour;

use crate::contour::Contour;
use crate::math::interpolate::{min_max, to_bipolar};

/// Default number of samples per wavetable.
pub const DEFAULT_TABLE_SIZE: usize = 512;

/// One period of a waveform: a fixed-length run of samples in `[-1, 1]`.
///
/// Tables are produced whole and never edited; a new result replaces the
/// old table entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    samples: Vec<f64>,
}

impl Wavetable {
    /// A silent table of `len` samples.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// Wraps samples that are already known to lie in `[-1, 1]`.
    #[must_use]
    pub(crate) fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns `true` if every sample is exactly zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|s| *s == 0.0)
    }
}

/// Depth interval mapped onto the amplitude range `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub min: f64,
    pub max: f64,
}

impl DepthRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Depth range of a single contour.
    #[must_use]
    pub fn of_contour(contour: &Contour) -> Option<Self> {
        min_max(contour.points.iter().map(|p| p.y)).map(|(min, max)| Self { min, max })
    }

    /// Depth range across several contours.
    #[must_use]
    pub fn of_contours<'a>(contours: impl IntoIterator<Item = &'a Contour>) -> Option<Self> {
        min_max(
            contours
                .into_iter()
                .flat_map(|c| c.points.iter().map(|p| p.y)),
        )
        .map(|(min, max)| Self { min, max })
    }

    /// Maps a depth to `[-1, 1]`; a degenerate range maps to `0`.
    #[must_use]
    pub fn normalize(&self, depth: f64) -> f64 {
        to_bipolar(depth, self.min, self.max)
    }
}

/// Which depth range a contour is normalized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationPolicy {
    /// One range across every slice of the snapshot, so amplitudes are
    /// comparable between slices.
    #[default]
    WholeMesh,
    /// Each contour against its own range, as when a contour is processed
    /// in isolation. Every non-flat table then spans the full `[-1, 1]`.
    PerContour,
}

/// Resamples every contour under the given policy.
///
/// The whole-mesh range is taken from measured contours only. Fallback
/// placeholders carry no mesh depth and are normalized against their own
/// range under either policy.
#[must_use]
pub fn resample_contours(
    contours: &[Contour],
    table_size: usize,
    policy: NormalizationPolicy,
) -> Vec<Wavetable> {
    let shared = DepthRange::of_contours(contours.iter().filter(|c| !c.is_fallback()));
    contours
        .iter()
        .map(|contour| {
            let range = match policy {
                NormalizationPolicy::WholeMesh if !contour.is_fallback() => shared,
                _ => DepthRange::of_contour(contour),
            };
            match range {
                Some(range) => ResampleContour::new(contour, table_size, range).execute(),
                None => Wavetable::zeroed(table_size),
            }
        })
        .collect()
}
