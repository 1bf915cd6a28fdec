//! Contract and batch driver for the external smoothing collaborator.
//!
//! The collaborator receives one contour at a time and answers with a
//! wavetable of the requested length. Requests are issued one after
//! another; a failed request is replaced by silence and never stops the
//! batch. Each batch remembers the pipeline generation it was built from so
//! [`Pipeline::apply_smoothing`](crate::pipeline::Pipeline::apply_smoothing)
//! can drop results that arrive after the state moved on.

mod batch;
mod response;

pub use batch::{SmoothingBatch, SmoothingOutcome, SmoothingProgress};
pub use response::parse_smoothed_table;

use serde::Serialize;

use crate::contour::Contour;
use crate::error::SmoothingError;

/// Instructions sent when the caller supplies none.
pub const DEFAULT_INSTRUCTIONS: &str = "The points below are (horizontal, depth) pairs taken \
from one horizontal cross-section of a scanned face. Smooth them into a single-cycle \
waveform that keeps the overall contour, and reply with only a JSON array of amplitudes \
between -1 and 1.";

/// One smoothing request: a contour and the wavetable length wanted back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothingRequest {
    /// Slice the contour belongs to.
    #[serde(skip)]
    pub index: usize,
    pub points: Vec<(f64, f64)>,
    pub target_length: usize,
    pub instructions: String,
    /// Sent out of band (e.g. as an authorization header), never in the body.
    #[serde(skip)]
    pub credential: String,
}

impl SmoothingRequest {
    /// Builds a request for one contour.
    #[must_use]
    pub fn new(
        index: usize,
        contour: &Contour,
        target_length: usize,
        instructions: &str,
        credential: &str,
    ) -> Self {
        Self {
            index,
            points: contour.points.iter().map(|p| (p.x, p.y)).collect(),
            target_length,
            instructions: instructions.to_owned(),
            credential: credential.to_owned(),
        }
    }

    /// Renders the request as a single text prompt.
    ///
    /// # Errors
    ///
    /// Returns `SmoothingError::MalformedResponse` if the points cannot be
    /// serialized.
    pub fn prompt(&self) -> Result<String, SmoothingError> {
        let points = serde_json::to_string(&self.points)
            .map_err(|e| SmoothingError::MalformedResponse(e.to_string()))?;
        Ok(format!(
            "{}\nInput polyline: {points}\nOutput length: {}",
            self.instructions, self.target_length
        ))
    }

    /// Serializes the request body (without the credential).
    ///
    /// # Errors
    ///
    /// Returns `SmoothingError::MalformedResponse` if serialization fails.
    pub fn to_json(&self) -> Result<String, SmoothingError> {
        serde_json::to_string(self).map_err(|e| SmoothingError::MalformedResponse(e.to_string()))
    }
}

/// Transport to the smoothing collaborator.
///
/// Implementations perform one request and return the raw response body;
/// validation happens in [`parse_smoothed_table`].
pub trait SmoothingClient {
    /// Sends one request.
    ///
    /// # Errors
    ///
    /// Returns `SmoothingError::Transport` for network or service failures.
    fn smooth(&mut self, request: &SmoothingRequest) -> Result<String, SmoothingError>;
}

impl<F> SmoothingClient for F
where
    F: FnMut(&SmoothingRequest) -> Result<String, SmoothingError>,
{
    fn smooth(&mut self, request: &SmoothingRequest) -> Result<String, SmoothingError> {
        self(request)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::contour::ContourSource;
    use crate::math::Point2;

    fn request() -> SmoothingRequest {
        let contour = Contour {
            points: vec![Point2::new(-1.0, 0.0), Point2::new(1.0, 0.5)],
            source: ContourSource::Points,
        };
        SmoothingRequest::new(2, &contour, 8, "smooth it", "secret")
    }

    #[test]
    fn body_omits_credential_and_index() {
        let json = request().to_json().unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("index"));
        assert!(json.contains("\"target_length\":8"));
        assert!(json.contains("[[-1.0,0.0],[1.0,0.5]]"));
    }

    #[test]
    fn prompt_embeds_points_and_length() {
        let prompt = request().prompt().unwrap();
        assert!(prompt.starts_with("smooth it\n"));
        assert!(prompt.contains("Input polyline: [[-1.0,0.0],[1.0,0.5]]"));
        assert!(prompt.ends_with("Output length: 8"));
    }
}
