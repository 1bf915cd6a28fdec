use std::fmt;

use tracing::{info, warn};

use crate::error::{ConfigError, SmoothingError};
use crate::pipeline::SliceSnapshot;
use crate::wavetable::Wavetable;

use super::{parse_smoothed_table, SmoothingClient, SmoothingRequest};

/// Progress after each request of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingProgress {
    pub completed: usize,
    pub total: usize,
    /// Slice the finished request belonged to.
    pub index: usize,
    /// Why the request failed, if it did.
    pub error: Option<SmoothingError>,
}

impl fmt::Display for SmoothingProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(
                f,
                "smoothed slice {} ({}/{})",
                self.index + 1,
                self.completed,
                self.total
            ),
            Some(e) => write!(
                f,
                "slice {} failed, using silence: {e} ({}/{})",
                self.index + 1,
                self.completed,
                self.total
            ),
        }
    }
}

/// Result of a finished batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingOutcome {
    /// Generation of the snapshot the batch was built from.
    pub generation: u64,
    /// One table per request; failed requests are silent.
    pub wavetables: Vec<Wavetable>,
    /// Failed slice indices and their causes.
    pub failures: Vec<(usize, SmoothingError)>,
}

/// A sequence of smoothing requests, one per contour of a snapshot.
#[derive(Debug, Clone)]
pub struct SmoothingBatch {
    generation: u64,
    requests: Vec<SmoothingRequest>,
}

impl SmoothingBatch {
    /// Prepares requests for every contour of `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredential` if `credential` is blank.
    pub fn from_snapshot(
        snapshot: &SliceSnapshot,
        instructions: &str,
        credential: &str,
    ) -> Result<Self, ConfigError> {
        if credential.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        let requests = snapshot
            .contours
            .iter()
            .enumerate()
            .map(|(i, contour)| {
                SmoothingRequest::new(i, contour, snapshot.table_size, instructions, credential)
            })
            .collect();
        Ok(Self {
            generation: snapshot.generation,
            requests,
        })
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn requests(&self) -> &[SmoothingRequest] {
        &self.requests
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Sends every request in order, reporting progress after each.
    ///
    /// A failed request (transport error or non-conforming response) yields
    /// a silent table for that slice and the batch carries on.
    pub fn run<C, P>(&self, client: &mut C, mut on_progress: P) -> SmoothingOutcome
    where
        C: SmoothingClient + ?Sized,
        P: FnMut(&SmoothingProgress),
    {
        let total = self.requests.len();
        info!(generation = self.generation, total, "starting smoothing batch");

        let mut wavetables = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (completed, request) in (1..).zip(&self.requests) {
            let result = client
                .smooth(request)
                .and_then(|body| parse_smoothed_table(&body, request.target_length));
            let error = match result {
                Ok(table) => {
                    wavetables.push(table);
                    None
                }
                Err(e) => {
                    warn!(slice = request.index, error = %e, "smoothing request failed");
                    wavetables.push(Wavetable::zeroed(request.target_length));
                    failures.push((request.index, e.clone()));
                    Some(e)
                }
            };
            on_progress(&SmoothingProgress {
                completed,
                total,
                index: request.index,
                error,
            });
        }

        info!(
            generation = self.generation,
            failed = failures.len(),
            "smoothing batch finished"
        );

        SmoothingOutcome {
            generation: self.generation,
            wavetables,
            failures,
        }
    }
}
