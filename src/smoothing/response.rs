use crate::error::SmoothingError;
use crate::wavetable::Wavetable;

/// Validates a collaborator response body.
///
/// The body must be a JSON array of exactly `target_length` numbers, each
/// in `[-1, 1]`.
///
/// # Errors
///
/// Returns `SmoothingError::MalformedResponse` for anything that is not a
/// numeric array, `SmoothingError::WrongLength` or
/// `SmoothingError::SampleOutOfRange`.
pub fn parse_smoothed_table(body: &str, target_length: usize) -> Result<Wavetable, SmoothingError> {
    let samples: Vec<f64> = serde_json::from_str(body.trim())
        .map_err(|e| SmoothingError::MalformedResponse(e.to_string()))?;

    if samples.len() != target_length {
        return Err(SmoothingError::WrongLength {
            expected: target_length,
            actual: samples.len(),
        });
    }
    if let Some((index, &value)) = samples
        .iter()
        .enumerate()
        .find(|(_, v)| !(-1.0..=1.0).contains(*v))
    {
        return Err(SmoothingError::SampleOutOfRange { index, value });
    }

    Ok(Wavetable::from_samples(samples))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_conforming_array() {
        let table = parse_smoothed_table(" [0.0, -1, 1, 0.5]\n", 4).unwrap();
        assert_eq!(table.samples(), &[0.0, -1.0, 1.0, 0.5]);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = parse_smoothed_table("[0.0, 0.1]", 3).unwrap_err();
        assert_eq!(
            err,
            SmoothingError::WrongLength {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_non_numeric() {
        let err = parse_smoothed_table("[0.0, \"a\"]", 2).unwrap_err();
        assert!(matches!(err, SmoothingError::MalformedResponse(_)));
        let err = parse_smoothed_table("Here is your waveform!", 2).unwrap_err();
        assert!(matches!(err, SmoothingError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_out_of_range_sample() {
        let err = parse_smoothed_table("[0.0, 1.5]", 2).unwrap_err();
        assert_eq!(
            err,
            SmoothingError::SampleOutOfRange {
                index: 1,
                value: 1.5
            }
        );
    }
}
