use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// A parallel sequence did not have the same length as the longitudes.
    #[error("sequence length mismatch: expected {expected} elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A coordinate or accuracy reading is outside its valid range.
    #[error("invalid input{}: {reason}", .index.map(|i| format!(" at index {i}")).unwrap_or_default())]
    InvalidInput { index: Option<usize>, reason: String },
}

impl MotionError {
    pub(crate) fn check_len(expected: usize, found: usize) -> Result<(), MotionError> {
        if expected != found {
            return Err(MotionError::LengthMismatch { expected, found });
        }
        Ok(())
    }

    pub(crate) fn invalid(index: Option<usize>, reason: impl Into<String>) -> MotionError {
        MotionError::InvalidInput { index, reason: reason.into() }
    }
}

#[test]
fn display_invalid_input() {
    let err = MotionError::invalid(Some(3), "latitude 91 outside [-90, 90]");
    assert_eq!(err.to_string(), "invalid input at index 3: latitude 91 outside [-90, 90]");

    let err = MotionError::invalid(None, "accuracy is NaN");
    assert_eq!(err.to_string(), "invalid input: accuracy is NaN");
}

#[test]
fn check_len_reports_both_sizes() {
    assert!(MotionError::check_len(4, 4).is_ok());
    assert_eq!(MotionError::check_len(4, 2), Err(MotionError::LengthMismatch { expected: 4, found: 2 }));
}
