use thiserror::Error;

/// Errors surfaced by the recognizer.
///
/// None are fatal: every variant is recoverable by the caller, and the
/// operation that produced it leaves the recognizer unchanged.
#[derive(Debug, Error)]
pub enum HandvecError {
    /// `encode` was called with something other than 21 landmarks.
    #[error("expected 21 landmarks, got {got}")]
    InvalidLandmarkCount { got: usize },

    /// `import` received a state document that failed validation.
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
}

impl HandvecError {
    /// Build an [`HandvecError::InvalidState`] from a message.
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, HandvecError>;
