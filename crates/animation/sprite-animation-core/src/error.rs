//! Error types for sprite playback

use serde::{Deserialize, Serialize};

/// Errors surfaced to callers of the player and catalog.
///
/// Nothing in the core is fatal: missing clips are reported through this type and
/// every other degenerate input (zero frames, zero fps, calls after stop) is a no-op.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// No animation with this name in the catalog (or active on the player)
    #[error("Animation {name} not found.")]
    AnimationNotFound { name: String },

    /// Definition failed validation
    #[error("Invalid animation definition '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl AnimationError {
    /// Shorthand for [`AnimationError::AnimationNotFound`].
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::AnimationNotFound { name: name.into() }
    }

    /// Check if the player can keep running after this error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AnimationNotFound { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::AnimationNotFound { .. } => "lookup",
            Self::InvalidDefinition { .. } => "validation",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_clip() {
        let error = AnimationError::not_found("attack");
        assert_eq!(error.to_string(), "Animation attack not found.");
        assert!(error.is_recoverable());
        assert_eq!(error.category(), "lookup");
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: AnimationError = err.into();
        assert_eq!(converted.category(), "serialization");
        assert!(!converted.is_recoverable());
    }

    #[test]
    fn round_trips_through_json() {
        let error = AnimationError::not_found("walk");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: AnimationError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
