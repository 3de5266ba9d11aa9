//! Error types for timeline tracks.
//!
//! Routine conditions (missing keyframe, empty data, unresolved binding) are
//! reported through return values and never become a [`TrackError`].

/// Hard failures raised by track construction, decoding and misuse.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TrackError {
    /// The track kind structurally cannot perform the requested operation.
    #[error("{track} does not support {operation}")]
    UnsupportedOperation {
        track: &'static str,
        operation: &'static str,
    },

    /// Payload sequences are misaligned or hold unusable values.
    #[error("Invalid track payload: {reason}")]
    InvalidPayload { reason: String },

    /// JSON decode failure.
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Pool handle whose slot has been recycled or never existed.
    #[error("Stale track handle: index {index}, generation {generation}")]
    StaleHandle { index: u32, generation: u32 },

    /// The track has no keyframe store attached (unbuilt or destroyed).
    #[error("Track has not been built")]
    NotBuilt,

    /// Construction requested on a track that is not in the unbuilt state.
    #[error("Track was already built in this lifetime")]
    AlreadyBuilt,
}

impl TrackError {
    pub(crate) fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }

    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation { .. } => "usage",
            Self::InvalidPayload { .. } => "validation",
            Self::Serialization { .. } => "serialization",
            Self::StaleHandle { .. } | Self::NotBuilt | Self::AlreadyBuilt => "lifecycle",
        }
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_operation_message_names_track_and_operation() {
        let err = TrackError::UnsupportedOperation {
            track: "transform track",
            operation: "clips",
        };
        assert_eq!(err.to_string(), "transform track does not support clips");
        assert_eq!(err.category(), "usage");
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let err: TrackError = serde_json::from_str::<Vec<f32>>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, TrackError::Serialization { .. }));
        assert_eq!(err.category(), "serialization");
    }
}
