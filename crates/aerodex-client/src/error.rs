//! Error types for external collaborator calls.

/// Errors surfaced by catalog and favorites collaborators.
///
/// These cross the trait boundary as plain data: the data layer never
/// inspects transport details beyond what is captured here.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("Network error: {message}")]
    Network {
        /// Description of the transport failure.
        message: String,
    },

    /// The response arrived but could not be decoded.
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The endpoint answered with a failure status.
    #[error("Endpoint error ({status}): {message}")]
    Endpoint {
        /// Status code reported by the endpoint.
        status: u16,
        /// Message carried by the failure response.
        message: String,
    },

    /// The request was cancelled before completion.
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Creates a new `Network` error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a new `Endpoint` error.
    #[must_use]
    pub fn endpoint(status: u16, message: impl Into<String>) -> Self {
        Self::Endpoint {
            status,
            message: message.into(),
        }
    }

    /// Whether retrying the same call could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Cancelled => true,
            Self::Endpoint { status, .. } => *status >= 500,
            Self::Decode { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ClientError::endpoint(503, "maintenance window");
        assert_eq!(err.to_string(), "Endpoint error (503): maintenance window");
    }

    #[test]
    fn test_transient_classification() {
        assert!(ClientError::network("timed out").is_transient());
        assert!(ClientError::Cancelled.is_transient());
        assert!(ClientError::endpoint(500, "oops").is_transient());
        assert!(!ClientError::endpoint(404, "missing").is_transient());
        assert!(!ClientError::decode("bad payload").is_transient());
    }
}
