use thiserror::Error;

/// Failures crossing the chat relay boundary.
///
/// The relay produces the first four variants; `Rejected` is what a client
/// sees when the relay answered with an error payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("{0}")]
    Configuration(String),

    #[error("API error: {status}")]
    Upstream { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl RelayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// HTTP status the relay answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Configuration(_) | RelayError::Transport(_) => 500,
            RelayError::InvalidRequest(_) => 400,
            RelayError::Upstream { status } | RelayError::Rejected { status, .. } => {
                if (400..600).contains(status) {
                    *status
                } else {
                    502
                }
            }
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_folded_into_message() {
        let err = RelayError::Upstream { status: 429 };
        assert_eq!(err.to_string(), "API error: 429");
        assert_eq!(err.status_code(), 429);
    }

    #[test]
    fn non_error_upstream_status_maps_to_bad_gateway() {
        assert_eq!(RelayError::Upstream { status: 302 }.status_code(), 502);
    }

    #[test]
    fn local_failures_are_server_errors() {
        assert_eq!(RelayError::configuration("missing").status_code(), 500);
        assert_eq!(RelayError::transport("reset").status_code(), 500);
        assert_eq!(RelayError::InvalidRequest("bad json".into()).status_code(), 400);
    }
}
