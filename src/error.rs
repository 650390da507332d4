use thiserror::Error;

/// Error type for Flix API operations.
///
/// The backend is the only authority on what went wrong, so there is a
/// single kind. `status` is `None` for transport and decoding failures.
/// `Display` yields the message alone so it can be shown to the user as is.
#[derive(Debug, Error)]
pub enum FlixApiError {
    #[error("{message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },
}

impl FlixApiError {
    pub(crate) fn with_status(status: u16, message: impl Into<String>) -> Self {
        FlixApiError::RequestFailed {
            status: Some(status),
            message: message.into(),
        }
    }

    pub(crate) fn without_status(message: impl Into<String>) -> Self {
        FlixApiError::RequestFailed {
            status: None,
            message: message.into(),
        }
    }

    /// Human-readable message carried by the error.
    pub fn message(&self) -> &str {
        match self {
            FlixApiError::RequestFailed { message, .. } => message,
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FlixApiError::RequestFailed { status, .. } => *status,
        }
    }
}

impl From<reqwest::Error> for FlixApiError {
    fn from(e: reqwest::Error) -> Self {
        FlixApiError::RequestFailed {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlixApiError>;
