use thiserror::Error;

/// Errors returned by the commerce API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. `message` is the server's
    /// human-readable text, suitable for showing to the shopper as-is.
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// `true` for failures that may succeed if the user retries: timeouts,
    /// connection failures, 429 and 5xx responses.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Deserialize { .. } | ApiError::InvalidBaseUrl { .. } => false,
        }
    }

    /// `true` when the server refused the caller (401/403).
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }

    /// The text to put in front of the user.
    ///
    /// Server-provided messages are returned verbatim; other failures fall
    /// back to the error's display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
