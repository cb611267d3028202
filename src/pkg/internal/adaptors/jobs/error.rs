use thiserror::Error;

pub type FetchResult<T> = core::result::Result<T, FetchError>;

pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Ways a call to the jobs service can fail.
///
/// Kept `Clone` so a failure can sit in a cache entry and be handed to every
/// waiter of the same query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure: DNS, connect, TLS, timeout, truncated body.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Http {
        status: u16,
        /// Plain-text body of the response, when there was one.
        detail: Option<String>,
    },

    /// A 2xx response whose body is not a valid envelope.
    #[error("invalid response payload: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn http(status: u16, body: &str) -> Self {
        let body = body.trim();
        let detail = if body.is_empty() || serde_json::from_str::<serde_json::Value>(body).is_ok() {
            None
        } else {
            Some(body.to_string())
        };
        FetchError::Http { status, detail }
    }

    /// Text shown to the user by the views.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http {
                status,
                detail: Some(detail),
            } => format!("Request failed with status {status}: {detail}"),
            FetchError::Http { status, .. } => format!("Request failed with status {status}"),
            FetchError::Network(_) | FetchError::Decode(_) => GENERIC_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_bodies_are_not_kept_as_detail() {
        let err = FetchError::http(500, r#"{"success": false, "message": "boom"}"#);
        assert_eq!(
            err,
            FetchError::Http {
                status: 500,
                detail: None
            }
        );
        assert_eq!(err.user_message(), "Request failed with status 500");
    }

    #[test]
    fn text_bodies_are_surfaced_with_status() {
        let err = FetchError::http(502, "  Bad Gateway\n");
        assert_eq!(err.user_message(), "Request failed with status 502: Bad Gateway");
    }

    #[test]
    fn transport_failures_get_generic_message() {
        let err = FetchError::Network("connection refused".into());
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
