//! Error taxonomy for every call a list screen makes.

use thiserror::Error;

/// Shown when the server gave no usable message
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("You are not signed in")]
    Unauthenticated,

    #[error("This action requires the admin role")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error("Server error {status}")]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("The request timed out")]
    Timeout,
}

impl ApiError {
    /// Classify a JS exception; an aborted fetch means our timeout fired.
    pub fn from_js(name: &str, message: &str) -> Self {
        if name == "AbortError" {
            ApiError::Timeout
        } else {
            ApiError::Network(message.to_string())
        }
    }

    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Server {
            status,
            message: extract_server_message(body),
        }
    }

    /// Text for the toast: server message when present, generic fallback otherwise.
    pub fn toast_message(&self) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Server { .. } | ApiError::Network(_) | ApiError::Decode(_) => {
                GENERIC_FAILURE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::JsError(js) => ApiError::from_js(&js.name, &js.message),
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            gloo_net::Error::GlooError(msg) => ApiError::Network(msg),
            #[allow(unreachable_patterns)]
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Pull `message` (or `error`) out of a JSON error body.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(*key)?
            .as_str()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_error_is_timeout() {
        assert_eq!(ApiError::from_js("AbortError", "aborted"), ApiError::Timeout);
        assert_eq!(
            ApiError::from_js("TypeError", "Failed to fetch"),
            ApiError::Network("Failed to fetch".into())
        );
    }

    #[test]
    fn server_message_preferred_in_toast() {
        let err = ApiError::from_status(409, r#"{"message":"Lot 1043 already exists"}"#);
        assert_eq!(err.toast_message(), "Lot 1043 already exists");

        let err = ApiError::from_status(500, r#"{"error":"  "}"#);
        assert_eq!(err.toast_message(), GENERIC_FAILURE);

        let err = ApiError::from_status(502, "<html>Bad gateway</html>");
        assert_eq!(err, ApiError::Server { status: 502, message: None });
    }

    #[test]
    fn timeout_has_distinct_text() {
        assert_eq!(ApiError::Timeout.toast_message(), "The request timed out");
        assert_eq!(ApiError::Network("x".into()).toast_message(), GENERIC_FAILURE);
    }
}
