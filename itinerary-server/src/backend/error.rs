//! Routing backend error types.

/// Errors from the routing backend client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// No itinerary connects the two stations at that time
    #[error("no itinerary found")]
    NoItinerary,

    /// The network is not running at the requested time
    #[error("service unavailable: {message}")]
    ServiceUnavailable {
        message: String,
        suggested_departure: Option<String>,
    },

    /// Mock data could not be loaded
    #[error("mock data error: {0}")]
    MockData(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BackendError::NoItinerary;
        assert_eq!(err.to_string(), "no itinerary found");

        let err = BackendError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = BackendError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value (body: <html>)");

        let err = BackendError::Json {
            message: "expected value".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }

    #[test]
    fn service_unavailable_display() {
        let err = BackendError::ServiceUnavailable {
            message: "last train left at 00:40".into(),
            suggested_departure: Some("05:30".into()),
        };
        assert_eq!(err.to_string(), "service unavailable: last train left at 00:40");
    }
}
