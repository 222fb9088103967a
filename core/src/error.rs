//! Error types for the GeoIP2 client.
//!
//! # Design
//! `Service` gets a dedicated payload because it is the common, expected
//! failure: the remote service answered with 4xx/5xx and callers routinely
//! need the status and message to decide what to do next (and whether a
//! layer above should retry — this library never does). Transport failures
//! are propagated verbatim under `Transport` so the two classes stay
//! distinguishable. Nothing is logged and nothing is swallowed.

use std::fmt;
use std::io;

use serde::Deserialize;

use crate::transport::TransportError;

/// Errors returned by `GeoIp2Client` lookups.
#[derive(Debug)]
pub enum Error {
    /// The transport failed before an HTTP status was observed.
    Transport(TransportError),

    /// The body of an error response could not be read off the wire.
    BodyRead(io::Error),

    /// The service answered with a 4xx/5xx status.
    Service(ServiceError),

    /// A 2xx/3xx status whose body did not match the response schema.
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "{err}"),
            Error::BodyRead(err) => write!(f, "failed to read error body: {err}"),
            Error::Service(err) => write!(f, "{err}"),
            Error::Decode(err) => write!(f, "failed to parse response as JSON: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::BodyRead(err) => Some(err),
            Error::Service(_) => None,
            Error::Decode(err) => Some(err),
        }
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Transport(err)
    }
}

/// A 4xx/5xx answer from the remote service.
///
/// `http_status` is always the status observed on the wire. When the body
/// was valid error JSON, `message` is the service's own diagnostic and
/// `raw_body` is `None`; when it was not, `message` is synthesized and the
/// unparsed body is kept in `raw_body` so neither the status nor the
/// original text is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub http_status: u16,
    pub message: String,
    pub raw_body: Option<String>,
}

impl ServiceError {
    /// Build from an error body that failed to decode as [`ErrorBody`].
    pub(crate) fn unparsed(http_status: u16, raw_body: String) -> Self {
        ServiceError {
            http_status,
            message: format!("failed to parse error body as JSON: {raw_body}"),
            raw_body: Some(raw_body),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.http_status, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Wire schema of an error response body.
///
/// `message` is required: a JSON body without it does not count as a
/// well-formed service error and falls back to the raw-body path. The body
/// also carries a `status` field, but the status observed on the wire is
/// authoritative, so it is not read.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display_includes_status_and_message() {
        let err = ServiceError {
            http_status: 404,
            message: "IP not found".to_string(),
            raw_body: None,
        };
        assert_eq!(err.to_string(), "HTTP 404: IP not found");
    }

    #[test]
    fn unparsed_body_keeps_status_and_raw_text() {
        let err = ServiceError::unparsed(500, "internal failure".to_string());
        assert_eq!(err.http_status, 500);
        assert!(err.message.contains("failed to parse error body as JSON"));
        assert!(err.message.contains("internal failure"));
        assert_eq!(err.raw_body.as_deref(), Some("internal failure"));
    }

    #[test]
    fn transport_errors_display_verbatim() {
        let err = Error::from(TransportError::Network("connection refused".to_string()));
        assert_eq!(err.to_string(), "network failure: connection refused");
    }

    #[test]
    fn error_body_requires_message() {
        let ok: ErrorBody = serde_json::from_str(r#"{"status":404,"message":"IP not found"}"#).unwrap();
        assert_eq!(ok.message, "IP not found");

        assert!(serde_json::from_str::<ErrorBody>(r#"{"status":404}"#).is_err());
    }
}
