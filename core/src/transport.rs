//! Pluggable request execution.
//!
//! # Design
//! `Transport` is the single seam between the client and the network: one
//! method turning a built request into a response or a `TransportError`.
//! Any `Fn(&Context, &HttpRequest) -> Result<HttpResponse, TransportError>`
//! is a transport via the blanket impl, so retry layers, circuit breakers,
//! tracing wrappers, and test stubs are plain closures — none of them are
//! implemented here. The default implementation drives a blocking
//! [`ureq::Agent`].

use std::fmt;

use crate::context::Context;
use crate::http::{Body, HttpRequest, HttpResponse};

/// Failure before an HTTP status was observed.
///
/// Kept separate from [`crate::Error`]'s service variant so callers can tell
/// "the network failed" apart from "the service answered with an error" when
/// deciding whether a higher layer should retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request URL could not be parsed into a valid request.
    InvalidUrl(String),

    /// Connectivity failure: DNS, TCP, TLS, or I/O mid-transfer.
    Network(String),

    /// The context's cancel signal was observed.
    Cancelled,

    /// The context's deadline passed before the request completed.
    DeadlineExceeded,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidUrl(msg) => write!(f, "invalid request URL: {msg}"),
            TransportError::Network(msg) => write!(f, "network failure: {msg}"),
            TransportError::Cancelled => write!(f, "request cancelled"),
            TransportError::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Executes a fully-formed request, honoring the context's cancellation.
///
/// Implementations must be safe for concurrent invocation — one transport
/// value is shared by every clone of the client that holds it.
pub trait Transport: Send + Sync {
    fn send(&self, ctx: &Context, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&Context, &HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync,
{
    fn send(&self, ctx: &Context, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(ctx, request)
    }
}

/// Default transport: a blocking [`ureq::Agent`].
///
/// Cancellation is cooperative: the context is checked before the request is
/// issued, and the remaining deadline time becomes the request's global
/// timeout. A transfer already in flight is not interrupted by the cancel
/// flag.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_agent(ureq::Agent::new_with_defaults())
    }

    /// Use a caller-configured agent (proxies, TLS settings, pools).
    ///
    /// Status handling is overridden per request so 4xx/5xx responses reach
    /// the client as data regardless of how the agent was configured.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, ctx: &Context, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        ctx.ensure_active()?;

        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut config = builder.config().http_status_as_error(false);
        if let Some(remaining) = ctx.remaining() {
            config = config.timeout_global(Some(remaining));
        }

        let response = config.build().call().map_err(classify)?;
        let (parts, body) = response.into_parts();
        Ok(HttpResponse {
            status: parts.status.as_u16(),
            body: Body::from_reader(body.into_reader()),
        })
    }
}

/// Map ureq failures onto the transport taxonomy. `StatusCode` errors never
/// occur because status-as-error is disabled on every request.
fn classify(error: ureq::Error) -> TransportError {
    match &error {
        ureq::Error::BadUri(_) => TransportError::InvalidUrl(error.to_string()),
        ureq::Error::Timeout(_) => TransportError::DeadlineExceeded,
        _ => TransportError::Network(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn closures_are_transports() {
        let transport = |_ctx: &Context, request: &HttpRequest| -> Result<HttpResponse, TransportError> {
            assert_eq!(request.url, "http://localhost/ping");
            Ok(HttpResponse {
                status: 200,
                body: Body::from_text("pong"),
            })
        };

        let request = HttpRequest {
            url: "http://localhost/ping".to_string(),
            headers: Vec::new(),
        };
        let response = transport.send(&Context::background(), &request).unwrap();
        assert_eq!(response.status, 200);

        let mut body = String::new();
        let mut reader = response.body;
        reader.read_to_string(&mut body).unwrap();
        assert_eq!(body, "pong");
    }

    #[test]
    fn cancelled_context_is_rejected_before_any_io() {
        let transport = UreqTransport::new();
        let (ctx, handle) = Context::background().cancellable();
        handle.cancel();

        // Port 1 is never contacted: the context check fails first.
        let request = HttpRequest {
            url: "http://127.0.0.1:1/".to_string(),
            headers: Vec::new(),
        };
        let err = transport.send(&ctx, &request).unwrap_err();
        assert_eq!(err, TransportError::Cancelled);
    }

    #[test]
    fn expired_deadline_is_rejected_before_any_io() {
        let transport = UreqTransport::new();
        let ctx = Context::with_timeout(std::time::Duration::ZERO);

        let request = HttpRequest {
            url: "http://127.0.0.1:1/".to_string(),
            headers: Vec::new(),
        };
        let err = transport.send(&ctx, &request).unwrap_err();
        assert_eq!(err, TransportError::DeadlineExceeded);
    }
}
