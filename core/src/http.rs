//! Plain-data HTTP types crossing the transport boundary.
//!
//! # Design
//! `HttpRequest` describes a fully-formed request as plain data: the client
//! builds it, the transport executes it. The GeoIP2 web service is GET-only,
//! so no method field is carried. `HttpResponse` pairs the status code with a
//! streaming `Body`; response headers are not carried because classification
//! is by status alone — the remote service does not reliably set
//! `Content-Type` on error bodies.

use std::fmt;
use std::io::{self, Cursor, Read};

/// A GET request described as plain data.
///
/// Built by `GeoIp2Client` before each lookup. Headers include the
/// `Authorization` credentials, so treat values as sensitive.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Value of the first header matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response produced by a transport.
///
/// The body is a one-shot stream: the client either stream-decodes it
/// (success path) or buffers it fully (error path), and it is released when
/// dropped regardless of which path ran.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Body,
}

/// Streaming response body.
///
/// Wraps any `io::Read` so the default transport can hand over the network
/// stream without buffering, while test stubs construct bodies from strings.
pub struct Body(Box<dyn Read>);

impl Body {
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Body(Box::new(reader))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Body(Box::new(Cursor::new(text.into().into_bytes())))
    }

    pub fn empty() -> Self {
        Body(Box::new(Cursor::new(Vec::new())))
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Body(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            url: "http://localhost/".to_string(),
            headers: vec![("Authorization".to_string(), "Basic abc".to_string())],
        };
        assert_eq!(req.header("authorization"), Some("Basic abc"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn body_from_text_reads_back() {
        let mut body = Body::from_text("hello");
        let mut out = String::new();
        body.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn empty_body_reads_nothing() {
        let mut body = Body::empty();
        let mut out = Vec::new();
        body.read_to_end(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
