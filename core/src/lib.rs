//! Blocking client for the GeoIP2 geolocation web service.
//!
//! # Overview
//! Looks up an IP address against the country, city or insights endpoint and
//! returns a decoded [`Response`] or a classified [`Error`]. The whole
//! library is one pipeline: build an authenticated GET, execute it through a
//! pluggable [`Transport`], classify the status, decode the matching JSON
//! schema.
//!
//! # Design
//! - [`GeoIp2Client`] is immutable; derived clients (`with_agent`,
//!   `with_transport`) share credentials but never mutate the original.
//! - [`Transport`] is a one-method trait with a blanket impl for closures;
//!   the default implementation drives a blocking `ureq` agent.
//! - [`Context`] carries optional deadline/cancel signals; the client only
//!   forwards it, enforcement is the transport's job.
//! - 4xx/5xx bodies are buffered so the raw text survives a failed decode;
//!   success bodies are stream-decoded. Exactly one of response/error comes
//!   back from every lookup.
//! - No retries, no caching, no logging: failures surface to the caller.

pub mod client;
pub mod context;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::GeoIp2Client;
pub use context::{CancelHandle, Context};
pub use error::{Error, ServiceError};
pub use http::{Body, HttpRequest, HttpResponse};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::Response;
