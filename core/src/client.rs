//! Authenticated lookup pipeline for the GeoIP2 web service.
//!
//! # Design
//! `GeoIp2Client` holds credentials and a shared [`Transport`] and carries no
//! mutable state between calls, so one value can serve concurrent lookups.
//! Each lookup is a single linear pass: build the request, attach Basic
//! credentials, hand it to the transport together with a cancellation
//! context, then classify the status code at one decision point — 4xx/5xx
//! bodies are buffered and decoded as the error schema, everything else is
//! stream-decoded as [`Response`]. No retries, no caching, no logging.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::context::Context;
use crate::error::{Error, ErrorBody, ServiceError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::Response;

pub const COUNTRY_ENDPOINT: &str = "https://geoip.maxmind.com/geoip/v2.1/country/";
pub const CITY_ENDPOINT: &str = "https://geoip.maxmind.com/geoip/v2.1/city/";
pub const INSIGHTS_ENDPOINT: &str = "https://geoip.maxmind.com/geoip/v2.1/insights/";

/// Client for the country, city and insights lookup endpoints.
///
/// Immutable after construction. The `with_*` methods derive new clients
/// with the same credentials and a different transport, leaving the receiver
/// untouched, so derived and original clients can be used side by side.
#[derive(Clone)]
pub struct GeoIp2Client {
    account_id: String,
    license_key: String,
    transport: Arc<dyn Transport>,
}

impl GeoIp2Client {
    /// Client using the default blocking transport. Never fails.
    pub fn new(account_id: &str, license_key: &str) -> Self {
        GeoIp2Client {
            account_id: account_id.to_string(),
            license_key: license_key.to_string(),
            transport: Arc::new(UreqTransport::new()),
        }
    }

    /// Derived client driven by the given blocking agent.
    pub fn with_agent(&self, agent: ureq::Agent) -> Self {
        self.with_transport(UreqTransport::with_agent(agent))
    }

    /// Derived client with an arbitrary transport.
    ///
    /// This is the extension point: retry policies, circuit breakers, mock
    /// transports and tracing all plug in here, outside this library.
    pub fn with_transport(&self, transport: impl Transport + 'static) -> Self {
        GeoIp2Client {
            account_id: self.account_id.clone(),
            license_key: self.license_key.clone(),
            transport: Arc::new(transport),
        }
    }

    /// Country-level lookup for `ip_address`.
    ///
    /// The IP string is forwarded as-is; a malformed address is rejected by
    /// the remote service, not here. `None` for `ctx` means no deadline and
    /// no cancel signal.
    pub fn country(&self, ctx: Option<&Context>, ip_address: &str) -> Result<Response, Error> {
        self.fetch(ctx, COUNTRY_ENDPOINT, ip_address)
    }

    /// City-level lookup for `ip_address`.
    pub fn city(&self, ctx: Option<&Context>, ip_address: &str) -> Result<Response, Error> {
        self.fetch(ctx, CITY_ENDPOINT, ip_address)
    }

    /// Insights lookup: city-level data plus confidence and network traits.
    pub fn insights(&self, ctx: Option<&Context>, ip_address: &str) -> Result<Response, Error> {
        self.fetch(ctx, INSIGHTS_ENDPOINT, ip_address)
    }

    fn fetch(
        &self,
        ctx: Option<&Context>,
        endpoint: &str,
        ip_address: &str,
    ) -> Result<Response, Error> {
        let request = self.build_lookup(endpoint, ip_address);

        let background;
        let ctx = match ctx {
            Some(ctx) => ctx,
            None => {
                background = Context::background();
                &background
            }
        };

        // Transport failures are propagated verbatim, never wrapped.
        let response = self.transport.send(ctx, &request)?;

        if (400..600).contains(&response.status) {
            return Err(decode_error_body(response));
        }

        serde_json::from_reader(response.body).map_err(Error::Decode)
    }

    fn build_lookup(&self, endpoint: &str, ip_address: &str) -> HttpRequest {
        HttpRequest {
            url: format!("{endpoint}{ip_address}"),
            headers: vec![
                ("Authorization".to_string(), self.basic_auth()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        }
    }

    fn basic_auth(&self) -> String {
        let credentials = STANDARD.encode(format!("{}:{}", self.account_id, self.license_key));
        format!("Basic {credentials}")
    }
}

impl fmt::Debug for GeoIp2Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoIp2Client")
            .field("account_id", &self.account_id)
            .field("license_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Classify a 4xx/5xx response.
///
/// The whole body is buffered up front so the raw text survives for
/// diagnostics when it turns out not to be error-schema JSON. This is the
/// only path that buffers; success bodies are stream-decoded.
fn decode_error_body(mut response: HttpResponse) -> Error {
    let mut raw = String::new();
    if let Err(err) = response.body.read_to_string(&mut raw) {
        return Error::BodyRead(err);
    }
    match serde_json::from_str::<ErrorBody>(&raw) {
        Ok(body) => Error::Service(ServiceError {
            http_status: response.status,
            message: body.message,
            raw_body: None,
        }),
        Err(_) => Error::Service(ServiceError::unparsed(response.status, raw)),
    }
}
