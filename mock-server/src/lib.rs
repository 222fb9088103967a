//! Mock GeoIP2 web service for exercising the client end-to-end.
//!
//! # Design
//! Stateless: a small canned dataset keyed by IP, served at the same paths
//! and with the same Basic-auth and error schema as the real service. The
//! three endpoints return progressively richer views of one record (country
//! ⊂ city ⊂ insights). Two trigger addresses produce degenerate responses
//! the client must survive: `boom` (500 with a non-JSON body) and `garbage`
//! (200 with a non-JSON body).

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Credentials the mock accepts. Anything else is a 401.
pub const MOCK_ACCOUNT_ID: &str = "100042";
pub const MOCK_LICENSE_KEY: &str = "mock-license-key";

#[derive(Clone, Copy, PartialEq, PartialOrd)]
enum Depth {
    Country,
    City,
    Insights,
}

pub fn app() -> Router {
    Router::new()
        .route("/geoip/v2.1/country/{ip}", get(country))
        .route("/geoip/v2.1/city/{ip}", get(city))
        .route("/geoip/v2.1/insights/{ip}", get(insights))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn country(headers: HeaderMap, Path(ip): Path<String>) -> Response {
    lookup(Depth::Country, &headers, &ip)
}

async fn city(headers: HeaderMap, Path(ip): Path<String>) -> Response {
    lookup(Depth::City, &headers, &ip)
}

async fn insights(headers: HeaderMap, Path(ip): Path<String>) -> Response {
    lookup(Depth::Insights, &headers, &ip)
}

fn lookup(depth: Depth, headers: &HeaderMap, ip: &str) -> Response {
    if !authorized(headers) {
        return error_response(StatusCode::UNAUTHORIZED, "invalid credentials");
    }
    match ip {
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "internal failure").into_response(),
        "garbage" => (StatusCode::OK, "this is not json").into_response(),
        _ => match payload(depth, ip) {
            Some(record) => (StatusCode::OK, Json(record)).into_response(),
            None => error_response(StatusCode::NOT_FOUND, "IP not found"),
        },
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!(
        "Basic {}",
        STANDARD.encode(format!("{MOCK_ACCOUNT_ID}:{MOCK_LICENSE_KEY}"))
    );
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({ "status": status.as_u16(), "message": message });
    (status, Json(body)).into_response()
}

/// Canned record for `ip`, widened to the requested endpoint depth.
fn payload(depth: Depth, ip: &str) -> Option<Value> {
    let (continent_code, continent, iso, country_name, city_name, lat, lon, tz, network) = match ip
    {
        "1.2.3.4" => (
            "NA",
            "North America",
            "US",
            "United States",
            "Seattle",
            47.6062,
            -122.3321,
            "America/Los_Angeles",
            "1.2.3.0/24",
        ),
        "81.2.69.142" => (
            "EU",
            "Europe",
            "GB",
            "United Kingdom",
            "London",
            51.5142,
            -0.0931,
            "Europe/London",
            "81.2.69.0/24",
        ),
        _ => return None,
    };

    let mut record = json!({
        "continent": {
            "code": continent_code,
            "names": { "en": continent }
        },
        "country": {
            "iso_code": iso,
            "names": { "en": country_name }
        },
        "registered_country": {
            "iso_code": iso,
            "names": { "en": country_name }
        },
        "maxmind": { "queries_remaining": 4999 }
    });

    if depth >= Depth::City {
        record["city"] = json!({ "names": { "en": city_name } });
        record["location"] = json!({
            "latitude": lat,
            "longitude": lon,
            "accuracy_radius": 10,
            "time_zone": tz
        });
        record["traits"] = json!({
            "ip_address": ip,
            "network": network
        });
    }

    if depth == Depth::Insights {
        record["city"]["confidence"] = json!(90);
        record["country"]["confidence"] = json!(99);
        record["traits"]["user_type"] = json!("residential");
        record["traits"]["autonomous_system_number"] = json!(217);
        record["traits"]["is_anonymous_vpn"] = json!(false);
    }

    Some(record)
}
