//! Response records for the GeoIP2 web service.
//!
//! # Design
//! Every field is optional: the three endpoints return progressively richer
//! subsets of one schema (country ⊂ city ⊂ insights), and the service also
//! omits any record it has no data for. Decoding is strict about shape but
//! tolerant of absence, so one `Response` type serves all three lookups.
//! Localized `names` maps are keyed by locale code (`"en"`, `"ja"`, …).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A decoded lookup response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<Continent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,

    /// Country the IP is registered in, which may differ from `country`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_country: Option<Country>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub represented_country: Option<RepresentedCountry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal: Option<Postal>,

    /// Most specific last (state before county, for example).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subdivisions: Vec<Subdivision>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<Traits>,

    /// Account bookkeeping echoed back by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxmind: Option<MaxMind>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Continent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub names: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    /// Insights only: 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default)]
    pub is_in_european_union: bool,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub names: HashMap<String, String>,
}

/// Country represented by the users of the IP (military bases, embassies).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepresentedCountry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub names: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub names: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Radius in kilometers around the coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_radius: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metro_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_income: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_density: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Postal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subdivision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geoname_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub names: HashMap<String, String>,
}

/// Network-level facts about the IP itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autonomous_system_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autonomous_system_organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Insights only, e.g. `"residential"` or `"hosting"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub is_anonymous_proxy: bool,
    #[serde(default)]
    pub is_anonymous_vpn: bool,
    #[serde(default)]
    pub is_satellite_provider: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaxMind {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries_remaining: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_country_payload_decodes() {
        let raw = r#"{
            "continent": {"code": "NA", "geoname_id": 6255149, "names": {"en": "North America"}},
            "country": {"iso_code": "US", "geoname_id": 6252001, "names": {"en": "United States"}},
            "maxmind": {"queries_remaining": 5000}
        }"#;
        let response: Response = serde_json::from_str(raw).unwrap();

        assert_eq!(response.continent.unwrap().code.as_deref(), Some("NA"));
        let country = response.country.unwrap();
        assert_eq!(country.iso_code.as_deref(), Some("US"));
        assert_eq!(country.names.get("en").map(String::as_str), Some("United States"));
        assert!(!country.is_in_european_union);
        assert!(response.city.is_none());
        assert!(response.subdivisions.is_empty());
        assert_eq!(response.maxmind.unwrap().queries_remaining, Some(5000));
    }

    #[test]
    fn insights_payload_decodes_extended_traits() {
        let raw = r#"{
            "city": {"geoname_id": 5809844, "confidence": 90, "names": {"en": "Seattle"}},
            "location": {"latitude": 47.6062, "longitude": -122.3321, "accuracy_radius": 10, "time_zone": "America/Los_Angeles"},
            "subdivisions": [{"iso_code": "WA", "names": {"en": "Washington"}}],
            "represented_country": {"iso_code": "US", "type": "military"},
            "traits": {
                "ip_address": "1.2.3.4",
                "network": "1.2.3.0/24",
                "autonomous_system_number": 217,
                "user_type": "residential",
                "is_anonymous_vpn": true
            }
        }"#;
        let response: Response = serde_json::from_str(raw).unwrap();

        assert_eq!(response.city.unwrap().confidence, Some(90));
        assert_eq!(response.location.unwrap().time_zone.as_deref(), Some("America/Los_Angeles"));
        assert_eq!(response.subdivisions.len(), 1);
        assert_eq!(response.represented_country.unwrap().kind.as_deref(), Some("military"));
        let traits = response.traits.unwrap();
        assert_eq!(traits.autonomous_system_number, Some(217));
        assert!(traits.is_anonymous_vpn);
        assert!(!traits.is_anonymous);
    }

    #[test]
    fn empty_object_decodes_to_default() {
        let response: Response = serde_json::from_str("{}").unwrap();
        assert_eq!(response, Response::default());
    }

    #[test]
    fn serialization_skips_absent_records() {
        let response = Response {
            country: Some(Country {
                iso_code: Some("DE".to_string()),
                is_in_european_union: true,
                ..Country::default()
            }),
            ..Response::default()
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["country"]["iso_code"], "DE");
        assert_eq!(value["country"]["is_in_european_union"], true);
        assert!(value.get("city").is_none());
        assert!(value.get("subdivisions").is_none());
    }
}
