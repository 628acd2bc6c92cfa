use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "Unknown";

/// Raw answer from the geolocation provider. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoLookup {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Normalized location returned by `GET /api/location`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Location {
    pub country_name: String,
    pub region: String,
    pub city: String,
    pub ip: String,
}

impl Location {
    pub fn from_lookup(lookup: GeoLookup, caller_ip: &str) -> Self {
        let or_unknown = |v: Option<String>| v.filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            country_name: or_unknown(lookup.country_name),
            region: or_unknown(lookup.region),
            city: or_unknown(lookup.city),
            ip: lookup
                .ip
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| caller_ip.to_string()),
        }
    }

    pub fn unknown(caller_ip: &str) -> Self {
        Self::from_lookup(GeoLookup::default(), caller_ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_unknown() {
        let location = Location::from_lookup(
            GeoLookup {
                country_name: Some("Bangladesh".into()),
                ..Default::default()
            },
            "203.0.113.9",
        );

        assert_eq!(location.country_name, "Bangladesh");
        assert_eq!(location.region, "Unknown");
        assert_eq!(location.city, "Unknown");
        assert_eq!(location.ip, "203.0.113.9");
    }
}
