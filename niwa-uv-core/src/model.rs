use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by the NIWA UV forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NiwaResponse {
    #[serde(default)]
    pub coord: Option<String>,
    pub products: Vec<Product>,
}

/// One named series, e.g. `clear_sky_uv_index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: Option<String>,
    pub values: Vec<ValuePair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePair {
    pub time: DateTime<Utc>,
    pub value: f64,
}

/// A single point of the simplified series handed to the frontend.
///
/// `time` is the Pacific/Auckland time of day (`HH:MM:SS`); the date is not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvReading {
    pub time: String,
    pub sunny: f64,
    pub cloudy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_payload() {
        let body = r#"{
            "coord": "EPSG:4326,-41.29,174.78",
            "products": [
                {
                    "name": "cloudy_sky_uv_index",
                    "values": [{"time": "2023-01-01T00:00:00.000Z", "value": 2.5}]
                },
                {
                    "values": [{"time": "2023-01-01T00:15:00Z", "value": 3}]
                }
            ]
        }"#;

        let parsed: NiwaResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.products.len(), 2);
        assert_eq!(parsed.products[0].name.as_deref(), Some("cloudy_sky_uv_index"));
        assert_eq!(parsed.products[1].name, None);
        assert_eq!(parsed.products[1].values[0].value, 3.0);
        assert_eq!(
            parsed.products[0].values[0].time.to_rfc3339(),
            "2023-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn missing_products_is_an_error() {
        let err = serde_json::from_str::<NiwaResponse>(r#"{"coord": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("products"));
    }
}
