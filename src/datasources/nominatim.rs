use super::{Coordinates, GeocodeProvider};
use crate::config::GeocodingConfig;
use crate::error::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// OpenStreetMap Nominatim search client
pub struct NominatimClient {
    client: reqwest::Client,
    config: GeocodingConfig,
}

// Nominatim returns coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimClient {
    pub fn new(config: GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn search_url(&self, name: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.base_url,
            &[("q", name), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| {
            HarvestError::Config(format!(
                "Invalid geocoding URL '{}': {}",
                self.config.base_url, e
            ))
        })
    }
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
    async fn geocode(&self, name: &str) -> Result<Coordinates> {
        let url = self.search_url(name)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HarvestError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HarvestError::DataSourceUnavailable(format!(
                "Nominatim returned {}: {}",
                status, body
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            HarvestError::DataSourceUnavailable(format!(
                "Failed to parse Nominatim response: {}",
                e
            ))
        })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| HarvestError::NotFound(format!("District not found: {}", name)))?;

        if let Some(ref display_name) = place.display_name {
            tracing::debug!("Nominatim matched '{}' to {}", name, display_name);
        }

        place_coordinates(&place)
    }
}

fn place_coordinates(place: &NominatimPlace) -> Result<Coordinates> {
    let parse = |value: &str, axis: &str| {
        value.trim().parse::<f64>().map_err(|_| {
            HarvestError::DataSourceUnavailable(format!(
                "Nominatim returned invalid {} '{}'",
                axis, value
            ))
        })
    };

    Ok(Coordinates {
        latitude: parse(&place.lat, "latitude")?,
        longitude: parse(&place.lon, "longitude")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NominatimClient {
        NominatimClient::new(GeocodingConfig::default()).unwrap()
    }

    #[test]
    fn search_url_encodes_query() {
        let url = client().search_url("Dakshina Kannada & Udupi").unwrap();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.host_str(), Some("nominatim.openstreetmap.org"));
        assert_eq!(
            query,
            vec![
                ("q".to_string(), "Dakshina Kannada & Udupi".to_string()),
                ("format".to_string(), "json".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let config = GeocodingConfig {
            base_url: "not a url".to_string(),
            ..GeocodingConfig::default()
        };
        let client = NominatimClient::new(config).unwrap();
        assert!(matches!(
            client.search_url("Pune"),
            Err(HarvestError::Config(_))
        ));
    }

    #[test]
    fn parses_string_coordinates() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"lat": "18.5213738", "lon": "73.8545071", "display_name": "Pune, Maharashtra, India"}]"#,
        )
        .unwrap();
        let coords = place_coordinates(&places[0]).unwrap();
        assert!((coords.latitude - 18.5213738).abs() < 1e-9);
        assert!((coords.longitude - 73.8545071).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_coordinates() {
        let place = NominatimPlace {
            lat: "north".to_string(),
            lon: "73.85".to_string(),
            display_name: None,
        };
        assert!(matches!(
            place_coordinates(&place),
            Err(HarvestError::DataSourceUnavailable(_))
        ));
    }
}
