use super::{Coordinates, WeatherProvider};
use crate::config::WeatherConfig;
use crate::error::{HarvestError, Result};
use crate::models::{DailyPrecipitation, DailyPrecipitationSeries};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Open-Meteo historical weather archive client
pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

// Open-Meteo archive response structures
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: Option<ArchiveDaily>,
}

#[derive(Debug, Deserialize)]
struct ArchiveDaily {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn archive_url(&self, location: Coordinates, year: i32) -> Result<Url> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let start_date = format!("{}-01-01", year);
        let end_date = format!("{}-12-31", year);

        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("daily", "precipitation_sum"),
                ("timezone", "auto"),
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
            ],
        )
        .map_err(|e| {
            HarvestError::Config(format!(
                "Invalid weather URL '{}': {}",
                self.config.base_url, e
            ))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch_annual_rainfall(
        &self,
        location: Coordinates,
        year: i32,
    ) -> Result<DailyPrecipitationSeries> {
        let url = self.archive_url(location, year)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HarvestError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HarvestError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let archive: ArchiveResponse = response.json().await.map_err(|e| {
            HarvestError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        let series = convert_response(archive);
        tracing::debug!("Open-Meteo returned {} daily values for {}", series.len(), year);
        Ok(series)
    }
}

/// Pair dates with values. Missing `daily` data yields an empty series.
fn convert_response(response: ArchiveResponse) -> DailyPrecipitationSeries {
    let Some(daily) = response.daily else {
        return Vec::new();
    };

    daily
        .time
        .into_iter()
        .zip(daily.precipitation_sum)
        .map(|(date, mm)| DailyPrecipitation::new(date, mm))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenMeteoClient {
        OpenMeteoClient::new(WeatherConfig::default()).unwrap()
    }

    #[test]
    fn archive_url_covers_calendar_year() {
        let location = Coordinates {
            latitude: 12.97,
            longitude: 77.59,
        };
        let url = client().archive_url(location, 2024).unwrap();
        let pairs: std::collections::HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.path(), "/v1/archive");
        assert_eq!(pairs["latitude"], "12.97");
        assert_eq!(pairs["longitude"], "77.59");
        assert_eq!(pairs["daily"], "precipitation_sum");
        assert_eq!(pairs["timezone"], "auto");
        assert_eq!(pairs["start_date"], "2024-01-01");
        assert_eq!(pairs["end_date"], "2024-12-31");
    }

    #[test]
    fn converts_daily_arrays_with_nulls() {
        let response: ArchiveResponse = serde_json::from_str(
            r#"{
                "latitude": 12.97,
                "daily": {
                    "time": ["2024-01-01", "2024-01-02", "2024-01-03"],
                    "precipitation_sum": [0.0, null, 12.4]
                }
            }"#,
        )
        .unwrap();

        let series = convert_response(response);
        assert_eq!(
            series,
            vec![
                DailyPrecipitation::new("2024-01-01", Some(0.0)),
                DailyPrecipitation::new("2024-01-02", None),
                DailyPrecipitation::new("2024-01-03", Some(12.4)),
            ]
        );
    }

    #[test]
    fn missing_daily_block_is_empty_series() {
        let response: ArchiveResponse = serde_json::from_str(r#"{"latitude": 0.0}"#).unwrap();
        assert!(convert_response(response).is_empty());
    }

    #[test]
    fn mismatched_array_lengths_are_truncated() {
        let response: ArchiveResponse = serde_json::from_str(
            r#"{"daily": {"time": ["2024-05-01", "2024-05-02"], "precipitation_sum": [3.0]}}"#,
        )
        .unwrap();
        assert_eq!(convert_response(response).len(), 1);
    }
}
