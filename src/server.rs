use crate::datasources::{GeocodeProvider, ReferenceData, WeatherProvider};
use crate::error::{HarvestError, Result};
use crate::logic::{default_rainfall_year, Estimator};
use crate::models::{EstimateReport, EstimateRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Error body returned to HTTP clients as `{"detail": "..."}`
pub struct ApiError(HarvestError);

impl From<HarvestError> for ApiError {
    fn from(e: HarvestError) -> Self {
        Self(e)
    }
}

// Malformed or mistyped bodies (missing district, negative people) use the
// same `{"detail"}` shape as validation failures
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(HarvestError::InvalidData(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            HarvestError::NotFound(_) => StatusCode::NOT_FOUND,
            HarvestError::InvalidData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match &self.0 {
            HarvestError::NotFound(msg) | HarvestError::InvalidData(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Estimate failed: {}", self.0);
        } else {
            tracing::info!("Estimate rejected: {}", self.0);
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

pub fn router<G, W, R>(estimator: Arc<Estimator<G, W, R>>) -> Router
where
    G: GeocodeProvider + 'static,
    W: WeatherProvider + 'static,
    R: ReferenceData + 'static,
{
    Router::new()
        .route("/estimate", post(estimate::<G, W, R>))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(estimator)
}

pub async fn serve<G, W, R>(estimator: Estimator<G, W, R>, bind: &str) -> Result<()>
where
    G: GeocodeProvider + 'static,
    W: WeatherProvider + 'static,
    R: ReferenceData + 'static,
{
    let app = router(Arc::new(estimator));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Listening on {}", bind);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn estimate<G, W, R>(
    State(estimator): State<Arc<Estimator<G, W, R>>>,
    payload: std::result::Result<Json<EstimateRequest>, JsonRejection>,
) -> std::result::Result<Json<EstimateReport>, ApiError>
where
    G: GeocodeProvider + 'static,
    W: WeatherProvider + 'static,
    R: ReferenceData + 'static,
{
    let Json(request) = payload?;
    request.validate()?;
    tracing::info!("Estimate requested for '{}'", request.district);

    let report = estimator
        .estimate(&request, default_rainfall_year())
        .await?;
    Ok(Json(report))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::Coordinates;
    use crate::models::{DailyPrecipitation, DailyPrecipitationSeries};
    use async_trait::async_trait;
    use serde_json::Value;

    struct KnownDistricts;

    #[async_trait]
    impl GeocodeProvider for KnownDistricts {
        async fn geocode(&self, name: &str) -> Result<Coordinates> {
            if name.eq_ignore_ascii_case("pune") {
                Ok(Coordinates {
                    latitude: 18.52,
                    longitude: 73.85,
                })
            } else {
                Err(HarvestError::NotFound(format!("District not found: {}", name)))
            }
        }
    }

    struct MonsoonYear;

    #[async_trait]
    impl WeatherProvider for MonsoonYear {
        async fn fetch_annual_rainfall(
            &self,
            _location: Coordinates,
            year: i32,
        ) -> Result<DailyPrecipitationSeries> {
            Ok(vec![
                DailyPrecipitation::new(format!("{}-07-01", year), Some(600.0)),
                DailyPrecipitation::new(format!("{}-08-01", year), Some(400.0)),
            ])
        }
    }

    struct EmptyTables;

    impl ReferenceData for EmptyTables {
        fn lookup_soil(&self, _district: &str) -> String {
            "Loamy".to_string()
        }

        fn lookup_groundwater_depth(&self, _district: &str) -> Option<f64> {
            None
        }

        fn lookup_tariff_class(&self, _district: &str) -> String {
            "Typical urban slab".to_string()
        }
    }

    /// Serve the router on an ephemeral port and return its base URL
    async fn spawn_server() -> String {
        let estimator = Estimator::new(KnownDistricts, MonsoonYear, EmptyTables);
        let app = router(Arc::new(estimator));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn post_estimate(base: &str, body: Value) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(format!("{}/estimate", base))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        let body: Value = response.json().await.unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn estimate_with_defaults_returns_full_report() {
        let base = spawn_server().await;
        let (status, body) = post_estimate(&base, json!({ "district": "Pune" })).await;

        assert_eq!(status, StatusCode::OK);
        for section in [
            "rainfall_check",
            "infiltration_check",
            "groundwater_check",
            "combined_check",
            "structure_design",
            "economics",
            "notes",
        ] {
            assert!(body.get(section).is_some(), "missing {}", section);
        }
        // 1000 mm on 100 m² concrete roof, one occupant
        assert_eq!(body["rainfall_check"]["annual_mm"], 1000.0);
        assert_eq!(body["rainfall_check"]["annual_harvest_liters"], 85_000.0);
        assert_eq!(body["rainfall_check"]["feasibility"], "Fully meets demand");
    }

    #[tokio::test]
    async fn unknown_district_is_not_found() {
        let base = spawn_server().await;
        let (status, body) = post_estimate(&base, json!({ "district": "Atlantis" })).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "District not found: Atlantis");
    }

    #[tokio::test]
    async fn blank_district_fails_validation() {
        let base = spawn_server().await;
        let (status, body) = post_estimate(&base, json!({ "district": "  " })).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "district must not be empty");
    }

    #[tokio::test]
    async fn undeserializable_bodies_use_detail_shape() {
        let base = spawn_server().await;

        let (status, body) =
            post_estimate(&base, json!({ "district": "Pune", "people": -1 })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("people"));

        let (status, body) = post_estimate(&base, json!({ "people": 2 })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("district"));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let base = spawn_server().await;
        let body: Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn error_status_mapping() {
        assert_eq!(
            ApiError::from(HarvestError::NotFound("District not found: X".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(HarvestError::InvalidData("bad".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(HarvestError::DataSourceUnavailable("timeout".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(HarvestError::Config("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn error_body_carries_detail() {
        let response =
            ApiError::from(HarvestError::NotFound("District not found: X".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "District not found: X");
    }
}
