pub mod nominatim;
pub mod openmeteo;
pub mod reference;

pub use nominatim::NominatimClient;
pub use openmeteo::OpenMeteoClient;
pub use reference::ReferenceTables;

use crate::error::Result;
use crate::models::DailyPrecipitationSeries;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolves a place name to coordinates
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Fails with `NotFound` when nothing matches the name
    async fn geocode(&self, name: &str) -> Result<Coordinates>;
}

/// Historical daily precipitation for a location
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Daily series for one calendar year. An empty series means no data, not an error.
    async fn fetch_annual_rainfall(
        &self,
        location: Coordinates,
        year: i32,
    ) -> Result<DailyPrecipitationSeries>;
}

/// Per-district reference data. Every lookup has a documented fallback,
/// so a district missing from a table never fails an estimate.
pub trait ReferenceData: Send + Sync {
    /// Soil type description, "Loamy" when unknown
    fn lookup_soil(&self, district: &str) -> String;

    /// Average groundwater depth in meters, `None` when unknown or unparseable
    fn lookup_groundwater_depth(&self, district: &str) -> Option<f64>;

    /// Water tariff classification, "Typical urban slab" when unknown
    fn lookup_tariff_class(&self, district: &str) -> String;
}
