use super::calculations::{aggregate_rainfall, rainfall_check};
use super::economics::economics;
use super::infiltration::infiltration_check;
use super::recommendation::combined_recommendation;
use super::sizing::structure_design;
use crate::datasources::{GeocodeProvider, ReferenceData, WeatherProvider};
use crate::error::Result;
use crate::models::{
    usable_fraction, DailyPrecipitation, EstimateReport, EstimateRequest, GroundwaterCheck,
    Notes, RoofParameters,
};
use chrono::{Datelike, Utc};

/// Everything the calculation pipeline needs, already fetched
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub series: Vec<DailyPrecipitation>,
    pub roof: RoofParameters,
    pub soil_type: String,
    pub groundwater_depth_m: Option<f64>,
    pub tariff_class: String,
    pub rainfall_year: i32,
}

/// Most recent complete calendar year
pub fn default_rainfall_year() -> i32 {
    Utc::now().year() - 1
}

/// Run the six pipeline steps in order. Pure: no I/O.
pub fn run_pipeline(inputs: PipelineInputs) -> EstimateReport {
    let (monthly, annual_mm) = aggregate_rainfall(&inputs.series);

    let rainfall = rainfall_check(
        monthly,
        annual_mm,
        inputs.roof.area_sqm,
        inputs.roof.runoff_coefficient(),
        inputs.roof.occupants,
    );

    let infiltration = infiltration_check(&inputs.soil_type, inputs.groundwater_depth_m);
    let combined = combined_recommendation(rainfall.feasibility, infiltration.infiltration);

    let usable_m3 =
        rainfall.annual_harvest_liters * usable_fraction(&inputs.soil_type) / 1000.0;
    let demand_m3 = rainfall.annual_demand_liters / 1000.0;
    let design = structure_design(&inputs.soil_type, usable_m3, demand_m3);

    let economics = economics(&design, &inputs.tariff_class);

    EstimateReport {
        rainfall_check: rainfall,
        infiltration_check: infiltration,
        groundwater_check: GroundwaterCheck {
            groundwater_depth: inputs.groundwater_depth_m,
        },
        combined_check: combined,
        structure_design: design,
        economics,
        notes: Notes::new(inputs.rainfall_year),
    }
}

/// Fetches the external inputs for a district and runs the pipeline
pub struct Estimator<G, W, R> {
    geocoder: G,
    weather: W,
    reference: R,
}

impl<G, W, R> Estimator<G, W, R>
where
    G: GeocodeProvider,
    W: WeatherProvider,
    R: ReferenceData,
{
    pub fn new(geocoder: G, weather: W, reference: R) -> Self {
        Self {
            geocoder,
            weather,
            reference,
        }
    }

    pub async fn estimate(&self, request: &EstimateRequest, year: i32) -> Result<EstimateReport> {
        let district = request.district.trim();

        let location = self.geocoder.geocode(district).await?;
        tracing::debug!(
            "Geocoded '{}' to {:.4}, {:.4}",
            district,
            location.latitude,
            location.longitude
        );

        let series = self.weather.fetch_annual_rainfall(location, year).await?;
        if series.is_empty() {
            tracing::warn!("No rainfall data for '{}' in {}", district, year);
        }

        let soil_type = self.reference.lookup_soil(district);
        let groundwater_depth_m = self.reference.lookup_groundwater_depth(district);
        let tariff_class = self.reference.lookup_tariff_class(district);

        let inputs = PipelineInputs {
            series,
            roof: RoofParameters::new(request.rooftop_area_sqm, &request.roof_type, request.people),
            soil_type,
            groundwater_depth_m,
            tariff_class,
            rainfall_year: year,
        };

        let report = run_pipeline(inputs);
        tracing::info!(
            "Estimate for '{}': {} ({:.1}% coverage), {}, cost-benefit {}",
            district,
            report.rainfall_check.feasibility,
            report.rainfall_check.coverage_percent,
            report.combined_check.final_recommendation,
            report.economics.cost_benefit_ratio_percent
        );

        Ok(report)
    }
}
