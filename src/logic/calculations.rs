use crate::models::{DailyPrecipitation, Feasibility, MonthlyRainfall, RainfallCheck};
use chrono::{Datelike, NaiveDate};

/// Per-person daily water demand norm (liters)
pub const DAILY_DEMAND_LITERS_PER_PERSON: f64 = 80.0;

pub const DAYS_PER_YEAR: f64 = 365.0;

const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Round half away from zero to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Sum a daily precipitation series into monthly totals and an annual total.
/// Entries with an unparseable date or no value are skipped.
pub fn aggregate_rainfall(series: &[DailyPrecipitation]) -> (MonthlyRainfall, f64) {
    let mut monthly = MonthlyRainfall::new();
    let mut annual = 0.0;
    let mut skipped = 0usize;

    for day in series {
        let date = match NaiveDate::parse_from_str(day.date.trim(), ARCHIVE_DATE_FORMAT) {
            Ok(d) => d,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let Some(mm) = day.precipitation_mm else {
            skipped += 1;
            continue;
        };

        monthly.add(date.month(), mm);
        annual += mm;
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} unusable rainfall entries", skipped);
    }

    (monthly.map_values(|mm| round_to(mm, 2)), round_to(annual, 2))
}

pub fn annual_demand_liters(occupants: u32) -> f64 {
    occupants as f64 * DAILY_DEMAND_LITERS_PER_PERSON * DAYS_PER_YEAR
}

/// Compare the annual roof harvest against household demand
pub fn rainfall_check(
    monthly_mm: MonthlyRainfall,
    annual_mm: f64,
    roof_area_sqm: f64,
    runoff_coefficient: f64,
    occupants: u32,
) -> RainfallCheck {
    let harvest = annual_mm * roof_area_sqm * runoff_coefficient;
    let demand = annual_demand_liters(occupants);
    let coverage = if demand > 0.0 {
        harvest / demand * 100.0
    } else {
        0.0
    };

    RainfallCheck {
        monthly_mm,
        annual_mm,
        annual_harvest_liters: round_to(harvest, 2),
        annual_demand_liters: round_to(demand, 2),
        coverage_percent: round_to(coverage, 1),
        feasibility: Feasibility::from_coverage(coverage),
    }
}
