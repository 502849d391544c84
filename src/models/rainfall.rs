use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One day of the historical precipitation series as the weather archive returns it.
/// The date is kept as raw text so malformed entries can be skipped during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrecipitation {
    pub date: String,
    pub precipitation_mm: Option<f64>,
}

impl DailyPrecipitation {
    pub fn new(date: impl Into<String>, precipitation_mm: Option<f64>) -> Self {
        Self {
            date: date.into(),
            precipitation_mm,
        }
    }
}

pub type DailyPrecipitationSeries = Vec<DailyPrecipitation>;

/// Rainfall totals per calendar month, keyed by month number (1-12).
/// Serializes as a `{"Jan": mm, ...}` map in calendar order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyRainfall {
    totals: BTreeMap<u32, f64>,
}

impl MonthlyRainfall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rainfall to a month. Months outside 1-12 are ignored.
    pub fn add(&mut self, month: u32, mm: f64) {
        if (1..=12).contains(&month) {
            *self.totals.entry(month).or_insert(0.0) += mm;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Iterate `(abbreviation, mm)` pairs in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.totals
            .iter()
            .map(|(month, mm)| (MONTH_ABBREVIATIONS[(*month - 1) as usize], *mm))
    }

    /// Apply a transformation to every monthly total
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            totals: self.totals.iter().map(|(m, v)| (*m, f(*v))).collect(),
        }
    }
}

impl Serialize for MonthlyRainfall {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.totals.len()))?;
        for (abbreviation, mm) in self.iter() {
            map.serialize_entry(abbreviation, &mm)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feasibility {
    #[serde(rename = "Fully meets demand")]
    FullyMeetsDemand,
    #[serde(rename = "Partially meets demand")]
    PartiallyMeetsDemand,
    #[serde(rename = "Not feasible")]
    NotFeasible,
}

impl Feasibility {
    /// Classify harvest coverage of annual demand. Band lower bounds are inclusive.
    pub fn from_coverage(coverage_percent: f64) -> Self {
        if coverage_percent >= 100.0 {
            Feasibility::FullyMeetsDemand
        } else if coverage_percent >= 50.0 {
            Feasibility::PartiallyMeetsDemand
        } else {
            Feasibility::NotFeasible
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feasibility::FullyMeetsDemand => "Fully meets demand",
            Feasibility::PartiallyMeetsDemand => "Partially meets demand",
            Feasibility::NotFeasible => "Not feasible",
        }
    }
}

impl std::fmt::Display for Feasibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallCheck {
    pub monthly_mm: MonthlyRainfall,
    pub annual_mm: f64,
    pub annual_harvest_liters: f64,
    pub annual_demand_liters: f64,
    pub coverage_percent: f64,
    pub feasibility: Feasibility,
}
