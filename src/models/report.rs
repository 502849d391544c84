use super::economics::Economics;
use super::rainfall::RainfallCheck;
use super::site::{GroundwaterCheck, InfiltrationCheck};
use super::structure::StructureDesign;
use crate::error::{HarvestError, Result};
use serde::{Deserialize, Serialize};

pub const KEY_FEATURES: [&str; 7] = [
    "Feasibility check for rooftop RWH",
    "Suggested type of RWH/Recharge structures",
    "Soil type & infiltration rate",
    "Groundwater depth",
    "Local rainfall data",
    "Recommended structure sizes",
    "Cost estimation & cost-benefit analysis",
];

fn default_rooftop_area() -> f64 {
    100.0
}

fn default_people() -> u32 {
    1
}

fn default_open_space() -> f64 {
    5.0
}

fn default_roof_type() -> String {
    "concrete".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub district: String,
    #[serde(default = "default_rooftop_area")]
    pub rooftop_area_sqm: f64,
    #[serde(default = "default_people")]
    pub people: u32,
    /// Accepted for compatibility; no calculation reads it.
    #[serde(default = "default_open_space")]
    pub open_space_sqm: f64,
    #[serde(default = "default_roof_type")]
    pub roof_type: String,
}

impl EstimateRequest {
    pub fn new(district: impl Into<String>) -> Self {
        Self {
            district: district.into(),
            rooftop_area_sqm: default_rooftop_area(),
            people: default_people(),
            open_space_sqm: default_open_space(),
            roof_type: default_roof_type(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.district.trim().is_empty() {
            return Err(HarvestError::InvalidData(
                "district must not be empty".into(),
            ));
        }
        if !self.rooftop_area_sqm.is_finite() || self.rooftop_area_sqm < 0.0 {
            return Err(HarvestError::InvalidData(format!(
                "rooftop_area_sqm must be a non-negative number, got {}",
                self.rooftop_area_sqm
            )));
        }
        if !self.open_space_sqm.is_finite() || self.open_space_sqm < 0.0 {
            return Err(HarvestError::InvalidData(format!(
                "open_space_sqm must be a non-negative number, got {}",
                self.open_space_sqm
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Storage + shallow recharge pits/trenches")]
    StorageWithRechargePits,
    #[serde(rename = "Storage + percolation shafts")]
    StorageWithPercolationShafts,
    #[serde(rename = "Storage tanks; recharge optional")]
    StorageTanks,
    #[serde(rename = "Recharge + small storage")]
    RechargeWithSmallStorage,
    #[serde(rename = "Percolation shafts + partial storage")]
    PercolationShaftsWithPartialStorage,
    #[serde(rename = "Limited rooftop storage + alternate supply")]
    LimitedStorageWithAlternateSupply,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StorageWithRechargePits => "Storage + shallow recharge pits/trenches",
            Recommendation::StorageWithPercolationShafts => "Storage + percolation shafts",
            Recommendation::StorageTanks => "Storage tanks; recharge optional",
            Recommendation::RechargeWithSmallStorage => "Recharge + small storage",
            Recommendation::PercolationShaftsWithPartialStorage => {
                "Percolation shafts + partial storage"
            }
            Recommendation::LimitedStorageWithAlternateSupply => {
                "Limited rooftop storage + alternate supply"
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedCheck {
    pub final_recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notes {
    pub key_features: Vec<&'static str>,
    pub rainfall_year: i32,
}

impl Notes {
    pub fn new(rainfall_year: i32) -> Self {
        Self {
            key_features: KEY_FEATURES.to_vec(),
            rainfall_year,
        }
    }
}

/// Full feasibility report for one district
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub rainfall_check: RainfallCheck,
    pub infiltration_check: InfiltrationCheck,
    pub groundwater_check: GroundwaterCheck,
    pub combined_check: CombinedCheck,
    pub structure_design: StructureDesign,
    pub economics: Economics,
    pub notes: Notes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_apply_to_missing_fields() {
        let req: EstimateRequest = serde_json::from_str(r#"{"district": "Pune"}"#).unwrap();
        assert_eq!(req, EstimateRequest::new("Pune"));
        assert_eq!(req.rooftop_area_sqm, 100.0);
        assert_eq!(req.people, 1);
        assert_eq!(req.open_space_sqm, 5.0);
        assert_eq!(req.roof_type, "concrete");
    }

    #[test]
    fn request_rejects_negative_people() {
        let parsed: std::result::Result<EstimateRequest, _> =
            serde_json::from_str(r#"{"district": "Pune", "people": -1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn request_validation() {
        assert!(EstimateRequest::new("Pune").validate().is_ok());

        let blank = EstimateRequest::new("   ");
        assert!(matches!(
            blank.validate(),
            Err(HarvestError::InvalidData(_))
        ));

        let mut negative_area = EstimateRequest::new("Pune");
        negative_area.rooftop_area_sqm = -1.0;
        assert!(negative_area.validate().is_err());

        let mut nan_space = EstimateRequest::new("Pune");
        nan_space.open_space_sqm = f64::NAN;
        assert!(nan_space.validate().is_err());

        let mut zero = EstimateRequest::new("Pune");
        zero.rooftop_area_sqm = 0.0;
        zero.people = 0;
        zero.open_space_sqm = 0.0;
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn recommendation_serializes_as_text() {
        let check = CombinedCheck {
            final_recommendation: Recommendation::StorageTanks,
        };
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(
            json["final_recommendation"],
            "Storage tanks; recharge optional"
        );
    }

    #[test]
    fn notes_list_key_features() {
        let notes = Notes::new(2025);
        assert_eq!(notes.key_features.len(), 7);
        assert_eq!(notes.rainfall_year, 2025);
    }
}
