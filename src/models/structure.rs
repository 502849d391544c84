use serde::{Deserialize, Serialize};

/// Storage tank ceiling (m³)
pub const MAX_TANK_M3: f64 = 50.0;

/// Smallest tank worth building when enough water is available (m³)
pub const MIN_VIABLE_TANK_M3: f64 = 10.0;

pub const PIT_VOLUME_M3: f64 = 5.0;
pub const SHAFT_VOLUME_M3: f64 = 10.0;

pub const DEEP_WELL_NOTE: &str = "Site-specific design";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Tank,
    Pit,
    Shaft,
    DeepWell,
}

impl StructureKind {
    /// Construction cost per m³. Deep wells are priced per site.
    pub fn unit_cost(&self) -> Option<f64> {
        match self {
            StructureKind::Tank => Some(800.0),
            StructureKind::Pit => Some(600.0),
            StructureKind::Shaft => Some(1200.0),
            StructureKind::DeepWell => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankDesign {
    pub structure_type: StructureKind,
    pub volume_m3: f64,
    pub cost_inr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RechargeStructure {
    pub structure_type: StructureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_m3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_inr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RechargeStructure {
    /// A recharge structure of fixed volume, costed at the kind's unit rate
    pub fn sized(kind: StructureKind, volume_m3: f64) -> Self {
        Self {
            structure_type: kind,
            volume_m3: Some(volume_m3),
            cost_inr: kind.unit_cost().map(|rate| volume_m3 * rate),
            note: None,
        }
    }

    /// A structure that needs a site survey before it can be sized or costed
    pub fn site_specific(kind: StructureKind, note: impl Into<String>) -> Self {
        Self {
            structure_type: kind,
            volume_m3: None,
            cost_inr: None,
            note: Some(note.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureDesign {
    pub tank: TankDesign,
    pub recharge: Vec<RechargeStructure>,
}
