use serde::{Deserialize, Serialize};

/// Runoff coefficient used when the roof material is not recognised
pub const DEFAULT_RUNOFF_COEFFICIENT: f64 = 0.85;

/// Usable fraction used when the soil category is not recognised
pub const DEFAULT_USABLE_FRACTION: f64 = 0.85;

/// Water table depth (m) below which infiltration structures are not viable
pub const SHALLOW_WATER_TABLE_M: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoofMaterial {
    Concrete,
    Metal,
    Tile,
    Green,
    Asphalt,
}

impl RoofMaterial {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoofMaterial::Concrete => "Concrete",
            RoofMaterial::Metal => "Metal",
            RoofMaterial::Tile => "Tile",
            RoofMaterial::Green => "Green",
            RoofMaterial::Asphalt => "Asphalt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "concrete" => Some(RoofMaterial::Concrete),
            "metal" => Some(RoofMaterial::Metal),
            "tile" => Some(RoofMaterial::Tile),
            "green" => Some(RoofMaterial::Green),
            "asphalt" => Some(RoofMaterial::Asphalt),
            _ => None,
        }
    }

    /// Fraction of rainfall on this surface that becomes collectible runoff
    pub fn runoff_coefficient(&self) -> f64 {
        match self {
            RoofMaterial::Concrete => 0.85,
            RoofMaterial::Metal => 0.9,
            RoofMaterial::Tile => 0.75,
            RoofMaterial::Green => 0.6,
            RoofMaterial::Asphalt => 0.75,
        }
    }
}

impl std::fmt::Display for RoofMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoofParameters {
    pub area_sqm: f64,
    pub material: Option<RoofMaterial>,
    pub occupants: u32,
}

impl RoofParameters {
    pub fn new(area_sqm: f64, roof_type: &str, occupants: u32) -> Self {
        let material = RoofMaterial::from_str(roof_type);
        if material.is_none() {
            tracing::debug!(
                "Unknown roof type '{}', using runoff coefficient {}",
                roof_type,
                DEFAULT_RUNOFF_COEFFICIENT
            );
        }
        Self {
            area_sqm,
            material,
            occupants,
        }
    }

    pub fn runoff_coefficient(&self) -> f64 {
        self.material
            .map(|m| m.runoff_coefficient())
            .unwrap_or(DEFAULT_RUNOFF_COEFFICIENT)
    }
}

/// Soil categories with a known usable-water fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilCategory {
    Sandy,
    Gravel,
    Loamy,
    Alluvial,
    Clayey,
}

impl SoilCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilCategory::Sandy => "Sandy",
            SoilCategory::Gravel => "Gravel",
            SoilCategory::Loamy => "Loamy",
            SoilCategory::Alluvial => "Alluvial",
            SoilCategory::Clayey => "Clayey",
        }
    }

    /// Exact (case-insensitive) category name. Compound descriptions such as
    /// "Red loamy" do not match and fall back to the default fraction.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sandy" => Some(SoilCategory::Sandy),
            "gravel" => Some(SoilCategory::Gravel),
            "loamy" => Some(SoilCategory::Loamy),
            "alluvial" => Some(SoilCategory::Alluvial),
            "clayey" => Some(SoilCategory::Clayey),
            _ => None,
        }
    }

    pub fn usable_fraction(&self) -> f64 {
        match self {
            SoilCategory::Sandy | SoilCategory::Gravel => 0.9,
            SoilCategory::Loamy | SoilCategory::Alluvial => 0.85,
            SoilCategory::Clayey => 0.75,
        }
    }
}

impl std::fmt::Display for SoilCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fraction of harvested water assumed storable for a free-text soil type
pub fn usable_fraction(soil_type: &str) -> f64 {
    SoilCategory::from_str(soil_type)
        .map(|c| c.usable_fraction())
        .unwrap_or(DEFAULT_USABLE_FRACTION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfiltrationClass {
    High,
    Medium,
    Low,
}

impl InfiltrationClass {
    /// Base class from soil type keywords, before any groundwater override
    pub fn from_soil_type(soil_type: &str) -> Self {
        let soil = soil_type.to_lowercase();
        if soil.contains("sand") || soil.contains("gravel") {
            InfiltrationClass::High
        } else if soil.contains("loam") || soil.contains("alluvial") {
            InfiltrationClass::Medium
        } else {
            InfiltrationClass::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InfiltrationClass::High => "High",
            InfiltrationClass::Medium => "Medium",
            InfiltrationClass::Low => "Low",
        }
    }
}

impl std::fmt::Display for InfiltrationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfiltrationCheck {
    pub soil_type: String,
    pub infiltration: InfiltrationClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundwaterCheck {
    pub groundwater_depth: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roof_material_from_str() {
        assert_eq!(
            RoofMaterial::from_str("concrete"),
            Some(RoofMaterial::Concrete)
        );
        assert_eq!(RoofMaterial::from_str("METAL"), Some(RoofMaterial::Metal));
        assert_eq!(RoofMaterial::from_str(" tile "), Some(RoofMaterial::Tile));
        assert_eq!(RoofMaterial::from_str("thatch"), None);
        assert_eq!(RoofMaterial::from_str(""), None);
    }

    #[test]
    fn roof_runoff_coefficients() {
        assert_eq!(RoofMaterial::Concrete.runoff_coefficient(), 0.85);
        assert_eq!(RoofMaterial::Metal.runoff_coefficient(), 0.9);
        assert_eq!(RoofMaterial::Tile.runoff_coefficient(), 0.75);
        assert_eq!(RoofMaterial::Green.runoff_coefficient(), 0.6);
        assert_eq!(RoofMaterial::Asphalt.runoff_coefficient(), 0.75);
    }

    #[test]
    fn unknown_roof_falls_back_to_default_coefficient() {
        let roof = RoofParameters::new(100.0, "thatch", 2);
        assert!(roof.material.is_none());
        assert_eq!(roof.runoff_coefficient(), DEFAULT_RUNOFF_COEFFICIENT);

        let metal = RoofParameters::new(100.0, "Metal", 2);
        assert_eq!(metal.runoff_coefficient(), 0.9);
    }

    #[test]
    fn usable_fraction_by_category() {
        assert_eq!(usable_fraction("Sandy"), 0.9);
        assert_eq!(usable_fraction("gravel"), 0.9);
        assert_eq!(usable_fraction("LOAMY"), 0.85);
        assert_eq!(usable_fraction("Alluvial"), 0.85);
        assert_eq!(usable_fraction("clayey"), 0.75);
    }

    #[test]
    fn usable_fraction_requires_exact_category() {
        assert_eq!(usable_fraction("Laterite"), DEFAULT_USABLE_FRACTION);
        assert_eq!(usable_fraction("Red clayey"), DEFAULT_USABLE_FRACTION);
        assert_eq!(usable_fraction(""), DEFAULT_USABLE_FRACTION);
    }

    #[test]
    fn infiltration_class_from_soil_keywords() {
        assert_eq!(
            InfiltrationClass::from_soil_type("Coastal Sandy"),
            InfiltrationClass::High
        );
        assert_eq!(
            InfiltrationClass::from_soil_type("GRAVEL"),
            InfiltrationClass::High
        );
        assert_eq!(
            InfiltrationClass::from_soil_type("Red Loamy"),
            InfiltrationClass::Medium
        );
        assert_eq!(
            InfiltrationClass::from_soil_type("alluvial"),
            InfiltrationClass::Medium
        );
        assert_eq!(
            InfiltrationClass::from_soil_type("Black cotton"),
            InfiltrationClass::Low
        );
        assert_eq!(
            InfiltrationClass::from_soil_type("Clayey"),
            InfiltrationClass::Low
        );
    }

    #[test]
    fn sand_takes_precedence_over_loam() {
        assert_eq!(
            InfiltrationClass::from_soil_type("Sandy loam"),
            InfiltrationClass::High
        );
    }
}
