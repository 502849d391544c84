use serde::{Deserialize, Serialize, Serializer};

/// Water price (INR per m³) used when the tariff classification is unknown
pub const DEFAULT_WATER_PRICE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TariffClass {
    LowerBound,
    TypicalUrbanSlab,
    HighUrbanSlab,
}

impl TariffClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TariffClass::LowerBound => "Lower bound",
            TariffClass::TypicalUrbanSlab => "Typical urban slab",
            TariffClass::HighUrbanSlab => "High urban slab",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lower bound" => Some(TariffClass::LowerBound),
            "typical urban slab" => Some(TariffClass::TypicalUrbanSlab),
            "high urban slab" => Some(TariffClass::HighUrbanSlab),
            _ => None,
        }
    }

    /// Municipal water price per m³
    pub fn unit_price(&self) -> f64 {
        match self {
            TariffClass::LowerBound => 15.0,
            TariffClass::TypicalUrbanSlab => 30.0,
            TariffClass::HighUrbanSlab => 50.0,
        }
    }
}

impl std::fmt::Display for TariffClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn water_price(classification: &str) -> f64 {
    TariffClass::from_str(classification)
        .map(|t| t.unit_price())
        .unwrap_or(DEFAULT_WATER_PRICE)
}

/// Annual savings as a percentage of construction cost.
/// `NotApplicable` when there is nothing to build, distinct from a genuine 0%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostBenefitRatio {
    Percent(f64),
    NotApplicable,
}

impl CostBenefitRatio {
    pub fn percent(&self) -> Option<f64> {
        match self {
            CostBenefitRatio::Percent(p) => Some(*p),
            CostBenefitRatio::NotApplicable => None,
        }
    }
}

impl std::fmt::Display for CostBenefitRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.percent() {
            Some(p) => write!(f, "{:.2}%", p),
            None => write!(f, "N/A"),
        }
    }
}

impl Serialize for CostBenefitRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.percent() {
            Some(p) => serializer.serialize_f64(p),
            None => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Economics {
    pub construction_cost_inr: f64,
    pub annual_monetary_savings_inr: f64,
    pub cost_benefit_ratio_percent: CostBenefitRatio,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tariff_class_from_str() {
        assert_eq!(
            TariffClass::from_str("Lower bound"),
            Some(TariffClass::LowerBound)
        );
        assert_eq!(
            TariffClass::from_str("typical urban slab"),
            Some(TariffClass::TypicalUrbanSlab)
        );
        assert_eq!(
            TariffClass::from_str("High urban slab "),
            Some(TariffClass::HighUrbanSlab)
        );
        assert_eq!(TariffClass::from_str("Rural"), None);
    }

    #[test]
    fn water_price_defaults_to_typical_slab() {
        assert_eq!(water_price("Lower bound"), 15.0);
        assert_eq!(water_price("Typical urban slab"), 30.0);
        assert_eq!(water_price("High urban slab"), 50.0);
        assert_eq!(water_price("Unclassified"), DEFAULT_WATER_PRICE);
        assert_eq!(water_price(""), DEFAULT_WATER_PRICE);
    }

    #[test]
    fn cost_benefit_ratio_serialization() {
        assert_eq!(
            serde_json::to_string(&CostBenefitRatio::Percent(3.75)).unwrap(),
            "3.75"
        );
        assert_eq!(
            serde_json::to_string(&CostBenefitRatio::Percent(0.0)).unwrap(),
            "0.0"
        );
        assert_eq!(
            serde_json::to_string(&CostBenefitRatio::NotApplicable).unwrap(),
            "\"N/A\""
        );
    }

    #[test]
    fn cost_benefit_ratio_display() {
        assert_eq!(CostBenefitRatio::Percent(3.75).to_string(), "3.75%");
        assert_eq!(CostBenefitRatio::NotApplicable.to_string(), "N/A");
        assert_eq!(CostBenefitRatio::NotApplicable.percent(), None);
    }
}
