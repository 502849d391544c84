use crate::models::{InfiltrationCheck, InfiltrationClass, SHALLOW_WATER_TABLE_M};

/// Classify how readily the site absorbs recharge water.
///
/// The soil keyword sets the base class. A water table shallower than
/// 2 m forces `Low` regardless of soil, since there is no room below
/// ground for recharged water to go.
pub fn infiltration_check(soil_type: &str, groundwater_depth_m: Option<f64>) -> InfiltrationCheck {
    let mut infiltration = InfiltrationClass::from_soil_type(soil_type);

    if let Some(depth) = groundwater_depth_m {
        if depth < SHALLOW_WATER_TABLE_M {
            tracing::debug!(
                "Shallow water table ({:.2} m) overrides {} infiltration",
                depth,
                infiltration
            );
            infiltration = InfiltrationClass::Low;
        }
    }

    InfiltrationCheck {
        soil_type: soil_type.to_string(),
        infiltration,
    }
}
