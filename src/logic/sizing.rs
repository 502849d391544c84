use super::calculations::round_to;
use crate::models::{
    InfiltrationClass, RechargeStructure, StructureDesign, StructureKind, TankDesign,
    DEEP_WELL_NOTE, MAX_TANK_M3, MIN_VIABLE_TANK_M3, PIT_VOLUME_M3, SHAFT_VOLUME_M3,
};

/// Storage tank volume (m³) for the usable harvest and annual demand.
///
/// Capped by demand, by usable water and by the 50 m³ ceiling. When some
/// water is usable but the capped size falls under 10 m³, the tank is
/// raised toward 10 m³ as far as demand and usable water allow.
pub fn tank_volume(usable_m3: f64, demand_m3: f64) -> f64 {
    let mut volume = usable_m3.max(0.0).min(demand_m3).min(MAX_TANK_M3);

    if usable_m3 > 0.0 && volume < MIN_VIABLE_TANK_M3 {
        volume = MIN_VIABLE_TANK_M3.min(demand_m3).min(usable_m3);
    }

    volume
}

/// Recharge structure suited to the soil. Selection uses the soil keywords
/// only; the groundwater override applies to the reported infiltration class.
pub fn recharge_structure(soil_type: &str) -> RechargeStructure {
    match InfiltrationClass::from_soil_type(soil_type) {
        InfiltrationClass::High => RechargeStructure::sized(StructureKind::Pit, PIT_VOLUME_M3),
        InfiltrationClass::Medium => {
            RechargeStructure::sized(StructureKind::Shaft, SHAFT_VOLUME_M3)
        }
        InfiltrationClass::Low => {
            RechargeStructure::site_specific(StructureKind::DeepWell, DEEP_WELL_NOTE)
        }
    }
}

pub fn structure_design(soil_type: &str, usable_m3: f64, demand_m3: f64) -> StructureDesign {
    let volume = tank_volume(usable_m3, demand_m3);
    let unit_cost = StructureKind::Tank.unit_cost().unwrap_or_default();

    let tank = TankDesign {
        structure_type: StructureKind::Tank,
        volume_m3: round_to(volume, 2),
        cost_inr: round_to(volume * unit_cost, 2),
    };

    StructureDesign {
        tank,
        recharge: vec![recharge_structure(soil_type)],
    }
}
