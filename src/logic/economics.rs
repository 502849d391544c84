use super::calculations::round_to;
use crate::models::{water_price, CostBenefitRatio, Economics, StructureDesign};

/// Construction cost, annual savings from the stored water, and the
/// savings-to-cost ratio. Structures without a cost count as zero.
pub fn economics(design: &StructureDesign, classification: &str) -> Economics {
    let recharge_cost: f64 = design.recharge.iter().filter_map(|s| s.cost_inr).sum();
    let construction_cost = design.tank.cost_inr + recharge_cost;

    let price = water_price(classification);
    let gross_savings = design.tank.volume_m3 * price;

    let cost_benefit_ratio_percent = if construction_cost > 0.0 {
        CostBenefitRatio::Percent(round_to(gross_savings / construction_cost * 100.0, 2))
    } else {
        CostBenefitRatio::NotApplicable
    };

    Economics {
        construction_cost_inr: round_to(construction_cost, 2),
        annual_monetary_savings_inr: round_to(gross_savings, 2),
        cost_benefit_ratio_percent,
    }
}
