use crate::models::{CombinedCheck, Feasibility, InfiltrationClass, Recommendation};

/// Pick a harvesting strategy from rainfall feasibility and site infiltration
///
/// | Feasibility | Infiltration | Strategy                                  |
/// |-------------|--------------|-------------------------------------------|
/// | Fully       | High         | Storage + shallow recharge pits/trenches  |
/// | Fully       | Medium       | Storage + percolation shafts              |
/// | Fully       | Low          | Storage tanks; recharge optional          |
/// | Partially   | High         | Recharge + small storage                  |
/// | Partially   | Medium       | Percolation shafts + partial storage      |
/// | otherwise   |              | Limited rooftop storage + alternate supply|
pub fn combined_recommendation(
    feasibility: Feasibility,
    infiltration: InfiltrationClass,
) -> CombinedCheck {
    use Feasibility::*;
    use InfiltrationClass::*;

    let final_recommendation = match (feasibility, infiltration) {
        (FullyMeetsDemand, High) => Recommendation::StorageWithRechargePits,
        (FullyMeetsDemand, Medium) => Recommendation::StorageWithPercolationShafts,
        (FullyMeetsDemand, Low) => Recommendation::StorageTanks,
        (PartiallyMeetsDemand, High) => Recommendation::RechargeWithSmallStorage,
        (PartiallyMeetsDemand, Medium) => Recommendation::PercolationShaftsWithPartialStorage,
        _ => Recommendation::LimitedStorageWithAlternateSupply,
    };

    CombinedCheck {
        final_recommendation,
    }
}
