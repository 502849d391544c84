pub mod calculations;
pub mod economics;
pub mod estimator;
pub mod groundwater;
pub mod infiltration;
pub mod recommendation;
pub mod sizing;

pub use estimator::{default_rainfall_year, Estimator};
