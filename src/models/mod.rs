pub mod economics;
pub mod rainfall;
pub mod report;
pub mod site;
pub mod structure;

pub use economics::*;
pub use rainfall::*;
pub use report::*;
pub use site::*;
pub use structure::*;
