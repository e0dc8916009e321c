pub mod types;
pub mod classification;

pub use types::RiskError;
pub use classification::ErrorClassification;
