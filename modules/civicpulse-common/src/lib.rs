pub mod config;
pub mod error;
pub mod geo;
pub mod types;

pub use config::VerificationConfig;
pub use error::CivicPulseError;
pub use geo::haversine_meters;
pub use types::*;
