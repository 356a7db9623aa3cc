pub mod config;
pub mod error;
pub mod geo;

pub use config::{AppConfig, RewardPolicy};
pub use error::TourcoinError;
pub use geo::{Coordinates, ProximityPolicy};
