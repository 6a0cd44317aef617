pub mod config;
pub mod error;
pub mod events;
pub mod planner;
pub mod suitability;
pub mod telemetry;
pub mod weather;
