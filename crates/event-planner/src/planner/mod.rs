//! Event planning service and its HTTP surface.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::planner_router;
pub use service::{DateAssessment, EventPlanner, PlannerError, SuitabilityReport};
