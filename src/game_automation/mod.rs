// Game automation module
// This module provides the per-frame detection pipeline and the click decision
// policy for a desktop game window.

pub mod config;
pub mod detector;
pub mod policy;
pub mod region;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export the main types and functions for easy access
pub use config::SessionConfig;
pub use detector::DetectionAggregator;
pub use policy::{DecisionPolicy, nearest};
pub use region::{CaptureRegion, ClickPoint, RegionOrigin};
pub use session::{AutomationSession, run_session};
pub use types::{ClickAction, Decision, DetectionSet, PolicyState, SessionOutcome};
