pub mod args;
pub mod desktop;
pub mod game_automation;
pub mod template_matching;

pub use game_automation::{SessionConfig, SessionOutcome, run_session};
