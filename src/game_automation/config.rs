//! Configuration for an automation session

use super::policy::DEFAULT_CONFIRM_DELAY;
use super::region::CaptureRegion;
use crate::template_matching::DEFAULT_THRESHOLD;
use std::path::PathBuf;
use std::time::Duration;

/// Window title searched for when none is given
pub const DEFAULT_WINDOW_TITLE: &str = "TelegramDesktop";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Substring of the target window's title; the first match is used
    pub window_title: String,
    /// Monitored rectangle relative to the window; `None` for the whole window
    pub region: Option<CaptureRegion>,
    /// Directory holding the four template files; resolved automatically when `None`
    pub template_dir: Option<PathBuf>,
    /// Confidence threshold for template matching (0.0 to 1.0)
    pub threshold: f32,
    /// Pause between loop iterations
    pub frame_interval: Duration,
    /// How long a button must stay visible before it is clicked
    pub confirm_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            region: None,
            template_dir: None,
            threshold: DEFAULT_THRESHOLD,
            frame_interval: Duration::from_millis(50),
            confirm_delay: DEFAULT_CONFIRM_DELAY,
        }
    }
}
