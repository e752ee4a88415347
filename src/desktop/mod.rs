// Desktop module - OS glue for the automation loop
// Window capture (xcap), synthetic clicks (enigo) and the global stop key (rdev)
// behind the FrameSource/Clicker traits the session loop is written against.

pub mod capture;
pub mod clicker;
pub mod error;
pub mod keyboard;
pub mod types;

// Re-export the main types and functions for easy access
pub use capture::{WindowCapture, find_window, list_window_titles};
pub use clicker::EnigoClicker;
pub use error::{AutomationError, AutomationResult};
pub use keyboard::{StopSignal, spawn_stop_listener};
pub use types::{CapturedFrame, Clicker, FrameSource};
