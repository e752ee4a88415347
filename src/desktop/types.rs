// Traits at the OS boundary: frame capture and click execution
use super::error::AutomationResult;
use crate::game_automation::region::{ClickPoint, RegionOrigin};
use image::GrayImage;

/// One captured frame of the monitored region
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub image: GrayImage,
    /// Absolute screen position of the frame's top-left pixel
    pub origin: RegionOrigin,
    pub duration_ms: u128,
}

// Source of grayscale frames for the capture region
pub trait FrameSource {
    fn capture(&mut self) -> AutomationResult<CapturedFrame>;
}

// Performs a synthetic left click at absolute screen coordinates
pub trait Clicker {
    fn click(&mut self, point: ClickPoint) -> AutomationResult<()>;
}
