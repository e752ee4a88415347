//! Capture region handling: the rectangle of the target window being monitored

use crate::template_matching::Position;

/// A rectangle relative to the target window's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole window
    pub fn full_window(window_width: u32, window_height: u32) -> Self {
        Self::new(0, 0, window_width, window_height)
    }

    /// Parse coordinates from a region string (e.g., "300,120,640,480")
    pub fn parse(region_str: &str) -> Option<CaptureRegion> {
        let parts: Vec<&str> = region_str.split(',').collect();
        if parts.len() == 4
            && let (Ok(x), Ok(y), Ok(width), Ok(height)) = (
                parts[0].trim().parse::<u32>(),
                parts[1].trim().parse::<u32>(),
                parts[2].trim().parse::<u32>(),
                parts[3].trim().parse::<u32>(),
            )
        {
            return Some(CaptureRegion::new(x, y, width, height));
        }
        None
    }

    /// Clip region to window boundaries; `None` when nothing of it is left
    pub fn clip_to_window(&self, window_width: u32, window_height: u32) -> Option<CaptureRegion> {
        if self.x >= window_width || self.y >= window_height {
            return None;
        }
        let clipped = CaptureRegion {
            x: self.x,
            y: self.y,
            width: self.width.min(window_width - self.x),
            height: self.height.min(window_height - self.y),
        };
        clipped.is_valid().then_some(clipped)
    }

    /// Check if this region is valid (non-zero dimensions)
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Absolute screen position of the capture region's top-left pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionOrigin {
    pub x: i32,
    pub y: i32,
}

impl RegionOrigin {
    /// Origin of `region` inside a window whose top-left corner sits at (`window_x`, `window_y`)
    pub fn of(window_x: i32, window_y: i32, region: &CaptureRegion) -> Self {
        Self {
            x: window_x + region.x as i32,
            y: window_y + region.y as i32,
        }
    }

    /// Absolute click point for a match at `position` of a template sized (`width`, `height`)
    ///
    /// Targets the centre of the matched area, not its corner.
    pub fn click_point(&self, position: Position, width: u32, height: u32) -> ClickPoint {
        ClickPoint {
            x: self.x + position.x as i32 + (width / 2) as i32,
            y: self.y + position.y as i32 + (height / 2) as i32,
        }
    }
}

/// Absolute screen coordinates for a synthetic click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickPoint {
    pub x: i32,
    pub y: i32,
}
