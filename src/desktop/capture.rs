//! Window discovery and region capture backed by xcap

use super::error::{AutomationError, AutomationResult};
use super::types::{CapturedFrame, FrameSource};
use crate::game_automation::region::{CaptureRegion, RegionOrigin};
use image::{DynamicImage, RgbaImage};
use std::path::Path;
use std::time::Instant;

/// Titles of every window the platform lets us see
pub fn list_window_titles() -> AutomationResult<Vec<String>> {
    let windows = xcap::Window::all()
        .map_err(|source| AutomationError::WindowEnumerationFailed { source })?;
    Ok(windows
        .iter()
        .filter_map(|w| w.title().ok())
        .filter(|t| !t.is_empty())
        .collect())
}

/// First window whose title contains `title`
pub fn find_window(title: &str) -> AutomationResult<xcap::Window> {
    let windows = xcap::Window::all()
        .map_err(|source| AutomationError::WindowEnumerationFailed { source })?;
    windows
        .into_iter()
        .find(|w| w.title().map(|t| t.contains(title)).unwrap_or(false))
        .ok_or_else(|| AutomationError::WindowNotFound {
            title: title.to_string(),
        })
}

/// Captures a fixed region of one window and converts it to grayscale
pub struct WindowCapture {
    window: xcap::Window,
    region: Option<CaptureRegion>,
    capture_count: u64,
}

impl WindowCapture {
    /// Locate the target window; `region` is relative to it, `None` means the whole window
    pub fn open(title: &str, region: Option<CaptureRegion>) -> AutomationResult<Self> {
        let window = find_window(title)?;
        log::info!(
            "Found window '{}' at ({}, {}) {}x{}",
            window.title().unwrap_or_default(),
            window.x().unwrap_or_default(),
            window.y().unwrap_or_default(),
            window.width().unwrap_or_default(),
            window.height().unwrap_or_default()
        );
        Ok(Self {
            window,
            region,
            capture_count: 0,
        })
    }

    /// Capture the region in colour, with its absolute origin
    fn capture_rgba(&mut self) -> AutomationResult<(RgbaImage, RegionOrigin)> {
        let captured = self.window.capture_image()?;
        let (width, height) = (captured.width(), captured.height());
        let full = RgbaImage::from_raw(width, height, captured.into_raw())
            .ok_or(AutomationError::InvalidCaptureBuffer { width, height })?;

        let requested = self
            .region
            .unwrap_or_else(|| CaptureRegion::full_window(width, height));
        let region = requested.clip_to_window(width, height).ok_or(
            AutomationError::RegionOutOfBounds {
                x: requested.x,
                y: requested.y,
                width: requested.width,
                height: requested.height,
                window_width: width,
                window_height: height,
            },
        )?;

        let origin = RegionOrigin::of(self.window.x()?, self.window.y()?, &region);
        let cropped =
            image::imageops::crop_imm(&full, region.x, region.y, region.width, region.height)
                .to_image();
        self.capture_count += 1;
        Ok((cropped, origin))
    }

    /// Save one colour capture of the region as PNG
    pub fn save_screenshot(&mut self, path: &Path) -> AutomationResult<(u32, u32)> {
        let (image, _) = self.capture_rgba()?;
        image
            .save(path)
            .map_err(|source| AutomationError::ScreenshotSaveFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok((image.width(), image.height()))
    }
}

impl FrameSource for WindowCapture {
    fn capture(&mut self) -> AutomationResult<CapturedFrame> {
        let start = Instant::now();
        let (rgba, origin) = self.capture_rgba()?;
        let image = DynamicImage::ImageRgba8(rgba).to_luma8();
        let duration_ms = start.elapsed().as_millis();
        log::trace!(
            "📸 Capture #{} {}x{} in {}ms",
            self.capture_count,
            image.width(),
            image.height(),
            duration_ms
        );
        Ok(CapturedFrame {
            image,
            origin,
            duration_ms,
        })
    }
}
