use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for automation operations.
pub type AutomationResult<T> = Result<T, AutomationError>;

/// The error type for everything a session can fail on.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("Failed to load template {path:?}: {source}")]
    TemplateLoadFailed {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Template set is incomplete")]
    TemplateSetIncomplete,

    #[error("No window with a title containing '{title}' was found")]
    WindowNotFound { title: String },

    #[error("Failed to enumerate windows: {source}")]
    WindowEnumerationFailed { source: xcap::XCapError },

    #[error("Window capture failed: {source}")]
    CaptureFailed {
        #[from]
        source: xcap::XCapError,
    },

    #[error("Captured buffer does not hold a {width}x{height} RGBA image")]
    InvalidCaptureBuffer { width: u32, height: u32 },

    #[error("Capture region [{x},{y},{width},{height}] lies outside the {window_width}x{window_height} window")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        window_width: u32,
        window_height: u32,
    },

    #[error("Failed to connect to the input system: {source}")]
    InputConnectionFailed {
        #[from]
        source: enigo::NewConError,
    },

    #[error("Click at ({x}, {y}) failed: {source}")]
    ClickFailed {
        x: i32,
        y: i32,
        source: enigo::InputError,
    },

    #[error("Matching worker failed to complete: {source}")]
    WorkerFailed {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to save screenshot {path:?}: {source}")]
    ScreenshotSaveFailed {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl AutomationError {
    /// Errors that stem from the target window going away mid-session
    pub fn is_window_lost(&self) -> bool {
        matches!(
            self,
            AutomationError::WindowNotFound { .. } | AutomationError::CaptureFailed { .. }
        )
    }
}
