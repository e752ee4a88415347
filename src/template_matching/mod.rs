/// Template matching module for element detection in screen captures
///
/// This module provides:
/// - The four fixed element classes and their grayscale templates
/// - Template loading with packaged/source directory resolution
/// - Normalized cross-correlation matching with a fixed threshold
pub mod loader;
pub mod matcher;
pub mod types;

pub use loader::{TemplateSet, resolve_template_dir};
pub use matcher::{DEFAULT_THRESHOLD, find_matches};
pub use types::{Position, Template, TemplateClass};
