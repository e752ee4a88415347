//! Template loading and template directory resolution

use super::types::{Template, TemplateClass};
use crate::desktop::error::{AutomationError, AutomationResult};
use image::GrayImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The fixed set of four templates, one per class
#[derive(Clone, Debug)]
pub struct TemplateSet {
    templates: [Arc<Template>; 4],
}

impl TemplateSet {
    /// Build a set from already decoded images, in `TemplateClass::ALL` order
    pub fn from_images(images: [GrayImage; 4]) -> Self {
        let [play, close, ice, green] = images;
        Self {
            templates: [
                Arc::new(Template::new(TemplateClass::PlayButton, play)),
                Arc::new(Template::new(TemplateClass::CloseButton, close)),
                Arc::new(Template::new(TemplateClass::IceCube, ice)),
                Arc::new(Template::new(TemplateClass::GreenObject, green)),
            ],
        }
    }

    /// Load all four templates from `directory`; any failure aborts the load
    pub fn load_from_directory(directory: &Path) -> AutomationResult<Self> {
        let mut images = Vec::with_capacity(TemplateClass::ALL.len());
        for class in TemplateClass::ALL {
            let path = directory.join(class.file_name());
            let image = image::open(&path)
                .map_err(|source| AutomationError::TemplateLoadFailed {
                    path: path.clone(),
                    source,
                })?
                .to_luma8();
            images.push(image);
        }

        let images: [GrayImage; 4] = images
            .try_into()
            .map_err(|_| AutomationError::TemplateSetIncomplete)?;
        let set = Self::from_images(images);
        for template in set.iter() {
            log::debug!("Loaded template {} from {:?}", template.display_name(), directory);
        }
        Ok(set)
    }

    pub fn get(&self, class: TemplateClass) -> &Arc<Template> {
        &self.templates[class.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Template>> {
        self.templates.iter()
    }
}

/// Pick the directory templates are read from
///
/// An explicit directory always wins. Otherwise the executable's directory is used
/// when it holds all four files (packaged layout), then the working directory.
pub fn resolve_template_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();

    candidate_dir(exe_dir.into_iter().chain(cwd.clone()))
        .or(cwd)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// First candidate that contains every template file
fn candidate_dir(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|dir| has_all_templates(dir))
}

fn has_all_templates(dir: &Path) -> bool {
    TemplateClass::ALL
        .iter()
        .all(|class| dir.join(class.file_name()).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn write_templates(dir: &Path, classes: &[TemplateClass]) {
        for (i, class) in classes.iter().enumerate() {
            let img = GrayImage::from_pixel(4 + i as u32, 3, Luma([100 + i as u8]));
            img.save(dir.join(class.file_name())).unwrap();
        }
    }

    #[test]
    fn test_load_all_templates() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path(), &TemplateClass::ALL);

        let set = TemplateSet::load_from_directory(dir.path()).unwrap();
        assert_eq!(set.get(TemplateClass::PlayButton).width(), 4);
        assert_eq!(set.get(TemplateClass::GreenObject).width(), 7);
        assert_eq!(set.iter().count(), 4);
        for class in TemplateClass::ALL {
            assert_eq!(set.get(class).class, class);
        }
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(
            dir.path(),
            &[TemplateClass::PlayButton, TemplateClass::CloseButton, TemplateClass::IceCube],
        );

        let err = TemplateSet::load_from_directory(dir.path()).unwrap_err();
        match err {
            AutomationError::TemplateLoadFailed { path, .. } => {
                assert!(path.ends_with("green_object.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_corrupt_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_templates(dir.path(), &TemplateClass::ALL);
        std::fs::write(dir.path().join("ice_cube.png"), b"not a png").unwrap();

        assert!(matches!(
            TemplateSet::load_from_directory(dir.path()),
            Err(AutomationError::TemplateLoadFailed { .. })
        ));
    }

    #[test]
    fn test_explicit_dir_wins() {
        let resolved = resolve_template_dir(Some(Path::new("/opt/templates")));
        assert_eq!(resolved, PathBuf::from("/opt/templates"));
    }

    #[test]
    fn test_candidate_dir_skips_incomplete() {
        let incomplete = tempfile::tempdir().unwrap();
        write_templates(incomplete.path(), &[TemplateClass::PlayButton]);
        let complete = tempfile::tempdir().unwrap();
        write_templates(complete.path(), &TemplateClass::ALL);

        let found = candidate_dir([
            incomplete.path().to_path_buf(),
            complete.path().to_path_buf(),
        ]);
        assert_eq!(found, Some(complete.path().to_path_buf()));
    }
}
