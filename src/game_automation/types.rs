// Types and enums for game automation
use crate::template_matching::{Position, TemplateClass};
use std::collections::BTreeMap;
use std::time::Instant;

/// Per-class detections for one frame; only classes with at least one hit are stored
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionSet {
    detections: BTreeMap<TemplateClass, Vec<Position>>,
}

impl DetectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the hits for `class`; an empty list leaves the class absent
    pub fn insert(&mut self, class: TemplateClass, positions: Vec<Position>) {
        if positions.is_empty() {
            self.detections.remove(&class);
        } else {
            self.detections.insert(class, positions);
        }
    }

    pub fn get(&self, class: TemplateClass) -> Option<&[Position]> {
        self.detections.get(&class).map(Vec::as_slice)
    }

    pub fn contains(&self, class: TemplateClass) -> bool {
        self.detections.contains_key(&class)
    }

    pub fn remove(&mut self, class: TemplateClass) -> Option<Vec<Position>> {
        self.detections.remove(&class)
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = TemplateClass> + '_ {
        self.detections.keys().copied()
    }

    /// Total hit count across classes
    pub fn total(&self) -> usize {
        self.detections.values().map(Vec::len).sum()
    }
}

impl<const N: usize> From<[(TemplateClass, Vec<Position>); N]> for DetectionSet {
    fn from(entries: [(TemplateClass, Vec<Position>); N]) -> Self {
        let mut set = DetectionSet::new();
        for (class, positions) in entries {
            set.insert(class, positions);
        }
        set
    }
}

/// Policy memory carried from one iteration to the next
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyState {
    /// When each button was first seen in its current run of presence (`None` = idle)
    pub play_button_found: Option<Instant>,
    pub close_button_found: Option<Instant>,
    /// Frame position of the last ice cube / green object click
    pub last_click: Option<Position>,
}

impl PolicyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found_at(&self, button: TemplateClass) -> Option<Instant> {
        match button {
            TemplateClass::PlayButton => self.play_button_found,
            TemplateClass::CloseButton => self.close_button_found,
            _ => None,
        }
    }

    pub(crate) fn set_found_at(&mut self, button: TemplateClass, at: Option<Instant>) {
        match button {
            TemplateClass::PlayButton => self.play_button_found = at,
            TemplateClass::CloseButton => self.close_button_found = at,
            _ => {}
        }
    }
}

/// A chosen target: click `class` at frame-relative `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickAction {
    pub class: TemplateClass,
    pub position: Position,
}

/// What the policy decided for one frame, in execution order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decision {
    pub clicks: Vec<ClickAction>,
    /// Buttons that were first seen this frame and are now waiting for confirmation
    pub newly_pending: Vec<TemplateClass>,
}

impl Decision {
    pub fn is_idle(&self) -> bool {
        self.clicks.is_empty() && self.newly_pending.is_empty()
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The stop key was pressed
    Stopped,
    /// An error aborted the session before or during the loop
    Failed(String),
}
