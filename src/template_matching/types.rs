/// Template matching data types
use image::GrayImage;
use std::fmt;

/// The four element classes the automation knows how to recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateClass {
    PlayButton,
    CloseButton,
    IceCube,
    GreenObject,
}

impl TemplateClass {
    /// All classes, in template loading order
    pub const ALL: [TemplateClass; 4] = [
        TemplateClass::PlayButton,
        TemplateClass::CloseButton,
        TemplateClass::IceCube,
        TemplateClass::GreenObject,
    ];

    /// Buttons in the order the policy evaluates them
    pub const BUTTONS: [TemplateClass; 2] = [TemplateClass::PlayButton, TemplateClass::CloseButton];

    pub fn name(self) -> &'static str {
        match self {
            TemplateClass::PlayButton => "play_button",
            TemplateClass::CloseButton => "close_button",
            TemplateClass::IceCube => "ice_cube",
            TemplateClass::GreenObject => "green_object",
        }
    }

    /// Fixed template file name, e.g. `play_button.png`
    pub fn file_name(self) -> String {
        format!("{}.png", self.name())
    }

    /// Index into per-class arrays
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TemplateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pixel location relative to the top-left corner of the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`; an unset point is infinitely far away
    pub fn distance_to(&self, other: Option<Position>) -> f64 {
        match other {
            Some(other) => {
                let dx = self.x as f64 - other.x as f64;
                let dy = self.y as f64 - other.y as f64;
                (dx * dx + dy * dy).sqrt()
            }
            None => f64::INFINITY,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A grayscale reference image bound to one class
#[derive(Clone, Debug)]
pub struct Template {
    pub class: TemplateClass,
    pub image: GrayImage,
}

impl Template {
    pub fn new(class: TemplateClass, image: GrayImage) -> Self {
        Self { class, image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Offset from a match's top-left corner to the template centre
    pub fn half_size(&self) -> (u32, u32) {
        (self.width() / 2, self.height() / 2)
    }

    /// Class name with template size, for log lines
    pub fn display_name(&self) -> String {
        format!("{}-[{}x{}]", self.class, self.width(), self.height())
    }
}
