//! Synthetic mouse clicks through enigo

use super::error::{AutomationError, AutomationResult};
use super::types::Clicker;
use crate::game_automation::region::ClickPoint;
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

pub struct EnigoClicker {
    enigo: Enigo,
}

impl EnigoClicker {
    pub fn new() -> AutomationResult<Self> {
        Ok(Self {
            enigo: Enigo::new(&Settings::default())?,
        })
    }
}

impl Clicker for EnigoClicker {
    fn click(&mut self, point: ClickPoint) -> AutomationResult<()> {
        let failed = |source| AutomationError::ClickFailed {
            x: point.x,
            y: point.y,
            source,
        };
        self.enigo
            .move_mouse(point.x, point.y, Coordinate::Abs)
            .map_err(failed)?;
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(failed)
    }
}
