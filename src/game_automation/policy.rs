//! Decision policy: which detected elements to click this frame
//!
//! Buttons are only clicked after they stayed visible for the confirmation delay.
//! Ice cubes are clicked as soon as they appear. Green objects are clicked nearest
//! to the previous ice cube / green object click.

use super::types::{ClickAction, Decision, DetectionSet, PolicyState};
use crate::template_matching::{Position, TemplateClass};
use std::time::{Duration, Instant};

/// Default dwell time before a detected button is clicked
pub const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    confirm_delay: Duration,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_DELAY)
    }
}

impl DecisionPolicy {
    pub fn new(confirm_delay: Duration) -> Self {
        Self { confirm_delay }
    }

    pub fn confirm_delay(&self) -> Duration {
        self.confirm_delay
    }

    /// Run one policy step over this frame's detections
    ///
    /// Buttons are handled first (play before close), then ice cubes, then green
    /// objects. Every class that gets clicked is removed from `detections` before the
    /// next rule looks at it.
    pub fn decide(
        &self,
        mut state: PolicyState,
        mut detections: DetectionSet,
        now: Instant,
    ) -> (PolicyState, Decision) {
        let mut decision = Decision::default();

        for button in TemplateClass::BUTTONS {
            let Some(first) = detections.get(button).and_then(|hits| hits.first().copied()) else {
                // Disappearing restarts the confirmation wait
                state.set_found_at(button, None);
                continue;
            };

            match state.found_at(button) {
                None => {
                    state.set_found_at(button, Some(now));
                    decision.newly_pending.push(button);
                }
                Some(found) if now.saturating_duration_since(found) >= self.confirm_delay => {
                    decision.clicks.push(ClickAction {
                        class: button,
                        position: first,
                    });
                    state.set_found_at(button, None);
                    detections.remove(button);
                }
                Some(_) => {}
            }
        }

        if let Some(hits) = detections.remove(TemplateClass::IceCube)
            && let Some(&target) = hits.first()
        {
            decision.clicks.push(ClickAction {
                class: TemplateClass::IceCube,
                position: target,
            });
            state.last_click = Some(target);
        }

        if let Some(hits) = detections.remove(TemplateClass::GreenObject)
            && let Some(target) = nearest(&hits, state.last_click)
        {
            decision.clicks.push(ClickAction {
                class: TemplateClass::GreenObject,
                position: target,
            });
            state.last_click = Some(target);
        }

        (state, decision)
    }
}

/// Candidate closest to `reference`; first in scan order on ties or without a reference
pub fn nearest(candidates: &[Position], reference: Option<Position>) -> Option<Position> {
    let mut best: Option<(Position, f64)> = None;
    for &candidate in candidates {
        let distance = candidate.distance_to(reference);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(position, _)| position)
}
