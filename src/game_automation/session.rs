// Automation session: capture → match → decide → click, until stopped or failed
use super::config::SessionConfig;
use super::detector::DetectionAggregator;
use super::policy::DecisionPolicy;
use super::region::ClickPoint;
use super::types::{ClickAction, PolicyState, SessionOutcome};
use crate::desktop::{
    AutomationResult, Clicker, EnigoClicker, FrameSource, StopSignal, WindowCapture,
};
use crate::template_matching::{TemplateSet, resolve_template_dir};
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

pub struct AutomationSession<S: FrameSource, C: Clicker> {
    source: S,
    clicker: C,
    templates: TemplateSet,
    aggregator: DetectionAggregator,
    policy: DecisionPolicy,
    state: PolicyState,
    frame_interval: Duration,
    iterations: u64,
}

impl<S: FrameSource, C: Clicker> AutomationSession<S, C> {
    pub fn new(
        source: S,
        clicker: C,
        templates: TemplateSet,
        config: &SessionConfig,
    ) -> AutomationResult<Self> {
        Ok(Self {
            source,
            clicker,
            templates,
            aggregator: DetectionAggregator::new(config.threshold)?,
            policy: DecisionPolicy::new(config.confirm_delay),
            state: PolicyState::new(),
            frame_interval: config.frame_interval,
            iterations: 0,
        })
    }

    pub fn state(&self) -> &PolicyState {
        &self.state
    }

    pub fn clicker(&self) -> &C {
        &self.clicker
    }

    /// Process one frame; returns the clicks performed, in order
    pub fn step(&mut self, now: Instant) -> AutomationResult<Vec<(ClickAction, ClickPoint)>> {
        self.iterations += 1;
        let frame = self.source.capture()?;
        let origin = frame.origin;
        let detections = self
            .aggregator
            .detect_all(Arc::new(frame.image), &self.templates)?;
        if !detections.is_empty() {
            let classes: Vec<_> = detections.classes().map(|c| c.name()).collect();
            log::debug!(
                "Frame {} (captured in {}ms) detected: {:?}",
                self.iterations,
                frame.duration_ms,
                classes
            );
        }

        let (state, decision) =
            self.policy
                .decide(std::mem::take(&mut self.state), detections, now);
        self.state = state;

        for button in &decision.newly_pending {
            println!(
                "⏳ {} found. Waiting {:.1} seconds before clicking.",
                button,
                self.policy.confirm_delay().as_secs_f32()
            );
        }

        let mut performed = Vec::with_capacity(decision.clicks.len());
        for action in decision.clicks {
            let template = self.templates.get(action.class);
            let point = origin.click_point(action.position, template.width(), template.height());
            self.clicker.click(point)?;
            println!("🖱️ Clicked {} at: ({}, {})", action.class, point.x, point.y);
            performed.push((action, point));
        }
        Ok(performed)
    }

    /// Loop until the stop signal is raised; the first error ends the loop
    pub fn run(&mut self, stop: &StopSignal) -> AutomationResult<()> {
        log::info!("🎮 Automation loop started");
        while !stop.is_raised() {
            let start = Instant::now();
            self.step(start)?;
            log::trace!(
                "Iteration {} took {}ms",
                self.iterations,
                start.elapsed().as_millis()
            );
            sleep(self.frame_interval);
        }
        log::info!("🎮 Automation loop ended after {} iterations", self.iterations);
        Ok(())
    }
}

/// Run one full session against the real desktop
///
/// Every failure, from template loading to a vanished window, is turned into
/// `SessionOutcome::Failed` so the caller can offer a restart.
pub fn run_session(config: &SessionConfig, stop: &StopSignal) -> SessionOutcome {
    stop.reset();

    let template_dir = resolve_template_dir(config.template_dir.as_deref());
    let templates = match TemplateSet::load_from_directory(&template_dir) {
        Ok(templates) => templates,
        Err(e) => {
            println!("❌ Failed to load templates. Please ensure all template files exist.");
            return SessionOutcome::Failed(e.to_string());
        }
    };
    log::info!("Loaded templates from {:?}", template_dir);

    let result = WindowCapture::open(&config.window_title, config.region)
        .and_then(|source| Ok((source, EnigoClicker::new()?)))
        .and_then(|(source, clicker)| AutomationSession::new(source, clicker, templates, config))
        .and_then(|mut session| {
            println!("🚀 Script is running. Press 'q' to stop.");
            session.run(stop)
        });

    match result {
        Ok(()) => SessionOutcome::Stopped,
        Err(e) => {
            if e.is_window_lost() {
                log::warn!("Target window '{}' is gone", config.window_title);
            }
            SessionOutcome::Failed(e.to_string())
        }
    }
}
