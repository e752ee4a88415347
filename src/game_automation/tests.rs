//! Tests for the detection → decision → click pipeline

use crate::desktop::{AutomationError, AutomationResult, CapturedFrame, Clicker, FrameSource};
use crate::game_automation::{
    AutomationSession, CaptureRegion, ClickAction, ClickPoint, DecisionPolicy, DetectionSet,
    PolicyState, RegionOrigin, SessionConfig, SessionOutcome, run_session,
};
use crate::desktop::StopSignal;
use crate::template_matching::{Position, TemplateClass, TemplateSet};
use image::{GrayImage, Luma};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

fn pattern(seed: u32, width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let v = (x * 7919 + y * 104_729 + x * y * 31 + seed * 4099) % 223;
        Luma([(v + 32) as u8])
    })
}

fn templates() -> TemplateSet {
    TemplateSet::from_images([
        pattern(1, 8, 6),
        pattern(2, 6, 6),
        pattern(3, 5, 7),
        pattern(4, 6, 4),
    ])
}

fn frame_with(set: &TemplateSet, placed: &[(TemplateClass, u32, u32)]) -> GrayImage {
    let mut frame = GrayImage::new(80, 60);
    for &(class, x, y) in placed {
        image::imageops::replace(&mut frame, &set.get(class).image, x as i64, y as i64);
    }
    frame
}

/// Replays queued frames, then fails like a closed window
struct ScriptedSource {
    frames: VecDeque<GrayImage>,
    origin: RegionOrigin,
}

impl FrameSource for ScriptedSource {
    fn capture(&mut self) -> AutomationResult<CapturedFrame> {
        let image = self
            .frames
            .pop_front()
            .ok_or_else(|| AutomationError::WindowNotFound {
                title: "scripted".to_string(),
            })?;
        Ok(CapturedFrame {
            image,
            origin: self.origin,
            duration_ms: 0,
        })
    }
}

#[derive(Default)]
struct RecordingClicker {
    clicks: Vec<ClickPoint>,
}

impl Clicker for RecordingClicker {
    fn click(&mut self, point: ClickPoint) -> AutomationResult<()> {
        self.clicks.push(point);
        Ok(())
    }
}

fn session(
    frames: Vec<GrayImage>,
    set: TemplateSet,
) -> AutomationSession<ScriptedSource, RecordingClicker> {
    let config = SessionConfig {
        threshold: 0.99,
        ..SessionConfig::default()
    };
    let source = ScriptedSource {
        frames: frames.into(),
        origin: RegionOrigin::of(100, 200, &CaptureRegion::new(10, 20, 80, 60)),
    };
    AutomationSession::new(source, RecordingClicker::default(), set, &config).unwrap()
}

#[test]
fn test_play_button_confirmed_after_delay() {
    let policy = DecisionPolicy::default();
    let t0 = Instant::now();
    let detections = || DetectionSet::from([(TemplateClass::PlayButton, vec![Position::new(10, 10)])]);

    let (state, decision) = policy.decide(PolicyState::new(), detections(), t0);
    assert!(decision.clicks.is_empty());
    assert_eq!(decision.newly_pending, vec![TemplateClass::PlayButton]);
    assert_eq!(state.play_button_found, Some(t0));

    let later = t0 + Duration::from_secs_f64(5.001);
    let (state, decision) = policy.decide(state, detections(), later);
    assert_eq!(
        decision.clicks,
        vec![ClickAction {
            class: TemplateClass::PlayButton,
            position: Position::new(10, 10)
        }]
    );
    assert_eq!(state.play_button_found, None);
}

#[test]
fn test_interrupted_presence_restarts_wait() {
    let policy = DecisionPolicy::default();
    let t0 = Instant::now();
    let present = || DetectionSet::from([(TemplateClass::CloseButton, vec![Position::new(0, 0)])]);

    let (state, _) = policy.decide(PolicyState::new(), present(), t0);
    let (state, _) = policy.decide(state, present(), t0 + Duration::from_secs(4));
    let (state, _) = policy.decide(state, DetectionSet::new(), t0 + Duration::from_millis(4500));
    assert_eq!(state.close_button_found, None);

    let back = t0 + Duration::from_secs(6);
    let (state, decision) = policy.decide(state, present(), back);
    assert!(decision.clicks.is_empty());
    assert_eq!(state.close_button_found, Some(back));

    let (_, decision) = policy.decide(state, present(), back + Duration::from_secs(5));
    assert_eq!(decision.clicks.len(), 1);
}

#[test]
fn test_ice_cube_then_nearest_green_object() {
    let policy = DecisionPolicy::default();
    let detections = DetectionSet::from([
        (TemplateClass::IceCube, vec![Position::new(5, 5)]),
        (
            TemplateClass::GreenObject,
            vec![Position::new(50, 50), Position::new(5, 8)],
        ),
    ]);

    let (state, decision) = policy.decide(PolicyState::new(), detections, Instant::now());

    assert_eq!(
        decision.clicks,
        vec![
            ClickAction {
                class: TemplateClass::IceCube,
                position: Position::new(5, 5)
            },
            ClickAction {
                class: TemplateClass::GreenObject,
                position: Position::new(5, 8)
            },
        ]
    );
    assert_eq!(state.last_click, Some(Position::new(5, 8)));
}

#[test]
fn test_fired_button_not_reprocessed_by_special_cases() {
    let policy = DecisionPolicy::default();
    let t0 = Instant::now();
    let state = PolicyState {
        play_button_found: Some(t0),
        ..PolicyState::default()
    };
    let detections = DetectionSet::from([
        (TemplateClass::PlayButton, vec![Position::new(1, 1)]),
        (TemplateClass::GreenObject, vec![Position::new(9, 9)]),
    ]);

    let (state, decision) = policy.decide(state, detections, t0 + Duration::from_secs(5));

    assert_eq!(decision.clicks.len(), 2);
    assert_eq!(decision.clicks[0].class, TemplateClass::PlayButton);
    assert_eq!(decision.clicks[1].class, TemplateClass::GreenObject);
    assert_eq!(state.last_click, Some(Position::new(9, 9)));
}

#[test]
fn test_session_clicks_template_centre_in_screen_space() {
    let set = templates();
    let frame = frame_with(&set, &[(TemplateClass::IceCube, 30, 12)]);
    let mut session = session(vec![frame], set);

    let clicks = session.step(Instant::now()).unwrap();

    // origin (110, 220) + match (30, 12) + half of 5x7 (2, 3)
    let expected = ClickPoint { x: 142, y: 235 };
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].1, expected);
    assert_eq!(session.clicker().clicks, vec![expected]);
    assert_eq!(session.state().last_click, Some(Position::new(30, 12)));
}

#[test]
fn test_session_button_waits_for_confirmation() {
    let set = templates();
    let frame = frame_with(&set, &[(TemplateClass::PlayButton, 10, 10)]);
    let mut session = session(vec![frame.clone(), frame.clone(), frame], set);
    let t0 = Instant::now();

    assert!(session.step(t0).unwrap().is_empty());
    assert_eq!(session.state().play_button_found, Some(t0));

    assert!(session.step(t0 + Duration::from_secs(2)).unwrap().is_empty());

    let clicks = session.step(t0 + Duration::from_secs(5)).unwrap();
    // origin (110, 220) + match (10, 10) + half of 8x6 (4, 3)
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].1, ClickPoint { x: 124, y: 233 });
    assert_eq!(session.state().play_button_found, None);
}

#[test]
fn test_session_green_follows_previous_click() {
    let set = templates();
    let first = frame_with(&set, &[(TemplateClass::IceCube, 60, 40)]);
    let second = frame_with(
        &set,
        &[(TemplateClass::GreenObject, 2, 2), (TemplateClass::GreenObject, 55, 45)],
    );
    let mut session = session(vec![first, second], set);
    let t0 = Instant::now();

    session.step(t0).unwrap();
    let clicks = session.step(t0 + Duration::from_millis(50)).unwrap();

    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].0.position, Position::new(55, 45));
}

#[test]
fn test_session_error_surfaces_from_capture() {
    let mut session = session(Vec::new(), templates());
    let err = session.step(Instant::now()).unwrap_err();
    assert!(err.is_window_lost());
}

#[test]
fn test_session_run_stops_on_signal() {
    let stop = StopSignal::new();
    stop.raise();
    let mut session = session(Vec::new(), templates());
    assert!(session.run(&stop).is_ok());
    assert!(session.clicker().clicks.is_empty());
}

#[test]
fn test_session_run_ends_with_error_when_window_goes_away() {
    let set = templates();
    let frame = frame_with(&set, &[(TemplateClass::IceCube, 30, 12)]);
    let mut session = session(vec![frame], set);

    let err = session.run(&StopSignal::new()).unwrap_err();

    assert!(err.is_window_lost());
    assert_eq!(session.clicker().clicks, vec![ClickPoint { x: 142, y: 235 }]);
}

#[test]
fn test_run_session_fails_on_missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let set = templates();
    for class in [TemplateClass::PlayButton, TemplateClass::CloseButton, TemplateClass::IceCube] {
        set.get(class)
            .image
            .save(dir.path().join(class.file_name()))
            .unwrap();
    }
    let config = SessionConfig {
        template_dir: Some(dir.path().to_path_buf()),
        ..SessionConfig::default()
    };
    let stop = StopSignal::new();
    stop.raise();

    let outcome = run_session(&config, &stop);

    match outcome {
        SessionOutcome::Failed(reason) => assert!(reason.contains("green_object.png")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!stop.is_raised());
}
