mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{RecordingObserver, RecordingScanout, ScriptedInput};
use realms_core::diag::DiagnosticState;
use realms_core::hud::{HudCompositor, HudLayout};
use realms_core::input::Button;
use realms_core::render_loop::{
    FrameObserver, LoopState, Overlay, RenderLoop, Stage, StopToken,
};
use realms_core::video::{Color, Framebuffer, SwapChain};

type TestLoop = RenderLoop<SwapChain<RecordingScanout>, ScriptedInput>;

fn make_loop(input: ScriptedInput) -> TestLoop {
    let chain = SwapChain::new(RecordingScanout::default(), 2).unwrap();
    RenderLoop::new(
        chain,
        input,
        DiagnosticState::default(),
        HudCompositor::new(HudLayout::default()),
    )
}

const ALL_STAGES: [Stage; 7] = [
    Stage::Acquired,
    Stage::InputPolled,
    Stage::StateAdvanced,
    Stage::BackgroundPainted,
    Stage::HudDrawn,
    Stage::OverlaysDrawn,
    Stage::Presented,
];

// ==========================================================================
// Ordering
// ==========================================================================

#[test]
fn test_stages_run_in_order_every_frame() {
    let mut lp = make_loop(ScriptedInput::taps(Button::Start, 3));
    let mut obs = RecordingObserver::default();
    for _ in 0..6 {
        lp.step_observed(&mut obs);
    }

    assert_eq!(obs.stages.len(), 6 * ALL_STAGES.len());
    for (frame, chunk) in obs.stages.chunks(ALL_STAGES.len()).enumerate() {
        let expected: Vec<_> = ALL_STAGES.iter().map(|&s| (frame as u64, s)).collect();
        assert_eq!(chunk, expected.as_slice());
    }
}

#[test]
fn test_background_then_hud_then_present() {
    let mut lp = make_loop(ScriptedInput::new(vec![]));
    let mut obs = RecordingObserver::default();
    lp.step_observed(&mut obs);

    let pos = |stage| obs.stages.iter().position(|&(_, s)| s == stage).unwrap();
    assert!(pos(Stage::BackgroundPainted) < pos(Stage::HudDrawn));
    assert!(pos(Stage::HudDrawn) < pos(Stage::Presented));
}

/// Overlay that checks the HUD and background are already on the surface.
struct ProbeOverlay {
    seen: Rc<RefCell<Vec<(Option<Color>, Option<Color>)>>>,
}

impl Overlay for ProbeOverlay {
    fn draw(&mut self, surface: &mut Framebuffer) {
        // (10, 10) is inside the first health pip; (160, 120) is open background
        self.seen
            .borrow_mut()
            .push((surface.pixel(10, 10), surface.pixel(160, 120)));
    }
}

#[test]
fn test_overlays_see_completed_hud() {
    let mut lp = make_loop(ScriptedInput::new(vec![]));
    let seen = Rc::new(RefCell::new(Vec::new()));
    lp.add_overlay(Box::new(ProbeOverlay { seen: seen.clone() }));
    lp.step();
    assert_eq!(
        seen.borrow().as_slice(),
        &[(Some(Color::RED), Some(Color::BLACK))]
    );
}

// ==========================================================================
// State threading
// ==========================================================================

#[test]
fn test_palette_follows_press_edges() {
    // press, release, press, release
    let mut lp = make_loop(ScriptedInput::taps(Button::Start, 2));
    let mut obs = RecordingObserver::default();
    for _ in 0..4 {
        lp.step_observed(&mut obs);
    }
    assert_eq!(
        obs.backgrounds,
        [Color::BLUE, Color::BLUE, Color::GREEN, Color::GREEN]
    );
    assert_eq!(lp.diagnostic().index(), 2);
}

#[test]
fn test_held_button_advances_once() {
    let input = ScriptedInput::from_levels(Button::Start, &[true; 10]);
    let mut lp = make_loop(input);
    let reports: Vec<_> = (0..10).map(|_| lp.step()).collect();
    let advances = reports.iter().filter(|r| r.palette_advanced).count();
    assert_eq!(advances, 1);
    assert!(reports.iter().all(|r| r.palette_index == 1));
}

#[test]
fn test_hud_state_changes_show_next_frame() {
    let mut lp = make_loop(ScriptedInput::new(vec![]));
    let mut obs = PipCounter::default();
    lp.step_observed(&mut obs);
    lp.hud_state_mut().health = 1;
    lp.step_observed(&mut obs);
    assert_eq!(obs.pips, [3, 1]);
    assert_eq!(lp.hud_state().health, 1);
}

#[derive(Default)]
struct PipCounter {
    pips: Vec<usize>,
}

impl FrameObserver for PipCounter {
    fn before_present(&mut self, _frame: u64, surface: &Framebuffer) {
        // Sample the center of each possible pip position
        let lit = (0..3)
            .filter(|i| surface.pixel(17 + i * 20, 17) == Some(Color::RED))
            .count();
        self.pips.push(lit);
    }
}

#[test]
fn test_reports_track_slots_and_frames() {
    let mut lp = make_loop(ScriptedInput::new(vec![]));
    assert_eq!(lp.state(), LoopState::Idle);
    let a = lp.step();
    let b = lp.step();
    assert_eq!(lp.state(), LoopState::Rendering);
    assert_eq!((a.frame, b.frame), (0, 1));
    assert_ne!(a.slot, b.slot);
    assert_eq!(lp.frames_rendered(), 2);
}

#[test]
fn test_input_polled_once_per_frame() {
    let mut lp = make_loop(ScriptedInput::new(vec![]));
    for _ in 0..5 {
        lp.step();
    }
    assert_eq!(lp.input().device().reads, 5);
}

// ==========================================================================
// Cancellation
// ==========================================================================

struct StopAfter {
    stop: StopToken,
    frames: u64,
}

impl FrameObserver for StopAfter {
    fn stage(&mut self, frame: u64, stage: Stage) {
        if stage == Stage::Presented && frame + 1 >= self.frames {
            self.stop.request_stop();
        }
    }
}

#[test]
fn test_run_stops_at_iteration_boundary() {
    let mut lp = make_loop(ScriptedInput::new(vec![]));
    let stop = StopToken::new();
    let mut obs = StopAfter {
        stop: stop.clone(),
        frames: 7,
    };
    let rendered = lp.run(&stop, &mut obs);
    assert_eq!(rendered, 7);
    // Flushed on exit: every presented frame reached the screen
    assert_eq!(lp.source().scanout().shown.len(), 7);
    assert_eq!(lp.source().queued_len(), 0);
}

#[test]
fn test_stop_requested_before_run_renders_nothing() {
    let mut lp = make_loop(ScriptedInput::new(vec![]));
    let stop = StopToken::new();
    stop.request_stop();
    let rendered = lp.run(&stop, &mut RecordingObserver::default());
    assert_eq!(rendered, 0);
    assert_eq!(lp.state(), LoopState::Idle);
}

#[test]
fn test_stop_mid_frame_finishes_frame() {
    let mut lp = make_loop(ScriptedInput::new(vec![]));
    let stop = StopToken::new();

    struct StopEarly(StopToken);
    impl FrameObserver for StopEarly {
        fn stage(&mut self, _frame: u64, stage: Stage) {
            if stage == Stage::InputPolled {
                self.0.request_stop();
            }
        }
    }

    let mut obs = StopEarly(stop.clone());
    assert_eq!(lp.run(&stop, &mut obs), 1);
    assert_eq!(lp.source().scanout().shown, [Color::BLACK]);
}
