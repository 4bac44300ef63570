//! The per-frame driver.
//!
//! Every iteration runs the same fixed sequence: acquire a back buffer, poll
//! input, advance the diagnostic state, paint the background, draw the HUD
//! and any extra overlays, then present. Nothing is presented before both the
//! background and the HUD are complete.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::diag::DiagnosticState;
use crate::hud::{HudCompositor, HudState};
use crate::input::{InputDevice, InputSampler, InputSnapshot};
use crate::video::{FrameSource, Framebuffer};

/// Shared stop request, checked once per iteration boundary.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop after the frame in progress is presented.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// No frame has been started yet.
    Idle,
    /// At least one iteration has started. There is no terminal state.
    Rendering,
}

/// Points within one iteration, in the order they happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Acquired,
    InputPolled,
    StateAdvanced,
    BackgroundPainted,
    HudDrawn,
    OverlaysDrawn,
    Presented,
}

/// Instrumentation hooks. All methods default to doing nothing.
pub trait FrameObserver {
    /// Called as each stage of frame `frame` completes.
    fn stage(&mut self, _frame: u64, _stage: Stage) {}

    /// Called with the finished surface just before it is presented.
    fn before_present(&mut self, _frame: u64, _surface: &Framebuffer) {}
}

pub struct NoopObserver;

impl FrameObserver for NoopObserver {}

/// Extra drawing composited after the HUD.
pub trait Overlay {
    fn draw(&mut self, surface: &mut Framebuffer);
}

/// What happened during one iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    /// Backing surface the frame was drawn into.
    pub slot: usize,
    pub input: InputSnapshot,
    pub palette_index: usize,
    pub palette_advanced: bool,
}

pub struct RenderLoop<S, D> {
    source: S,
    input: InputSampler<D>,
    diag: DiagnosticState,
    hud: HudCompositor,
    hud_state: HudState,
    overlays: Vec<Box<dyn Overlay>>,
    state: LoopState,
    frames: u64,
}

impl<S: FrameSource, D: InputDevice> RenderLoop<S, D> {
    pub fn new(source: S, device: D, diag: DiagnosticState, hud: HudCompositor) -> Self {
        Self {
            source,
            input: InputSampler::new(device),
            diag,
            hud,
            hud_state: HudState::default(),
            overlays: Vec::new(),
            state: LoopState::Idle,
            frames: 0,
        }
    }

    /// Overlays draw in the order they were added.
    pub fn add_overlay(&mut self, overlay: Box<dyn Overlay>) {
        self.overlays.push(overlay);
    }

    pub fn hud_state(&self) -> &HudState {
        &self.hud_state
    }

    /// Gameplay writes HUD values here between frames.
    pub fn hud_state_mut(&mut self) -> &mut HudState {
        &mut self.hud_state
    }

    pub fn diagnostic(&self) -> &DiagnosticState {
        &self.diag
    }

    pub fn input(&self) -> &InputSampler<D> {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputSampler<D> {
        &mut self.input
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Run one iteration.
    pub fn step(&mut self) -> FrameReport {
        self.step_observed(&mut NoopObserver)
    }

    /// Run one iteration, reporting each stage to `observer`.
    pub fn step_observed(&mut self, observer: &mut dyn FrameObserver) -> FrameReport {
        let n = self.frames;
        self.state = LoopState::Rendering;

        let mut frame = self.source.acquire();
        observer.stage(n, Stage::Acquired);

        let input = self.input.poll();
        observer.stage(n, Stage::InputPolled);

        let advanced = self.diag.advance(&input);
        observer.stage(n, Stage::StateAdvanced);

        frame.fill(self.diag.color());
        observer.stage(n, Stage::BackgroundPainted);

        self.hud.draw(&mut frame, &self.hud_state);
        observer.stage(n, Stage::HudDrawn);

        for overlay in &mut self.overlays {
            overlay.draw(&mut frame);
        }
        observer.stage(n, Stage::OverlaysDrawn);

        observer.before_present(n, &frame);
        let slot = frame.slot();
        self.source.present(frame);
        observer.stage(n, Stage::Presented);

        self.frames += 1;
        FrameReport {
            frame: n,
            slot,
            input,
            palette_index: self.diag.index(),
            palette_advanced: advanced,
        }
    }

    /// Render frames until `stop` is requested, then flush the frame source
    /// so the last presented frame is shown. Returns the number of frames
    /// rendered by this call.
    pub fn run(&mut self, stop: &StopToken, observer: &mut dyn FrameObserver) -> u64 {
        info!(
            palette_len = self.diag.palette().len(),
            button = %self.diag.button(),
            "render loop started"
        );
        let start = self.frames;
        while !stop.is_stop_requested() {
            self.step_observed(observer);
        }
        self.source.flush();
        let rendered = self.frames - start;
        info!(frames = rendered, "render loop stopped");
        rendered
    }
}
