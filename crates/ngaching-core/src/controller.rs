//! Mode & progress controller.
//!
//! A two-state machine (`Formed`/`Chaos`) with asymmetric transition rates:
//! chaos collapses the tree quickly, stillness restores it slowly. The mode
//! itself is level-triggered on the latest motion score with no debounce;
//! only `progress` and `rotation` are smoothed.

use crate::constants::*;
use crate::sensor::MotionSignal;
use crate::state::{AnimationState, Mode};

/// Tuning for the per-tick state update. All rates are per render tick.
#[derive(Clone, Debug)]
pub struct ControllerParams {
    pub trigger_threshold: f32,
    pub chaos_rate: f32,
    pub form_rate: f32,
    pub dead_zone: f32,
    pub rotation_gain: f32,
    pub rotation_smoothing: f32,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            trigger_threshold: TRIGGER_CHAOS_THRESHOLD,
            chaos_rate: CHAOS_RATE_PER_TICK,
            form_rate: FORM_RATE_PER_TICK,
            dead_zone: ROTATION_DEAD_ZONE,
            rotation_gain: ROTATION_GAIN,
            rotation_smoothing: ROTATION_SMOOTHING,
        }
    }
}

pub struct Controller {
    params: ControllerParams,
    state: AnimationState,
    rotation_target: f32,
    latest: MotionSignal,
    simulated_chaos: bool,
    ticks: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self::with_params(ControllerParams::default())
    }

    pub fn with_params(params: ControllerParams) -> Self {
        Self {
            params,
            state: AnimationState::default(),
            rotation_target: 0.0,
            latest: MotionSignal::default(),
            simulated_chaos: false,
            ticks: 0,
        }
    }

    /// Start from an explicit state, e.g. fully scattered.
    pub fn with_state(mut self, state: AnimationState) -> Self {
        self.state = AnimationState {
            progress: state.progress.clamp(0.0, 1.0),
            ..state
        };
        self.rotation_target = self.state.rotation;
        self
    }

    /// Tuning is fixed once the controller is built.
    pub fn params(&self) -> &ControllerParams {
        &self.params
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn rotation_target(&self) -> f32 {
        self.rotation_target
    }

    pub fn latest_signal(&self) -> MotionSignal {
        self.latest
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Cache the newest sensor sample; it stays in effect until replaced.
    pub fn push_signal(&mut self, signal: MotionSignal) {
        self.latest = signal;
    }

    /// Hold the tree in chaos regardless of the sensed score.
    pub fn set_simulated_chaos(&mut self, active: bool) {
        if self.simulated_chaos != active {
            log::debug!("[controller] simulated chaos {}", if active { "on" } else { "off" });
        }
        self.simulated_chaos = active;
    }

    pub fn simulated_chaos(&self) -> bool {
        self.simulated_chaos
    }

    /// Feed `signal` and advance one tick.
    pub fn advance(&mut self, signal: MotionSignal) -> AnimationState {
        self.push_signal(signal);
        self.tick()
    }

    /// Advance one tick using the cached signal.
    pub fn tick(&mut self) -> AnimationState {
        let p = &self.params;
        let signal = self.latest;

        let mode = if self.simulated_chaos {
            Mode::Chaos
        } else {
            next_mode(signal.score, p.trigger_threshold)
        };
        if mode != self.state.mode {
            log::debug!(
                "[controller] tick={} {:?} -> {:?} (score={:.2})",
                self.ticks,
                self.state.mode,
                mode,
                signal.score
            );
        }
        let progress = integrate_progress(self.state.progress, mode, p.chaos_rate, p.form_rate);
        self.rotation_target = accumulate_rotation(
            self.rotation_target,
            signal.center_x,
            p.dead_zone,
            p.rotation_gain,
        );
        let rotation = smooth_toward(self.state.rotation, self.rotation_target, p.rotation_smoothing);

        self.state = AnimationState {
            mode,
            progress,
            rotation,
        };
        self.ticks += 1;
        self.state
    }
}

#[inline]
pub fn next_mode(score: f32, trigger_threshold: f32) -> Mode {
    if score > trigger_threshold {
        Mode::Chaos
    } else {
        Mode::Formed
    }
}

#[inline]
pub fn integrate_progress(progress: f32, mode: Mode, chaos_rate: f32, form_rate: f32) -> f32 {
    match mode {
        Mode::Chaos => (progress - chaos_rate).max(0.0),
        Mode::Formed => (progress + form_rate).min(1.0),
    }
}

#[inline]
pub fn accumulate_rotation(target: f32, center_x: f32, dead_zone: f32, gain: f32) -> f32 {
    if center_x.abs() > dead_zone {
        target + center_x * gain
    } else {
        target
    }
}

/// Exponential approach: move `alpha` of the remaining distance.
#[inline]
pub fn smooth_toward(current: f32, target: f32, alpha: f32) -> f32 {
    current + (target - current) * alpha
}
