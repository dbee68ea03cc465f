use sightline_core::constants::NEAR_ZERO_SCALE;
use sightline_core::math::{ease_out_cubic, lerp};

/// Transition lifecycle. At most one transition runs per animator;
/// re-triggering replaces the running one in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    Idle,
    Running { elapsed: f32, from: f32, to: f32 },
}

/// Time-bounded scalar easing for an occlusion indicator, advanced once
/// per tick with elapsed time as input — no hidden suspension point and
/// nothing scheduled that could leak after cancellation.
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    state: TransitionState,
    value: f32,
    duration: f32,
}

impl TransitionAnimator {
    pub fn new(duration: f32) -> Self {
        Self {
            state: TransitionState::Idle,
            value: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Last computed value. Holds the target exactly after completion and
    /// the last interpolated value after a cancellation.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TransitionState::Running { .. })
    }

    /// Start (or restart) a transition toward `target`.
    ///
    /// A re-trigger cancels the in-flight transition and continues from
    /// the current interpolated value, so the output never pops. Only
    /// when the indicator was fully inactive does the transition start
    /// from the near-zero floor instead.
    pub fn trigger(&mut self, target: f32) {
        let from = if self.value < NEAR_ZERO_SCALE {
            NEAR_ZERO_SCALE
        } else {
            self.value
        };
        if self.duration <= 0.0 {
            self.value = target;
            self.state = TransitionState::Idle;
            return;
        }
        self.value = from;
        self.state = TransitionState::Running {
            elapsed: 0.0,
            from,
            to: target,
        };
    }

    /// Cancel without completing: the state machine stops where it is and
    /// `value` keeps whatever was last computed.
    pub fn stop(&mut self) {
        self.state = TransitionState::Idle;
    }

    /// Cancel and drop back to zero (indicator fully inactive).
    pub fn reset(&mut self) {
        self.state = TransitionState::Idle;
        self.value = 0.0;
    }

    /// Advance by `dt` seconds and return the current value. Progress is
    /// eased (cubic out) and clamped; reaching the end lands exactly on
    /// the target and returns to `Idle`.
    pub fn tick(&mut self, dt: f32) -> f32 {
        if let TransitionState::Running { elapsed, from, to } = self.state {
            let elapsed = elapsed + dt.max(0.0);
            let t = (elapsed / self.duration).clamp(0.0, 1.0);
            if t >= 1.0 {
                self.value = to;
                self.state = TransitionState::Idle;
            } else {
                self.value = lerp(from, to, ease_out_cubic(t));
                self.state = TransitionState::Running { elapsed, from, to };
            }
        }
        self.value
    }
}
