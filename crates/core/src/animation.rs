//! Animation module - the single in-flight board animation
//!
//! An [`Animation`] is advanced by [`Animation::advance`] once per tick. The
//! world owns at most one of them; when it finishes, the world applies the
//! terminal cell state and runs the attached [`Continuation`].

use serde::Serialize;

use crate::types::{CellState, SoundEffect, TileKind, Vec2};

/// Easing curve applied to raw `elapsed / duration` progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Easing {
    EaseInCubic,
    EaseOutBounce,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::EaseInCubic => ease_in_cubic(t),
            Easing::EaseOutBounce => ease_out_bounce(t),
        }
    }
}

pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

/// Standard bounce-out (https://easings.net/#easeOutBounce)
pub fn ease_out_bounce(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// A cell sliding between two pixel positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Board slot that receives the cell when the move starts
    pub target: Vec2,
    pub start_px: Vec2,
    pub end_px: Vec2,
    pub kind: TileKind,
}

impl MoveRecord {
    /// Pixel position at the given eased progress
    pub fn position(&self, progress: f64) -> Vec2 {
        self.start_px.lerp(self.end_px, progress)
    }
}

/// A cell shrinking away in its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DestroyRecord {
    pub index: Vec2,
    pub kind: TileKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnimationPayload {
    Move(Vec<MoveRecord>),
    Destroy(Vec<DestroyRecord>),
}

/// What the world does once an animation finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Continuation {
    /// Nothing; the world goes idle
    Idle,
    /// Detect matches and destroy them
    ResolveMatches,
    /// Drop survivors and refill
    Gravity,
}

/// Result of advancing an animation by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Running,
    /// The one-shot effect fired; nothing else happened this tick
    EffectFired(SoundEffect),
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    payload: AnimationPayload,
    elapsed_ms: u64,
    duration_ms: f64,
    progress: f64,
    final_state: CellState,
    easing: Easing,
    effect: Option<SoundEffect>,
    completion: Continuation,
}

impl Animation {
    pub fn moving(
        records: Vec<MoveRecord>,
        duration_ms: u32,
        easing: Easing,
        completion: Continuation,
    ) -> Self {
        Self {
            payload: AnimationPayload::Move(records),
            elapsed_ms: 0,
            duration_ms: duration_ms as f64,
            progress: 0.0,
            final_state: CellState::Normal,
            easing,
            effect: None,
            completion,
        }
    }

    /// Destruction leaves its cells destroyed and plays `effect` on its first tick
    pub fn destroying(
        records: Vec<DestroyRecord>,
        duration_ms: u32,
        effect: SoundEffect,
        completion: Continuation,
    ) -> Self {
        Self {
            payload: AnimationPayload::Destroy(records),
            elapsed_ms: 0,
            duration_ms: duration_ms as f64,
            progress: 0.0,
            final_state: CellState::Destroyed,
            easing: Easing::EaseInCubic,
            effect: Some(effect),
            completion,
        }
    }

    /// Advance by `dt_ms`.
    ///
    /// A pending effect consumes the tick on its own. Otherwise the animation
    /// either finishes (elapsed past duration) or recomputes eased progress.
    pub fn advance(&mut self, dt_ms: u64) -> Step {
        self.elapsed_ms += dt_ms;

        if let Some(effect) = self.effect.take() {
            return Step::EffectFired(effect);
        }

        let raw = self.raw_progress();
        if raw > 1.0 {
            return Step::Finished;
        }

        self.progress = self.easing.apply(raw);
        Step::Running
    }

    pub fn raw_progress(&self) -> f64 {
        self.elapsed_ms as f64 / self.duration_ms
    }

    /// Eased progress as of the last running tick
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn payload(&self) -> &AnimationPayload {
        &self.payload
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn final_state(&self) -> CellState {
        self.final_state
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn completion(&self) -> Continuation {
        self.completion
    }

    pub fn has_pending_effect(&self) -> bool {
        self.effect.is_some()
    }
}
