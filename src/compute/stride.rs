//! Two-legged stride rig: the legs swing in opposition on a sine and the
//! body can hop.  Height is measured upward from the ground.

use rand::Rng;

use crate::audio::Cue;
use crate::compute::Arcade;
use crate::config::StrideTuning;
use crate::entities::{Phase, StrideState};
use crate::error::TickError;
use crate::input::InputSnapshot;

pub fn init_state(tuning: StrideTuning) -> StrideState {
    StrideState {
        swing: 0.0,
        height: 0.0,
        vy: 0.0,
        airborne: false,
        frame: 0,
        tuning,
        cues: Vec::new(),
    }
}

/// Back on the ground.  The swing keeps going.
pub fn reset(state: &StrideState) -> StrideState {
    StrideState {
        height: 0.0,
        vy: 0.0,
        airborne: false,
        ..state.clone()
    }
}

/// Hop, unless already in the air.
pub fn jump(state: &StrideState) -> StrideState {
    if state.airborne {
        return state.clone();
    }
    let mut next = state.clone();
    next.vy = state.tuning.jump_velocity;
    next.airborne = true;
    next.cues.push(Cue::Jump);
    next
}

/// `(left, right)` leg rotation in radians.
pub fn leg_angles(state: &StrideState) -> (f32, f32) {
    let left = state.swing.sin() * state.tuning.swing_amplitude;
    (left, -left)
}

pub fn tick(state: &StrideState) -> Result<StrideState, TickError> {
    let mut next = state.clone();
    next.frame = state.frame + 1;
    next.swing = state.swing + state.tuning.swing_step;

    if next.airborne {
        next.vy -= state.tuning.gravity;
        next.height += next.vy;
        if next.height <= 0.0 {
            next.height = 0.0;
            next.vy = 0.0;
            next.airborne = false;
        }
    }

    if ![next.swing, next.height, next.vy].iter().all(|v| v.is_finite()) {
        return Err(TickError::NonFinite { what: "stride rig" });
    }
    Ok(next)
}

impl Arcade for StrideState {
    fn tick<R: Rng>(&self, input: &InputSnapshot, _rng: &mut R) -> Result<Self, TickError> {
        let state = if input.jump { jump(self) } else { self.clone() };
        tick(&state)
    }

    /// The rig never ends.
    fn phase(&self) -> Phase {
        Phase::Playing
    }

    fn restart(&self) -> Self {
        reset(self)
    }

    /// Number of ticks walked.
    fn score(&self) -> u32 {
        u32::try_from(self.frame).unwrap_or(u32::MAX)
    }

    fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}
