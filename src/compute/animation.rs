//! Animation state selector.
//!
//! [`select`] picks a clip from the motion of the last physics step, and
//! [`update`] switches to it (restarting playback on a change) and advances
//! the frame counter.  Locomotion clips tick faster than action clips.

use crate::entities::{Animator, Clip};

/// Ticks per frame for idle/run.
pub const LOCOMOTION_CADENCE: u32 = 3;
/// Ticks per frame for jump/fall/double-jump/hit.
pub const ACTION_CADENCE: u32 = 20;
/// Below this horizontal speed the player counts as standing.
pub const RUN_THRESHOLD: f32 = 0.1;

pub fn frame_count(clip: Clip) -> usize {
    match clip {
        Clip::Idle => 11,
        Clip::Run => 12,
        Clip::Jump => 1,
        Clip::Fall => 1,
        Clip::DoubleJump => 6,
        Clip::Hit => 7,
    }
}

pub fn cadence(clip: Clip) -> u32 {
    match clip {
        Clip::Idle | Clip::Run => LOCOMOTION_CADENCE,
        Clip::Jump | Clip::Fall | Clip::DoubleJump | Clip::Hit => ACTION_CADENCE,
    }
}

/// Inputs of the selector, read after collision resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    /// The airborne player already spent the double jump.
    pub double_jumped: bool,
    pub hurt: bool,
}

pub fn select(motion: &Motion) -> Clip {
    if motion.hurt {
        Clip::Hit
    } else if motion.grounded {
        if motion.vx.abs() > RUN_THRESHOLD {
            Clip::Run
        } else {
            Clip::Idle
        }
    } else if motion.vy < 0.0 {
        if motion.double_jumped {
            Clip::DoubleJump
        } else {
            Clip::Jump
        }
    } else {
        Clip::Fall
    }
}

/// Switch to `clip`; a different clip restarts at frame 0.
pub fn switch(anim: &Animator, clip: Clip) -> Animator {
    if anim.clip == clip {
        *anim
    } else {
        Animator::new(clip)
    }
}

/// Advance one tick, wrapping modulo the clip length.
pub fn advance(anim: &Animator) -> Animator {
    let count = frame_count(anim.clip);
    let timer = anim.timer + 1;
    if timer >= cadence(anim.clip) {
        Animator {
            frame: (anim.frame + 1) % count,
            timer: 0,
            ..*anim
        }
    } else {
        Animator {
            frame: anim.frame % count,
            timer,
            ..*anim
        }
    }
}

pub fn update(anim: &Animator, motion: &Motion) -> Animator {
    advance(&switch(anim, select(motion)))
}
