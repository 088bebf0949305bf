//! Pure game-logic functions.
//!
//! Every tick takes an immutable reference to the current state (and, where
//! needed, an RNG handle) and returns a brand-new state.  Side effects are
//! limited to the injected RNG; audio is requested by appending [`Cue`]s to
//! the returned state.

pub mod animation;
pub mod camera;
pub mod enemy;
pub mod kinds;
pub mod physics;
pub mod platformer;
pub mod runner;
pub mod stride;

use rand::Rng;

use crate::audio::Cue;
use crate::entities::Phase;
use crate::error::TickError;
use crate::input::InputSnapshot;

/// A game variant the loop driver can run.
pub trait Arcade: Clone {
    /// One playing tick.  A returned error leaves the caller's state untouched.
    fn tick<R: Rng>(&self, input: &InputSnapshot, rng: &mut R) -> Result<Self, TickError>;

    fn phase(&self) -> Phase;

    /// Fresh game with the same tuning.
    fn restart(&self) -> Self;

    fn score(&self) -> u32;

    /// Drain the cues raised since the last call.
    fn take_cues(&mut self) -> Vec<Cue>;
}

/// Advance any variant by one tick, gated by its phase.
///
/// Game over and level complete only listen for a restart; every other phase
/// runs the variant's tick.
pub fn advance<G: Arcade, R: Rng>(
    state: &G,
    input: &InputSnapshot,
    rng: &mut R,
) -> Result<G, TickError> {
    match state.phase() {
        Phase::GameOver | Phase::LevelComplete => {
            if input.jump {
                Ok(state.restart())
            } else {
                Ok(state.clone())
            }
        }
        Phase::Playing | Phase::ScreenTransition { .. } => state.tick(input, rng),
    }
}
