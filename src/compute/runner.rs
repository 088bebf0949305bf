//! The one-button runner: jump over obstacles that scroll in from the right.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::audio::Cue;
use crate::compute::animation::{self, Motion};
use crate::compute::kinds::{obstacle_rect, obstacle_spec, ALL_OBSTACLES};
use crate::compute::physics::{player_hitbox, player_is_finite, OBSTACLE_INSET};
use crate::compute::Arcade;
use crate::config::RunnerTuning;
use crate::entities::{Clip, Obstacle, ObstacleKind, Phase, Player, RunnerState};
use crate::error::TickError;
use crate::input::InputSnapshot;

const PLAYER_X: f32 = 50.0;
const PLAYER_SIZE: f32 = 40.0;
/// Distance from the bottom of the field to the top of a standing player.
const GROUND_OFFSET: f32 = 60.0;

/// Top of the player while standing on the ground.
pub fn ground_y(tuning: &RunnerTuning) -> f32 {
    tuning.height - GROUND_OFFSET
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_state(tuning: RunnerTuning) -> RunnerState {
    RunnerState {
        player: Player::spawn(PLAYER_X, ground_y(&tuning), PLAYER_SIZE, Clip::Idle),
        obstacles: Vec::new(),
        score: 0,
        phase: Phase::Playing,
        frame: 0,
        tuning,
        cues: Vec::new(),
    }
}

/// Back to a fresh run with the same tuning.
pub fn reset_game(state: &RunnerState) -> RunnerState {
    init_state(state.tuning)
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Start a jump.  Ignored while already in the air or after game over.
pub fn jump(state: &RunnerState) -> RunnerState {
    if state.player.is_jumping || state.phase != Phase::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    next.player.is_jumping = true;
    next.player.vy = state.tuning.jump_force;
    next.cues.push(Cue::Jump);
    next
}

/// Kinds allowed to spawn at `score`.
pub fn unlocked_kinds(score: u32) -> Vec<ObstacleKind> {
    ALL_OBSTACLES
        .iter()
        .copied()
        .filter(|&kind| score >= obstacle_spec(kind).unlock_score)
        .collect()
}

// ── Per-frame tick (RNG injected) ────────────────────────────────────────

/// Advance the run by one frame.  All randomness comes through `rng`.
pub fn tick(state: &RunnerState, rng: &mut impl Rng) -> Result<RunnerState, TickError> {
    if state.phase != Phase::Playing {
        return Ok(state.clone());
    }
    let tuning = &state.tuning;
    let frame = state.frame + 1;
    let mut cues = state.cues.clone();

    // ── 1. Player physics ────────────────────────────────────────────────────
    let mut player = state.player.clone();
    player.vy += tuning.gravity;
    player.y += player.vy;

    let ground = ground_y(tuning);
    if player.y > ground {
        player.y = ground;
        player.vy = 0.0;
        player.is_jumping = false;
    }

    // ── 2. Move obstacles, score the ones that left ──────────────────────────
    let mut score = state.score;
    let mut obstacles = Vec::with_capacity(state.obstacles.len() + 1);
    for obstacle in &state.obstacles {
        let moved = Obstacle {
            x: obstacle.x - tuning.obstacle_speed,
            ..obstacle.clone()
        };
        if obstacle_rect(&moved).right() < 0.0 {
            score += obstacle_spec(moved.kind).points;
        } else {
            obstacles.push(moved);
        }
    }

    // ── 3. Spawn on the interval ─────────────────────────────────────────────
    if frame % tuning.spawn_interval.max(1) == 0 {
        let unlocked = unlocked_kinds(score);
        if let Some(&kind) = unlocked.choose(rng) {
            obstacles.push(Obstacle {
                x: tuning.width,
                y: tuning.height - obstacle_spec(kind).height,
                kind,
            });
        }
    }

    // ── 4. Collision ─────────────────────────────────────────────────────────
    let hitbox = player_hitbox(&player);
    let crashed = obstacles
        .iter()
        .any(|o| hitbox.intersects(&obstacle_rect(o).inset(OBSTACLE_INSET)));
    let phase = if crashed {
        cues.push(Cue::GameOver);
        Phase::GameOver
    } else {
        Phase::Playing
    };

    // ── 5. Animation ─────────────────────────────────────────────────────────
    player.anim = animation::update(
        &player.anim,
        &Motion {
            // The world scrolls past, so the player is always running.
            vx: tuning.obstacle_speed,
            vy: player.vy,
            grounded: !player.is_jumping,
            double_jumped: false,
            hurt: crashed,
        },
    );

    if !player_is_finite(&player) {
        return Err(TickError::NonFinite { what: "runner player" });
    }

    Ok(RunnerState {
        player,
        obstacles,
        score,
        phase,
        frame,
        cues,
        ..state.clone()
    })
}

impl Arcade for RunnerState {
    fn tick<R: Rng>(&self, input: &InputSnapshot, rng: &mut R) -> Result<Self, TickError> {
        let state = if input.jump { jump(self) } else { self.clone() };
        tick(&state, rng)
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn restart(&self) -> Self {
        reset_game(self)
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}
