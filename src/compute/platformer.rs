//! The scrolling platformer: three screens of platforms, obstacles and
//! patrolling enemies, each ending at a goal post.
//!
//! One tick runs, in order: screen transition countdown, jump, steering,
//! integration, camera, surface landing, goal, enemies, player-vs-enemy,
//! animation.

use rand::Rng;

use crate::audio::Cue;
use crate::compute::animation::{self, Motion};
use crate::compute::camera::{self, rig};
use crate::compute::enemy::{self, Arena};
use crate::compute::kinds::{enemy_rect, enemy_spec, obstacle_rect};
use crate::compute::physics::{
    first_landing, land, player_hitbox, player_is_finite, ENEMY_INSET, PLAYER_INSET,
};
use crate::compute::Arcade;
use crate::config::PlatformerTuning;
use crate::entities::{
    Camera, Clip, Direction, EnemyMode, Phase, PlatformerState, Player, Screen,
};
use crate::error::TickError;
use crate::input::InputSnapshot;
use crate::levels::screen_templates;

const PLAYER_X: f32 = 50.0;
const PLAYER_SIZE: f32 = 40.0;
/// Multiplier on the jump force for the mid-air jump.
const DOUBLE_JUMP_FACTOR: f32 = 0.8;
/// Multiplier on the jump force for the bounce off an enemy's head.
const STOMP_BOUNCE_FACTOR: f32 = 0.6;
/// How far below an enemy's head hitbox the player's hitbox feet may start
/// and still stomp.
const STOMP_TOLERANCE: f32 = 5.0;
/// Below this the player stops sliding.
const STOP_SPEED: f32 = 0.1;

/// Top of the ground tiles; also the floor nothing may sink below.
pub fn floor_y(tuning: &PlatformerTuning) -> f32 {
    tuning.view_height - tuning.tile_size
}

fn spawn_player(tuning: &PlatformerTuning) -> Player {
    Player::spawn(PLAYER_X, floor_y(tuning) - PLAYER_SIZE, PLAYER_SIZE, Clip::Idle)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh level at the first screen.  Starts the background loop.
pub fn init_state(tuning: PlatformerTuning) -> PlatformerState {
    PlatformerState {
        player: spawn_player(&tuning),
        camera: Camera::default(),
        screens: screen_templates(&tuning).iter().map(|t| t.build()).collect(),
        current_screen: 0,
        score: 0,
        phase: Phase::Playing,
        frame: 0,
        tuning,
        cues: vec![Cue::MusicStart],
    }
}

/// Rebuild every screen's enemies and put the player back at the start.
pub fn reset_game(state: &PlatformerState) -> PlatformerState {
    init_state(state.tuning)
}

pub fn current_screen(state: &PlatformerState) -> Result<&Screen, TickError> {
    state
        .screens
        .get(state.current_screen)
        .ok_or(TickError::ScreenOutOfRange {
            index: state.current_screen,
            count: state.screens.len(),
        })
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Ground jump, or the mid-air double jump when it is still available.
///
/// A held direction adds the forward boost either way.
pub fn jump(state: &PlatformerState, input: &InputSnapshot) -> PlatformerState {
    let tuning = &state.tuning;
    let p = &state.player;
    let vy = if !p.is_jumping {
        tuning.jump_force
    } else if p.can_double_jump {
        tuning.jump_force * DOUBLE_JUMP_FACTOR
    } else {
        return state.clone();
    };

    let boosted = tuning.player_speed + tuning.jump_forward_boost;
    let vx = if input.right {
        boosted
    } else if input.left {
        -boosted
    } else {
        p.vx
    };

    let mut next = state.clone();
    next.player = Player {
        vx,
        vy,
        is_jumping: true,
        // A ground jump arms the double jump, the double jump spends it.
        can_double_jump: !p.is_jumping,
        ..p.clone()
    };
    next.cues.push(Cue::Jump);
    next
}

/// Held direction sets the speed (reduced in the air); otherwise friction.
fn steer(player: &mut Player, input: &InputSnapshot, tuning: &PlatformerTuning) {
    let control = if player.is_jumping {
        tuning.air_control
    } else {
        1.0
    };
    if input.left {
        player.vx = -tuning.player_speed * control;
        player.facing = Direction::Left;
    } else if input.right {
        player.vx = tuning.player_speed * control;
        player.facing = Direction::Right;
    } else {
        player.vx *= tuning.ground_friction;
        if player.vx.abs() < STOP_SPEED {
            player.vx = 0.0;
        }
    }
}

// ── Screen transition ────────────────────────────────────────────────────────

/// Move on to the next screen, or finish the level after the last one.
fn finish_transition(state: &mut PlatformerState) {
    if state.current_screen + 1 < state.screens.len() {
        state.current_screen += 1;
        state.player = spawn_player(&state.tuning);
        state.camera = Camera::default();
        state.phase = Phase::Playing;
    } else {
        state.phase = Phase::LevelComplete;
    }
}

// ── Per-frame tick (RNG injected) ────────────────────────────────────────

/// Advance the level by one frame.  All randomness comes through `rng`.
pub fn tick(
    state: &PlatformerState,
    input: &InputSnapshot,
    rng: &mut impl Rng,
) -> Result<PlatformerState, TickError> {
    let mut next = state.clone();
    next.frame = state.frame + 1;

    match state.phase {
        Phase::GameOver | Phase::LevelComplete => return Ok(state.clone()),
        Phase::ScreenTransition { ticks_left } => {
            if ticks_left <= 1 {
                finish_transition(&mut next);
            } else {
                next.phase = Phase::ScreenTransition {
                    ticks_left: ticks_left - 1,
                };
            }
            return Ok(next);
        }
        Phase::Playing => {}
    }

    current_screen(state)?;
    if input.jump {
        next = jump(&next, input);
    }
    let tuning = state.tuning;
    let prev_bottom = state.player.bottom();

    // ── 1. Steering and integration ──────────────────────────────────────────
    let mut player = next.player.clone();
    steer(&mut player, input, &tuning);
    player.x += player.vx;
    player.vy = (player.vy + tuning.gravity).min(tuning.max_fall_speed);
    player.y += player.vy;
    let falling = player.vy > 0.0;

    // ── 2. Camera, then keep the player inside the view ──────────────────────
    let rig = rig(&tuning);
    let camera = camera::follow(&next.camera, &player.bounds(), &rig);
    let max_x = camera.x + tuning.view_width - player.w;
    if player.x < camera.x {
        player.x = camera.x;
        player.vx = 0.0;
    }
    if player.x > max_x {
        player.x = max_x;
        player.vx = 0.0;
    }

    // ── 3. Surfaces: platform, obstacle top, ground tile, floor ──────────────
    let screen = &next.screens[next.current_screen];
    let body = player.bounds();
    let obstacle_tops: Vec<_> = screen.obstacles.iter().map(obstacle_rect).collect();
    let landing = first_landing(&body, prev_bottom, player.vy, &screen.platforms)
        .or_else(|| first_landing(&body, prev_bottom, player.vy, &obstacle_tops))
        .or_else(|| first_landing(&body, prev_bottom, player.vy, &screen.ground));
    let floor = floor_y(&tuning);
    let grounded = match landing {
        Some(top) => {
            land(&mut player, top);
            true
        }
        None if player.bottom() > floor => {
            land(&mut player, floor);
            true
        }
        None => {
            // Walked off an edge: airborne without a jump to spend.
            player.is_jumping = true;
            false
        }
    };

    // ── 4. Goal ──────────────────────────────────────────────────────────────
    if player.bounds().intersects(&screen.goal) {
        next.player = player;
        next.camera = camera;
        if tuning.transition_ticks == 0 {
            finish_transition(&mut next);
        } else {
            next.phase = Phase::ScreenTransition {
                ticks_left: tuning.transition_ticks,
            };
        }
        return Ok(next);
    }

    // ── 5. Enemies ───────────────────────────────────────────────────────────
    let arena = Arena {
        left: camera.x,
        right: camera.x + tuning.view_width,
        floor,
    };
    let mut gained = 0;
    let mut enemies = Vec::with_capacity(screen.enemies.len());
    for e in &screen.enemies {
        let stepped = enemy::step(e, &arena, &screen.platforms, rng);
        if stepped.mode == EnemyMode::Removed {
            gained += enemy_spec(stepped.kind).points;
        } else {
            enemies.push(stepped);
        }
    }

    // ── 6. Player vs enemies ─────────────────────────────────────────────────
    let mut hurt = false;
    let hitbox = player_hitbox(&player);
    // Hitbox feet before this tick's move.
    let prev_feet = prev_bottom - player.h * PLAYER_INSET;
    for e in enemies.iter_mut() {
        let target = enemy_rect(e).inset(ENEMY_INSET);
        if !hitbox.intersects(&target) {
            continue;
        }
        if falling && prev_feet <= target.y + STOMP_TOLERANCE {
            player.vy = tuning.jump_force * STOMP_BOUNCE_FACTOR;
            player.is_jumping = true;
            player.can_double_jump = true;
            let boosted = tuning.player_speed + tuning.jump_forward_boost;
            if player.vx > 0.0 {
                player.vx = boosted;
            } else if player.vx < 0.0 {
                player.vx = -boosted;
            }
            next.cues.push(Cue::Jump);
            *e = enemy::damage(e);
        } else if !enemy::is_hit(e) {
            hurt = true;
            break;
        }
    }

    if hurt {
        next.phase = Phase::GameOver;
        next.cues.push(Cue::GameOver);
        next.cues.push(Cue::MusicStop);
    }

    // ── 7. Animation ─────────────────────────────────────────────────────────
    player.anim = animation::update(
        &player.anim,
        &Motion {
            vx: player.vx,
            vy: player.vy,
            grounded: grounded && !player.is_jumping,
            double_jumped: !player.can_double_jump,
            hurt,
        },
    );

    if !player_is_finite(&player) || !camera.x.is_finite() {
        return Err(TickError::NonFinite {
            what: "platformer player",
        });
    }

    let current = next.current_screen;
    next.screens[current].enemies = enemies;
    next.player = player;
    next.camera = camera;
    next.score += gained;
    Ok(next)
}

impl Arcade for PlatformerState {
    fn tick<R: Rng>(&self, input: &InputSnapshot, rng: &mut R) -> Result<Self, TickError> {
        tick(self, input, rng)
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
