//! Enemy behaviour.
//!
//! Each enemy is a small state machine over [`EnemyMode`]:
//!
//! ```text
//! Patrol ──(koopa walking, random)──▶ Paused ──(timer)──▶ Patrol
//!    │
//!  stomp
//!    ▼
//! HitRising ──(frame 5)──▶ HitFalling ──(frame 0)──▶ Patrol (health left, now running)
//!                                                 └─▶ Removed (health 0)
//! ```
//!
//! Patrolling enemies turn around at the edges of the camera view and stay
//! inside it.  Enemies entirely outside the view are dormant.

use rand::Rng;

use crate::compute::kinds::{enemy_spec, patrol_speed, HIT_FRAME_DELAY, HIT_PEAK_FRAME};
use crate::compute::physics::SURFACE_BAND;
use crate::entities::{Enemy, EnemyMode, EnemySpawn, Gait, Rect};

/// The strip of world an enemy may patrol this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    /// Camera-relative screen edges in world units.
    pub left: f32,
    pub right: f32,
    /// Top of the ground.
    pub floor: f32,
}

pub fn spawn(template: &EnemySpawn) -> Enemy {
    Enemy {
        x: template.x,
        y: template.y,
        kind: template.kind,
        heading: template.heading,
        health: enemy_spec(template.kind).health,
        gait: Gait::Walk,
        mode: EnemyMode::Patrol,
        frame: 0,
        frame_timer: 0,
        hit_timer: 0,
    }
}

pub fn is_hit(enemy: &Enemy) -> bool {
    matches!(
        enemy.mode,
        EnemyMode::HitRising { .. } | EnemyMode::HitFalling { .. }
    )
}

/// Stomp damage.  An enemy already in its hit animation takes no more.
pub fn damage(enemy: &Enemy) -> Enemy {
    if is_hit(enemy) || enemy.mode == EnemyMode::Removed {
        return enemy.clone();
    }
    Enemy {
        health: enemy.health.saturating_sub(1),
        mode: EnemyMode::HitRising { frame: 0 },
        hit_timer: 0,
        ..enemy.clone()
    }
}

/// Advance one enemy by one tick.  All randomness comes through `rng`.
pub fn step(enemy: &Enemy, arena: &Arena, platforms: &[Rect], rng: &mut impl Rng) -> Enemy {
    let spec = enemy_spec(enemy.kind);
    let mut e = enemy.clone();

    match e.mode {
        EnemyMode::Removed => return e,
        EnemyMode::HitRising { .. } | EnemyMode::HitFalling { .. } => advance_hit(&mut e),
        EnemyMode::Patrol | EnemyMode::Paused { .. } => {
            let awake = e.x + spec.width > arena.left && e.x < arena.right;
            if !awake {
                return e;
            }
            patrol(&mut e, arena, rng);
            e.frame_timer += 1;
            if e.frame_timer >= spec.frame_delay {
                e.frame_timer = 0;
                e.frame = (e.frame + 1) % spec.walk_frames;
            }
        }
    }

    // Stand on the floor or on a platform the enemy overlaps.
    let body = Rect::new(e.x, e.y, spec.width, spec.height);
    if body.bottom() > arena.floor {
        e.y = arena.floor - spec.height;
    }
    for platform in platforms {
        let body = Rect::new(e.x, e.y, spec.width, spec.height);
        if body.overlaps_x(platform)
            && body.bottom() > platform.y
            && body.bottom() < platform.bottom() + SURFACE_BAND
        {
            e.y = platform.y - spec.height;
        }
    }
    e.y = e.y.min(arena.floor - spec.height);
    e
}

fn patrol(e: &mut Enemy, arena: &Arena, rng: &mut impl Rng) {
    let spec = enemy_spec(e.kind);
    match e.mode {
        EnemyMode::Paused { ticks_left } => {
            e.mode = if ticks_left <= 1 {
                EnemyMode::Patrol
            } else {
                EnemyMode::Paused {
                    ticks_left: ticks_left - 1,
                }
            };
            return;
        }
        EnemyMode::Patrol => {
            if e.gait == Gait::Walk && spec.pause_chance > 0.0 && rng.gen_bool(spec.pause_chance) {
                let (min, max) = spec.pause_ticks;
                e.mode = EnemyMode::Paused {
                    ticks_left: rng.gen_range(min..max),
                };
                return;
            }
        }
        _ => return,
    }

    e.x += patrol_speed(e.kind, e.gait) * e.heading.sign();
    if e.x <= arena.left || e.x + spec.width >= arena.right {
        e.heading = e.heading.flipped();
    }
    e.x = e.x.min(arena.right - spec.width).max(arena.left);
}

fn advance_hit(e: &mut Enemy) {
    e.hit_timer += 1;
    if e.hit_timer < HIT_FRAME_DELAY {
        return;
    }
    e.hit_timer = 0;
    e.mode = match e.mode {
        EnemyMode::HitRising { frame } => {
            let frame = frame + 1;
            if frame >= HIT_PEAK_FRAME {
                EnemyMode::HitFalling { frame }
            } else {
                EnemyMode::HitRising { frame }
            }
        }
        EnemyMode::HitFalling { frame } => {
            let frame = frame.saturating_sub(1);
            if frame > 0 {
                EnemyMode::HitFalling { frame }
            } else if e.health > 0 {
                e.gait = Gait::Run;
                e.frame = 0;
                e.frame_timer = 0;
                EnemyMode::Patrol
            } else {
                EnemyMode::Removed
            }
        }
        other => other,
    };
}

/// Frame of the hit animation to draw, if the enemy is in one.
pub fn hit_frame(enemy: &Enemy) -> Option<u32> {
    match enemy.mode {
        EnemyMode::HitRising { frame } | EnemyMode::HitFalling { frame } => Some(frame),
        _ => None,
    }
}
