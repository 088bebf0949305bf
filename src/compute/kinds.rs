//! Per-kind parameter tables for obstacles and enemies.

use crate::entities::{Enemy, EnemyKind, Gait, Obstacle, ObstacleKind, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleSpec {
    pub width: f32,
    pub height: f32,
    /// Score for an obstacle that scrolls past the runner.
    pub points: u32,
    /// Runner score at which this kind starts spawning.
    pub unlock_score: u32,
}

pub const ALL_OBSTACLES: [ObstacleKind; 4] = [
    ObstacleKind::Normal,
    ObstacleKind::Tall,
    ObstacleKind::Wide,
    ObstacleKind::Small,
];

pub fn obstacle_spec(kind: ObstacleKind) -> ObstacleSpec {
    match kind {
        ObstacleKind::Normal => ObstacleSpec {
            width: 40.0,
            height: 80.0,
            points: 1,
            unlock_score: 0,
        },
        ObstacleKind::Tall => ObstacleSpec {
            width: 50.0,
            height: 100.0,
            points: 2,
            unlock_score: 25,
        },
        ObstacleKind::Wide => ObstacleSpec {
            width: 80.0,
            height: 60.0,
            points: 2,
            unlock_score: 50,
        },
        ObstacleKind::Small => ObstacleSpec {
            width: 30.0,
            height: 50.0,
            points: 1,
            unlock_score: 75,
        },
    }
}

pub fn obstacle_rect(obstacle: &Obstacle) -> Rect {
    let spec = obstacle_spec(obstacle.kind);
    Rect::new(obstacle.x, obstacle.y, spec.width, spec.height)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpec {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: u32,
    /// Awarded when the enemy is removed.
    pub points: u32,
    /// Per-tick chance to pause while walking.
    pub pause_chance: f64,
    /// Pause length range in ticks, half-open.
    pub pause_ticks: (u32, u32),
    pub walk_frames: usize,
    pub frame_delay: u32,
}

pub fn enemy_spec(kind: EnemyKind) -> EnemySpec {
    match kind {
        EnemyKind::Goomba => EnemySpec {
            width: 36.0,
            height: 30.0,
            speed: 1.0,
            health: 1,
            points: 100,
            pause_chance: 0.0,
            pause_ticks: (0, 1),
            walk_frames: 1,
            frame_delay: 10,
        },
        EnemyKind::Koopa => EnemySpec {
            width: 36.0,
            height: 30.0,
            speed: 2.5,
            health: 2,
            points: 200,
            pause_chance: 0.005,
            pause_ticks: (30, 90),
            walk_frames: 6,
            frame_delay: 10,
        },
    }
}

pub fn enemy_rect(enemy: &Enemy) -> Rect {
    let spec = enemy_spec(enemy.kind);
    Rect::new(enemy.x, enemy.y, spec.width, spec.height)
}

/// Horizontal speed for a kind in a gait.
pub fn patrol_speed(kind: EnemyKind, gait: Gait) -> f32 {
    let base = enemy_spec(kind).speed;
    match (kind, gait) {
        (EnemyKind::Goomba, _) => base,
        (EnemyKind::Koopa, Gait::Walk) => base * 0.7,
        (EnemyKind::Koopa, Gait::Run) => base * 1.5,
    }
}

/// Peak frame of the two-phase hit animation.
pub const HIT_PEAK_FRAME: u32 = 5;
/// Ticks per hit-animation frame.
pub const HIT_FRAME_DELAY: u32 = 5;
