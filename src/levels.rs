//! Level layout for the platformer: three screens per level.
//!
//! Heights are given relative to the view height so a taller view keeps the
//! same layout resting on the ground.

use crate::compute::enemy;
use crate::config::PlatformerTuning;
use crate::entities::Direction::{self, Left, Right};
use crate::entities::EnemyKind::{self, Goomba, Koopa};
use crate::entities::ObstacleKind::{self, Normal, Tall, Wide};
use crate::entities::{EnemySpawn, Obstacle, Rect, Screen};

const PLATFORM_WIDTH: f32 = 160.0;
const PLATFORM_HEIGHT: f32 = 20.0;
const GOAL_X: f32 = 4400.0;
const GOAL_WIDTH: f32 = 40.0;
const GOAL_HEIGHT: f32 = 120.0;
/// Spawn height offset of an enemy standing on the ground (above the tiles).
const ON_GROUND: f32 = -30.0;
/// The first screen's koopa starts inside the ground; the floor pins it.
const IN_GROUND: f32 = 25.0;

/// Static description of a screen; enemies are rebuilt from it on reset.
#[derive(Clone, Debug)]
pub struct ScreenTemplate {
    pub ground: Vec<Rect>,
    pub platforms: Vec<Rect>,
    pub obstacles: Vec<Obstacle>,
    pub enemies: Vec<EnemySpawn>,
    pub goal: Rect,
}

impl ScreenTemplate {
    /// Instantiate with fresh enemies.
    pub fn build(&self) -> Screen {
        Screen {
            ground: self.ground.clone(),
            platforms: self.platforms.clone(),
            obstacles: self.obstacles.clone(),
            enemies: self.enemies.iter().map(enemy::spawn).collect(),
            goal: self.goal,
        }
    }
}

// ── Layout tables ─────────────────────────────────────────────────────────────
//
// Platforms: (x, height above the bottom of the view).
// Obstacles: (x, height above the bottom, kind).
// Enemies:   (x, kind, heading, offset from the top of the ground).

type PlatformRow = (f32, f32);
type ObstacleRow = (f32, f32, ObstacleKind);
type EnemyRow = (f32, EnemyKind, Direction, f32);

const SCREEN_1: (&[PlatformRow], &[ObstacleRow], &[EnemyRow]) = (
    &[
        (400.0, 120.0),
        (600.0, 180.0),
        (800.0, 240.0),
        (1200.0, 150.0),
        (1400.0, 210.0),
        (1600.0, 270.0),
        (2000.0, 180.0),
        (2200.0, 240.0),
        (2400.0, 300.0),
    ],
    &[
        (500.0, 120.0, Normal),
        (800.0, 140.0, Tall),
        (1200.0, 120.0, Wide),
        (1600.0, 140.0, Tall),
        (2000.0, 120.0, Normal),
    ],
    &[
        (600.0, Goomba, Left, ON_GROUND),
        (900.0, Goomba, Right, ON_GROUND),
        (1300.0, Koopa, Left, IN_GROUND),
        (1700.0, Goomba, Right, ON_GROUND),
    ],
);

const SCREEN_2: (&[PlatformRow], &[ObstacleRow], &[EnemyRow]) = (
    &[
        (200.0, 150.0),
        (400.0, 210.0),
        (600.0, 270.0),
        (1000.0, 180.0),
        (1200.0, 240.0),
        (1400.0, 300.0),
        (1800.0, 210.0),
        (2000.0, 270.0),
        (2200.0, 330.0),
    ],
    &[
        (300.0, 120.0, Wide),
        (600.0, 140.0, Tall),
        (1000.0, 120.0, Normal),
        (1400.0, 140.0, Wide),
        (1800.0, 120.0, Tall),
    ],
    &[
        (400.0, Koopa, Left, ON_GROUND),
        (700.0, Goomba, Right, ON_GROUND),
        (1100.0, Koopa, Left, ON_GROUND),
        (1500.0, Goomba, Right, ON_GROUND),
        (1900.0, Koopa, Left, ON_GROUND),
    ],
);

const SCREEN_3: (&[PlatformRow], &[ObstacleRow], &[EnemyRow]) = (
    &[
        (300.0, 180.0),
        (500.0, 240.0),
        (700.0, 300.0),
        (1100.0, 210.0),
        (1300.0, 270.0),
        (1500.0, 330.0),
        (1900.0, 240.0),
        (2100.0, 300.0),
        (2300.0, 360.0),
    ],
    &[
        (400.0, 120.0, Normal),
        (700.0, 140.0, Wide),
        (1100.0, 120.0, Tall),
        (1500.0, 140.0, Normal),
        (1900.0, 120.0, Wide),
    ],
    &[
        (500.0, Koopa, Left, ON_GROUND),
        (800.0, Koopa, Right, ON_GROUND),
        (1200.0, Goomba, Left, ON_GROUND),
        (1600.0, Koopa, Right, ON_GROUND),
        (2000.0, Koopa, Left, ON_GROUND),
    ],
);

/// All screens of the level, in play order.
pub fn screen_templates(tuning: &PlatformerTuning) -> Vec<ScreenTemplate> {
    [SCREEN_1, SCREEN_2, SCREEN_3]
        .iter()
        .map(|(platforms, obstacles, enemies)| layout(tuning, platforms, obstacles, enemies))
        .collect()
}

fn layout(
    tuning: &PlatformerTuning,
    platforms: &[PlatformRow],
    obstacles: &[ObstacleRow],
    enemies: &[EnemyRow],
) -> ScreenTemplate {
    let bottom = tuning.view_height;
    let ground_top = bottom - tuning.tile_size;

    ScreenTemplate {
        ground: (0..tuning.world_tiles)
            .map(|i| {
                let x = i as f32 * tuning.tile_size;
                Rect::new(x, ground_top, tuning.tile_size, tuning.tile_size)
            })
            .collect(),
        platforms: platforms
            .iter()
            .map(|&(x, rise)| Rect::new(x, bottom - rise, PLATFORM_WIDTH, PLATFORM_HEIGHT))
            .collect(),
        obstacles: obstacles
            .iter()
            .map(|&(x, rise, kind)| Obstacle { x, y: bottom - rise, kind })
            .collect(),
        enemies: enemies
            .iter()
            .map(|&(x, kind, heading, offset)| EnemySpawn {
                x,
                y: ground_top + offset,
                kind,
                heading,
            })
            .collect(),
        goal: Rect::new(GOAL_X, bottom - 160.0, GOAL_WIDTH, GOAL_HEIGHT),
    }
}
