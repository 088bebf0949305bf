/// Game entity types.  Pure data; the only logic is geometry helpers.
///
/// World units are the original canvas pixels: x grows rightward, y grows
/// downward.  The terminal renderer scales them to character cells.

use crate::audio::Cue;
use crate::config::{PlatformerTuning, RunnerTuning, StrideTuning};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.x && self.x < other.right()
    }

    /// Shrink by `fraction` of the size on every side (0.1 keeps the middle 80%).
    pub fn inset(&self, fraction: f32) -> Rect {
        Rect {
            x: self.x + self.w * fraction,
            y: self.y + self.h * fraction,
            w: self.w * (1.0 - 2.0 * fraction),
            h: self.h * (1.0 - 2.0 * fraction),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// ── Animation ─────────────────────────────────────────────────────────────────

/// Named sprite clips of the player character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clip {
    Idle,
    Run,
    Jump,
    Fall,
    DoubleJump,
    Hit,
}

/// Playback position inside the active clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animator {
    pub clip: Clip,
    /// Always within `[0, frame_count(clip))`.
    pub frame: usize,
    /// Ticks since the frame last advanced.
    pub timer: u32,
}

impl Animator {
    pub fn new(clip: Clip) -> Self {
        Animator {
            clip,
            frame: 0,
            timer: 0,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub is_jumping: bool,
    pub can_double_jump: bool,
    pub facing: Direction,
    pub anim: Animator,
}

impl Player {
    pub fn spawn(x: f32, y: f32, size: f32, clip: Clip) -> Self {
        Player {
            x,
            y,
            w: size,
            h: size,
            vx: 0.0,
            vy: 0.0,
            is_jumping: false,
            can_double_jump: false,
            facing: Direction::Right,
            anim: Animator::new(clip),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Normal,
    Tall,
    Wide,
    Small,
}

/// A static block.  Its size comes from the kind table in `compute::kinds`.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Goomba,
    Koopa,
}

/// Locomotion style; a Koopa starts walking and runs after surviving a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gait {
    Walk,
    Run,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyMode {
    Patrol,
    Paused { ticks_left: u32 },
    /// Hit animation counting up.
    HitRising { frame: u32 },
    /// Hit animation counting back down to 0.
    HitFalling { frame: u32 },
    Removed,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub heading: Direction,
    pub health: u32,
    pub gait: Gait,
    pub mode: EnemyMode,
    /// Walk/run sprite frame.
    pub frame: usize,
    pub frame_timer: u32,
    /// Ticks since the hit frame last moved.
    pub hit_timer: u32,
}

/// Template entry a screen uses to (re)create its enemies on reset.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub heading: Direction,
}

// ── Level ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub target_x: f32,
}

/// One fixed-length level segment with its live enemies.
#[derive(Clone, Debug)]
pub struct Screen {
    pub ground: Vec<Rect>,
    pub platforms: Vec<Rect>,
    pub obstacles: Vec<Obstacle>,
    pub enemies: Vec<Enemy>,
    pub goal: Rect,
}

// ── Loop phase ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
    LevelComplete,
    /// Gameplay is frozen while the fade runs.
    ScreenTransition { ticks_left: u32 },
}

// ── Master game states ────────────────────────────────────────────────────────

/// Jump-over-obstacles runner.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct RunnerState {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub phase: Phase,
    pub frame: u64,
    pub tuning: RunnerTuning,
    /// Audio cues raised since the loop last drained them.
    pub cues: Vec<Cue>,
}

/// Multi-screen scrolling platformer.
#[derive(Clone, Debug)]
pub struct PlatformerState {
    pub player: Player,
    pub camera: Camera,
    pub screens: Vec<Screen>,
    pub current_screen: usize,
    pub score: u32,
    pub phase: Phase,
    pub frame: u64,
    pub tuning: PlatformerTuning,
    pub cues: Vec<Cue>,
}

/// Two-legged rig that swings its legs and hops.  Height is y-up.
#[derive(Clone, Debug)]
pub struct StrideState {
    /// Accumulated swing phase in radians.
    pub swing: f32,
    pub height: f32,
    pub vy: f32,
    pub airborne: bool,
    pub frame: u64,
    pub tuning: StrideTuning,
    pub cues: Vec<Cue>,
}
