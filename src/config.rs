//! Game tuning loaded from an INI file.
//!
//! Every value has a default taken from the original games, so a missing or
//! partial file is fine.
//!
//! # Configuration File Format
//!
//! ```ini
//! [loop]
//! target_fps = 60
//!
//! [runner]
//! gravity = 0.5
//! jump_force = -12
//! obstacle_speed = 5
//! spawn_interval = 120
//!
//! [platformer]
//! gravity = 0.8
//! max_fall_speed = 12
//! transition_ticks = 60
//!
//! [stride]
//! swing_step = 0.1
//! ```

use std::path::PathBuf;
use std::time::Duration;

use configparser::ini::Ini;
use log::info;

use crate::error::ConfigError;

const DEFAULT_CONFIG_PATH: &str = "./config.ini";

// ── Per-variant tuning ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunnerTuning {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub obstacle_speed: f32,
    /// Ticks between obstacle spawns (120 ≈ 2 s at 60 FPS).
    pub spawn_interval: u64,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        RunnerTuning {
            width: 800.0,
            height: 300.0,
            gravity: 0.5,
            jump_force: -12.0,
            obstacle_speed: 5.0,
            spawn_interval: 120,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformerTuning {
    pub view_width: f32,
    pub view_height: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub player_speed: f32,
    /// Horizontal speed multiplier while airborne.
    pub air_control: f32,
    pub max_fall_speed: f32,
    pub ground_friction: f32,
    pub jump_forward_boost: f32,
    pub tile_size: f32,
    /// Ground tiles per screen; world width is `tile_size * world_tiles`.
    pub world_tiles: u32,
    pub camera_speed: f32,
    /// Deadzone edges as fractions of the view width.
    pub deadzone_left: f32,
    pub deadzone_right: f32,
    pub transition_ticks: u32,
}

impl Default for PlatformerTuning {
    fn default() -> Self {
        PlatformerTuning {
            view_width: 1280.0,
            view_height: 480.0,
            gravity: 0.8,
            jump_force: -16.0,
            player_speed: 4.0,
            air_control: 0.7,
            max_fall_speed: 12.0,
            ground_friction: 0.85,
            jump_forward_boost: 3.0,
            tile_size: 32.0,
            world_tiles: 150,
            camera_speed: 0.2,
            deadzone_left: 0.3,
            deadzone_right: 0.7,
            transition_ticks: 60,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrideTuning {
    /// Swing phase added per tick, in radians.
    pub swing_step: f32,
    /// Peak leg rotation, in radians.
    pub swing_amplitude: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
}

impl Default for StrideTuning {
    fn default() -> Self {
        StrideTuning {
            swing_step: 0.1,
            swing_amplitude: 0.5,
            gravity: 0.1,
            jump_velocity: 0.5,
        }
    }
}

// ── Top-level config ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub target_fps: u32,
    pub runner: RunnerTuning,
    pub platformer: PlatformerTuning,
    pub stride: StrideTuning,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a configuration holding the built-in defaults.
    pub fn new() -> Self {
        GameConfig {
            target_fps: 60,
            runner: RunnerTuning::default(),
            platformer: PlatformerTuning::default(),
            stride: StrideTuning::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        GameConfig {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Duration of one tick at the target rate.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.target_fps.max(1)))
    }

    /// Load values from the INI file over the current ones.
    ///
    /// Missing keys keep their current value.  On error nothing is applied.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|message| ConfigError::Load {
            path: self.config_path.clone(),
            message,
        })?;
        self.apply(&ini)
    }

    /// Same as [`load_from_file`](Self::load_from_file) but from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(|message| ConfigError::Load {
            path: self.config_path.clone(),
            message,
        })?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        let mut next = self.clone();

        read_u32(ini, "loop", "target_fps", &mut next.target_fps)?;
        if next.target_fps == 0 {
            return Err(invalid("loop", "target_fps", "must be at least 1"));
        }

        let r = &mut next.runner;
        read_f32(ini, "runner", "width", &mut r.width)?;
        read_f32(ini, "runner", "height", &mut r.height)?;
        read_f32(ini, "runner", "gravity", &mut r.gravity)?;
        read_f32(ini, "runner", "jump_force", &mut r.jump_force)?;
        read_f32(ini, "runner", "obstacle_speed", &mut r.obstacle_speed)?;
        read_u64(ini, "runner", "spawn_interval", &mut r.spawn_interval)?;
        if r.spawn_interval == 0 {
            return Err(invalid("runner", "spawn_interval", "must be at least 1"));
        }

        let p = &mut next.platformer;
        read_f32(ini, "platformer", "view_width", &mut p.view_width)?;
        read_f32(ini, "platformer", "view_height", &mut p.view_height)?;
        read_f32(ini, "platformer", "gravity", &mut p.gravity)?;
        read_f32(ini, "platformer", "jump_force", &mut p.jump_force)?;
        read_f32(ini, "platformer", "player_speed", &mut p.player_speed)?;
        read_f32(ini, "platformer", "air_control", &mut p.air_control)?;
        read_f32(ini, "platformer", "max_fall_speed", &mut p.max_fall_speed)?;
        read_f32(ini, "platformer", "ground_friction", &mut p.ground_friction)?;
        read_f32(ini, "platformer", "jump_forward_boost", &mut p.jump_forward_boost)?;
        read_f32(ini, "platformer", "camera_speed", &mut p.camera_speed)?;
        read_f32(ini, "platformer", "deadzone_left", &mut p.deadzone_left)?;
        read_f32(ini, "platformer", "deadzone_right", &mut p.deadzone_right)?;
        read_u32(ini, "platformer", "transition_ticks", &mut p.transition_ticks)?;
        if p.deadzone_left >= p.deadzone_right {
            return Err(invalid(
                "platformer",
                "deadzone_left",
                "must be smaller than deadzone_right",
            ));
        }

        let s = &mut next.stride;
        read_f32(ini, "stride", "swing_step", &mut s.swing_step)?;
        read_f32(ini, "stride", "swing_amplitude", &mut s.swing_amplitude)?;
        read_f32(ini, "stride", "gravity", &mut s.gravity)?;
        read_f32(ini, "stride", "jump_velocity", &mut s.jump_velocity)?;

        *self = next;
        info!(
            "Loaded config from {:?}: fps={}, runner spawn every {} ticks, {} transition ticks",
            self.config_path,
            self.target_fps,
            self.runner.spawn_interval,
            self.platformer.transition_ticks
        );
        Ok(())
    }
}

// ── INI helpers ───────────────────────────────────────────────────────────────

fn invalid(section: &str, key: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn read_f32(ini: &Ini, section: &str, key: &str, slot: &mut f32) -> Result<(), ConfigError> {
    match ini.getfloat(section, key) {
        Ok(Some(value)) if value.is_finite() => {
            *slot = value as f32;
            Ok(())
        }
        Ok(Some(_)) => Err(invalid(section, key, "must be finite")),
        Ok(None) => Ok(()),
        Err(reason) => Err(invalid(section, key, &reason)),
    }
}

fn read_u64(ini: &Ini, section: &str, key: &str, slot: &mut u64) -> Result<(), ConfigError> {
    match ini.getuint(section, key) {
        Ok(Some(value)) => {
            *slot = value;
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(reason) => Err(invalid(section, key, &reason)),
    }
}

fn read_u32(ini: &Ini, section: &str, key: &str, slot: &mut u32) -> Result<(), ConfigError> {
    let mut wide = u64::from(*slot);
    read_u64(ini, section, key, &mut wide)?;
    *slot = u32::try_from(wide).map_err(|_| invalid(section, key, "does not fit in 32 bits"))?;
    Ok(())
}
