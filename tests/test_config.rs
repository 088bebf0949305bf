use std::io::Write;
use std::time::Duration;

use sidescroller::config::*;
use sidescroller::error::ConfigError;

#[test]
fn defaults_match_the_original_games() {
    let c = GameConfig::new();
    assert_eq!(c.target_fps, 60);
    assert_eq!(c.runner.gravity, 0.5);
    assert_eq!(c.runner.jump_force, -12.0);
    assert_eq!(c.runner.spawn_interval, 120);
    assert_eq!(c.platformer.gravity, 0.8);
    assert_eq!(c.platformer.max_fall_speed, 12.0);
    assert_eq!(c.platformer.transition_ticks, 60);
    assert_eq!(c.stride.swing_step, 0.1);
}

#[test]
fn frame_budget_from_fps() {
    let c = GameConfig::new();
    assert_eq!(c.frame_budget(), Duration::from_micros(16_666));
}

#[test]
fn ini_overrides_only_given_keys() {
    let mut c = GameConfig::new();
    c.load_from_str(
        "[loop]\ntarget_fps = 30\n\n[runner]\ngravity = 0.6\nspawn_interval = 90\n\n[stride]\njump_velocity = 0.7\n",
    )
    .unwrap();
    assert_eq!(c.target_fps, 30);
    assert!((c.runner.gravity - 0.6).abs() < 1e-6);
    assert_eq!(c.runner.spawn_interval, 90);
    assert_eq!(c.runner.jump_force, -12.0);
    assert!((c.stride.jump_velocity - 0.7).abs() < 1e-6);
    assert_eq!(c.platformer, PlatformerTuning::default());
}

#[test]
fn bad_value_keeps_previous_config() {
    let mut c = GameConfig::new();
    let err = c
        .load_from_str("[runner]\ngravity = 0.9\njump_force = high\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "jump_force"));
    assert_eq!(c.runner, RunnerTuning::default());
}

#[test]
fn zero_rates_are_rejected() {
    let mut c = GameConfig::new();
    assert!(c.load_from_str("[loop]\ntarget_fps = 0\n").is_err());
    assert!(c.load_from_str("[runner]\nspawn_interval = 0\n").is_err());
    assert_eq!(c.target_fps, 60);
}

#[test]
fn inverted_deadzone_is_rejected() {
    let mut c = GameConfig::new();
    let err = c
        .load_from_str("[platformer]\ndeadzone_left = 0.8\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert_eq!(c.platformer.deadzone_left, 0.3);
}

#[test]
fn load_from_file_reads_ini() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[platformer]\ntransition_ticks = 10\nplayer_speed = 5").unwrap();

    let mut c = GameConfig::with_path(file.path());
    c.load_from_file().unwrap();
    assert_eq!(c.platformer.transition_ticks, 10);
    assert_eq!(c.platformer.player_speed, 5.0);
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = GameConfig::with_path(dir.path().join("nope.ini"));
    let err = c.load_from_file().unwrap_err();
    assert!(matches!(err, ConfigError::Load { .. }));
    assert_eq!(c.target_fps, 60);
}
