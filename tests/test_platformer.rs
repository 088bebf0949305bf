use sidescroller::audio::Cue;
use sidescroller::compute::enemy;
use sidescroller::compute::platformer::*;
use sidescroller::compute::{advance, Arcade};
use sidescroller::config::PlatformerTuning;
use sidescroller::entities::*;
use sidescroller::error::TickError;
use sidescroller::input::InputSnapshot;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FLOOR: f32 = 448.0;

fn make_state() -> PlatformerState {
    init_state(PlatformerTuning::default())
}

/// A state whose current screen has no enemies.
fn quiet_state() -> PlatformerState {
    let mut s = make_state();
    for screen in s.screens.iter_mut() {
        screen.enemies.clear();
    }
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn press_jump() -> InputSnapshot {
    InputSnapshot {
        jump: true,
        ..InputSnapshot::default()
    }
}

fn hold_right() -> InputSnapshot {
    InputSnapshot {
        right: true,
        ..InputSnapshot::default()
    }
}

fn hold_left() -> InputSnapshot {
    InputSnapshot {
        left: true,
        ..InputSnapshot::default()
    }
}

fn goomba_at(x: f32) -> Enemy {
    enemy::spawn(&EnemySpawn {
        x,
        y: FLOOR - 30.0,
        kind: EnemyKind::Goomba,
        heading: Direction::Left,
    })
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── init_state / reset ────────────────────────────────────────────────────────

#[test]
fn init_state_starts_on_first_screen() {
    let s = make_state();
    assert_eq!(s.screens.len(), 3);
    assert_eq!(s.current_screen, 0);
    assert_eq!(s.score, 0);
    assert_eq!(s.phase, Phase::Playing);
    assert_eq!(s.player.x, 50.0);
    assert_eq!(s.player.bottom(), FLOOR);
    assert_eq!(s.camera, Camera::default());
    assert_eq!(s.cues, vec![Cue::MusicStart]);
}

#[test]
fn reset_restores_everything() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..20 {
        s = tick(&s, &hold_right(), &mut rng).unwrap();
    }
    s.score = 500;
    s.current_screen = 2;
    s.phase = Phase::GameOver;
    s.screens[0].enemies.clear();

    let r = reset_game(&s);
    assert_eq!(r.score, 0);
    assert_eq!(r.current_screen, 0);
    assert_eq!(r.phase, Phase::Playing);
    assert_eq!(r.player.x, 50.0);
    assert_eq!(r.player.bottom(), FLOOR);
    assert_eq!(r.screens[0].enemies.len(), 4);
}

// ── Gravity and landing ───────────────────────────────────────────────────────

#[test]
fn grounded_without_input_stays_put() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..60 {
        s = tick(&s, &idle(), &mut rng).unwrap();
        assert_eq!(s.player.vy, 0.0);
        assert_eq!(s.player.bottom(), FLOOR);
        assert!(!s.player.is_jumping);
    }
    assert_eq!(s.player.anim.clip, Clip::Idle);
}

#[test]
fn fall_speed_is_capped() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.player.y = -400.0;
    s.player.vy = 11.9;
    s.player.is_jumping = true;
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.player.vy, 12.0);
}

#[test]
fn lands_on_a_platform_from_above() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    // First platform: x 400, top at 480 - 120.
    s.player.x = 420.0;
    s.player.y = 360.0 - 40.0 - 3.0;
    s.player.vy = 4.0;
    s.player.is_jumping = true;
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.player.bottom(), 360.0);
    assert_eq!(s.player.vy, 0.0);
    assert!(!s.player.is_jumping);
}

#[test]
fn rising_through_a_platform_does_not_snap() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.player.x = 420.0;
    s.player.y = 350.0;
    s.player.vy = -6.0;
    s.player.is_jumping = true;
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert!(s.player.vy < 0.0);
    assert!(s.player.is_jumping);
}

#[test]
fn lands_on_an_obstacle_top() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    // Tall obstacle at x 800, top at 480 - 140; the platform above is out of reach.
    s.player.x = 800.0;
    s.player.y = 340.0 - 40.0 - 2.0;
    s.player.vy = 3.0;
    s.player.is_jumping = true;
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.player.bottom(), 340.0);
    assert!(!s.player.is_jumping);
}

#[test]
fn walking_off_an_edge_falls_without_a_jump() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.player.x = 570.0;
    s.player.y = 360.0 - 40.0;
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert!(s.player.is_jumping);
    assert!(!s.player.can_double_jump);
    let s2 = tick(&s, &press_jump(), &mut rng).unwrap();
    assert!(s2.player.vy > 0.0);
}

// ── Jumping ───────────────────────────────────────────────────────────────────

#[test]
fn jump_from_ground() {
    let mut rng = seeded_rng();
    let s = tick(&make_state(), &press_jump(), &mut rng).unwrap();
    assert!(approx(s.player.vy, -15.2));
    assert!(s.player.is_jumping);
    assert!(s.player.can_double_jump);
    assert_eq!(s.player.anim.clip, Clip::Jump);
    assert!(s.cues.contains(&Cue::Jump));
}

#[test]
fn jump_with_direction_gets_forward_boost() {
    let s = jump(
        &make_state(),
        &InputSnapshot {
            right: true,
            jump: true,
            left: false,
        },
    );
    assert_eq!(s.player.vx, 7.0);
}

#[test]
fn double_jump_then_nothing() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s = tick(&s, &press_jump(), &mut rng).unwrap();
    for _ in 0..4 {
        s = tick(&s, &idle(), &mut rng).unwrap();
    }
    s = tick(&s, &press_jump(), &mut rng).unwrap();
    assert!(approx(s.player.vy, -12.0));
    assert!(!s.player.can_double_jump);
    assert_eq!(s.player.anim.clip, Clip::DoubleJump);

    let before = s.player.vy;
    s = tick(&s, &press_jump(), &mut rng).unwrap();
    assert!(approx(s.player.vy, before + 0.8));
}

#[test]
fn jump_returns_to_ground() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s = tick(&s, &press_jump(), &mut rng).unwrap();
    let mut ticks = 0;
    while s.player.is_jumping {
        s = tick(&s, &idle(), &mut rng).unwrap();
        ticks += 1;
        assert!(ticks < 200, "never landed");
    }
    assert_eq!(s.player.vy, 0.0);
    assert_eq!(s.player.bottom(), FLOOR);
}

// ── Steering ──────────────────────────────────────────────────────────────────

#[test]
fn held_direction_sets_speed_and_facing() {
    let mut rng = seeded_rng();
    let s = tick(&quiet_state(), &hold_left(), &mut rng).unwrap();
    assert_eq!(s.player.vx, -4.0);
    assert_eq!(s.player.facing, Direction::Left);
    let s = tick(&s, &hold_right(), &mut rng).unwrap();
    assert_eq!(s.player.vx, 4.0);
    assert_eq!(s.player.facing, Direction::Right);
    assert_eq!(s.player.anim.clip, Clip::Run);
}

#[test]
fn air_control_reduces_speed() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s = tick(&s, &press_jump(), &mut rng).unwrap();
    s = tick(&s, &hold_right(), &mut rng).unwrap();
    assert!(approx(s.player.vx, 2.8));
}

#[test]
fn friction_slows_then_stops() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.player.vx = 4.0;
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert!(approx(s.player.vx, 3.4));
    s.player.vx = 0.1;
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.player.vx, 0.0);
}

#[test]
fn player_cannot_leave_the_view() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.player.x = 2.0;
    s = tick(&s, &hold_left(), &mut rng).unwrap();
    assert_eq!(s.player.x, 0.0);
    assert_eq!(s.player.vx, 0.0);
}

// ── Camera and goal ───────────────────────────────────────────────────────────

#[test]
fn walking_right_scrolls_within_bounds_to_the_goal() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    let max_x = 150.0 * 32.0 - 1280.0;
    for _ in 0..2000 {
        s = tick(&s, &hold_right(), &mut rng).unwrap();
        assert!(s.camera.x >= 0.0 && s.camera.x <= max_x);
        assert!(s.player.x >= s.camera.x);
        assert!(s.player.x + s.player.w <= s.camera.x + 1280.0 + 1e-3);
        if s.phase != Phase::Playing {
            break;
        }
    }
    assert_eq!(s.phase, Phase::ScreenTransition { ticks_left: 60 });
    assert!(s.camera.x > 0.0);
}

#[test]
fn goal_starts_a_transition() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.camera = Camera {
        x: 3520.0,
        target_x: 3520.0,
    };
    s.player.x = 4380.0;
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.phase, Phase::ScreenTransition { ticks_left: 60 });
    assert_eq!(s.current_screen, 0);
}

#[test]
fn transition_blocks_input_then_advances_screen() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.player.x = 300.0;
    s.phase = Phase::ScreenTransition { ticks_left: 60 };
    for _ in 0..59 {
        s = tick(&s, &press_jump(), &mut rng).unwrap();
    }
    assert_eq!(s.phase, Phase::ScreenTransition { ticks_left: 1 });
    assert_eq!(s.current_screen, 0);
    assert!(!s.player.is_jumping);

    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.phase, Phase::Playing);
    assert_eq!(s.current_screen, 1);
    assert_eq!(s.player.x, 50.0);
    assert_eq!(s.camera, Camera::default());
}

#[test]
fn last_screen_completes_the_level() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.current_screen = 2;
    s.score = 300;
    s.phase = Phase::ScreenTransition { ticks_left: 1 };
    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.phase, Phase::LevelComplete);

    let frozen = advance(&s, &idle(), &mut rng).unwrap();
    assert_eq!(frozen.phase, Phase::LevelComplete);

    let r = advance(&s, &press_jump(), &mut rng).unwrap();
    assert_eq!(r.phase, Phase::Playing);
    assert_eq!(r.current_screen, 0);
    assert_eq!(r.score, 0);
}

#[test]
fn screen_index_out_of_range_is_an_error() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.current_screen = 7;
    match tick(&s, &idle(), &mut rng) {
        Err(TickError::ScreenOutOfRange { index, count }) => {
            assert_eq!(index, 7);
            assert_eq!(count, 3);
        }
        other => panic!("expected ScreenOutOfRange, got {:?}", other.map(|s| s.phase)),
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn stomp_bounces_and_damages() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.screens[0].enemies.push(goomba_at(200.0));
    s.player.x = 195.0;
    s.player.y = 382.0;
    s.player.vy = 5.0;
    s.player.is_jumping = true;

    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.phase, Phase::Playing);
    assert!(approx(s.player.vy, -9.6));
    assert!(s.player.is_jumping);
    assert!(s.player.can_double_jump);
    assert!(s.cues.contains(&Cue::Jump));
    let e = &s.screens[0].enemies[0];
    assert_eq!(e.health, 0);
    assert_eq!(e.mode, EnemyMode::HitRising { frame: 0 });
}

#[test]
fn straight_drop_onto_a_head_always_stomps() {
    let head = FLOOR - 30.0;
    for i in 0..160 {
        let drop = 20.0 + 0.25 * i as f32;
        let mut rng = seeded_rng();
        let mut s = quiet_state();
        let mut g = goomba_at(200.0);
        g.mode = EnemyMode::Paused { ticks_left: 1000 };
        s.screens[0].enemies.push(g);
        s.player.x = 198.0;
        s.player.y = head - drop - 40.0;
        s.player.vy = 0.0;
        s.player.is_jumping = true;

        for _ in 0..60 {
            s = tick(&s, &idle(), &mut rng).unwrap();
            if s.phase != Phase::Playing || s.screens[0].enemies[0].health == 0 {
                break;
            }
        }
        assert_eq!(s.phase, Phase::Playing, "died dropping from {}", drop);
        assert_eq!(s.screens[0].enemies[0].health, 0, "no stomp from {}", drop);
        assert!(s.player.vy < 0.0);
    }
}

#[test]
fn rising_into_an_enemy_is_lethal() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    let mut g = goomba_at(200.0);
    g.mode = EnemyMode::Paused { ticks_left: 1000 };
    g.y = 300.0;
    s.screens[0].enemies.push(g);
    s.player.x = 198.0;
    s.player.y = 325.0;
    s.player.vy = -8.0;
    s.player.is_jumping = true;

    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.phase, Phase::GameOver);
}

#[test]
fn stomped_goomba_is_removed_and_scored() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.screens[0].enemies.push(goomba_at(200.0));
    s.player.x = 195.0;
    s.player.y = 382.0;
    s.player.vy = 5.0;
    s.player.is_jumping = true;

    for _ in 0..60 {
        s = tick(&s, &idle(), &mut rng).unwrap();
        assert_eq!(s.phase, Phase::Playing);
    }
    assert!(s.screens[0].enemies.is_empty());
    assert_eq!(s.score, 100);
}

#[test]
fn side_contact_is_lethal() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    s.screens[0].enemies.push(goomba_at(200.0));
    s.player.x = 175.0;

    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.phase, Phase::GameOver);
    assert!(s.cues.contains(&Cue::GameOver));
    assert!(s.cues.contains(&Cue::MusicStop));
    assert_eq!(s.player.anim.clip, Clip::Hit);

    let frozen = advance(&s, &hold_right(), &mut rng).unwrap();
    assert_eq!(frozen.player.x, s.player.x);
}

#[test]
fn enemy_in_hit_state_is_harmless() {
    let mut rng = seeded_rng();
    let mut s = quiet_state();
    let mut g = goomba_at(200.0);
    g.mode = EnemyMode::HitRising { frame: 0 };
    g.health = 0;
    s.screens[0].enemies.push(g);
    s.player.x = 175.0;

    s = tick(&s, &idle(), &mut rng).unwrap();
    assert_eq!(s.phase, Phase::Playing);
}

#[test]
fn restart_after_game_over_rebuilds_enemies() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.screens[0].enemies.clear();
    s.phase = Phase::GameOver;
    let mut r = advance(&s, &press_jump(), &mut rng).unwrap();
    assert_eq!(r.screens[0].enemies.len(), 4);
    assert_eq!(r.take_cues(), vec![Cue::MusicStart]);
}

// ── Grounded invariant ────────────────────────────────────────────────────────

fn any_walk() -> impl Strategy<Value = InputSnapshot> {
    prop_oneof![Just(idle()), Just(hold_left()), Just(hold_right())]
}

proptest! {
    #[test]
    fn walking_on_flat_ground_never_leaves_it(
        inputs in proptest::collection::vec(any_walk(), 1..200)
    ) {
        let mut rng = seeded_rng();
        let mut s = quiet_state();
        for input in &inputs {
            s = tick(&s, input, &mut rng).unwrap();
            prop_assert_eq!(s.player.vy, 0.0);
            prop_assert!(!s.player.is_jumping);
            prop_assert_eq!(s.player.bottom(), FLOOR);
        }
    }
}
