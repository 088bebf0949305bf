use sidescroller::audio::Cue;
use sidescroller::compute::stride::*;
use sidescroller::compute::{advance, Arcade};
use sidescroller::config::StrideTuning;
use sidescroller::entities::Phase;
use sidescroller::input::InputSnapshot;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> sidescroller::entities::StrideState {
    init_state(StrideTuning::default())
}

#[test]
fn legs_mirror_each_other() {
    let mut s = make_state();
    for _ in 0..50 {
        s = tick(&s).unwrap();
        let (left, right) = leg_angles(&s);
        assert_eq!(left, -right);
        assert!(left.abs() <= 0.5 + 1e-6);
    }
}

#[test]
fn swing_follows_the_phase() {
    let mut s = make_state();
    for _ in 0..10 {
        s = tick(&s).unwrap();
    }
    assert!((s.swing - 1.0).abs() < 1e-4);
    let (left, _) = leg_angles(&s);
    assert!((left - 1.0f32.sin() * 0.5).abs() < 1e-4);
}

#[test]
fn standing_rig_stays_on_the_ground() {
    let mut s = make_state();
    for _ in 0..30 {
        s = tick(&s).unwrap();
        assert_eq!(s.height, 0.0);
        assert_eq!(s.vy, 0.0);
    }
}

#[test]
fn hop_goes_up_and_lands() {
    let mut s = jump(&make_state());
    assert!(s.airborne);
    assert_eq!(s.vy, 0.5);
    assert_eq!(s.cues, vec![Cue::Jump]);

    let mut peak: f32 = 0.0;
    let mut ticks = 0;
    while s.airborne {
        s = tick(&s).unwrap();
        assert!(s.height >= 0.0);
        peak = peak.max(s.height);
        ticks += 1;
        assert!(ticks < 30, "never landed");
    }
    assert!(peak > 0.9);
    assert_eq!(s.height, 0.0);
    assert_eq!(s.vy, 0.0);
}

#[test]
fn no_hop_in_the_air() {
    let s = tick(&jump(&make_state())).unwrap();
    let s2 = jump(&s);
    assert_eq!(s2.vy, s.vy);
    assert_eq!(s2.cues.len(), 1);
}

#[test]
fn reset_grounds_the_rig() {
    let s = tick(&jump(&make_state())).unwrap();
    let r = reset(&s);
    assert!(!r.airborne);
    assert_eq!(r.height, 0.0);
    assert_eq!(r.vy, 0.0);
}

#[test]
fn arcade_driver_hops_on_space() {
    let mut rng = StdRng::seed_from_u64(1);
    let input = InputSnapshot {
        jump: true,
        ..InputSnapshot::default()
    };
    let mut s = advance(&make_state(), &input, &mut rng).unwrap();
    assert_eq!(s.phase(), Phase::Playing);
    assert!(s.height > 0.0);
    assert_eq!(s.take_cues(), vec![Cue::Jump]);
    assert_eq!(s.score(), 1);
}
