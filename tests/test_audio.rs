use sidescroller::audio::*;

#[test]
fn muted_bridge_accepts_cues_and_shuts_down() {
    let bridge = setup_audio(true);
    bridge.play(Cue::MusicStart);
    bridge.play(Cue::Jump);
    bridge.play(Cue::GameOver);
    bridge.play(Cue::MusicStop);
    bridge.shutdown();
}
