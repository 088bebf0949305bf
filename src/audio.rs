//! Fire-and-forget sound cues played on a background thread.
//!
//! The simulation only records [`Cue`]s; the loop forwards them to an
//! [`AudioBridge`].  A terminal has no mixer, so one-shot cues ring the
//! bell and the background loop is tracked and logged.  Playback failures
//! are logged and never reach the game.

use std::io::Write;
use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};

use crate::error::AudioError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    GameOver,
    MusicStart,
    MusicStop,
}

enum AudioCmd {
    Play(Cue),
    Shutdown,
}

/// Handle to the audio thread.
pub struct AudioBridge {
    tx_cmd: Sender<AudioCmd>,
    handle: JoinHandle<()>,
}

/// Spawn the audio thread.  With `muted` set cues are only logged.
pub fn setup_audio(muted: bool) -> AudioBridge {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let handle = std::thread::spawn(move || audio_thread(rx_cmd, muted));
    AudioBridge { tx_cmd, handle }
}

impl AudioBridge {
    /// Queue a cue; never blocks and never fails the caller.
    pub fn play(&self, cue: Cue) {
        if self.tx_cmd.send(AudioCmd::Play(cue)).is_err() {
            warn!("dropping {:?}: {}", cue, AudioError::Disconnected);
        }
    }

    /// Ask the thread to stop and wait for it.
    pub fn shutdown(self) {
        let _ = self.tx_cmd.send(AudioCmd::Shutdown);
        if self.handle.join().is_err() {
            warn!("audio thread panicked");
        }
    }
}

fn audio_thread(rx_cmd: Receiver<AudioCmd>, muted: bool) {
    let mut music_playing = false;
    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            AudioCmd::Shutdown => break,
            AudioCmd::Play(cue) => {
                debug!("cue {:?}", cue);
                match cue {
                    Cue::MusicStart => {
                        if !music_playing {
                            info!("background loop started");
                        }
                        music_playing = true;
                    }
                    Cue::MusicStop => {
                        if music_playing {
                            info!("background loop stopped");
                        }
                        music_playing = false;
                    }
                    Cue::Jump | Cue::GameOver => {
                        if !muted {
                            if let Err(e) = ring_bell() {
                                warn!("{:?} cue failed: {}", cue, e);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn ring_bell() -> Result<(), AudioError> {
    let mut out = std::io::stdout().lock();
    out.write_all(b"\x07")?;
    out.flush()?;
    Ok(())
}
