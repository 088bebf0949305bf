//! Glyph sprite sheets.
//!
//! A sheet is a text file of frames separated by a `---` line.  Each load is
//! started with [`request_sheet`], which returns a [`PendingSheet`]; all of
//! them are resolved before the game loop starts, so the simulation never
//! waits on assets.  A failed load is logged and the renderer draws plain
//! blocks instead.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossbeam_channel::{bounded, Receiver};
use log::{info, warn};

use crate::error::AssetError;

const FRAME_SEPARATOR: &str = "---";

/// Every sheet the renderer knows how to use.
pub const SHEET_NAMES: &[&str] = &[
    "player_idle",
    "player_run",
    "player_jump",
    "player_fall",
    "player_double_jump",
    "player_hit",
    "koopa_walk",
    "koopa_run",
    "koopa_hit",
];

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteSheet {
    pub frames: Vec<Vec<String>>,
}

impl SpriteSheet {
    /// Returns `None` when the text holds no non-empty frame.
    pub fn parse(text: &str) -> Option<SpriteSheet> {
        let mut frames = Vec::new();
        let mut current: Vec<String> = Vec::new();
        for line in text.lines() {
            if line.trim_end() == FRAME_SEPARATOR {
                if !current.is_empty() {
                    frames.push(std::mem::take(&mut current));
                }
            } else {
                current.push(line.trim_end().to_string());
            }
        }
        if !current.is_empty() {
            frames.push(current);
        }
        // Drop frames that are only blank lines (e.g. a trailing newline block).
        frames.retain(|f: &Vec<String>| f.iter().any(|l| !l.is_empty()));
        if frames.is_empty() {
            None
        } else {
            Some(SpriteSheet { frames })
        }
    }

    /// Frame lines for `index`, wrapping around the sheet length.
    pub fn frame(&self, index: usize) -> &[String] {
        &self.frames[index % self.frames.len()]
    }
}

/// A sheet load running on its own thread.
pub struct PendingSheet {
    pub name: String,
    path: PathBuf,
    rx: Receiver<Result<SpriteSheet, AssetError>>,
}

/// Start loading `<dir>/<name>.txt`.
pub fn request_sheet(dir: &Path, name: &str) -> PendingSheet {
    let path = dir.join(format!("{name}.txt"));
    let (tx, rx) = bounded(1);
    let worker_path = path.clone();
    std::thread::spawn(move || {
        let _ = tx.send(read_sheet(&worker_path));
    });
    PendingSheet {
        name: name.to_string(),
        path,
        rx,
    }
}

fn read_sheet(path: &Path) -> Result<SpriteSheet, AssetError> {
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SpriteSheet::parse(&text).ok_or_else(|| AssetError::Empty {
        path: path.to_path_buf(),
    })
}

impl PendingSheet {
    /// Block until the load finishes.
    pub fn resolve(self) -> Result<SpriteSheet, AssetError> {
        self.rx
            .recv()
            .map_err(|_| AssetError::Disconnected { path: self.path })?
    }
}

/// Sheets that loaded successfully, by name.
#[derive(Clone, Debug, Default)]
pub struct SpriteBook {
    sheets: HashMap<String, SpriteSheet>,
}

impl SpriteBook {
    pub fn get(&self, name: &str) -> Option<&SpriteSheet> {
        self.sheets.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, sheet: SpriteSheet) {
        self.sheets.insert(name.into(), sheet);
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Request every named sheet, then resolve them all.  Failures are logged
/// and left out of the book.
pub fn load_sprite_book(dir: &Path, names: &[&str]) -> SpriteBook {
    let pending: Vec<PendingSheet> = names.iter().map(|n| request_sheet(dir, n)).collect();
    let mut book = SpriteBook::default();
    for sheet in pending {
        let name = sheet.name.clone();
        match sheet.resolve() {
            Ok(loaded) => {
                info!("sprite sheet {} loaded ({} frames)", name, loaded.frames.len());
                book.insert(name, loaded);
            }
            Err(e) => warn!("sprite sheet {} unavailable: {}", name, e),
        }
    }
    book
}
