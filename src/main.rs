mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sidescroller::assets::{load_sprite_book, SpriteBook, SHEET_NAMES};
use sidescroller::audio::{setup_audio, AudioBridge, Cue};
use sidescroller::compute::{advance, platformer, runner, stride, Arcade};
use sidescroller::config::GameConfig;
use sidescroller::input::{Command, InputCollector};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Variant {
    Runner,
    Platformer,
    Stride,
}

/// Terminal side-scroller arcade.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Start this game directly instead of showing the menu.
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// INI file with tuning overrides.
    #[arg(long, default_value = "./config.ini")]
    config: PathBuf,

    /// Directory that holds `sprites/*.txt`.
    #[arg(long, default_value = "./assets")]
    assets: PathBuf,

    #[arg(long, default_value = "./sidescroller.log")]
    log_file: PathBuf,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Log sound cues without ringing the bell.
    #[arg(long)]
    mute: bool,
}

/// Log to a file; the terminal is owned by the game while it runs.
fn init_logging(path: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Variant),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "»  SIDE  SCROLLER  «";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select a game:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Runner    ", Color::Green,   "Jump the obstacles"),
        ("2", "Platformer", Color::Yellow,  "Three screens, stomp the enemies"),
        ("3", "Stride    ", Color::Magenta, "Swinging legs, hop with Space"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(label))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("  {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("← → / A D : Move   SPACE : Jump   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Variant::Runner)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Variant::Platformer)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Variant::Stride)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Everything a running game needs besides its own state.
struct Session<'a> {
    config: &'a GameConfig,
    book: &'a SpriteBook,
    audio: &'a AudioBridge,
    rng: &'a mut StdRng,
}

/// Runs one game until the player leaves.  Returns `true` → quit program,
/// `false` → back to menu.
///
/// Each frame drains pending key events into the collector, samples one
/// snapshot, advances the game, forwards its sound cues and renders.  A
/// failed tick is logged and the previous state is kept.
fn game_loop<W, G, R>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session<'_>,
    mut state: G,
    render: R,
) -> std::io::Result<bool>
where
    W: Write,
    G: Arcade,
    R: Fn(&mut W, (u16, u16), &G, &SpriteBook) -> std::io::Result<()>,
{
    let budget = session.config.frame_budget();
    let mut input = InputCollector::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                match input.record(&key, frame) {
                    Some(Command::Quit) => return Ok(true),
                    Some(Command::BackToMenu) => return Ok(false),
                    None => {}
                }
            }
        }

        let snapshot = input.sample(frame);
        match advance(&state, &snapshot, &mut *session.rng) {
            Ok(next) => {
                if next.phase() != state.phase() {
                    info!(
                        "phase {:?} -> {:?}, score {}",
                        state.phase(),
                        next.phase(),
                        next.score()
                    );
                }
                state = next;
            }
            Err(e) => error!("tick {} abandoned: {}", frame, e),
        }
        for cue in state.take_cues() {
            session.audio.play(cue);
        }

        let size = terminal::size()?;
        render(out, size, &state, session.book)?;

        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file);

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    let book = load_sprite_book(&cli.assets.join("sprites"), SHEET_NAMES);
    let audio = setup_audio(cli.mute);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session {
        config: &config,
        book: &book,
        audio: &audio,
        rng: &mut rng,
    };
    let result = run(&mut out, &rx, &mut session, cli.variant);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    audio.shutdown();
    if let Err(e) = &result {
        error!("terminal error: {}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session<'_>,
    mut direct: Option<Variant>,
) -> std::io::Result<()> {
    loop {
        let variant = match direct.take() {
            Some(v) => v,
            None => match show_menu(out, rx)? {
                MenuResult::Quit => break,
                MenuResult::Start(v) => v,
            },
        };
        info!("starting {:?}", variant);

        let config = session.config;
        let quit = match variant {
            Variant::Runner => game_loop(
                out,
                rx,
                session,
                runner::init_state(config.runner),
                |o: &mut W, size, s, book| display::render_runner(o, size, s, book),
            )?,
            Variant::Platformer => game_loop(
                out,
                rx,
                session,
                platformer::init_state(config.platformer),
                |o: &mut W, size, s, book| display::render_platformer(o, size, s, book),
            )?,
            Variant::Stride => game_loop(
                out,
                rx,
                session,
                stride::init_state(config.stride),
                |o: &mut W, size, s, _book| display::render_stride(o, size, s),
            )?,
        };
        session.audio.play(Cue::MusicStop);

        if quit {
            break;
        }
        // Otherwise loop back to the menu
    }
    Ok(())
}
