/// Terminal renderer.  All terminal I/O lives here.
///
/// Each function receives a mutable writer, the terminal size and an
/// immutable view of the game state.  No game logic is performed; this
/// module only translates world units into character cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sidescroller::assets::{SpriteBook, SpriteSheet};
use sidescroller::compute::{enemy, kinds, stride};
use sidescroller::entities::{
    Clip, Direction, Enemy, EnemyKind, Gait, ObstacleKind, Phase, PlatformerState, Rect,
    RunnerState, StrideState,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TITLE: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_GROUND: Color = Color::DarkGreen;
const C_PLATFORM: Color = Color::DarkYellow;
const C_GOAL: Color = Color::Yellow;
const C_GOOMBA: Color = Color::DarkRed;
const C_KOOPA: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

fn obstacle_color(kind: ObstacleKind) -> Color {
    match kind {
        ObstacleKind::Normal => Color::Grey,
        ObstacleKind::Tall => Color::DarkMagenta,
        ObstacleKind::Wide => Color::DarkCyan,
        ObstacleKind::Small => Color::Blue,
    }
}

fn clip_sheet(clip: Clip) -> &'static str {
    match clip {
        Clip::Idle => "player_idle",
        Clip::Run => "player_run",
        Clip::Jump => "player_jump",
        Clip::Fall => "player_fall",
        Clip::DoubleJump => "player_double_jump",
        Clip::Hit => "player_hit",
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps a window of world units onto the play-field rows of the terminal.
///
/// Row 0 is the HUD and the last row holds the controls hint.
struct Viewport {
    cols: u16,
    rows: u16,
    origin_x: f32,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(size: (u16, u16), origin_x: f32, world_w: f32, world_h: f32) -> Self {
        let (cols, rows) = size;
        let field_rows = rows.saturating_sub(2).max(1);
        Viewport {
            cols,
            rows,
            origin_x,
            scale_x: world_w / f32::from(cols.max(1)),
            scale_y: world_h / f32::from(field_rows),
        }
    }

    /// Terminal cell for a world point, if it falls in the play field.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = ((x - self.origin_x) / self.scale_x).floor();
        let row = (y / self.scale_y).floor() + 1.0;
        let in_field = col >= 0.0
            && col < f32::from(self.cols)
            && row >= 1.0
            && row < f32::from(self.rows.saturating_sub(1));
        in_field.then(|| (col as u16, row as u16))
    }

    /// Cell columns and rows a world rectangle covers, clipped to the field.
    fn span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = ((rect.x - self.origin_x) / self.scale_x).floor().max(0.0);
        let c1 = ((rect.right() - self.origin_x) / self.scale_x)
            .ceil()
            .min(f32::from(self.cols));
        let r0 = (rect.y / self.scale_y).floor().max(0.0) + 1.0;
        let r1 = (rect.bottom() / self.scale_y).ceil() + 1.0;
        let r1 = r1.min(f32::from(self.rows.saturating_sub(1)));
        if c1 <= c0 || r1 <= r0 {
            return None;
        }
        Some((c0 as u16, c1 as u16, r0 as u16, r1 as u16))
    }
}

fn fill_rect<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = vp.span(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(usize::from(c1 - c0)).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

/// Swap characters that point one way for their mirror image.
fn mirror_line(line: &str) -> String {
    line.chars()
        .rev()
        .map(|c| match c {
            '/' => '\\',
            '\\' => '/',
            '(' => ')',
            ')' => '(',
            '<' => '>',
            '>' => '<',
            '[' => ']',
            ']' => '[',
            other => other,
        })
        .collect()
}

/// Draw a sheet frame with its bottom-left corner at the bottom-left of
/// `rect`, or fill `rect` with `fallback` when no sheet is loaded.
#[allow(clippy::too_many_arguments)]
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Rect,
    sheet: Option<&SpriteSheet>,
    frame: usize,
    facing: Direction,
    fallback: char,
    color: Color,
) -> std::io::Result<()> {
    let Some(sheet) = sheet else {
        return fill_rect(out, vp, rect, fallback, color);
    };
    let Some((col, bottom_row)) = vp.cell(rect.x, rect.bottom() - 0.01) else {
        return Ok(());
    };
    let lines = sheet.frame(frame);
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in lines.iter().rev().enumerate() {
        let Some(row) = bottom_row.checked_sub(i as u16) else {
            break;
        };
        if row < 1 {
            break;
        }
        let text = match facing {
            Direction::Right => line.clone(),
            Direction::Left => mirror_line(line),
        };
        let room = usize::from(vp.cols.saturating_sub(col));
        let clipped: String = text.chars().take(room).collect();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(clipped))?;
    }
    Ok(())
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete runner frame.
pub fn render_runner<W: Write>(
    out: &mut W,
    size: (u16, u16),
    state: &RunnerState,
    book: &SpriteBook,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let t = &state.tuning;
    let vp = Viewport::new(size, 0.0, t.width, t.height);

    draw_hud(out, size, "RUNNER", state.score, None)?;

    // Ground line under the player's feet.
    let ground = Rect::new(0.0, t.height - 20.0, t.width, 1.0);
    fill_rect(out, &vp, &ground, '─', C_GROUND)?;

    for o in &state.obstacles {
        fill_rect(out, &vp, &kinds::obstacle_rect(o), '█', obstacle_color(o.kind))?;
    }

    let p = &state.player;
    draw_sprite(
        out,
        &vp,
        &p.bounds(),
        book.get(clip_sheet(p.anim.clip)),
        p.anim.frame,
        p.facing,
        '▓',
        C_PLAYER,
    )?;

    draw_controls_hint(out, size, "SPACE : Jump   ESC : Menu   Q : Quit")?;
    if state.phase == Phase::GameOver {
        draw_banner(out, size, "GAME  OVER", Color::Red, state.score)?;
    }
    finish(out, size)
}

/// Render one complete platformer frame.
pub fn render_platformer<W: Write>(
    out: &mut W,
    size: (u16, u16),
    state: &PlatformerState,
    book: &SpriteBook,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let t = &state.tuning;
    let vp = Viewport::new(size, state.camera.x, t.view_width, t.view_height);
    let screen_label = format!(
        "Screen {}/{}",
        state.current_screen + 1,
        state.screens.len()
    );
    draw_hud(out, size, "PLATFORMER", state.score, Some(&screen_label))?;

    if let Some(screen) = state.screens.get(state.current_screen) {
        for tile in &screen.ground {
            fill_rect(out, &vp, tile, '▓', C_GROUND)?;
        }
        for platform in &screen.platforms {
            fill_rect(out, &vp, platform, '═', C_PLATFORM)?;
        }
        for o in &screen.obstacles {
            fill_rect(out, &vp, &kinds::obstacle_rect(o), '█', obstacle_color(o.kind))?;
        }
        fill_rect(out, &vp, &screen.goal, '┃', C_GOAL)?;
        for e in &screen.enemies {
            draw_enemy(out, &vp, e, book)?;
        }
    }

    let p = &state.player;
    draw_sprite(
        out,
        &vp,
        &p.bounds(),
        book.get(clip_sheet(p.anim.clip)),
        p.anim.frame,
        p.facing,
        '▓',
        C_PLAYER,
    )?;

    draw_controls_hint(
        out,
        size,
        "← → / A D : Move   SPACE : Jump (twice for double)   ESC : Menu   Q : Quit",
    )?;

    match state.phase {
        Phase::GameOver => draw_banner(out, size, "GAME  OVER", Color::Red, state.score)?,
        Phase::LevelComplete => {
            draw_banner(out, size, "LEVEL COMPLETE", Color::Green, state.score)?
        }
        Phase::ScreenTransition { ticks_left } => {
            draw_fade(out, size, ticks_left, t.transition_ticks)?
        }
        Phase::Playing => {}
    }
    finish(out, size)
}

/// Render the stride rig: a stick body whose legs swing about the hip.
pub fn render_stride<W: Write>(
    out: &mut W,
    size: (u16, u16),
    state: &StrideState,
) -> std::io::Result<()> {
    const LEG_CELLS: f32 = 6.0;
    const ROWS_PER_UNIT: f32 = 8.0;

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (cols, rows) = size;
    draw_hud(out, size, "STRIDE", 0, Some(&format!("swing {:.2}", state.swing)))?;

    let ground_row = rows.saturating_sub(3);
    out.queue(cursor::MoveTo(0, ground_row + 1))?;
    out.queue(style::SetForegroundColor(C_GROUND))?;
    out.queue(Print("─".repeat(usize::from(cols))))?;

    let hip_x = f32::from(cols / 2);
    let hip_y = f32::from(ground_row) - LEG_CELLS - state.height * ROWS_PER_UNIT;
    let (left, right) = stride::leg_angles(state);

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    for (angle, glyph) in [(left, '╱'), (right, '╲')] {
        for step in 1..=LEG_CELLS as u16 {
            let d = f32::from(step);
            // Terminal cells are about twice as tall as wide.
            let x = hip_x + angle.sin() * d * 2.0;
            let y = hip_y + angle.cos() * d;
            if x >= 0.0 && y >= 1.0 && x < f32::from(cols) && y < f32::from(rows) {
                out.queue(cursor::MoveTo(x as u16, y as u16))?;
                out.queue(Print(glyph))?;
            }
        }
    }
    for i in 0..4u16 {
        let y = hip_y - f32::from(i);
        if y >= 1.0 {
            out.queue(cursor::MoveTo(hip_x as u16, y as u16))?;
            out.queue(Print(if i == 3 { '●' } else { '┃' }))?;
        }
    }

    draw_controls_hint(out, size, "SPACE : Hop   ESC : Menu   Q : Quit")?;
    finish(out, size)
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_enemy<W: Write>(
    out: &mut W,
    vp: &Viewport,
    e: &Enemy,
    book: &SpriteBook,
) -> std::io::Result<()> {
    let rect = kinds::enemy_rect(e);
    match e.kind {
        EnemyKind::Goomba => {
            let glyph = if enemy::is_hit(e) { '▂' } else { '▆' };
            fill_rect(out, vp, &rect, glyph, C_GOOMBA)
        }
        EnemyKind::Koopa => {
            let (sheet, frame) = match enemy::hit_frame(e) {
                Some(frame) => (book.get("koopa_hit"), frame as usize),
                None => match e.gait {
                    Gait::Walk => (book.get("koopa_walk"), e.frame),
                    Gait::Run => (book.get("koopa_run"), e.frame),
                },
            };
            draw_sprite(out, vp, &rect, sheet, frame, e.heading, '▚', C_KOOPA)
        }
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    size: (u16, u16),
    title: &str,
    score: u32,
    right: Option<&str>,
) -> std::io::Result<()> {
    let (cols, _) = size;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", score)))?;

    let tx = (cols / 2).saturating_sub(title.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TITLE))?;
    out.queue(Print(title))?;

    if let Some(text) = right {
        let rx = cols.saturating_sub(text.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, size: (u16, u16), hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, size.1.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    size: (u16, u16),
    title: &str,
    color: Color,
    score: u32,
) -> std::io::Result<()> {
    let inner = format!("║  {:^14}  ║", title);
    let bar = "═".repeat(inner.chars().count().saturating_sub(2));
    let top = format!("╔{}╗", bar);
    let bottom = format!("╚{}╝", bar);
    let score_line = format!("Final Score: {}", score);
    let lines: &[(&str, Color)] = &[
        (&top, color),
        (&inner, color),
        (&bottom, color),
        (&score_line, Color::Yellow),
        ("SPACE - Play Again  ESC - Menu", Color::White),
    ];

    let (cols, rows) = size;
    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

/// Darken the field while a screen transition runs; densest at its middle.
fn draw_fade<W: Write>(
    out: &mut W,
    size: (u16, u16),
    ticks_left: u32,
    total: u32,
) -> std::io::Result<()> {
    let progress = 1.0 - ticks_left as f32 / total.max(1) as f32;
    let depth = 1.0 - (progress * 2.0 - 1.0).abs();
    let glyph = if depth > 0.66 {
        '▓'
    } else if depth > 0.33 {
        '▒'
    } else {
        '░'
    };
    let (cols, rows) = size;
    let line: String = std::iter::repeat(glyph).take(usize::from(cols)).collect();
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    for row in 1..rows.saturating_sub(1) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn finish<W: Write>(out: &mut W, size: (u16, u16)) -> std::io::Result<()> {
    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, size.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
