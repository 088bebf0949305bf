//! Shared collision helpers: hitboxes, surface landing, finiteness checks.

use crate::entities::{Player, Rect};

/// Fraction trimmed from each side of the player before hit tests.
pub const PLAYER_INSET: f32 = 0.1;
pub const OBSTACLE_INSET: f32 = 0.05;
pub const ENEMY_INSET: f32 = 0.1;

/// How far below a surface's bottom edge a falling body may be and still
/// be snapped onto it.
pub const SURFACE_BAND: f32 = 5.0;

/// True when `body` crossed `surface`'s top edge this tick.
///
/// `prev_bottom` is the body's bottom edge before integration; a body that
/// was already below the top (embedded) never snaps.
pub fn falls_onto(body: &Rect, prev_bottom: f32, vy: f32, surface: &Rect) -> bool {
    vy > 0.0
        && body.bottom() > surface.y
        && body.bottom() < surface.bottom() + SURFACE_BAND
        && body.overlaps_x(surface)
        && prev_bottom <= surface.y
}

/// Top edge of the first surface in `surfaces` that `body` lands on.
pub fn first_landing<'a, I>(body: &Rect, prev_bottom: f32, vy: f32, surfaces: I) -> Option<f32>
where
    I: IntoIterator<Item = &'a Rect>,
{
    surfaces
        .into_iter()
        .find(|s| falls_onto(body, prev_bottom, vy, s))
        .map(|s| s.y)
}

/// Put the player's feet on `top` and end any jump.
pub fn land(player: &mut Player, top: f32) {
    player.y = top - player.h;
    player.vy = 0.0;
    player.is_jumping = false;
    player.can_double_jump = false;
}

pub fn player_hitbox(player: &Player) -> Rect {
    player.bounds().inset(PLAYER_INSET)
}

pub fn player_is_finite(player: &Player) -> bool {
    [player.x, player.y, player.vx, player.vy]
        .iter()
        .all(|v| v.is_finite())
}
