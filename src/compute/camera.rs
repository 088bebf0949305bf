//! Deadzone-following camera for the scrolling platformer.

use crate::config::PlatformerTuning;
use crate::entities::{Camera, Rect};

/// Camera parameters in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub view_width: f32,
    /// Screen-space deadzone edges.
    pub deadzone_left: f32,
    pub deadzone_right: f32,
    /// Fraction of the remaining gap closed per tick.
    pub speed: f32,
    pub min_x: f32,
    pub max_x: f32,
}

pub fn rig(tuning: &PlatformerTuning) -> CameraRig {
    let world_width = tuning.tile_size * tuning.world_tiles as f32;
    CameraRig {
        view_width: tuning.view_width,
        deadzone_left: tuning.view_width * tuning.deadzone_left,
        deadzone_right: tuning.view_width * tuning.deadzone_right,
        speed: tuning.camera_speed,
        min_x: 0.0,
        max_x: (world_width - tuning.view_width).max(0.0),
    }
}

/// Move the camera toward the player.
///
/// The target only moves when the player leaves the deadzone.  While the
/// player touches a deadzone edge the camera jumps straight to the target,
/// otherwise it eases toward it.
pub fn follow(camera: &Camera, player: &Rect, rig: &CameraRig) -> Camera {
    let screen_x = player.x - camera.x;
    let target_x = if screen_x < rig.deadzone_left {
        player.x - rig.deadzone_left
    } else if screen_x > rig.deadzone_right {
        player.x - rig.deadzone_right
    } else {
        camera.target_x
    };

    let at_edge = player.x <= camera.x + rig.deadzone_left
        || player.right() >= camera.x + rig.deadzone_right;
    let x = if at_edge {
        target_x
    } else {
        camera.x + (target_x - camera.x) * rig.speed
    };

    Camera {
        x: x.min(rig.max_x).max(rig.min_x),
        target_x,
    }
}

/// True when any part of `rect` is inside the view.
pub fn in_view(camera: &Camera, rect: &Rect, view_width: f32) -> bool {
    rect.right() > camera.x && rect.x < camera.x + view_width
}
