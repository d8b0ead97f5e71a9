//! Pure screen geometry for the renderer
//!
//! Everything here is a function of simulation state; the canvas code just
//! paints what these return.

use crate::consts::*;
use crate::lane_center_x;
use crate::sim::Player;
use crate::theme::AvoidKind;

/// Ground-shadow ellipse under the player; flattens as the jump lifts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub x: f32,
    pub y: f32,
    pub rx: f32,
    pub ry: f32,
}

/// Where and how to draw the player glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub x: f32,
    pub y: f32,
    /// Draw compressed (wide and short) while sliding
    pub sliding: bool,
    pub font_px: f32,
    pub shadow: Shadow,
}

pub fn player_pose(player: &Player) -> PlayerPose {
    let x = lane_center_x(player.lane);
    let lift = player.jump_lift();
    let sliding = player.is_sliding();
    PlayerPose {
        x,
        y: PLAYER_Y - lift,
        sliding,
        font_px: if sliding { 32.0 } else { 52.0 },
        shadow: Shadow {
            x,
            y: PLAYER_Y + 10.0,
            rx: (25.0 - lift / 5.0).max(0.0),
            ry: (10.0 - lift / 10.0).max(0.0),
        },
    }
}

/// Translucent overhead bar drawn for `slide` obstacles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Per-kind placement of an obstacle glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleLayout {
    pub glyph_x: f32,
    pub glyph_y: f32,
    pub font_px: f32,
    pub bar: Option<BarRect>,
}

pub fn obstacle_layout(kind: AvoidKind, lane: u8, y: f32) -> ObstacleLayout {
    let x = lane_center_x(lane);
    match kind {
        // Glyph hangs from an overhead bar the player slides beneath
        AvoidKind::Slide => ObstacleLayout {
            glyph_x: x,
            glyph_y: y - 60.0,
            font_px: 40.0,
            bar: Some(BarRect {
                x: lane as f32 * LANE_WIDTH + 10.0,
                y: y - 80.0,
                w: LANE_WIDTH - 20.0,
                h: 40.0,
            }),
        },
        AvoidKind::Jump => ObstacleLayout {
            glyph_x: x,
            glyph_y: y,
            font_px: 40.0,
            bar: None,
        },
        // Walls draw larger and slightly raised to read as impassable
        AvoidKind::Dodge => ObstacleLayout {
            glyph_x: x,
            glyph_y: y - 20.0,
            font_px: 50.0,
            bar: None,
        },
    }
}

/// Collectibles sit at the lane center with a fixed glyph size
pub fn collectible_layout(lane: u8, y: f32) -> (f32, f32, f32) {
    (lane_center_x(lane), y, 36.0)
}

/// Lane divider x positions
pub fn lane_guides() -> [f32; 2] {
    [LANE_WIDTH, LANE_WIDTH * 2.0]
}
