//! Canvas-2D painting (wasm only)
//!
//! A frame is a pure function of run state and theme: background, lane
//! guides, entities, particles, then the player. Draw calls that can fail on
//! the JS side are best-effort; a dropped glyph is not worth aborting a frame.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::layout;
use crate::consts::*;
use crate::sim::RunState;
use crate::theme::{Theme, with_alpha};

/// Paint one frame of the run
pub fn render(ctx: &CanvasRenderingContext2d, state: &RunState, theme: &Theme) {
    let w = GAME_WIDTH as f64;
    let h = GAME_HEIGHT as f64;

    // Sky, then the ground wash over it
    ctx.set_fill_style_str(&theme.colors.background);
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str(&with_alpha(&theme.colors.secondary, 0xcc));
    ctx.fill_rect(0.0, 0.0, w, h);

    // Lane guides
    ctx.set_stroke_style_str(&with_alpha(&theme.colors.accent, 0x22));
    ctx.set_line_width(4.0);
    ctx.begin_path();
    for x in layout::lane_guides() {
        ctx.move_to(x as f64, 0.0);
        ctx.line_to(x as f64, h);
    }
    ctx.stroke();

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ctx.set_fill_style_str(&theme.colors.primary);
    for c in &state.collectibles {
        if c.collected {
            continue;
        }
        let (x, y, font_px) = layout::collectible_layout(c.lane, c.y);
        ctx.set_font(&format!("{font_px}px serif"));
        let glyph = &theme.collectibles[c.archetype].glyph;
        let _ = ctx.fill_text(glyph, x as f64, y as f64);
    }

    for o in &state.obstacles {
        let archetype = &theme.obstacles[o.archetype];
        let sprite = layout::obstacle_layout(archetype.kind, o.lane, o.y);
        if let Some(bar) = sprite.bar {
            ctx.set_fill_style_str(&with_alpha(&theme.colors.primary, 0x44));
            ctx.fill_rect(bar.x as f64, bar.y as f64, bar.w as f64, bar.h as f64);
        }
        ctx.set_fill_style_str(&theme.colors.primary);
        ctx.set_font(&format!("{}px serif", sprite.font_px));
        let _ = ctx.fill_text(&archetype.glyph, sprite.glyph_x as f64, sprite.glyph_y as f64);
    }

    // Particles fade with remaining life
    for p in &state.particles {
        ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
        ctx.set_fill_style_str(&p.color);
        match &p.label {
            Some(text) => {
                ctx.set_font("bold 24px sans-serif");
                let _ = ctx.fill_text(text, p.pos.x as f64, p.pos.y as f64);
            }
            None => {
                ctx.begin_path();
                let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, 4.0, 0.0, TAU);
                ctx.fill();
            }
        }
    }
    ctx.set_global_alpha(1.0);

    // Player: shadow first, glyph on top
    let pose = layout::player_pose(&state.player);
    ctx.set_fill_style_str("rgba(0,0,0,0.3)");
    ctx.begin_path();
    let _ = ctx.ellipse(
        pose.shadow.x as f64,
        pose.shadow.y as f64,
        pose.shadow.rx as f64,
        pose.shadow.ry as f64,
        0.0,
        0.0,
        TAU,
    );
    ctx.fill();

    ctx.set_fill_style_str(&theme.colors.primary);
    ctx.set_font(&format!("{}px serif", pose.font_px));
    if pose.sliding {
        ctx.save();
        let _ = ctx.translate(pose.x as f64, pose.y as f64);
        let _ = ctx.scale(1.3, 0.6);
        let _ = ctx.fill_text(&theme.character.glyph, 0.0, 0.0);
        ctx.restore();
    } else {
        let _ = ctx.fill_text(&theme.character.glyph, pose.x as f64, pose.y as f64);
    }
}
