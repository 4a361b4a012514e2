//! Canvas 2D renderer

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::shapes::{self, STRIPE_WIDTH};
use crate::Settings;
use crate::consts::{GROUND_Y, VIEW_HEIGHT, VIEW_WIDTH};
use crate::sim::{Chaser, GamePhase, GameState, Obstacle, ObstacleKind, Player};

const CANVAS_ID: &str = "game";

const BACKGROUND: &str = "#111";
const FINAL_LEVEL_BACKGROUND: &str = "#330000";
const STRIPE_DARK: &str = "#274156";
const STRIPE_LIGHT: &str = "#3b536a";
const PLAYER_COLOR: &str = "#0ef";
const CHASER_COLOR: &str = "purple";
const BIG_CHASER_COLOR: &str = "orange";

const GAME_OVER_TEXT: &str = "\u{1F480} Game Over \u{2014} Press R to Restart";
const WIN_TEXT: &str = "\u{1F3C6} YOU WIN (cheater) \u{2014} Press R to Play Again";

/// Progress bar frame (x offset from the right edge, y, w, h)
const BAR_RIGHT: f64 = 240.0;
const BAR_Y: f64 = 12.0;
const BAR_W: f64 = 220.0;
const BAR_H: f64 = 16.0;
const BAR_INNER_W: f32 = 216.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Attach to `<canvas id="game">`, creating it if the page has none
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = match document.get_element_by_id(CANVAS_ID) {
            Some(el) => el.dyn_into()?,
            None => {
                let c: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
                c.set_id(CANVAS_ID);
                c.set_width(VIEW_WIDTH as u32);
                c.set_height(VIEW_HEIGHT as u32);
                let body = document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no body"))?;
                body.append_child(&c)?;
                c
            }
        };

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        log::info!("Canvas {}x{}", canvas.width(), canvas.height());

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Draw one frame. `now_ms` only drives cosmetic flicker.
    pub fn render(&self, state: &GameState, settings: &Settings, now_ms: f64) {
        if state.phase == GamePhase::Waiting {
            self.draw_start_screen();
            return;
        }

        let bg = if state.final_level {
            FINAL_LEVEL_BACKGROUND
        } else {
            BACKGROUND
        };
        self.ctx.set_fill_style_str(bg);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        let stripe_offset = if settings.reduced_motion {
            0.0
        } else {
            state.stripe_offset
        };
        self.draw_ground(stripe_offset);

        let flicker = if settings.reduced_motion {
            0.0
        } else {
            (now_ms / 100.0).sin() as f32
        };
        for obstacle in &state.obstacles {
            self.draw_obstacle(obstacle, flicker);
        }

        let cinematic = &state.cinematic;
        if cinematic.chaser_visible() {
            self.draw_chaser(&cinematic.chaser, CHASER_COLOR);
        }
        if cinematic.big_chaser_visible() {
            self.draw_chaser(&cinematic.big_chaser, BIG_CHASER_COLOR);
        }

        self.draw_player(&state.player);
        self.draw_hud(state, settings);

        let overlay = match state.phase {
            GamePhase::GameOver => Some(GAME_OVER_TEXT),
            GamePhase::Win => Some(WIN_TEXT),
            _ => None,
        };
        if let Some(text) = overlay {
            self.draw_overlay(text);
        }
    }

    fn draw_start_screen(&self) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        ctx.set_fill_style_str("#fff");
        ctx.set_text_align("center");
        ctx.set_font("28px sans-serif");
        ctx.fill_text(
            "Press SPACE to start running",
            self.width / 2.0,
            self.height / 2.0 - 10.0,
        )
        .ok();
        ctx.set_font("14px monospace");
        ctx.fill_text(
            "Jump: Space/\u{2191}   Duck: \u{2193}   Restart: R   Quit: Q   Mute: M",
            self.width / 2.0,
            self.height / 2.0 + 20.0,
        )
        .ok();
        ctx.set_text_align("left");
    }

    fn draw_ground(&self, offset: f32) {
        let depth = self.height - GROUND_Y as f64;
        for (x, dark) in shapes::stripe_positions(offset, self.width as f32) {
            self.ctx
                .set_fill_style_str(if dark { STRIPE_DARK } else { STRIPE_LIGHT });
            self.ctx
                .fill_rect(x as f64, GROUND_Y as f64, STRIPE_WIDTH as f64, depth);
        }
    }

    fn draw_obstacle(&self, obstacle: &Obstacle, flicker: f32) {
        match obstacle.kind {
            ObstacleKind::Ground => self.draw_rock(obstacle),
            ObstacleKind::Air => self.draw_missile(obstacle, flicker),
        }
    }

    fn draw_rock(&self, obstacle: &Obstacle) {
        let ctx = &self.ctx;
        let outline = shapes::rock_outline(obstacle.pos, obstacle.size);
        self.trace_polygon(&outline);
        ctx.set_fill_style_str(&shapes::css_color(obstacle.color));
        ctx.fill();
        ctx.set_stroke_style_str("rgba(255,255,255,0.2)");
        ctx.set_line_width(1.0);
        ctx.stroke();
    }

    fn draw_missile(&self, obstacle: &Obstacle, flicker: f32) {
        let ctx = &self.ctx;
        let parts = shapes::missile(obstacle.pos, obstacle.size, flicker);

        let (body_pos, body_size) = parts.body;
        ctx.set_fill_style_str("#888");
        ctx.fill_rect(
            body_pos.x as f64,
            body_pos.y as f64,
            body_size.x as f64,
            body_size.y as f64,
        );

        ctx.set_fill_style_str("#555");
        self.trace_polygon(&parts.nose);
        ctx.fill();

        ctx.set_fill_style_str("#666");
        for fin in &parts.fins {
            self.trace_polygon(fin);
            ctx.fill();
        }

        let c = parts.flame_center;
        let r = parts.flame_radii;
        let (cx, cy) = (c.x as f64, c.y as f64);
        let Ok(gradient) = ctx.create_radial_gradient(cx, cy, 2.0, cx, cy, r.x as f64) else {
            return;
        };
        gradient.add_color_stop(0.0, "orange").ok();
        gradient.add_color_stop(0.5, "red").ok();
        gradient.add_color_stop(1.0, "transparent").ok();
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        ctx.ellipse(cx, cy, r.x as f64, r.y as f64, 0.0, 0.0, TAU).ok();
        ctx.fill();
    }

    fn draw_chaser(&self, chaser: &Chaser, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            chaser.pos.x as f64,
            chaser.pos.y as f64,
            chaser.size.x as f64,
            chaser.size.y as f64,
        );
    }

    fn draw_player(&self, player: &Player) {
        let ctx = &self.ctx;
        let figure = shapes::stickman(player.pos, player.size.x, player.size.y, player.ducking);

        ctx.set_stroke_style_str(PLAYER_COLOR);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        for (from, to) in &figure.segments {
            ctx.move_to(from.x as f64, from.y as f64);
            ctx.line_to(to.x as f64, to.y as f64);
        }
        ctx.stroke();

        ctx.begin_path();
        ctx.arc(
            figure.head_center.x as f64,
            figure.head_center.y as f64,
            figure.head_radius as f64,
            0.0,
            TAU,
        )
        .ok();
        ctx.stroke();
    }

    fn draw_hud(&self, state: &GameState, settings: &Settings) {
        let ctx = &self.ctx;
        ctx.set_text_align("left");
        ctx.set_fill_style_str("#fff");
        ctx.set_font("16px monospace");
        ctx.fill_text(&format!("Score: {}", state.points()), 12.0, 22.0)
            .ok();
        ctx.fill_text(&format!("High: {}", state.high_score), 12.0, 42.0)
            .ok();

        if settings.show_progress {
            let left = self.width - BAR_RIGHT;
            ctx.set_stroke_style_str("#666");
            ctx.set_line_width(1.0);
            ctx.stroke_rect(left, BAR_Y, BAR_W, BAR_H);
            ctx.set_fill_style_str("#6f6");
            let fill = shapes::progress_fill(state.fake_progress, BAR_INNER_W);
            ctx.fill_rect(left + 2.0, BAR_Y + 2.0, fill as f64, BAR_H - 4.0);
            ctx.set_fill_style_str("#fff");
            ctx.set_font("12px sans-serif");
            ctx.fill_text("Finish Line \u{2192}", self.width - 120.0, 24.0)
                .ok();
        }

        let message = state.message.as_deref().filter(|_| settings.show_messages);
        if let Some(message) = message {
            ctx.set_fill_style_str("#ddd");
            ctx.set_font("12px sans-serif");
            ctx.fill_text(message, 12.0, self.height - 14.0).ok();
        }
    }

    fn draw_overlay(&self, text: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("rgba(0,0,0,0.5)");
        ctx.fill_rect(0.0, 0.0, self.width, self.height);
        ctx.set_fill_style_str("#fff");
        ctx.set_font("28px sans-serif");
        ctx.set_text_align("center");
        ctx.fill_text(text, self.width / 2.0, self.height / 2.0).ok();
        ctx.set_text_align("left");
    }

    fn trace_polygon(&self, points: &[Vec2]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            ctx.move_to(first.x as f64, first.y as f64);
        }
        for p in iter {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.close_path();
    }
}
