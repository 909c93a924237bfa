//! Canvas 2D presentation adapter
//!
//! Consumes a session snapshot and issues draw calls; it never mutates game
//! state. Entity positions are anchors and sprites are drawn offset by half
//! their extent. A missing canvas, context, or image degrades to a no-op.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use crate::consts::*;
use crate::sim::{GamePhase, GameState};

const HUD_FONT: &str = "24px Arial";
const TITLE_FONT: &str = "32px Arial";
const TEXT_COLOR: &str = "#ffffff";

/// Draws the game onto the page's `#canvas` element
pub struct CanvasPresenter {
    ctx: CanvasRenderingContext2d,
    player_image: Option<HtmlImageElement>,
    obstacle_image: Option<HtmlImageElement>,
    coin_image: Option<HtmlImageElement>,
}

impl CanvasPresenter {
    /// Attach to `#canvas` and start loading sprite images.
    ///
    /// Returns `None` if the canvas or its 2D context is unavailable; the
    /// game then runs headless.
    pub fn new(document: &Document) -> Option<Self> {
        let canvas: HtmlCanvasElement = document.get_element_by_id("canvas")?.dyn_into().ok()?;
        canvas.set_width(SURFACE_WIDTH as u32);
        canvas.set_height(SURFACE_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d =
            canvas.get_context("2d").ok().flatten()?.dyn_into().ok()?;

        Some(Self {
            ctx,
            player_image: load_image("assets/player.png"),
            obstacle_image: load_image("assets/obstacle.png"),
            coin_image: load_image("assets/coin.png"),
        })
    }

    /// Draw one frame
    pub fn draw(&self, state: &GameState) {
        self.ctx
            .clear_rect(0.0, 0.0, SURFACE_WIDTH as f64, SURFACE_HEIGHT as f64);

        if state.phase == GamePhase::GameOver {
            self.draw_end_screen(state.score);
            return;
        }

        let p = &state.player;
        self.draw_sprite(
            &self.player_image,
            p.pos.x - PLAYER_SIZE / 2.0,
            p.pos.y - PLAYER_SIZE / 2.0,
            PLAYER_SIZE,
            PLAYER_SIZE,
        );

        for obstacle in &state.obstacles {
            self.draw_sprite(
                &self.obstacle_image,
                obstacle.pos.x - OBSTACLE_WIDTH / 2.0,
                obstacle.pos.y - OBSTACLE_HEIGHT / 2.0,
                OBSTACLE_WIDTH,
                OBSTACLE_HEIGHT,
            );
        }

        for coin in &state.coins {
            self.draw_sprite(
                &self.coin_image,
                coin.pos.x - COIN_RADIUS,
                coin.pos.y - COIN_RADIUS,
                COIN_RADIUS * 2.0,
                COIN_RADIUS * 2.0,
            );
        }

        self.ctx.set_font(HUD_FONT);
        self.ctx.set_fill_style_str(TEXT_COLOR);
        let _ = self
            .ctx
            .fill_text(&format!("Pontos: {}", state.score), 10.0, 30.0);
    }

    fn draw_sprite(&self, image: &Option<HtmlImageElement>, x: f32, y: f32, w: f32, h: f32) {
        // Draw calls on a still-loading image are harmless no-ops
        if let Some(image) = image {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image, x as f64, y as f64, w as f64, h as f64,
            );
        }
    }

    fn draw_end_screen(&self, score: u32) {
        let x = (SURFACE_WIDTH / 2.0 - 80.0) as f64;
        self.ctx.set_font(TITLE_FONT);
        self.ctx.set_fill_style_str(TEXT_COLOR);
        let _ = self
            .ctx
            .fill_text("Game Over!", x, (SURFACE_HEIGHT / 2.0 - 10.0) as f64);
        self.ctx.set_font(HUD_FONT);
        let _ = self.ctx.fill_text(
            &format!("Pontos: {score}"),
            x,
            (SURFACE_HEIGHT / 2.0 + 30.0) as f64,
        );
    }
}

fn load_image(src: &str) -> Option<HtmlImageElement> {
    let image = match HtmlImageElement::new() {
        Ok(image) => image,
        Err(_) => {
            log::warn!("could not create image element for {src}");
            return None;
        }
    };
    image.set_src(src);
    Some(image)
}
