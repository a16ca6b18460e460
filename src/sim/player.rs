//! Player soul and enemy display entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Rect;
use crate::clamp;
use crate::platform::{Action, Input};
use crate::renderer::{Align, Baseline, ImageKey, Surface, TextStyle, colors};

/// 8x8 heart drawn when the soul sprite is not available
const HEART_PIXELS: [&str; 8] = [
    "01100110", "11111111", "11111111", "11111111", "01111110", "00111100", "00011000",
    "00000000",
];

/// The player's soul: a small square that dodges projectiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Top-left corner of the hitbox
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
}

impl Player {
    pub fn new(name: impl Into<String>, pos: Vec2, size: f32, speed: f32, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            pos,
            size,
            speed,
            hp: max_hp,
            max_hp,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Apply damage, never dropping below zero
    pub fn hurt(&mut self, amount: i32) {
        self.hp = (self.hp - amount).clamp(0, self.max_hp);
    }

    /// HP as a fraction of max, for the HUD bar
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).max(0.0)
    }

    /// Move from held directions, normalizing diagonals, then keep the hitbox inside `arena`.
    pub fn update(&mut self, dt: f32, input: &dyn Input, arena: &Rect) {
        let mut dir = Vec2::ZERO;
        if input.is_held(Action::Left) {
            dir.x -= 1.0;
        }
        if input.is_held(Action::Right) {
            dir.x += 1.0;
        }
        if input.is_held(Action::Up) {
            dir.y -= 1.0;
        }
        if input.is_held(Action::Down) {
            dir.y += 1.0;
        }

        self.pos += dir.normalize_or_zero() * self.speed * dt;
        self.pos.x = clamp(self.pos.x, arena.x, arena.right() - self.size);
        self.pos.y = clamp(self.pos.y, arena.y, arena.bottom() - self.size);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let rect = Rect::square(self.pos.round(), self.size);
        if surface.image_ready(ImageKey::Soul) {
            surface.draw_image(ImageKey::Soul, rect);
            return;
        }

        let scale = (self.size / 8.0).floor().max(1.0);
        for (py, row) in HEART_PIXELS.iter().enumerate() {
            for (px, bit) in row.bytes().enumerate() {
                if bit == b'1' {
                    surface.fill_rect(
                        Rect::new(
                            rect.x + px as f32 * scale,
                            rect.y + py as f32 * scale,
                            scale,
                            scale,
                        ),
                        colors::SOUL,
                    );
                }
            }
        }
    }
}

/// The opponent. Purely decorative: a labelled box at a fixed spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    /// Center of the box
    pub pos: Vec2,
}

impl Enemy {
    pub fn new(name: impl Into<String>, pos: Vec2) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let c = self.pos.round();
        let body = Rect::new(c.x - 12.0, c.y - 10.0, 24.0, 20.0);
        surface.fill_rect(body, colors::ENEMY_BODY);
        surface.stroke_rect(body.inset(0.5), colors::ENEMY_BORDER);

        let style = TextStyle::new(10.0)
            .align(Align::Center)
            .baseline(Baseline::Middle);
        surface.fill_text(&self.name, c.x, c.y, &style, colors::TEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::InputState;
    use crate::renderer::RecordingSurface;

    fn arena() -> Rect {
        Rect::new(60.0, 32.0, 200.0, 140.0)
    }

    #[test]
    fn test_hurt_clamps_to_zero() {
        let mut player = Player::new("Drew", Vec2::ZERO, 8.0, 92.0, 100);
        player.hurt(30);
        assert_eq!(player.hp, 70);
        player.hurt(500);
        assert_eq!(player.hp, 0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut input = InputState::new();
        input.press(Action::Right);
        input.press(Action::Down);

        let mut player = Player::new("Drew", Vec2::new(100.0, 100.0), 8.0, 100.0, 100);
        player.update(0.1, &input, &arena());
        let moved = player.pos - Vec2::new(100.0, 100.0);
        assert!((moved.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_stays_inside_arena() {
        let mut input = InputState::new();
        input.press(Action::Left);
        input.press(Action::Up);

        let mut player = Player::new("Drew", Vec2::new(62.0, 34.0), 8.0, 92.0, 100);
        player.update(1.0, &input, &arena());
        assert_eq!(player.pos, Vec2::new(60.0, 32.0));

        let mut input = InputState::new();
        input.press(Action::Right);
        input.press(Action::Down);
        player.update(10.0, &input, &arena());
        assert_eq!(player.pos, Vec2::new(252.0, 164.0));
    }

    #[test]
    fn test_heart_fallback_when_sprite_missing() {
        let player = Player::new("Drew", Vec2::new(100.0, 100.0), 8.0, 92.0, 100);

        let mut surface = RecordingSurface::new();
        player.render(&mut surface);
        assert!(surface.images().is_empty());
        // 40 lit pixels in the heart bitmap
        assert_eq!(surface.commands.len(), 40);

        let mut surface = RecordingSurface::with_all_images();
        player.render(&mut surface);
        assert_eq!(surface.images(), vec![ImageKey::Soul]);
    }
}
