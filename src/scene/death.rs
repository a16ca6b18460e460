//! Game over screen. Reached through a hold-black fade, so it never fades in.

use super::{Scene, SceneContext, SceneId};
use crate::consts::{INTERNAL_HEIGHT, INTERNAL_WIDTH};
use crate::renderer::{Align, Baseline, Surface, TextStyle, colors};
use crate::sim::Rect;

pub const DEATH_MESSAGE: &str = "You died.";

#[derive(Debug, Default)]
pub struct DeathScene;

impl DeathScene {
    pub fn new() -> Self {
        Self
    }
}

impl Scene for DeathScene {
    fn id(&self) -> SceneId {
        SceneId::Death
    }

    fn enter(&mut self, _from: Option<SceneId>, ctx: &mut SceneContext) {
        ctx.ui().hide_all();
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext) {}

    fn render(&self, surface: &mut dyn Surface, _time: f64) {
        surface.fill_rect(
            Rect::new(0.0, 0.0, INTERNAL_WIDTH, INTERNAL_HEIGHT),
            colors::BLACK,
        );
        let style = TextStyle::new(20.0)
            .align(Align::Center)
            .baseline(Baseline::Middle);
        surface.fill_text(
            DEATH_MESSAGE,
            INTERNAL_WIDTH / 2.0,
            INTERNAL_HEIGHT / 2.0,
            &style,
            colors::TEXT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};

    #[test]
    fn test_centered_message() {
        let mut surface = RecordingSurface::new();
        DeathScene::new().render(&mut surface, 0.0);

        match &surface.commands[1] {
            DrawCommand::Text { text, x, y, style, .. } => {
                assert_eq!(text, DEATH_MESSAGE);
                assert_eq!((*x, *y), (160.0, 120.0));
                assert_eq!(style.align, Align::Center);
                assert_eq!(style.size_px, 20.0);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }
}
