//! Settings screen. The menu itself lives in the DOM; the canvas stays black.

use super::{Scene, SceneContext, SceneId};
use crate::consts::{INTERNAL_HEIGHT, INTERNAL_WIDTH};
use crate::platform::{Action, Input, Panel};
use crate::renderer::{Surface, colors};
use crate::sim::Rect;

#[derive(Debug, Default)]
pub struct OptionsScene;

impl OptionsScene {
    pub fn new() -> Self {
        Self
    }
}

impl Scene for OptionsScene {
    fn id(&self) -> SceneId {
        SceneId::Settings
    }

    fn enter(&mut self, _from: Option<SceneId>, ctx: &mut SceneContext) {
        let ui = ctx.ui();
        ui.set_panel_visible(Panel::Root, true);
        ui.set_panel_visible(Panel::TitleMenu, false);
        ui.set_panel_visible(Panel::SettingsMenu, true);
    }

    fn update(&mut self, _dt: f32, ctx: &mut SceneContext) {
        if ctx.input().was_pressed(Action::Confirm) {
            ctx.change_scene(SceneId::Title);
        }
    }

    fn render(&self, surface: &mut dyn Surface, _time: f64) {
        surface.fill_rect(
            Rect::new(0.0, 0.0, INTERNAL_WIDTH, INTERNAL_HEIGHT),
            colors::BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::HeadlessAudio;
    use crate::game::Services;
    use crate::platform::HeadlessUi;
    use crate::scene::SceneCommand;

    #[test]
    fn test_enter_swaps_menus() {
        let ui = HeadlessUi::new();
        let mut services = Services::new(Box::new(HeadlessAudio::new()), Box::new(ui.clone()));
        let mut ctx = SceneContext::new(&mut services, 0.0);
        OptionsScene::new().enter(Some(SceneId::Title), &mut ctx);

        assert!(ui.is_visible(Panel::Root));
        assert!(!ui.is_visible(Panel::TitleMenu));
        assert!(ui.is_visible(Panel::SettingsMenu));
    }

    #[test]
    fn test_confirm_returns_to_title() {
        let mut services = Services::headless();
        let mut ctx = SceneContext::new(&mut services, 0.0);
        OptionsScene::new().update(0.016, &mut ctx);
        assert!(ctx.into_commands().is_empty());

        services.input.press(Action::Confirm);
        let mut ctx = SceneContext::new(&mut services, 0.0);
        OptionsScene::new().update(0.016, &mut ctx);
        assert_eq!(ctx.into_commands(), vec![SceneCommand::Change(SceneId::Title)]);
    }
}
