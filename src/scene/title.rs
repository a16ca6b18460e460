//! Title screen: a dim starfield under the DOM menu

use super::{Scene, SceneContext, SceneId};
use crate::consts::{INTERNAL_HEIGHT, INTERNAL_WIDTH};
use crate::platform::{Action, Input, Panel, UiButton};
use crate::renderer::{Surface, colors};
use crate::sim::Rect;

const STAR_COUNT: u32 = 48;

#[derive(Debug, Default)]
pub struct TitleScene;

impl TitleScene {
    pub fn new() -> Self {
        Self
    }
}

impl Scene for TitleScene {
    fn id(&self) -> SceneId {
        SceneId::Title
    }

    fn enter(&mut self, _from: Option<SceneId>, ctx: &mut SceneContext) {
        let ui = ctx.ui();
        ui.set_panel_visible(Panel::Root, true);
        ui.set_panel_visible(Panel::TitleMenu, true);
        ui.set_panel_visible(Panel::SettingsMenu, false);
    }

    fn update(&mut self, _dt: f32, ctx: &mut SceneContext) {
        let mut play = ctx.input().was_pressed(Action::Confirm);

        let clicks = ctx.ui().take_clicks();
        for click in clicks {
            match click {
                UiButton::Play => {
                    ctx.audio().unlock();
                    play = true;
                }
                UiButton::Settings => {
                    ctx.audio().unlock();
                    ctx.change_scene(SceneId::Settings);
                    return;
                }
            }
        }

        if play {
            ctx.transition_to(SceneId::Battle, false);
        }
    }

    fn render(&self, surface: &mut dyn Surface, _time: f64) {
        surface.fill_rect(
            Rect::new(0.0, 0.0, INTERNAL_WIDTH, INTERNAL_HEIGHT),
            colors::BLACK,
        );
        for i in 0..STAR_COUNT {
            let x = ((i * 53) % INTERNAL_WIDTH as u32) as f32;
            let y = ((i * 31) % INTERNAL_HEIGHT as u32) as f32;
            surface.fill_rect(Rect::new(x, y, 2.0, 2.0), colors::STAR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCue, HeadlessAudio};
    use crate::game::Services;
    use crate::platform::HeadlessUi;
    use crate::renderer::RecordingSurface;
    use crate::scene::SceneCommand;

    #[test]
    fn test_enter_shows_title_menu() {
        let ui = HeadlessUi::new();
        let mut services = Services::new(Box::new(HeadlessAudio::new()), Box::new(ui.clone()));
        let mut ctx = SceneContext::new(&mut services, 0.0);
        TitleScene::new().enter(None, &mut ctx);

        assert!(ui.is_visible(Panel::Root));
        assert!(ui.is_visible(Panel::TitleMenu));
        assert!(!ui.is_visible(Panel::SettingsMenu));
    }

    #[test]
    fn test_confirm_fades_to_battle() {
        let mut services = Services::headless();
        services.input.press(Action::Confirm);
        let mut ctx = SceneContext::new(&mut services, 0.0);
        TitleScene::new().update(0.016, &mut ctx);

        assert_eq!(
            ctx.into_commands(),
            vec![SceneCommand::Transition {
                next: SceneId::Battle,
                hold_black: false
            }]
        );
    }

    #[test]
    fn test_buttons_unlock_audio() {
        let (audio, log) = HeadlessAudio::with_log();
        let ui = HeadlessUi::new();
        let mut services = Services::new(Box::new(audio), Box::new(ui.clone()));

        ui.click(UiButton::Settings);
        let mut ctx = SceneContext::new(&mut services, 0.0);
        TitleScene::new().update(0.016, &mut ctx);
        assert_eq!(ctx.into_commands(), vec![SceneCommand::Change(SceneId::Settings)]);

        ui.click(UiButton::Play);
        let mut ctx = SceneContext::new(&mut services, 0.0);
        TitleScene::new().update(0.016, &mut ctx);
        assert_eq!(
            ctx.into_commands(),
            vec![SceneCommand::Transition {
                next: SceneId::Battle,
                hold_black: false
            }]
        );
        assert_eq!(*log.borrow(), vec![AudioCue::Unlock, AudioCue::Unlock]);
    }

    #[test]
    fn test_starfield() {
        let mut surface = RecordingSurface::new();
        TitleScene::new().render(&mut surface, 0.0);
        // Background plus stars
        assert_eq!(surface.commands.len(), 1 + STAR_COUNT as usize);
        assert_eq!(
            surface.last_fill(),
            Some((Rect::new((47 * 53 % 320) as f32, (47 * 31 % 240) as f32, 2.0, 2.0), colors::STAR))
        );
    }
}
