//! Top-level game object
//!
//! `Game` owns the services every scene shares (input, audio, UI) and the
//! scene director. The host drives it with one [`Game::frame`] call per
//! display refresh and forwards raw input events to it.

use crate::audio::{AudioSink, HeadlessAudio};
use crate::clamp;
use crate::config::GameConfig;
use crate::consts::MAX_FRAME_DT;
use crate::platform::{HeadlessUi, InputState, UiHost};
use crate::renderer::Surface;
use crate::scene::{BattleScene, DeathScene, OptionsScene, SceneDirector, SceneId, TitleScene};

/// Shared collaborators handed to every scene call
pub struct Services {
    pub input: InputState,
    pub audio: Box<dyn AudioSink>,
    pub ui: Box<dyn UiHost>,
}

impl Services {
    pub fn new(audio: Box<dyn AudioSink>, ui: Box<dyn UiHost>) -> Self {
        Self {
            input: InputState::new(),
            audio,
            ui,
        }
    }

    /// Services that draw and play nothing
    pub fn headless() -> Self {
        Self::new(Box::new(HeadlessAudio::new()), Box::new(HeadlessUi::new()))
    }
}

pub struct Game {
    services: Services,
    director: SceneDirector,
    /// Set after the first user gesture has unlocked audio
    unlocked: bool,
}

impl Game {
    /// Register every scene and open the title screen
    pub fn new(config: GameConfig, mut services: Services, seed: u64) -> Self {
        let GameConfig { settings, tuning } = config;

        let mut director = SceneDirector::new();
        director.register(Box::new(TitleScene::new()));
        director.register(Box::new(OptionsScene::new()));
        director.register(Box::new(BattleScene::new(tuning, settings, seed)));
        director.register(Box::new(DeathScene::new()));
        director.change_scene(SceneId::Title, &mut services);

        log::info!("Game initialized with seed: {}", seed);
        Self {
            services,
            director,
            unlocked: false,
        }
    }

    pub fn headless(config: GameConfig, seed: u64) -> Self {
        Self::new(config, Services::headless(), seed)
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    pub fn director(&self) -> &SceneDirector {
        &self.director
    }

    pub fn active_scene(&self) -> Option<SceneId> {
        self.director.active()
    }

    /// First user gesture: browsers only allow audio after one
    pub fn gesture(&mut self) {
        if !self.unlocked {
            self.unlocked = true;
            self.services.audio.unlock();
        }
    }

    /// Forward a key press. Returns true if the key is bound to an action.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.gesture();
        self.services.input.key_down(key).is_some()
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.services.input.key_up(key).is_some()
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.services.input.clear();
    }

    /// Advance one frame. Press edges are consumed afterwards.
    pub fn update(&mut self, dt: f32) {
        self.services.audio.update(dt);
        self.director.update(dt, &mut self.services);
        self.services.input.next_frame();
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.director.render(surface);
    }

    /// Clamp the raw frame delta, then update and render
    pub fn frame(&mut self, raw_dt: f32, surface: &mut dyn Surface) {
        let dt = clamp(raw_dt, 0.0, MAX_FRAME_DT);
        self.update(dt);
        self.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioCue;
    use crate::platform::Panel;
    use crate::renderer::RecordingSurface;

    #[test]
    fn test_starts_on_title() {
        let ui = HeadlessUi::new();
        let game = Game::new(
            GameConfig::default(),
            Services::new(Box::new(HeadlessAudio::new()), Box::new(ui.clone())),
            1,
        );
        assert_eq!(game.active_scene(), Some(SceneId::Title));
        assert!(ui.is_visible(Panel::TitleMenu));
    }

    #[test]
    fn test_first_key_unlocks_once() {
        let (audio, log) = HeadlessAudio::with_log();
        let mut game = Game::new(
            GameConfig::default(),
            Services::new(Box::new(audio), Box::new(HeadlessUi::new())),
            1,
        );
        assert!(game.key_down("w"));
        assert!(!game.key_down("q"));
        game.key_up("w");
        game.key_down("w");
        assert_eq!(*log.borrow(), vec![AudioCue::Unlock]);
    }

    #[test]
    fn test_frame_clamps_long_stalls() {
        let mut game = Game::headless(GameConfig::default(), 1);
        let mut surface = RecordingSurface::new();
        game.frame(5.0, &mut surface);
        game.frame(-1.0, &mut surface);
        assert!((game.director().time() - MAX_FRAME_DT as f64).abs() < 1e-6);
    }

    #[test]
    fn test_press_edge_consumed_by_frame() {
        let mut game = Game::headless(GameConfig::default(), 1);
        game.key_down("Enter");
        game.update(0.01);
        // Title saw the press and scheduled the fade
        assert!(game.director().transition().is_some());

        // Holding Enter does not press again
        game.update(0.3);
        game.update(0.01);
        assert_eq!(game.active_scene(), Some(SceneId::Battle));
        assert!(game.director().transition().is_some());
    }
}
