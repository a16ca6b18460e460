//! End-to-end runs of the whole game through its public entry points

use soul_dodge::audio::{AudioCue, AudioLog, HeadlessAudio};
use soul_dodge::platform::{HeadlessUi, Panel, UiButton};
use soul_dodge::renderer::RecordingSurface;
use soul_dodge::scene::SceneId;
use soul_dodge::{ConfigError, Game, GameConfig, Services, Tuning};

const DT: f32 = 1.0 / 60.0;

struct Harness {
    game: Game,
    audio: AudioLog,
    ui: HeadlessUi,
    surface: RecordingSurface,
}

impl Harness {
    fn new(config: GameConfig) -> Self {
        let (audio, log) = HeadlessAudio::with_log();
        let ui = HeadlessUi::new();
        let services = Services::new(Box::new(audio), Box::new(ui.clone()));
        Self {
            game: Game::new(config, services, 3),
            audio: log,
            ui,
            surface: RecordingSurface::new(),
        }
    }

    fn frame(&mut self) {
        self.surface.clear();
        self.game.frame(DT, &mut self.surface);
    }

    fn run(&mut self, seconds: f32) {
        for _ in 0..(seconds / DT).ceil() as usize {
            self.frame();
        }
    }

    /// Press and release a key across one frame
    fn tap(&mut self, key: &str) {
        self.game.key_down(key);
        self.frame();
        self.game.key_up(key);
    }

    fn heard(&self, cue: AudioCue) -> bool {
        self.audio.borrow().contains(&cue)
    }

    /// From the title screen into combat
    fn start_combat(&mut self) {
        self.tap("Enter");
        self.run(0.3);
        assert_eq!(self.game.active_scene(), Some(SceneId::Battle));

        let mut taps = 0;
        while !self.heard(AudioCue::BattleMusic) {
            self.tap("Enter");
            self.frame();
            taps += 1;
            assert!(taps < 50, "dialogue never finished");
        }
    }
}

#[test]
fn title_fades_into_battle() {
    let mut h = Harness::new(GameConfig::default());
    h.frame();
    assert!(h.ui.is_visible(Panel::TitleMenu));

    h.tap("Enter");
    h.run(0.1);
    // Mid fade-out: still on the title, partly dark
    assert_eq!(h.game.active_scene(), Some(SceneId::Title));
    let (_, overlay) = h.surface.last_fill().unwrap();
    assert!(overlay[3] > 0.0 && overlay[3] < 1.0);

    h.run(0.2);
    assert_eq!(h.game.active_scene(), Some(SceneId::Battle));
    assert!(Panel::ALL.iter().all(|p| !h.ui.is_visible(*p)));
    assert!(h.surface.contains_text("HP 100"));

    h.run(0.3);
    assert!(h.game.director().transition().is_none());
}

#[test]
fn dialogue_gates_combat() {
    let mut h = Harness::new(GameConfig::default());
    h.tap("Enter");
    h.run(5.0);

    assert_eq!(h.game.active_scene(), Some(SceneId::Battle));
    assert!(!h.heard(AudioCue::BattleMusic));
    assert!(h.surface.contains_text("67: Oh well well well."));
    assert!(h.surface.contains_text("Enter"));

    h.start_combat();
    h.run(0.1);
    assert!(!h.surface.contains_text("Enter"));
}

#[test]
fn losing_all_hp_ends_on_the_death_screen() {
    let config = GameConfig {
        tuning: Tuning {
            projectile_damage: 100,
            ..Tuning::default()
        },
        ..GameConfig::default()
    };
    let mut h = Harness::new(config);
    h.start_combat();

    // Walk to the middle of the arena, where every projectile is aimed
    h.game.key_down("d");
    h.run(0.7);
    h.game.key_up("d");

    let mut waited = 0.0;
    while h.game.active_scene() != Some(SceneId::Death) {
        h.frame();
        waited += DT;
        assert!(waited < 60.0, "player never died");
    }

    assert!(h.game.director().transition().is_none());
    assert!(h.heard(AudioCue::Hit));
    assert_eq!(h.audio.borrow().last(), Some(&AudioCue::StopMusic));

    h.frame();
    assert!(h.surface.contains_text("You died."));
    assert!(!h.surface.contains_text("HP"));

    // Nothing leads out of the death screen
    h.tap("Enter");
    h.run(1.0);
    assert_eq!(h.game.active_scene(), Some(SceneId::Death));
}

#[test]
fn settings_menu_round_trip() {
    let mut h = Harness::new(GameConfig::default());
    h.ui.click(UiButton::Settings);
    h.frame();

    // Immediate switch, no fade
    assert_eq!(h.game.active_scene(), Some(SceneId::Settings));
    assert!(h.game.director().transition().is_none());
    assert!(h.ui.is_visible(Panel::SettingsMenu));
    assert!(!h.ui.is_visible(Panel::TitleMenu));
    assert!(h.heard(AudioCue::Unlock));

    h.tap("Enter");
    assert_eq!(h.game.active_scene(), Some(SceneId::Title));
    assert!(h.ui.is_visible(Panel::TitleMenu));
}

#[test]
fn play_button_starts_battle() {
    let mut h = Harness::new(GameConfig::default());
    h.ui.click(UiButton::Play);
    h.run(0.3);
    assert_eq!(h.game.active_scene(), Some(SceneId::Battle));
    assert!(h.heard(AudioCue::Unlock));
}

#[test]
fn config_overrides_and_validation() {
    let config = GameConfig::from_json(r#"{ "tuning": { "base_rate": 8.0 } }"#).unwrap();
    assert_eq!(config.tuning.base_rate, 8.0);
    assert_eq!(config.tuning.ramp_rate, Tuning::default().ramp_rate);

    let err = GameConfig::from_json(r#"{ "tuning": { "projectile_size": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = GameConfig::from_json("{ nope").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
