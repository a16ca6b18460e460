//! Scenes and the director that switches between them
//!
//! Each scene is a self-contained state machine with an `enter`/`exit`
//! lifecycle. Scenes never reach the director directly; they queue
//! [`SceneCommand`]s on their [`SceneContext`] and the director applies them
//! once the scene call returns.

pub mod battle;
pub mod death;
pub mod director;
pub mod options;
pub mod title;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::audio::AudioSink;
use crate::game::Services;
use crate::platform::{InputState, UiHost};
use crate::renderer::Surface;

pub use battle::BattleScene;
pub use death::DeathScene;
pub use director::{FadePhase, SceneDirector, Transition};
pub use options::OptionsScene;
pub use title::TitleScene;

/// Name of a registered scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Title,
    Settings,
    Battle,
    Death,
}

impl SceneId {
    pub const ALL: [SceneId; 4] = [
        SceneId::Title,
        SceneId::Settings,
        SceneId::Battle,
        SceneId::Death,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneId::Title => "title",
            SceneId::Settings => "settings",
            SceneId::Battle => "battle",
            SceneId::Death => "death",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scene: {0:?}")]
pub struct UnknownScene(pub String);

impl FromStr for SceneId {
    type Err = UnknownScene;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SceneId::ALL
            .into_iter()
            .find(|id| id.as_str() == name)
            .ok_or_else(|| UnknownScene(name.to_string()))
    }
}

/// A scene-change request queued by a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// Switch immediately
    Change(SceneId),
    /// Fade to black, then switch
    Transition { next: SceneId, hold_black: bool },
}

/// What a scene call gets to touch: the shared services and the scene clock
pub struct SceneContext<'a> {
    pub services: &'a mut Services,
    /// Seconds since the director started
    pub time: f64,
    commands: Vec<SceneCommand>,
}

impl<'a> SceneContext<'a> {
    pub fn new(services: &'a mut Services, time: f64) -> Self {
        Self {
            services,
            time,
            commands: Vec::new(),
        }
    }

    pub fn input(&self) -> &InputState {
        &self.services.input
    }

    pub fn audio(&mut self) -> &mut dyn AudioSink {
        &mut *self.services.audio
    }

    pub fn ui(&mut self) -> &mut dyn UiHost {
        &mut *self.services.ui
    }

    /// Switch to `next` as soon as the current scene call returns
    pub fn change_scene(&mut self, next: SceneId) {
        self.commands.push(SceneCommand::Change(next));
    }

    /// Fade out, switch to `next`, and fade back in unless `hold_black`
    pub fn transition_to(&mut self, next: SceneId, hold_black: bool) {
        self.commands.push(SceneCommand::Transition { next, hold_black });
    }

    pub fn into_commands(self) -> Vec<SceneCommand> {
        self.commands
    }
}

/// Lifecycle shared by every scene
pub trait Scene {
    fn id(&self) -> SceneId;

    /// Called when the scene becomes active. `from` is the scene that was
    /// active before, if any.
    fn enter(&mut self, from: Option<SceneId>, ctx: &mut SceneContext);

    /// Called before the director switches to `to`
    fn exit(&mut self, _to: SceneId, _ctx: &mut SceneContext) {}

    fn update(&mut self, dt: f32, ctx: &mut SceneContext);

    fn render(&self, surface: &mut dyn Surface, time: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_names_round_trip() {
        for id in SceneId::ALL {
            assert_eq!(id.as_str().parse::<SceneId>(), Ok(id));
        }
        assert_eq!(
            "credits".parse::<SceneId>(),
            Err(UnknownScene("credits".to_string()))
        );
    }
}
