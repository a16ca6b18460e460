//! Scene state machine and cross-fade engine
//!
//! A transition fades the screen to black over [`TRANSITION_DURATION`], switches
//! scenes, then fades back in over the same duration. With `hold_black` the
//! fade-in is skipped and the new scene is responsible for its own black frame.
//! Only one transition is ever in flight; scheduling another replaces it.

use std::collections::HashMap;

use super::{Scene, SceneCommand, SceneContext, SceneId};
use crate::clamp;
use crate::consts::{INTERNAL_HEIGHT, INTERNAL_WIDTH, TRANSITION_DURATION};
use crate::game::Services;
use crate::renderer::{Surface, colors};
use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Fading to black; the active scene is frozen
    Out,
    /// Fading back from black into the new scene
    In,
}

/// An in-flight fade
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: SceneId,
    pub hold_black: bool,
    pub phase: FadePhase,
    /// Seconds into the current phase
    pub elapsed: f32,
    pub duration: f32,
    /// Set once the scene switch has happened
    pub switched: bool,
}

impl Transition {
    pub fn new(next: SceneId, hold_black: bool) -> Self {
        Self {
            next,
            hold_black,
            phase: FadePhase::Out,
            elapsed: 0.0,
            duration: TRANSITION_DURATION,
            switched: false,
        }
    }

    /// Opacity of the black overlay for the current phase
    pub fn overlay_alpha(&self) -> f32 {
        let t = clamp(self.elapsed / self.duration, 0.0, 1.0);
        match self.phase {
            FadePhase::Out => t,
            FadePhase::In => 1.0 - t,
        }
    }
}

/// Owns every scene and decides which one runs
#[derive(Default)]
pub struct SceneDirector {
    scenes: HashMap<SceneId, Box<dyn Scene>>,
    active: Option<SceneId>,
    transition: Option<Transition>,
    time: f64,
}

impl SceneDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scene, replacing any scene registered under the same id
    pub fn register(&mut self, scene: Box<dyn Scene>) {
        self.scenes.insert(scene.id(), scene);
    }

    pub fn active(&self) -> Option<SceneId> {
        self.active
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Seconds of director time elapsed
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Switch scenes immediately. Unregistered ids are ignored.
    pub fn change_scene(&mut self, next: SceneId, services: &mut Services) {
        if !self.scenes.contains_key(&next) {
            log::debug!("Ignoring change to unregistered scene '{}'", next);
            return;
        }

        let previous = self.active;
        let mut commands = Vec::new();

        if let Some(scene) = previous.and_then(|id| self.scenes.get_mut(&id)) {
            let mut ctx = SceneContext::new(services, self.time);
            scene.exit(next, &mut ctx);
            commands.extend(ctx.into_commands());
        }

        self.active = Some(next);
        match previous {
            Some(prev) => log::info!("Scene: {} -> {}", prev, next),
            None => log::info!("Scene: {}", next),
        }

        if let Some(scene) = self.scenes.get_mut(&next) {
            let mut ctx = SceneContext::new(services, self.time);
            scene.enter(previous, &mut ctx);
            commands.extend(ctx.into_commands());
        }

        self.apply(commands, services);
    }

    /// [`change_scene`](Self::change_scene) by name; unknown names are ignored
    pub fn change_scene_named(&mut self, name: &str, services: &mut Services) {
        match name.parse::<SceneId>() {
            Ok(id) => self.change_scene(id, services),
            Err(e) => log::debug!("Ignoring scene change: {}", e),
        }
    }

    /// Schedule a fade to `next`. Any fade already in flight is discarded.
    pub fn transition_to(&mut self, next: SceneId, hold_black: bool) {
        if let Some(old) = &self.transition {
            log::debug!("Replacing transition to '{}'", old.next);
        }
        log::debug!("Transition to '{}' (hold_black: {})", next, hold_black);
        self.transition = Some(Transition::new(next, hold_black));
    }

    /// Advance the fade, then run the active scene unless the screen is fading out
    pub fn update(&mut self, dt: f32, services: &mut Services) {
        self.time += dt as f64;

        let mut switch_to = None;
        if let Some(t) = self.transition.as_mut() {
            t.elapsed += dt;
            if t.phase == FadePhase::Out && t.elapsed >= t.duration && !t.switched {
                t.switched = true;
                switch_to = Some(t.next);
                if t.hold_black {
                    self.transition = None;
                } else {
                    t.phase = FadePhase::In;
                    t.elapsed = 0.0;
                }
            } else if t.phase == FadePhase::In && t.elapsed >= t.duration {
                self.transition = None;
            }
        }
        if let Some(next) = switch_to {
            self.change_scene(next, services);
        }

        let fading_out = matches!(
            self.transition,
            Some(Transition {
                phase: FadePhase::Out,
                ..
            })
        );
        if fading_out {
            return;
        }

        let Some(scene) = self.active.and_then(|id| self.scenes.get_mut(&id)) else {
            return;
        };
        let mut ctx = SceneContext::new(services, self.time);
        scene.update(dt, &mut ctx);
        let commands = ctx.into_commands();
        self.apply(commands, services);
    }

    /// Draw the active scene, then the fade overlay on top
    pub fn render(&self, surface: &mut dyn Surface) {
        if let Some(scene) = self.active.and_then(|id| self.scenes.get(&id)) {
            scene.render(surface, self.time);
        }

        if let Some(t) = &self.transition {
            let alpha = t.overlay_alpha();
            if alpha > 0.0 {
                surface.fill_rect(
                    Rect::new(0.0, 0.0, INTERNAL_WIDTH, INTERNAL_HEIGHT),
                    colors::with_alpha(colors::BLACK, alpha),
                );
            }
        }
    }

    fn apply(&mut self, commands: Vec<SceneCommand>, services: &mut Services) {
        for command in commands {
            match command {
                SceneCommand::Change(next) => self.change_scene(next, services),
                SceneCommand::Transition { next, hold_black } => {
                    self.transition_to(next, hold_black)
                }
            }
        }
    }
}
