//! The battle encounter
//!
//! A scripted dialogue plays first while everything else is frozen. Once it
//! finishes, combat starts: projectiles ramp up until the player runs out of
//! HP, which fades to the death scene and stays black.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Scene, SceneContext, SceneId};
use crate::consts::{INTERNAL_HEIGHT, INTERNAL_WIDTH, UI_STRIP_HEIGHT};
use crate::platform::{Action, Input};
use crate::renderer::{Baseline, Surface, TextStyle, colors};
use crate::settings::Settings;
use crate::sim::{CombatResolver, Dialogue, Enemy, Player, ProjectileSpawner, Rect};
use crate::tuning::Tuning;

pub const PLAYER_NAME: &str = "Drew";
pub const ENEMY_NAME: &str = "67";

/// Opening exchange. The trailing empty line leaves a beat before combat.
pub const DIALOGUE_LINES: [&str; 9] = [
    "67: Oh well well well.",
    "If it isn't Kris. Look at wh-",
    "Wait!!",
    "You're not Kris!",
    "It's Drew!",
    "Bro I haven't seen you in so long",
    "Well your time is up",
    "Hope you enjoyed your stay",
    "",
];

/// Arena sits this far below the center of the playable area
const ARENA_OFFSET_Y: f32 = 10.0;
/// Player starts this far in from the arena's left edge
const PLAYER_INSET_X: f32 = 36.0;
/// Enemy center sits this far in from the arena's right edge
const ENEMY_INSET_X: f32 = 24.0;
/// Blink rate while invulnerable (toggles per second)
const FLICKER_HZ: f64 = 40.0;

const DIALOGUE_BOX: Rect = Rect::new(
    10.0,
    INTERNAL_HEIGHT - UI_STRIP_HEIGHT - 52.0,
    300.0,
    52.0,
);

// HUD layout, relative to the top of the strip
const HUD_TEXT_X: f32 = 12.0;
const HP_BAR_X: f32 = 88.0;
const HP_BAR_W: f32 = 220.0;
const HP_BAR_H: f32 = 10.0;

pub struct BattleScene {
    tuning: Tuning,
    settings: Settings,
    /// Seeds a fresh spawner on every entry
    rng: Pcg32,
    script: Vec<String>,
    arena: Rect,
    player: Player,
    enemy: Enemy,
    dialogue: Dialogue,
    spawner: ProjectileSpawner,
    combat: CombatResolver,
    in_combat: bool,
}

impl BattleScene {
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
        let arena = Self::arena_for(&tuning);
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = ProjectileSpawner::new(arena, tuning.clone(), rng.random());

        Self {
            player: Self::spawn_player(&tuning, arena),
            enemy: Self::spawn_enemy(arena),
            dialogue: Dialogue::new(tuning.dialogue_cps),
            combat: CombatResolver::new(tuning.invulnerability),
            script: DIALOGUE_LINES.iter().map(|s| s.to_string()).collect(),
            in_combat: false,
            arena,
            spawner,
            rng,
            tuning,
            settings,
        }
    }

    /// Replace the opening dialogue. An empty script starts combat right away.
    pub fn with_script<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Arena centered in the area above the HUD strip
    fn arena_for(tuning: &Tuning) -> Rect {
        Rect::centered_in(
            INTERNAL_WIDTH,
            INTERNAL_HEIGHT - UI_STRIP_HEIGHT,
            tuning.arena_width,
            tuning.arena_height,
            ARENA_OFFSET_Y,
        )
    }

    fn spawn_player(tuning: &Tuning, arena: Rect) -> Player {
        Player::new(
            PLAYER_NAME,
            Vec2::new(arena.x + PLAYER_INSET_X, arena.y + arena.h / 2.0),
            tuning.player_size,
            tuning.player_speed,
            tuning.player_max_hp,
        )
    }

    fn spawn_enemy(arena: Rect) -> Enemy {
        Enemy::new(
            ENEMY_NAME,
            Vec2::new(
                arena.right() - ENEMY_INSET_X,
                arena.y + (arena.h / 2.0).floor(),
            ),
        )
    }

    pub fn arena(&self) -> Rect {
        self.arena
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }

    pub fn spawner(&self) -> &ProjectileSpawner {
        &self.spawner
    }

    pub fn combat(&self) -> &CombatResolver {
        &self.combat
    }

    pub fn in_combat(&self) -> bool {
        self.in_combat
    }

    fn start_combat(&mut self, ctx: &mut SceneContext) {
        log::info!("Battle started");
        self.in_combat = true;
        self.spawner.reset();
        ctx.audio().play_battle_music();
    }

    fn render_hud(&self, surface: &mut dyn Surface) {
        let y = INTERNAL_HEIGHT - UI_STRIP_HEIGHT;
        surface.fill_rect(
            Rect::new(0.0, y, INTERNAL_WIDTH, UI_STRIP_HEIGHT),
            colors::HUD_STRIP,
        );
        surface.fill_rect(Rect::new(0.0, y, INTERNAL_WIDTH, 1.0), colors::HUD_RULE);

        let style = TextStyle::new(12.0).baseline(Baseline::Top);
        surface.fill_text(&self.player.name, HUD_TEXT_X, y + 10.0, &style, colors::TEXT);
        surface.fill_text(
            &format!("HP {}", self.player.hp),
            HUD_TEXT_X,
            y + 28.0,
            &style,
            colors::TEXT,
        );

        let bar = Rect::new(HP_BAR_X, y + 30.0, HP_BAR_W, HP_BAR_H);
        surface.fill_rect(bar, colors::HP_TRACK);
        let filled = (bar.w * self.player.hp_fraction()).round();
        surface.fill_rect(Rect { w: filled, ..bar }, colors::HP_FILL);
    }
}

impl Scene for BattleScene {
    fn id(&self) -> SceneId {
        SceneId::Battle
    }

    fn enter(&mut self, _from: Option<SceneId>, ctx: &mut SceneContext) {
        ctx.ui().hide_all();

        self.arena = Self::arena_for(&self.tuning);
        self.player = Self::spawn_player(&self.tuning, self.arena);
        self.enemy = Self::spawn_enemy(self.arena);
        self.spawner = ProjectileSpawner::new(self.arena, self.tuning.clone(), self.rng.random());
        self.spawner.reset();
        self.combat = CombatResolver::new(self.tuning.invulnerability);
        self.in_combat = false;

        self.dialogue.start(self.script.iter().cloned());
        ctx.audio().stop_music();
    }

    fn exit(&mut self, _to: SceneId, ctx: &mut SceneContext) {
        ctx.audio().stop_music();
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext) {
        if self.player.is_dead() {
            return;
        }

        if self.dialogue.is_active() {
            self.dialogue.update(dt);
            if ctx.input().was_pressed(Action::Confirm) {
                self.dialogue.advance();
            }
            if !self.dialogue.is_active() && !self.in_combat {
                self.start_combat(ctx);
            }
            return;
        }

        if !self.in_combat {
            self.start_combat(ctx);
        }

        self.combat.tick(dt);
        self.player.update(dt, ctx.input(), &self.arena);
        self.spawner.update(dt);

        if let Some(hit) = self.combat.resolve(&mut self.player, &mut self.spawner) {
            log::debug!("Hit for {} (hp {})", hit.damage, hit.hp_after);
            ctx.audio().play_hit();
        }

        if self.player.is_dead() {
            log::info!(
                "{} fell after {:.1}s of combat",
                self.player.name,
                self.spawner.elapsed()
            );
            ctx.audio().stop_music();
            ctx.transition_to(SceneId::Death, true);
        }
    }

    fn render(&self, surface: &mut dyn Surface, time: f64) {
        surface.fill_rect(
            Rect::new(0.0, 0.0, INTERNAL_WIDTH, INTERNAL_HEIGHT),
            colors::BLACK,
        );

        surface.fill_rect(self.arena, colors::ARENA_FILL);
        surface.stroke_rect(self.arena.inset(0.5), colors::ARENA_BORDER);

        self.enemy.render(surface);
        self.spawner.render(surface);

        let flickering = self.settings.hit_flicker
            && self.combat.is_invulnerable()
            && !self.player.is_dead();
        if !flickering || (time * FLICKER_HZ).floor() as i64 % 2 == 0 {
            self.player.render(surface);
        }

        self.render_hud(surface);
        self.dialogue.render(surface, DIALOGUE_BOX);
    }
}
