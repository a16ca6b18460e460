//! Hit resolution between the player and incoming projectiles
//!
//! At most one hit lands per frame. A hit removes the projectile, applies its
//! damage and opens a short invulnerability window.

use super::player::Player;
use super::projectiles::ProjectileSpawner;

/// A hit that landed this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub damage: i32,
    /// HP left after the hit
    pub hp_after: i32,
}

impl Hit {
    pub fn is_fatal(&self) -> bool {
        self.hp_after <= 0
    }
}

/// Tracks the post-hit invulnerability window
#[derive(Debug, Clone, Default)]
pub struct CombatResolver {
    /// Window length applied after each hit (seconds)
    pub invulnerability_duration: f32,
    /// Seconds of invulnerability left
    invulnerable: f32,
}

impl CombatResolver {
    pub fn new(invulnerability_duration: f32) -> Self {
        Self {
            invulnerability_duration,
            invulnerable: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.invulnerable = 0.0;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    pub fn invulnerable_for(&self) -> f32 {
        self.invulnerable
    }

    /// Count the invulnerability window down
    pub fn tick(&mut self, dt: f32) {
        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
        }
    }

    /// Test the player against every projectile and apply the first hit found.
    ///
    /// Does nothing while invulnerable or once the player is dead.
    pub fn resolve(&mut self, player: &mut Player, spawner: &mut ProjectileSpawner) -> Option<Hit> {
        if self.is_invulnerable() || player.is_dead() {
            return None;
        }

        let hitbox = player.hitbox();
        let index = spawner
            .projectiles()
            .iter()
            .position(|p| hitbox.intersects(&p.bounds()))?;

        let projectile = spawner.remove_at(index);
        player.hurt(projectile.damage);
        self.invulnerable = self.invulnerability_duration;

        Some(Hit {
            damage: projectile.damage,
            hp_after: player.hp,
        })
    }
}
