//! Data-driven battle balance
//!
//! Every number the encounter depends on lives here so it can be tweaked from
//! a JSON config without touching code. Only the parameters of the single
//! linear ramp are exposed.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Balance table for one battle encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawner ===
    /// Spawns per second at t = 0
    pub base_rate: f32,
    /// Additional spawns per second gained every second
    pub ramp_rate: f32,
    /// Hard cap on spawns in a single update (guards against frame stalls)
    pub max_spawns_per_frame: u32,

    // === Projectiles ===
    pub projectile_base_speed: f32,
    /// Random extra speed in `[0, jitter)`
    pub projectile_speed_jitter: f32,
    /// Extra speed per second of battle time
    pub projectile_speed_ramp: f32,
    /// Half-width of the aim box around the arena center
    pub aim_jitter: f32,
    pub projectile_size: f32,
    pub projectile_damage: i32,

    // === Player ===
    /// Seconds of invulnerability after a hit
    pub invulnerability: f32,
    pub player_size: f32,
    pub player_speed: f32,
    pub player_max_hp: i32,

    // === Presentation ===
    /// Dialogue reveal speed (characters per second)
    pub dialogue_cps: f32,
    pub arena_width: f32,
    pub arena_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_rate: 5.0,
            ramp_rate: 0.4,
            max_spawns_per_frame: 200,

            projectile_base_speed: 70.0,
            projectile_speed_jitter: 55.0,
            projectile_speed_ramp: 0.9,
            aim_jitter: 20.0,
            projectile_size: 8.0,
            projectile_damage: 10,

            invulnerability: 0.12,
            player_size: 8.0,
            player_speed: 92.0,
            player_max_hp: 100,

            dialogue_cps: 36.0,
            arena_width: 200.0,
            arena_height: 140.0,
        }
    }
}

impl Tuning {
    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("base_rate", self.base_rate),
            ("projectile_size", self.projectile_size),
            ("player_size", self.player_size),
            ("dialogue_cps", self.dialogue_cps),
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        let non_negative = [
            ("ramp_rate", self.ramp_rate),
            ("projectile_base_speed", self.projectile_base_speed),
            ("projectile_speed_jitter", self.projectile_speed_jitter),
            ("projectile_speed_ramp", self.projectile_speed_ramp),
            ("aim_jitter", self.aim_jitter),
            ("invulnerability", self.invulnerability),
            ("player_speed", self.player_speed),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be zero or positive, got {value}"),
                });
            }
        }

        if self.player_max_hp <= 0 {
            return Err(ConfigError::Invalid {
                field: "player_max_hp",
                reason: format!("must be at least 1, got {}", self.player_max_hp),
            });
        }
        if self.max_spawns_per_frame == 0 {
            return Err(ConfigError::Invalid {
                field: "max_spawns_per_frame",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "base_rate": 8.0 }"#).unwrap();
        assert_eq!(tuning.base_rate, 8.0);
        assert_eq!(tuning.ramp_rate, 0.4);
        assert_eq!(tuning.max_spawns_per_frame, 200);
    }

    #[test]
    fn test_rejects_zero_rate() {
        let tuning = Tuning {
            base_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid { field: "base_rate", .. })
        ));
    }
}
