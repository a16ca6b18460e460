//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - Time only advances through the `dt` passed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (projectiles keep insertion order)
//! - No rendering or platform dependencies beyond the `Surface` trait

pub mod collision;
pub mod combat;
pub mod dialogue;
pub mod player;
pub mod projectiles;
pub mod rect;

pub use collision::aabb_intersects;
pub use combat::{CombatResolver, Hit};
pub use dialogue::{Dialogue, wrap_text};
pub use player::{Enemy, Player};
pub use projectiles::{Projectile, ProjectileSpawner, SpriteKey};
pub use rect::Rect;
