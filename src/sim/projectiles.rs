//! Projectile spawner and mover
//!
//! Spawn frequency ramps linearly with battle time: `rate(t) = base + t * ramp`.
//! Projectiles appear flush against a random arena edge, fly toward a point
//! near the arena center and are culled once they leave the arena entirely.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::Rect;
use super::collision::fully_outside;
use crate::renderer::{ImageKey, Surface, colors};
use crate::tuning::Tuning;

/// Which sprite a projectile is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKey {
    Enemy6,
    Enemy7,
}

impl SpriteKey {
    pub fn image(&self) -> ImageKey {
        match self {
            SpriteKey::Enemy6 => ImageKey::Enemy6,
            SpriteKey::Enemy7 => ImageKey::Enemy7,
        }
    }
}

/// A single incoming projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub damage: i32,
    pub sprite: SpriteKey,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// Arena edge a projectile enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Owns every projectile of one battle and the ramp clock driving them
#[derive(Debug, Clone)]
pub struct ProjectileSpawner {
    arena: Rect,
    tuning: Tuning,
    rng: Pcg32,
    projectiles: Vec<Projectile>,
    /// Seconds since the last reset; drives both spawn rate and speed bonus
    elapsed: f32,
    /// Time not yet consumed by spawns
    accumulator: f32,
}

impl ProjectileSpawner {
    pub fn new(arena: Rect, tuning: Tuning, seed: u64) -> Self {
        Self {
            arena,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            projectiles: Vec::new(),
            elapsed: 0.0,
            accumulator: 0.0,
        }
    }

    /// Clear all projectiles and restart the ramp clock
    pub fn reset(&mut self) {
        self.projectiles.clear();
        self.elapsed = 0.0;
        self.accumulator = 0.0;
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn arena(&self) -> Rect {
        self.arena
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Spawns per second at the current ramp time
    pub fn rate(&self) -> f32 {
        self.tuning.base_rate + self.elapsed * self.tuning.ramp_rate
    }

    /// Seconds between spawns at the current ramp time
    pub fn interval(&self) -> f32 {
        1.0 / self.rate().max(0.0001)
    }

    /// Advance the ramp clock, spawn what is due, move everything and cull.
    ///
    /// Returns the number of projectiles spawned this update.
    pub fn update(&mut self, dt: f32) -> usize {
        self.elapsed += dt;
        let interval = self.interval();
        self.accumulator += dt;

        let mut spawned = 0;
        while self.accumulator >= interval && spawned < self.tuning.max_spawns_per_frame as usize {
            self.accumulator -= interval;
            self.spawn_inward();
            spawned += 1;
        }
        if spawned > 0 {
            log::trace!("Spawned {} projectiles (t = {:.2}s)", spawned, self.elapsed);
        }

        let arena = self.arena;
        for p in &mut self.projectiles {
            p.pos += p.vel * dt;
        }
        self.projectiles.retain(|p| !fully_outside(&p.bounds(), &arena));

        spawned
    }

    /// Spawn one projectile just outside a random edge, aimed near the center
    pub fn spawn_inward(&mut self) {
        let Rect { x, y, w, h } = self.arena;
        let size = self.tuning.projectile_size;

        let edge = match self.rng.random_range(0..4) {
            0 => Edge::Top,
            1 => Edge::Right,
            2 => Edge::Bottom,
            _ => Edge::Left,
        };

        // Flush against the edge so the box touches the arena but lies outside it
        let along_x = x + self.rng.random::<f32>() * w;
        let along_y = y + self.rng.random::<f32>() * h;
        let spawn = match edge {
            Edge::Top => Vec2::new(along_x, y - size),
            Edge::Right => Vec2::new(x + w, along_y),
            Edge::Bottom => Vec2::new(along_x, y + h),
            Edge::Left => Vec2::new(x - size, along_y),
        };

        let jitter = self.tuning.aim_jitter;
        let aim = self.arena.center()
            + Vec2::new(
                self.rng.random_range(-1.0..=1.0) * jitter,
                self.rng.random_range(-1.0..=1.0) * jitter,
            );
        let dir = (aim - spawn).try_normalize().unwrap_or(Vec2::X);

        let speed = self.tuning.projectile_base_speed
            + self.rng.random::<f32>() * self.tuning.projectile_speed_jitter
            + self.elapsed * self.tuning.projectile_speed_ramp;

        let sprite = if self.rng.random_bool(0.5) {
            SpriteKey::Enemy6
        } else {
            SpriteKey::Enemy7
        };

        self.projectiles.push(Projectile {
            pos: spawn,
            vel: dir * speed,
            size,
            damage: self.tuning.projectile_damage,
            sprite,
        });
    }

    /// Remove and return the projectile at `index`
    pub fn remove_at(&mut self, index: usize) -> Projectile {
        self.projectiles.remove(index)
    }

    /// Insert a projectile directly (scripted patterns and tests)
    pub fn push(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for p in &self.projectiles {
            let rect = Rect::square(p.pos.round(), p.size);
            let image = p.sprite.image();
            if surface.image_ready(image) {
                surface.draw_image(image, rect);
            } else {
                surface.fill_rect(rect, colors::PROJECTILE_FALLBACK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Rect {
        Rect::new(60.0, 32.0, 200.0, 140.0)
    }

    fn spawner(seed: u64) -> ProjectileSpawner {
        ProjectileSpawner::new(arena(), Tuning::default(), seed)
    }

    fn still(pos: Vec2, vel: Vec2) -> Projectile {
        Projectile {
            pos,
            vel,
            size: 8.0,
            damage: 10,
            sprite: SpriteKey::Enemy6,
        }
    }

    #[test]
    fn test_one_second_from_reset_spawns_five() {
        let mut s = spawner(42);
        s.reset();
        // rate(1.0) = 5.4 -> interval ~0.185s -> floor(1.0 / 0.185) = 5
        assert_eq!(s.update(1.0), 5);
        assert!(s.accumulator() >= 0.0 && s.accumulator() < s.interval());
    }

    #[test]
    fn test_small_steps_accumulate() {
        let mut s = spawner(1);
        // 0.1s at rate ~5: nothing yet
        assert_eq!(s.update(0.1), 0);
        assert_eq!(s.update(0.1), 1);
    }

    #[test]
    fn test_spawn_cap_per_frame() {
        let mut s = spawner(7);
        // A very long stall would owe thousands of spawns
        let spawned = s.update(60.0);
        assert_eq!(spawned, 200);
        assert!(s.accumulator() > s.interval());
    }

    #[test]
    fn test_spawns_touch_arena_and_aim_inward() {
        let mut s = spawner(99);
        let center = arena().center();
        for _ in 0..200 {
            s.spawn_inward();
        }
        for p in s.projectiles() {
            assert!(!fully_outside(&p.bounds(), &arena()));
            assert!(!arena().intersects(&p.bounds()));
            assert!(p.vel.dot(center - p.pos) > 0.0);
        }
    }

    #[test]
    fn test_speed_ramps_with_time() {
        let mut s = spawner(5);
        s.elapsed = 100.0;
        s.spawn_inward();
        let speed = s.projectiles()[0].vel.length();
        // 70 + [0, 55) + 100 * 0.9
        assert!(speed >= 160.0 - 1e-3 && speed < 215.0);
    }

    #[test]
    fn test_culling_only_when_fully_outside() {
        let mut s = spawner(3);
        // Straddling the right edge, moving out slowly
        s.push(still(Vec2::new(255.0, 100.0), Vec2::new(1.0, 0.0)));
        // Already 2px past the right edge, moving out
        s.push(still(Vec2::new(262.0, 100.0), Vec2::new(1.0, 0.0)));
        // Moving up out of the top
        s.push(still(Vec2::new(100.0, 20.0), Vec2::new(0.0, -10.0)));

        // Too short to spawn anything
        s.update(0.01);
        assert_eq!(s.projectiles().len(), 1);
        assert!((s.projectiles()[0].pos.x - 255.01).abs() < 1e-3);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = spawner(11);
        s.update(2.0);
        assert!(s.elapsed() > 0.0);
        s.reset();
        assert!(s.projectiles().is_empty());
        assert_eq!(s.elapsed(), 0.0);
        assert_eq!(s.accumulator(), 0.0);
    }

    #[test]
    fn test_same_seed_same_pattern() {
        let mut a = spawner(1234);
        let mut b = spawner(1234);
        for _ in 0..30 {
            a.update(1.0 / 60.0);
            b.update(1.0 / 60.0);
        }
        assert_eq!(a.projectiles().len(), b.projectiles().len());
        for (pa, pb) in a.projectiles().iter().zip(b.projectiles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.sprite, pb.sprite);
        }
    }

    #[test]
    fn test_render_fallback_square() {
        use crate::renderer::{DrawCommand, RecordingSurface};

        let mut s = spawner(2);
        s.push(still(Vec2::new(100.0, 100.0), Vec2::ZERO));

        let mut surface = RecordingSurface::new();
        s.render(&mut surface);
        assert!(matches!(
            surface.commands[0],
            DrawCommand::FillRect { color, .. } if color == colors::PROJECTILE_FALLBACK
        ));

        let mut surface = RecordingSurface::with_all_images();
        s.render(&mut surface);
        assert_eq!(surface.images(), vec![ImageKey::Enemy6]);
    }
}
