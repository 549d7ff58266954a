//! Mirror Cannon - a cannon, three mirrors and a rain of colored blocks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring)
//! - `hud`: Seven-segment score display tables
//! - `input`: Raw input events mapped onto control state
//! - `renderer`: Static geometry and per-frame draw snapshots
//! - `settings`: JSON configuration
//! - `autopilot`: Demo player for headless runs

pub mod autopilot;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants (world units, view is [-4, 4] on both axes)
pub mod consts {
    use glam::Vec2;

    /// Half extent of the visible world at zoom 1
    pub const VIEW_HALF_EXTENT: f32 = 4.0;

    /// Cannon muzzle x; projectiles start here at the cannon's height
    pub const CANNON_X: f32 = -3.75;
    /// Cannon base x (left edge of the base)
    pub const CANNON_BASE_X: f32 = -4.0;
    pub const CANNON_MIN_Y: f32 = -3.0;
    pub const CANNON_MAX_Y: f32 = 3.0;
    pub const CANNON_MAX_ANGLE: f32 = 90.0;
    /// Angle change per key press (degrees)
    pub const CANNON_ANGLE_STEP: f32 = 10.0;
    /// Height change per key press
    pub const CANNON_MOVE_STEP: f32 = 0.2;

    /// Projectile travel per frame
    pub const PROJECTILE_SPEED: f32 = 0.1;
    /// Half size of a projectile for mirror tests
    pub const PROJECTILE_HALF_SIZE: f32 = 0.05;
    /// Projectile-vs-block tolerance
    pub const HIT_TOLERANCE: Vec2 = Vec2::new(0.075, 0.3);

    /// Projectile play area (inclusive)
    pub const PLAY_MIN: Vec2 = Vec2::new(-4.0, -3.0);
    pub const PLAY_MAX: Vec2 = Vec2::new(4.0, 4.0);

    /// Block dimensions (position is the lower-left corner)
    pub const BLOCK_WIDTH: f32 = 0.2;
    pub const BLOCK_HEIGHT: f32 = 0.3;
    pub const BLOCK_SPAWN_Y: f32 = 4.0;
    /// Spawn x is drawn from this inclusive integer range
    pub const BLOCK_SPAWN_X_MIN: i32 = -3;
    pub const BLOCK_SPAWN_X_MAX: i32 = 2;
    /// Fall per cadence interval, multiplied by speed
    pub const BLOCK_FALL_STEP: f32 = 0.3;
    /// Cadence interval at speed 1 (ms)
    pub const BASE_CADENCE_MS: f64 = 1000.0;

    /// Blocks at or below this height are judged against the baskets
    pub const CATCH_LINE_Y: f32 = -3.0;
    /// Baskets sit on the floor
    pub const BASKET_Y: f32 = -4.0;
    /// Left basket span is [LEFT_BASKET_SPAN.0 + left, LEFT_BASKET_SPAN.1 + left]
    pub const LEFT_BASKET_SPAN: (f32, f32) = (-2.5, -0.5);
    pub const RIGHT_BASKET_SPAN: (f32, f32) = (0.5, 2.5);
    /// Exclusive bounds on basket offsets for keyboard moves
    pub const LEFT_BASKET_RANGE: (f32, f32) = (-0.5, 4.5);
    pub const RIGHT_BASKET_RANGE: (f32, f32) = (-4.5, 0.5);
    pub const BASKET_STEP: f32 = 0.1;

    /// Score deltas
    pub const SCORE_SHOT_BLACK: i32 = 2;
    pub const SCORE_SHOT_RED: i32 = -2;
    pub const SCORE_SHOT_GREEN: i32 = -2;
    pub const SCORE_CATCH_RED: i32 = 1;
    pub const SCORE_CATCH_GREEN: i32 = 1;

    pub const DEFAULT_WIN_SCORE: i32 = 100;
    pub const DEFAULT_CAPACITY: usize = 1000;
    pub const MAX_CAPACITY: usize = 1_000_000;
    pub const DEFAULT_FIRE_COOLDOWN_MS: u64 = 1000;
    pub const DEFAULT_MAX_SPEED: u32 = 10;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Reflect a travel angle about a mirror's orientation (degrees)
#[inline]
pub fn reflect_angle(mirror_degrees: f32, travel_degrees: f32) -> f32 {
    2.0 * mirror_degrees - travel_degrees
}

/// Unit direction for an angle in degrees
#[inline]
pub fn direction(degrees: f32) -> Vec2 {
    let rad = deg_to_rad(degrees);
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_angle() {
        assert_eq!(reflect_angle(90.0, 0.0), 180.0);
        assert_eq!(reflect_angle(120.0, 30.0), 210.0);
        assert_eq!(reflect_angle(60.0, -20.0), 140.0);
    }

    #[test]
    fn test_direction() {
        let d = direction(90.0);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
    }
}
