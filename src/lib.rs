//! Coin Catcher - a falling coins-and-bombs arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `viewport`: Crop-to-fill viewport fitting for arbitrary window sizes
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod viewport;

pub use tuning::Tuning;
pub use viewport::Viewport;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Simulation ticks per second
    pub const TICK_RATE: u64 = 120;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical canvas - aspect ratio locked 9:16 portrait
    pub const GAME_WIDTH: f32 = 540.0;
    pub const GAME_HEIGHT: f32 = 960.0;

    /// Window size bounds the host is expected to honor
    pub const MIN_SCREEN_WIDTH: u32 = 270;
    pub const MIN_SCREEN_HEIGHT: u32 = 480;
    pub const MAX_SCREEN_WIDTH: u32 = 1920;
    pub const MAX_SCREEN_HEIGHT: u32 = 1080;

    /// Downward gravity (pixels/s², y axis points down)
    pub const GRAVITY_Y: f32 = 150.0;

    /// Top edge of the ground platform
    pub const GROUND_Y: f32 = 928.0;

    /// Player body half extents (32x48 source frames at 1.5x scale)
    pub const PLAYER_HALF_WIDTH: f32 = 24.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 36.0;
    /// Slight bounce when the player lands
    pub const PLAYER_BOUNCE_Y: f32 = 0.1;
    /// Player spawn position
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 800.0;

    /// Coin/bomb body half extent (square AABB)
    pub const ENTITY_HALF_EXTENT: f32 = 12.0;
}

/// Convert a millisecond delay to simulation ticks
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    (ms as u64 * consts::TICK_RATE) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_ticks() {
        assert_eq!(ms_to_ticks(500), 60);
        assert_eq!(ms_to_ticks(2000), 240);
        assert_eq!(ms_to_ticks(10_000), 1200);
    }
}
