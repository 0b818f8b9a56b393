//! Data-driven game balance
//!
//! Every gameplay number that is a design choice (rather than an engine
//! constant) lives here, so a host can override balance with a JSON blob
//! without recompiling. Defaults match the shipped configuration.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ms_to_ticks;

/// Game balance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawner ===
    /// Live entity cap (coins + bombs)
    pub max_live_entities: usize,
    /// Upper bound on entities created per spawn cycle
    pub spawn_batch_max: u32,
    /// Delay range between spawn cycles, milliseconds (inclusive)
    pub spawn_delay_ms: (u32, u32),
    /// Horizontal launch speed range (± pixels/s)
    pub launch_speed_x: f32,
    /// Downward fall speed range (pixels/s)
    pub fall_speed: (f32, f32),
    /// Spawn height range above the top edge (negative y)
    pub spawn_height: (f32, f32),
    /// Vertical bounce restitution range
    pub bounce_y: (f32, f32),
    /// Horizontal drag range (integer pixels/s², inclusive)
    pub drag_x: (u32, u32),

    // === Difficulty ramp ===
    /// Bomb chance at scene start.
    /// The original shipped 0.0 despite a comment claiming 5%.
    pub initial_bomb_chance: f32,
    /// Ramp timer period, milliseconds
    pub ramp_period_ms: u32,
    /// Bomb chance added per ramp firing
    pub ramp_step: f32,

    // === Outcomes ===
    /// Points per collected coin
    pub coin_score: u32,
    /// Ground contacts a bomb survives before despawning
    pub bomb_ground_contacts: u32,

    // === Player movement ===
    /// Horizontal walk speed from keyboard (pixels/s)
    pub keyboard_walk_speed: f32,
    /// Horizontal walk speed from touch (pixels/s)
    pub touch_walk_speed: f32,
    /// Upward jump speed (pixels/s)
    pub jump_speed: f32,
    /// Downward dive speed while airborne (pixels/s)
    pub dive_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_live_entities: 10,
            spawn_batch_max: 3,
            spawn_delay_ms: (500, 2000),
            launch_speed_x: 200.0,
            fall_speed: (150.0, 300.0),
            spawn_height: (-200.0, -50.0),
            bounce_y: (0.4, 0.8),
            drag_x: (2, 6),

            initial_bomb_chance: 0.0,
            ramp_period_ms: 10_000,
            ramp_step: 0.02,

            coin_score: 10,
            bomb_ground_contacts: 3,

            keyboard_walk_speed: 160.0,
            touch_walk_speed: 200.0,
            jump_speed: 200.0,
            dive_speed: 200.0,
        }
    }
}

impl Tuning {
    /// Parse a JSON override blob; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Draw the delay until the next spawn cycle, in ticks
    pub fn random_spawn_delay_ticks<R: Rng>(&self, rng: &mut R) -> u64 {
        let (lo, hi) = self.spawn_delay_ms;
        ms_to_ticks(rng.random_range(lo..=hi))
    }

    /// Ramp timer period in ticks
    pub fn ramp_period_ticks(&self) -> u64 {
        ms_to_ticks(self.ramp_period_ms)
    }
}
