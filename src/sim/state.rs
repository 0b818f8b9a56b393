//! Game state and core simulation types
//!
//! All state needed to replay a run deterministically lives here, including
//! the RNG. Everything is serializable so a snapshot can be diffed in tests.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// What kind of falling object an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Collectible, worth points, destroyed on ground contact
    Coin,
    /// Hazard; ends the run on player contact, bounces off the ground
    Bomb,
}

/// A falling coin or bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-axis restitution; x is fixed at 1.0 (full horizontal elasticity)
    pub bounce: Vec2,
    /// Horizontal drag, decelerates vx toward zero (pixels/s²)
    pub drag_x: f32,
    /// Ground touchdowns so far (bombs despawn on the third)
    pub ground_contacts: u32,
}

impl Entity {
    /// Axis-aligned half extents of the body
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::splat(ENTITY_HALF_EXTENT)
    }
}

/// Current animation pose of the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPose {
    /// Facing the camera (the "turn" frame)
    #[default]
    Idle,
    WalkLeft,
    WalkRight,
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub pose: PlayerPose,
    /// Resting on the ground this tick (gates jumping)
    pub on_ground: bool,
    /// Red tint applied after a bomb hit
    pub hit_tint: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            pose: PlayerPose::Idle,
            on_ground: false,
            hit_tint: false,
        }
    }
}

impl Player {
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT)
    }
}

/// Observable outcomes of a tick, drained by the platform shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A coin was collected; carries the new total
    CoinCollected { score: u32 },
    /// The run ended; carries the final score for the host loss sink
    GameLost { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG, serialized with the state so snapshots replay identically
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,

    pub score: u32,
    pub game_over: bool,
    /// Probability that a spawn slot produces a bomb; clamped to [0, 1],
    /// never decreases
    pub bomb_failure_chance: f32,

    pub player: Player,
    /// Live coins and bombs, at most `Tuning::max_live_entities`
    pub entities: Vec<Entity>,

    /// Tick at which the next spawn cycle fires (self-rescheduling chain)
    pub spawn_due_tick: u64,
    /// Tick at which the difficulty ramp next fires (fixed period)
    pub ramp_due_tick: u64,

    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run. The first spawn cycle fires on the first tick;
    /// the first ramp firing comes one full period in.
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            score: 0,
            game_over: false,
            bomb_failure_chance: tuning.initial_bomb_chance.clamp(0.0, 1.0),
            player: Player::default(),
            entities: Vec::new(),
            spawn_due_tick: 0,
            ramp_due_tick: tuning.ramp_period_ticks(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Count of live entities of one kind
    pub fn live_count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Remove an entity by ID; missing IDs are ignored (already despawned)
    pub fn remove_entity(&mut self, id: u32) {
        self.entities.retain(|e| e.id != id);
    }

    /// Drain events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
