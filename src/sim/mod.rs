//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, carried inside the state
//! - No rendering or platform dependencies

pub mod input;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use input::{TickInput, apply_input};
pub use physics::{Contact, aabb_overlap};
pub use spawn::{run_ramp, run_spawn_cycle};
pub use state::{Entity, EntityKind, GameEvent, GameState, Player, PlayerPose};
pub use tick::tick;
