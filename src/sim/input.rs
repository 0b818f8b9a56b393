//! Input commands and the per-tick input mapper
//!
//! The platform shell samples keyboard and pointer state into a `TickInput`;
//! the mapper turns it into player velocity and pose. Keyboard has priority:
//! while any directional key is held the pointer is ignored for that tick.

use super::state::{GameState, PlayerPose};
use crate::tuning::Tuning;

/// Sampled input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Primary pointer (touch or mouse) pressed
    pub pointer_down: bool,
    /// Pointer x as a fraction of the physical window width, [0, 1)
    pub pointer_x: f32,
}

impl TickInput {
    /// Any directional key held this tick
    #[inline]
    pub fn any_key(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Map input to player velocity and pose. The caller skips this entirely
/// once the run is over.
pub fn apply_input(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    let player = &mut state.player;

    if input.any_key() {
        // Keyboard wins the tick outright
        if input.left {
            player.vel.x = -tuning.keyboard_walk_speed;
            player.pose = PlayerPose::WalkLeft;
        } else if input.right {
            player.vel.x = tuning.keyboard_walk_speed;
            player.pose = PlayerPose::WalkRight;
        } else {
            player.vel.x = 0.0;
            player.pose = PlayerPose::Idle;
        }

        // Jump only from the ground, dive only in the air
        if input.up && player.on_ground {
            player.vel.y = -tuning.jump_speed;
        }
        if input.down && !player.on_ground {
            player.vel.y = tuning.dive_speed;
        }
    } else if input.pointer_down {
        // Move toward whichever screen half the pointer occupies
        if input.pointer_x < 0.5 {
            player.vel.x = -tuning.touch_walk_speed;
            player.pose = PlayerPose::WalkLeft;
        } else {
            player.vel.x = tuning.touch_walk_speed;
            player.pose = PlayerPose::WalkRight;
        }
    } else {
        player.vel.x = 0.0;
        player.pose = PlayerPose::Idle;
    }
}
