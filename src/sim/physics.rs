//! Arcade physics step
//!
//! Hand-rolled AABB physics for the handful of behaviors the game needs:
//! gravity, horizontal drag, side-wall bounce, a full-width static ground
//! platform, and player/entity overlap tests. The step integrates every body
//! and returns categorized contacts; outcome rules are applied by the tick,
//! not here.

use glam::Vec2;

use super::state::{EntityKind, GameState};
use crate::consts::*;

/// A contact produced by one physics step, keyed by pair category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    PlayerCoin { id: u32 },
    PlayerBomb { id: u32 },
    CoinGround { id: u32 },
    BombGround { id: u32 },
}

/// AABB overlap test on centers and half extents
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2) -> bool {
    (a_pos.x - b_pos.x).abs() < a_half.x + b_half.x
        && (a_pos.y - b_pos.y).abs() < a_half.y + b_half.y
}

/// Advance all bodies by one timestep and collect contacts.
///
/// Ground contacts are emitted before player overlaps so a coin that lands
/// and touches the player on the same tick counts as landed, not collected.
pub fn step(state: &mut GameState, dt: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();

    step_player(state, dt);

    for entity in &mut state.entities {
        // Gravity
        entity.vel.y += GRAVITY_Y * dt;

        // Horizontal drag: constant deceleration toward zero
        let decel = entity.drag_x * dt;
        if entity.vel.x.abs() <= decel {
            entity.vel.x = 0.0;
        } else {
            entity.vel.x -= decel * entity.vel.x.signum();
        }

        entity.pos += entity.vel * dt;

        let half = entity.half_extent();

        // Side walls: full horizontal elasticity (bounce.x = 1.0)
        if entity.pos.x < half.x {
            entity.pos.x = half.x;
            if entity.vel.x < 0.0 {
                entity.vel.x = -entity.vel.x * entity.bounce.x;
            }
        } else if entity.pos.x > GAME_WIDTH - half.x {
            entity.pos.x = GAME_WIDTH - half.x;
            if entity.vel.x > 0.0 {
                entity.vel.x = -entity.vel.x * entity.bounce.x;
            }
        }

        // Ground platform. Resolution puts the body exactly on the plane
        // with upward velocity, so one contact fires per touchdown.
        if entity.pos.y + half.y >= GROUND_Y {
            entity.pos.y = GROUND_Y - half.y;
            if entity.vel.y > 0.0 {
                entity.vel.y = -entity.vel.y * entity.bounce.y;
            }
            contacts.push(match entity.kind {
                EntityKind::Coin => Contact::CoinGround { id: entity.id },
                EntityKind::Bomb => Contact::BombGround { id: entity.id },
            });
        }
    }

    // Player overlaps, after every body has moved
    let p_pos = state.player.pos;
    let p_half = state.player.half_extent();
    for entity in &state.entities {
        if aabb_overlap(p_pos, p_half, entity.pos, entity.half_extent()) {
            contacts.push(match entity.kind {
                EntityKind::Coin => Contact::PlayerCoin { id: entity.id },
                EntityKind::Bomb => Contact::PlayerBomb { id: entity.id },
            });
        }
    }

    contacts
}

fn step_player(state: &mut GameState, dt: f32) {
    let player = &mut state.player;
    let half = player.half_extent();

    player.vel.y += GRAVITY_Y * dt;
    player.pos += player.vel * dt;

    // World bounds: the player stops at the walls
    if player.pos.x < half.x {
        player.pos.x = half.x;
        player.vel.x = 0.0;
    } else if player.pos.x > GAME_WIDTH - half.x {
        player.pos.x = GAME_WIDTH - half.x;
        player.vel.x = 0.0;
    }

    // Ground: slight bounce, then rest
    if player.pos.y + half.y >= GROUND_Y {
        player.pos.y = GROUND_Y - half.y;
        if player.vel.y > 0.0 {
            player.vel.y = -player.vel.y * PLAYER_BOUNCE_Y;
            // Kill residual jitter once the bounce is spent
            if player.vel.y.abs() < 10.0 {
                player.vel.y = 0.0;
            }
        }
        player.on_ground = true;
    } else {
        player.on_ground = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Entity;
    use crate::tuning::Tuning;

    fn state_with_entity(kind: EntityKind, pos: Vec2, vel: Vec2) -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(0, &tuning);
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind,
            pos,
            vel,
            bounce: Vec2::new(1.0, 0.5),
            drag_x: 4.0,
            ground_contacts: 0,
        });
        state
    }

    #[test]
    fn test_gravity_accelerates_falling() {
        let mut state =
            state_with_entity(EntityKind::Coin, Vec2::new(270.0, 100.0), Vec2::new(0.0, 150.0));
        step(&mut state, SIM_DT);
        assert!(state.entities[0].vel.y > 150.0);
        assert!(state.entities[0].pos.y > 100.0);
    }

    #[test]
    fn test_drag_slows_horizontal_motion() {
        let mut state =
            state_with_entity(EntityKind::Coin, Vec2::new(270.0, 100.0), Vec2::new(100.0, 0.0));
        step(&mut state, SIM_DT);
        assert!(state.entities[0].vel.x < 100.0);
        assert!(state.entities[0].vel.x > 0.0);
    }

    #[test]
    fn test_wall_bounce_is_fully_elastic() {
        let mut state =
            state_with_entity(EntityKind::Coin, Vec2::new(5.0, 100.0), Vec2::new(-200.0, 0.0));
        step(&mut state, SIM_DT);
        let e = &state.entities[0];
        assert_eq!(e.pos.x, e.half_extent().x);
        // bounce.x = 1.0: reflected speed only reduced by this tick's drag
        assert!(e.vel.x > 195.0);
    }

    #[test]
    fn test_ground_contact_bounces_and_reports() {
        let mut state = state_with_entity(
            EntityKind::Bomb,
            Vec2::new(270.0, GROUND_Y - 10.0),
            Vec2::new(0.0, 300.0),
        );
        let contacts = step(&mut state, SIM_DT);
        assert!(contacts
            .iter()
            .any(|c| matches!(c, Contact::BombGround { .. })));
        let e = &state.entities[0];
        assert_eq!(e.pos.y, GROUND_Y - e.half_extent().y);
        assert!(e.vel.y < 0.0, "bounced upward");
    }

    #[test]
    fn test_single_contact_per_touchdown() {
        let mut state = state_with_entity(
            EntityKind::Bomb,
            Vec2::new(270.0, GROUND_Y - 10.0),
            Vec2::new(0.0, 300.0),
        );
        let first = step(&mut state, SIM_DT);
        assert_eq!(
            first
                .iter()
                .filter(|c| matches!(c, Contact::BombGround { .. }))
                .count(),
            1
        );
        // Next tick the bomb is moving up off the plane: no contact
        let second = step(&mut state, SIM_DT);
        assert!(second
            .iter()
            .all(|c| !matches!(c, Contact::BombGround { .. })));
    }

    #[test]
    fn test_player_lands_and_rests() {
        let tuning = Tuning::default();
        let mut state = GameState::new(0, &tuning);
        for _ in 0..2000 {
            step(&mut state, SIM_DT);
        }
        assert!(state.player.on_ground);
        assert_eq!(
            state.player.pos.y,
            GROUND_Y - state.player.half_extent().y
        );
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_player_overlap_reported_by_kind() {
        let tuning = Tuning::default();
        let mut state = GameState::new(0, &tuning);
        // Rest the player on the ground first
        for _ in 0..2000 {
            step(&mut state, SIM_DT);
        }
        let p = state.player.pos;
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind: EntityKind::Bomb,
            pos: p - Vec2::new(0.0, 20.0),
            vel: Vec2::ZERO,
            bounce: Vec2::new(1.0, 0.5),
            drag_x: 4.0,
            ground_contacts: 0,
        });
        let contacts = step(&mut state, SIM_DT);
        assert!(contacts.contains(&Contact::PlayerBomb { id }));
    }
}
