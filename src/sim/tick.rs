//! Fixed timestep simulation tick
//!
//! One tick: map input, fire any due timers, step physics, then resolve the
//! contacts the step produced. Once the run is over the tick is a no-op, so
//! the spawn chain and ramp timer die with it.

use glam::Vec2;

use super::input::{TickInput, apply_input};
use super::physics::{self, Contact};
use super::spawn::{run_ramp, run_spawn_cycle};
use super::state::{GameEvent, GameState, PlayerPose};
use crate::tuning::Tuning;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning, dt: f32) {
    // Terminal state: physics paused, input ignored, timers stopped
    if state.game_over {
        return;
    }

    state.time_ticks += 1;

    apply_input(state, input, tuning);

    // Spawn chain: each firing schedules exactly the next one
    if state.time_ticks >= state.spawn_due_tick {
        run_spawn_cycle(state, tuning);
    }

    // Difficulty ramp: fixed period
    if state.time_ticks >= state.ramp_due_tick {
        run_ramp(state, tuning);
    }

    let contacts = physics::step(state, dt);
    for contact in contacts {
        resolve_contact(state, tuning, contact);
        if state.game_over {
            break;
        }
    }
}

/// Outcome rules, dispatched on the contact's pair category.
///
/// Contacts can arrive for entities an earlier contact already despawned
/// (a coin landing at the player's feet), so every arm re-checks liveness.
fn resolve_contact(state: &mut GameState, tuning: &Tuning, contact: Contact) {
    match contact {
        Contact::PlayerCoin { id } => {
            if state.entities.iter().any(|e| e.id == id) {
                state.remove_entity(id);
                state.score += tuning.coin_score;
                state.events.push(GameEvent::CoinCollected { score: state.score });
            }
        }

        Contact::PlayerBomb { id } => {
            if state.entities.iter().any(|e| e.id == id) {
                // Terminal: freeze the player in the hit pose and clear the sky
                state.player.hit_tint = true;
                state.player.pose = PlayerPose::Idle;
                state.player.vel = Vec2::ZERO;
                state.entities.clear();
                state.game_over = true;
                state.events.push(GameEvent::GameLost { score: state.score });
            }
        }

        // Landed coins are gone, not collectible
        Contact::CoinGround { id } => state.remove_entity(id),

        Contact::BombGround { id } => {
            if let Some(entity) = state.entities.iter_mut().find(|e| e.id == id) {
                entity.ground_contacts += 1;
                if entity.ground_contacts >= tuning.bomb_ground_contacts {
                    state.remove_entity(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUND_Y, SIM_DT};
    use crate::sim::state::{Entity, EntityKind};

    /// A run with both timers parked so tests control every entity
    fn quiet_state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(0, &tuning);
        state.spawn_due_tick = u64::MAX;
        state.ramp_due_tick = u64::MAX;
        // Rest the player on the ground
        for _ in 0..2000 {
            physics::step(&mut state, SIM_DT);
        }
        (state, tuning)
    }

    fn add_entity(state: &mut GameState, kind: EntityKind, pos: Vec2, vel: Vec2) -> u32 {
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
        id
    }

    #[test]
    fn test_first_tick_runs_spawn_cycle() {
        let tuning = Tuning::default();
        let mut state = GameState::new(3, &tuning);
        tick(&mut state, &TickInput::default(), &tuning, SIM_DT);
        assert!((1..=3).contains(&state.entities.len()));
        assert!(state.spawn_due_tick > state.time_ticks);
    }

    #[test]
    fn test_ramp_fires_on_schedule() {
        let tuning = Tuning::default();
        let mut state = GameState::new(3, &tuning);
        state.spawn_due_tick = u64::MAX;
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default(), &tuning, SIM_DT);
        }
        assert!((state.bomb_failure_chance - 0.02).abs() < 1e-6);
        assert_eq!(state.ramp_due_tick, 2400);
    }

    #[test]
    fn test_coin_collection_scores_ten() {
        let (mut state, tuning) = quiet_state();
        let player_pos = state.player.pos;
        add_entity(
            &mut state,
            EntityKind::Coin,
            player_pos - Vec2::new(0.0, 20.0),
            Vec2::ZERO,
        );
        tick(&mut state, &TickInput::default(), &tuning, SIM_DT);

        assert_eq!(state.score, 10);
        assert!(state.entities.is_empty());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::CoinCollected { score: 10 }]
        );
    }

    #[test]
    fn test_landed_coin_is_not_collectible() {
        let (mut state, tuning) = quiet_state();
        // Falling straight down at the player's feet: it lands and overlaps
        // the player on the same tick
        let player_x = state.player.pos.x;
        add_entity(
            &mut state,
            EntityKind::Coin,
            Vec2::new(player_x, GROUND_Y - 13.0),
            Vec2::new(0.0, 300.0),
        );
        tick(&mut state, &TickInput::default(), &tuning, SIM_DT);

        assert!(state.entities.is_empty(), "coin despawned on landing");
        assert_eq!(state.score, 0, "landed coin must not score");
    }

    #[test]
    fn test_bomb_survives_two_ground_bounces() {
        let (mut state, tuning) = quiet_state();
        let id = add_entity(
            &mut state,
            EntityKind::Bomb,
            Vec2::new(400.0, GROUND_Y - 50.0),
            Vec2::new(0.0, 200.0),
        );

        let mut seen_contacts = 0;
        for _ in 0..20_000 {
            tick(&mut state, &TickInput::default(), &tuning, SIM_DT);
            match state.entities.iter().find(|e| e.id == id) {
                Some(e) => {
                    assert!(e.ground_contacts < 3, "live bomb past third contact");
                    seen_contacts = seen_contacts.max(e.ground_contacts);
                }
                None => break,
            }
        }
        assert_eq!(seen_contacts, 2, "bomb was live at contacts 1 and 2");
        assert!(
            !state.entities.iter().any(|e| e.id == id),
            "bomb removed on third contact"
        );
    }

    #[test]
    fn test_bomb_hit_is_terminal() {
        let (mut state, tuning) = quiet_state();
        state.score = 30;
        let player_pos = state.player.pos;
        add_entity(
            &mut state,
            EntityKind::Bomb,
            player_pos - Vec2::new(0.0, 20.0),
            Vec2::ZERO,
        );
        // A far-away coin that must be cleared by the loss
        add_entity(
            &mut state,
            EntityKind::Coin,
            Vec2::new(450.0, 100.0),
            Vec2::ZERO,
        );

        tick(&mut state, &TickInput::default(), &tuning, SIM_DT);

        assert!(state.game_over);
        assert!(state.entities.is_empty(), "all live entities cleared");
        assert!(state.player.hit_tint);
        assert_eq!(state.player.pose, PlayerPose::Idle);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameLost { score: 30 }]
        );
    }

    #[test]
    fn test_game_over_short_circuits() {
        let (mut state, tuning) = quiet_state();
        let player_pos = state.player.pos;
        add_entity(&mut state, EntityKind::Bomb, player_pos, Vec2::ZERO);
        tick(&mut state, &TickInput::default(), &tuning, SIM_DT);
        assert!(state.game_over);
        state.drain_events();

        let ticks_before = state.time_ticks;
        let score_before = state.score;
        // Re-arm the timers; a dead run must ignore them
        state.spawn_due_tick = 0;
        state.ramp_due_tick = 0;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &input, &tuning, SIM_DT);
        }

        assert_eq!(state.time_ticks, ticks_before);
        assert_eq!(state.score, score_before);
        assert!(state.entities.is_empty());
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(state.drain_events().is_empty(), "loss reported exactly once");
    }

    #[test]
    fn test_live_count_capped_over_long_run() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1234, &tuning);
        // Two simulated minutes of ticks with no input
        for _ in 0..(120 * 120) {
            tick(&mut state, &TickInput::default(), &tuning, SIM_DT);
            assert!(state.entities.len() <= tuning.max_live_entities);
            if state.game_over {
                break;
            }
        }
    }
}
