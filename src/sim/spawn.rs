//! Entity spawner and difficulty ramp
//!
//! The spawner is a self-rescheduling one-shot timer chain: each firing
//! creates a batch of entities and schedules exactly the next firing, so the
//! random delay never accumulates drift. The difficulty ramp runs on an
//! independent fixed-period timer and only ever raises the bomb chance.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, GameState};
use crate::consts::GAME_WIDTH;
use crate::tuning::Tuning;

/// Execute one spawn cycle and schedule the next one.
///
/// When the live-entity cap is already met nothing spawns this cycle, but
/// the chain still reschedules.
pub fn run_spawn_cycle(state: &mut GameState, tuning: &Tuning) {
    let remaining = tuning.max_live_entities.saturating_sub(state.entities.len());

    if remaining > 0 {
        let cap = tuning.spawn_batch_max.min(remaining as u32);
        let batch = state.rng.random_range(1..=cap);
        for _ in 0..batch {
            spawn_one(state, tuning);
        }
    }

    let delay = tuning.random_spawn_delay_ticks(&mut state.rng);
    state.spawn_due_tick = state.time_ticks + delay;
}

/// Create one entity with randomized parameters above the top edge
fn spawn_one(state: &mut GameState, tuning: &Tuning) {
    // Bomb or coin: a single uniform draw against the current ramp value
    let roll: f32 = state.rng.random();
    let kind = if roll <= state.bomb_failure_chance {
        EntityKind::Bomb
    } else {
        EntityKind::Coin
    };

    let x = state.rng.random_range(0.0..GAME_WIDTH);
    let (y_lo, y_hi) = tuning.spawn_height;
    let y = state.rng.random_range(y_lo..y_hi);
    let vx = state
        .rng
        .random_range(-tuning.launch_speed_x..tuning.launch_speed_x);
    let (fall_lo, fall_hi) = tuning.fall_speed;
    let vy = state.rng.random_range(fall_lo..fall_hi);
    let (b_lo, b_hi) = tuning.bounce_y;
    let bounce_y = state.rng.random_range(b_lo..b_hi);
    let (d_lo, d_hi) = tuning.drag_x;
    let drag_x = state.rng.random_range(d_lo..=d_hi) as f32;

    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind,
        pos: Vec2::new(x, y),
        vel: Vec2::new(vx, vy),
        bounce: Vec2::new(1.0, bounce_y),
        drag_x,
        ground_contacts: 0,
    });
}

/// Fire the difficulty ramp and schedule its next fixed-period firing
pub fn run_ramp(state: &mut GameState, tuning: &Tuning) {
    state.bomb_failure_chance = (state.bomb_failure_chance + tuning.ramp_step).min(1.0);
    state.ramp_due_tick = state.time_ticks + tuning.ramp_period_ticks();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh_state(seed: u64) -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let state = GameState::new(seed, &tuning);
        (state, tuning)
    }

    #[test]
    fn test_spawn_cycle_respects_cap() {
        let (mut state, tuning) = fresh_state(1);
        for _ in 0..50 {
            run_spawn_cycle(&mut state, &tuning);
            assert!(
                state.entities.len() <= tuning.max_live_entities,
                "live count {} exceeds cap",
                state.entities.len()
            );
        }
    }

    #[test]
    fn test_full_cap_still_reschedules() {
        let (mut state, tuning) = fresh_state(2);
        while state.entities.len() < tuning.max_live_entities {
            run_spawn_cycle(&mut state, &tuning);
        }
        let count = state.entities.len();
        state.time_ticks = 10_000;
        run_spawn_cycle(&mut state, &tuning);
        assert_eq!(state.entities.len(), count);
        assert!(state.spawn_due_tick > state.time_ticks);
    }

    #[test]
    fn test_batch_size_bounds() {
        // From empty, a single cycle produces between 1 and 3 entities
        for seed in 0..20 {
            let (mut state, tuning) = fresh_state(seed);
            run_spawn_cycle(&mut state, &tuning);
            assert!((1..=3).contains(&state.entities.len()));
        }
    }

    #[test]
    fn test_all_coins_at_zero_chance() {
        let (mut state, tuning) = fresh_state(3);
        for _ in 0..20 {
            state.entities.clear();
            run_spawn_cycle(&mut state, &tuning);
        }
        // Shipped initial chance is 0.0: a bomb needs roll == 0.0 exactly
        assert!(
            state
                .entities
                .iter()
                .all(|e| e.kind == EntityKind::Coin)
        );
    }

    #[test]
    fn test_all_bombs_at_full_chance() {
        let (mut state, tuning) = fresh_state(4);
        state.bomb_failure_chance = 1.0;
        run_spawn_cycle(&mut state, &tuning);
        assert!(state.entities.iter().all(|e| e.kind == EntityKind::Bomb));
    }

    #[test]
    fn test_spawn_parameter_ranges() {
        let (mut state, tuning) = fresh_state(5);
        for _ in 0..30 {
            state.entities.clear();
            run_spawn_cycle(&mut state, &tuning);
            for e in &state.entities {
                assert!((0.0..GAME_WIDTH).contains(&e.pos.x));
                assert!((-200.0..-50.0).contains(&e.pos.y));
                assert!((-200.0..200.0).contains(&e.vel.x));
                assert!((150.0..300.0).contains(&e.vel.y));
                assert_eq!(e.bounce.x, 1.0);
                assert!((0.4..0.8).contains(&e.bounce.y));
                assert!((2.0..=6.0).contains(&e.drag_x));
                assert_eq!(e.drag_x.fract(), 0.0, "drag is drawn as an integer");
                assert_eq!(e.ground_contacts, 0);
            }
        }
    }

    #[test]
    fn test_reschedule_delay_range() {
        let (mut state, tuning) = fresh_state(6);
        for tick in [0u64, 500, 12_345] {
            state.time_ticks = tick;
            run_spawn_cycle(&mut state, &tuning);
            let delay = state.spawn_due_tick - tick;
            assert!((60..=240).contains(&delay), "delay {} ticks", delay);
        }
    }

    #[test]
    fn test_ramp_is_linear_and_clamped() {
        let (mut state, tuning) = fresh_state(7);
        for n in 1..=60u32 {
            run_ramp(&mut state, &tuning);
            let expected = (0.02 * n as f32).min(1.0);
            assert!(
                (state.bomb_failure_chance - expected).abs() < 1e-5,
                "after {} firings: {} vs {}",
                n,
                state.bomb_failure_chance,
                expected
            );
        }
        assert_eq!(state.bomb_failure_chance, 1.0);
    }

    proptest! {
        /// The cap holds after any interleaving of spawn cycles and ramps
        #[test]
        fn prop_cap_invariant(seed in 0u64..1000, cycles in 1usize..40) {
            let tuning = Tuning::default();
            let mut state = GameState::new(seed, &tuning);
            for i in 0..cycles {
                if i % 5 == 0 {
                    run_ramp(&mut state, &tuning);
                }
                run_spawn_cycle(&mut state, &tuning);
                prop_assert!(state.entities.len() <= tuning.max_live_entities);
            }
        }

        /// The ramp value never decreases and never exceeds 1.0
        #[test]
        fn prop_ramp_monotone(firings in 1usize..200) {
            let tuning = Tuning::default();
            let mut state = GameState::new(0, &tuning);
            let mut prev = state.bomb_failure_chance;
            for _ in 0..firings {
                run_ramp(&mut state, &tuning);
                prop_assert!(state.bomb_failure_chance >= prev);
                prop_assert!(state.bomb_failure_chance <= 1.0);
                prev = state.bomb_failure_chance;
            }
        }
    }
}
