//! Game rules. Every transition takes the current state by reference and
//! returns the next state together with the effects the UI should show.
//! Nothing here touches timers or the DOM.

use crate::model::{
    DECAY_FLOOR_MS, DECAY_STEP_MS, Deferred, Effect, GameState, INITIAL_LIVES, MAX_LIVES,
    SETBACK_CHANCE_CAP, SETBACK_CHANCE_STEP, Step,
};
use crate::util::Dice;

pub fn increment(state: &GameState, dice: &mut impl Dice) -> Step {
    if state.locked || state.is_over() {
        return Step::unchanged(state);
    }
    let mut next = state.clone();
    if dice.chance(state.misclick_chance()) {
        next.count = next.count.saturating_sub(1);
        return Step::new(next, vec![Effect::Misclick, Effect::Pop]);
    }

    next.count = next.count.saturating_add(1);
    let mut effects = vec![Effect::Pop];
    if next.count >= next.target {
        next.locked = true;
        effects.push(Effect::Celebrate);
        effects.push(Effect::Schedule(Deferred::AdvanceLevel));
    }
    Step::new(next, effects)
}

/// Deferred half of reaching the target: unlock and move to the next level.
pub fn advance(state: &GameState, dice: &mut impl Dice) -> Step {
    if !state.locked {
        return Step::unchanged(state);
    }
    let mut unlocked = state.clone();
    unlocked.locked = false;
    level_up(&unlocked, dice)
}

pub fn level_up(state: &GameState, dice: &mut impl Dice) -> Step {
    let mut next = state.clone();
    next.level = next.level.saturating_add(1);
    let level = next.level;
    next.target = dice.range(12 + 2 * level, 18 + 4 * level);
    next.count = 0;
    next.decay_ms = next.decay_ms.saturating_sub(DECAY_STEP_MS).max(DECAY_FLOOR_MS);
    next.setback_chance = (next.setback_chance + SETBACK_CHANCE_STEP).min(SETBACK_CHANCE_CAP);
    // bonus life every fourth level
    next.lives = (INITIAL_LIVES + level / 4).min(MAX_LIVES);
    Step::new(next, vec![Effect::LevelUp { level }, Effect::Pop])
}

pub fn decay_tick(state: &GameState) -> Step {
    if state.locked || state.is_over() {
        return Step::unchanged(state);
    }
    let mut next = state.clone();
    if next.count > 0 {
        next.count -= 1;
        return Step::new(next, vec![Effect::Pop]);
    }

    next.lives = next.lives.saturating_sub(1);
    let mut effects = vec![Effect::LifeLost { lives_left: next.lives }, Effect::Pop];
    if next.lives == 0 {
        effects.push(Effect::GameOver);
        effects.push(Effect::Schedule(Deferred::Reset));
    }
    Step::new(next, effects)
}

pub fn setback_tick(state: &GameState, dice: &mut impl Dice) -> Step {
    if state.locked || state.is_over() {
        return Step::unchanged(state);
    }
    if !dice.chance(state.setback_chance) {
        return Step::unchanged(state);
    }
    let lost = dice.range(1, state.setback_max.max(1));
    let mut next = state.clone();
    next.count = next.count.saturating_sub(lost);
    Step::new(next, vec![Effect::Setback { lost }, Effect::Pop])
}

pub fn reset(dice: &mut impl Dice) -> Step {
    Step::new(GameState::fresh(dice), vec![Effect::Pop])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{INITIAL_DECAY_MS, INITIAL_SETBACK_CHANCE, SETBACK_MAX};
    use crate::util::testing::ScriptedDice;
    use proptest::prelude::*;

    fn state(level: u32, target: u32, count: u32, lives: u32) -> GameState {
        GameState {
            level,
            target,
            count,
            lives,
            locked: false,
            decay_ms: INITIAL_DECAY_MS,
            setback_chance: INITIAL_SETBACK_CHANCE,
            setback_max: SETBACK_MAX,
        }
    }

    fn arb_state() -> impl Strategy<Value = GameState> {
        (
            1u32..60,
            1u32..300,
            0u32..400,
            0u32..=5,
            any::<bool>(),
            900u32..2000,
            0.0f64..=0.35,
            0u32..8,
        )
            .prop_map(
                |(level, target, count, lives, locked, decay_ms, setback_chance, setback_max)| {
                    GameState {
                        level,
                        target,
                        count,
                        lives,
                        locked,
                        decay_ms,
                        setback_chance,
                        setback_max,
                    }
                },
            )
    }

    #[test]
    fn reaching_target_locks_and_schedules_advance() {
        let mut dice = ScriptedDice::new([0.5]);
        let step = increment(&state(1, 10, 9, 3), &mut dice);
        assert_eq!(step.state.count, 10);
        assert!(step.state.locked);
        assert!(step.has(|e| *e == Effect::Celebrate));
        assert!(step.has(|e| *e == Effect::Schedule(Deferred::AdvanceLevel)));
    }

    #[test]
    fn misclick_costs_a_point_and_skips_target_check() {
        let mut dice = ScriptedDice::new([0.0]);
        let step = increment(&state(3, 5, 5, 3), &mut dice);
        assert_eq!(step.state.count, 4);
        assert!(!step.state.locked);
        assert_eq!(step.effects, vec![Effect::Misclick, Effect::Pop]);
    }

    #[test]
    fn misclick_at_zero_stays_at_zero() {
        let mut dice = ScriptedDice::new([0.0]);
        let step = increment(&state(5, 10, 0, 3), &mut dice);
        assert_eq!(step.state.count, 0);
    }

    #[test]
    fn advance_unlocks_and_levels_up() {
        let mut locked = state(1, 10, 10, 3);
        locked.locked = true;
        let mut dice = ScriptedDice::new([0.0]);
        let step = advance(&locked, &mut dice);
        assert_eq!(step.state.level, 2);
        assert!(!step.state.locked);
        assert_eq!(step.state.count, 0);
        assert_eq!(step.state.target, 16);
        assert_eq!(step.state.decay_ms, 1320);
        assert!((step.state.setback_chance - 0.16).abs() < 1e-9);
        assert!(step.has(|e| *e == Effect::LevelUp { level: 2 }));
    }

    #[test]
    fn advance_without_lock_is_ignored() {
        let s = state(2, 20, 3, 3);
        let mut dice = ScriptedDice::always(0.99);
        assert!(advance(&s, &mut dice).is_noop(&s));
    }

    #[test]
    fn level_up_target_uses_new_level() {
        let mut dice = ScriptedDice::new([0.999_999]);
        let step = level_up(&state(3, 20, 20, 3), &mut dice);
        // level 4: range 20..=34
        assert_eq!(step.state.target, 34);
        assert_eq!(step.state.lives, 4);
    }

    #[test]
    fn decay_drains_count_before_lives() {
        let step = decay_tick(&state(1, 10, 2, 3));
        assert_eq!(step.state.count, 1);
        assert_eq!(step.state.lives, 3);
        assert_eq!(step.effects, vec![Effect::Pop]);
    }

    #[test]
    fn decay_at_zero_costs_a_life() {
        let step = decay_tick(&state(1, 10, 0, 3));
        assert_eq!(step.state.count, 0);
        assert_eq!(step.state.lives, 2);
        assert!(step.has(|e| *e == Effect::LifeLost { lives_left: 2 }));
        assert!(!step.has(|e| *e == Effect::GameOver));
    }

    #[test]
    fn last_life_triggers_game_over_and_reset() {
        let step = decay_tick(&state(4, 30, 0, 1));
        assert_eq!(step.state.lives, 0);
        assert!(step.has(|e| *e == Effect::GameOver));
        assert!(step.has(|e| *e == Effect::Schedule(Deferred::Reset)));
    }

    #[test]
    fn over_state_ignores_ticks_and_clicks() {
        let over = state(2, 20, 0, 0);
        let mut dice = ScriptedDice::new([0.0, 0.0]);
        assert!(decay_tick(&over).is_noop(&over));
        assert!(setback_tick(&over, &mut dice).is_noop(&over));
        assert!(increment(&over, &mut dice).is_noop(&over));
    }

    #[test]
    fn setback_hit_subtracts_rolled_amount() {
        let mut dice = ScriptedDice::new([0.01, 0.5]);
        let step = setback_tick(&state(1, 10, 6, 3), &mut dice);
        assert_eq!(step.state.count, 4);
        assert!(step.has(|e| *e == Effect::Setback { lost: 2 }));
    }

    #[test]
    fn setback_miss_changes_nothing() {
        let s = state(1, 10, 6, 3);
        let mut dice = ScriptedDice::new([0.5]);
        assert!(setback_tick(&s, &mut dice).is_noop(&s));
    }

    #[test]
    fn reset_returns_initial_shape() {
        let mut dice = ScriptedDice::new([0.5]);
        let step = reset(&mut dice);
        assert_eq!(step.state, state(1, 11, 0, 3));
    }

    #[test]
    fn ramp_saturates_after_many_levels() {
        let mut dice = ScriptedDice::always(0.99);
        let mut s = state(1, 10, 0, 3);
        for _ in 0..40 {
            s = level_up(&s, &mut dice).state;
        }
        assert_eq!(s.decay_ms, 900);
        assert!((s.setback_chance - 0.35).abs() < 1e-9);
        assert_eq!(s.lives, 5);
    }

    proptest! {
        #[test]
        fn increment_on_locked_state_is_identity(mut s in arb_state(), roll in 0.0f64..1.0) {
            s.locked = true;
            let mut dice = ScriptedDice::new([roll]);
            let step = increment(&s, &mut dice);
            prop_assert_eq!(step.state, s);
            prop_assert!(step.effects.is_empty());
        }

        #[test]
        fn decay_never_goes_negative(s in arb_state()) {
            let step = decay_tick(&s);
            if !s.locked && s.lives > 0 && s.count == 0 {
                prop_assert_eq!(step.state.lives, s.lives - 1);
                prop_assert_eq!(step.state.count, 0);
            } else if !s.locked && s.lives > 0 {
                prop_assert_eq!(step.state.count, s.count - 1);
                prop_assert_eq!(step.state.lives, s.lives);
            } else {
                prop_assert_eq!(step.state, s);
            }
        }

        #[test]
        fn game_over_always_schedules_reset(s in arb_state()) {
            let step = decay_tick(&s);
            if s.lives > 0 && step.state.lives == 0 {
                prop_assert!(step.has(|e| *e == Effect::GameOver));
                prop_assert!(step.has(|e| *e == Effect::Schedule(Deferred::Reset)));
            }
        }

        #[test]
        fn setback_never_goes_negative(s in arb_state(), a in 0.0f64..1.0, b in 0.0f64..1.0) {
            let mut dice = ScriptedDice::new([a, b]);
            let step = setback_tick(&s, &mut dice);
            prop_assert!(step.state.count <= s.count);
            if let Some(Effect::Setback { lost }) = step.effects.first() {
                prop_assert!(*lost >= 1 && *lost <= s.setback_max.max(1));
                prop_assert_eq!(step.state.count, s.count.saturating_sub(*lost));
            }
        }

        #[test]
        fn level_up_ramp_is_monotonic(
            s in arb_state(),
            rolls in proptest::collection::vec(0.0f64..1.0, 1..30),
        ) {
            let mut dice = ScriptedDice::new(rolls.clone());
            let mut current = s;
            for _ in 0..rolls.len() {
                let next = level_up(&current, &mut dice).state;
                prop_assert!(next.decay_ms <= current.decay_ms.max(900));
                prop_assert!(next.decay_ms >= 900);
                prop_assert!(next.setback_chance >= current.setback_chance);
                prop_assert!(next.setback_chance <= 0.35);
                prop_assert!(next.lives <= 5);
                prop_assert!(next.target >= 12 + 2 * next.level);
                prop_assert!(next.target <= 18 + 4 * next.level);
                current = next;
            }
        }
    }
}
