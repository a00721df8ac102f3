//! Core data models for Counter Quest.
//! A session is one `GameState` plus the effects each transition hands to the UI.

use serde::{Deserialize, Serialize};

use crate::util::Dice;

pub const INITIAL_TARGET_MIN: u32 = 8;
pub const INITIAL_TARGET_MAX: u32 = 14;
pub const INITIAL_LIVES: u32 = 3;
pub const INITIAL_DECAY_MS: u32 = 1400;
pub const INITIAL_SETBACK_CHANCE: f64 = 0.14;
pub const SETBACK_MAX: u32 = 3;

pub const DECAY_FLOOR_MS: u32 = 900;
pub const DECAY_STEP_MS: u32 = 80;
pub const SETBACK_CHANCE_CAP: f64 = 0.35;
pub const SETBACK_CHANCE_STEP: f64 = 0.02;
pub const MAX_LIVES: u32 = 5;
pub const MISCLICK_PER_LEVEL: f64 = 0.01;
pub const MISCLICK_CAP: f64 = 0.08;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub level: u32,
    /// Count required to advance; rolled again on every level.
    pub target: u32,
    pub count: u32,
    pub lives: u32,
    /// Set between reaching the target and the deferred level advance.
    pub locked: bool,
    /// Interval between decay ticks.
    pub decay_ms: u32,
    /// Probability that a setback tick takes effect.
    pub setback_chance: f64,
    /// Inclusive upper bound of a single setback.
    pub setback_max: u32,
}

impl GameState {
    pub fn fresh(dice: &mut impl Dice) -> Self {
        Self {
            level: 1,
            target: dice.range(INITIAL_TARGET_MIN, INITIAL_TARGET_MAX),
            count: 0,
            lives: INITIAL_LIVES,
            locked: false,
            decay_ms: INITIAL_DECAY_MS,
            setback_chance: INITIAL_SETBACK_CHANCE,
            setback_max: SETBACK_MAX,
        }
    }

    /// Out of lives and waiting for the automatic reset.
    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    pub fn misclick_chance(&self) -> f64 {
        (self.level as f64 * MISCLICK_PER_LEVEL).min(MISCLICK_CAP)
    }

    pub fn progress_pct(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        (self.count as f64 / self.target as f64 * 100.0).min(100.0)
    }
}

/// One-shot follow-ups a transition asks the session to run later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    AdvanceLevel,
    Reset,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// The count bubble changed and should replay its animation.
    Pop,
    Misclick,
    Celebrate,
    LevelUp { level: u32 },
    LifeLost { lives_left: u32 },
    GameOver,
    Setback { lost: u32 },
    Schedule(Deferred),
}

impl Effect {
    pub fn toast_text(&self) -> Option<String> {
        match self {
            Effect::Misclick => Some("Misclick! wasted".to_string()),
            Effect::Celebrate => Some("🎉 Target reached!".to_string()),
            Effect::LevelUp { level } => Some(format!("Level up! Now level {}", level)),
            Effect::LifeLost { lives_left } => Some(format!("Life lost! {} left", lives_left)),
            Effect::GameOver => Some("💀 Game over — resetting...".to_string()),
            Effect::Setback { lost } => Some(format!("Oh no! -{}", lost)),
            Effect::Pop | Effect::Schedule(_) => None,
        }
    }
}

/// Result of a single engine transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub state: GameState,
    pub effects: Vec<Effect>,
}

impl Step {
    pub fn new(state: GameState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    pub fn unchanged(state: &GameState) -> Self {
        Self { state: state.clone(), effects: Vec::new() }
    }

    pub fn is_noop(&self, before: &GameState) -> bool {
        self.effects.is_empty() && self.state == *before
    }

    pub fn has(&self, pred: impl Fn(&Effect) -> bool) -> bool {
        self.effects.iter().any(pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::ScriptedDice;

    #[test]
    fn fresh_state_has_canonical_shape() {
        let mut dice = ScriptedDice::new([0.0]);
        let s = GameState::fresh(&mut dice);
        assert_eq!(s.level, 1);
        assert_eq!(s.target, 8);
        assert_eq!(s.count, 0);
        assert_eq!(s.lives, 3);
        assert!(!s.locked);
        assert_eq!(s.decay_ms, 1400);
        assert_eq!(s.setback_max, 3);
        assert!((s.setback_chance - 0.14).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_capped_at_hundred() {
        let mut dice = ScriptedDice::new([0.0]);
        let mut s = GameState::fresh(&mut dice);
        s.target = 10;
        s.count = 5;
        assert_eq!(s.progress_pct(), 50.0);
        s.count = 25;
        assert_eq!(s.progress_pct(), 100.0);
    }

    #[test]
    fn misclick_chance_ramps_then_caps() {
        let mut dice = ScriptedDice::new([0.0]);
        let mut s = GameState::fresh(&mut dice);
        assert!((s.misclick_chance() - 0.01).abs() < 1e-12);
        s.level = 30;
        assert!((s.misclick_chance() - 0.08).abs() < 1e-12);
    }

    #[test]
    fn toast_text_matches_effect() {
        assert_eq!(Effect::Setback { lost: 2 }.toast_text().as_deref(), Some("Oh no! -2"));
        assert_eq!(
            Effect::LifeLost { lives_left: 1 }.toast_text().as_deref(),
            Some("Life lost! 1 left")
        );
        assert_eq!(Effect::Pop.toast_text(), None);
        assert_eq!(Effect::Schedule(Deferred::Reset).toast_text(), None);
    }
}
