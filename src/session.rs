//! The live game session.
//!
//! A `Session` owns the one `GameState`, the dice, the scheduler and the token
//! the current timers are registered under. Inputs arrive through `dispatch`
//! from the UI or from timer callbacks; each is applied to completion and the
//! resulting `Frame` is handed to the sink after the session borrow is released.
//!
//! Reset and level-up are full renders: the old token is invalidated (which
//! cancels the decay/setback pair and any pending deferred action) before the
//! state is replaced, and a fresh pair is armed after it is committed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::engine;
use crate::model::{Deferred, Effect, GameState, Step};
use crate::timers::{Scheduler, SessionToken, TimerBackend};
use crate::util::Dice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Increment,
    Reset,
    DecayTick,
    SetbackTick,
    Deferred { kind: Deferred, token: SessionToken },
}

/// What the UI receives after every committed transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub state: GameState,
    pub effects: Vec<Effect>,
    /// Reset or level-up: timers were re-armed for a new state.
    pub full: bool,
}

pub type FrameSink = Rc<dyn Fn(&Frame)>;

pub struct Session<B: TimerBackend, D: Dice> {
    state: GameState,
    dice: D,
    timers: Scheduler<B>,
    token: SessionToken,
    config: GameConfig,
    sink: FrameSink,
    this: Weak<RefCell<Self>>,
}

impl<B, D> Session<B, D>
where
    B: TimerBackend + 'static,
    D: Dice + 'static,
{
    pub fn start(backend: B, mut dice: D, config: GameConfig, sink: FrameSink) -> Rc<RefCell<Self>> {
        let state = GameState::fresh(&mut dice);
        Self::resume(backend, dice, state, config, sink)
    }

    /// Starts a session from an existing state and publishes the first frame.
    pub fn resume(
        backend: B,
        dice: D,
        state: GameState,
        config: GameConfig,
        sink: FrameSink,
    ) -> Rc<RefCell<Self>> {
        let session = Rc::new_cyclic(|this| {
            let mut timers = Scheduler::new(backend);
            let token = timers.issue_token();
            RefCell::new(Self { state, dice, timers, token, config, sink, this: this.clone() })
        });
        let (frame, sink) = {
            let mut s = session.borrow_mut();
            s.arm();
            info!(level = s.state.level, target = s.state.target, "session started");
            (s.frame(Vec::new(), true), s.sink.clone())
        };
        sink(&frame);
        session
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn token(&self) -> SessionToken {
        self.token
    }

    #[cfg(test)]
    pub fn timers(&self) -> &Scheduler<B> {
        &self.timers
    }

    /// Cancels every timer. Used when the view unmounts.
    pub fn shutdown(&mut self) {
        self.timers.clear();
        debug!("session shut down");
    }

    fn apply(&mut self, input: Input) -> Option<Frame> {
        let step = match input {
            Input::Increment => engine::increment(&self.state, &mut self.dice),
            Input::DecayTick => engine::decay_tick(&self.state),
            Input::SetbackTick => engine::setback_tick(&self.state, &mut self.dice),
            Input::Reset => {
                info!("manual reset");
                return Some(self.restart());
            }
            Input::Deferred { kind, token } => {
                if token != self.token {
                    debug!(?kind, "dropping deferred action from a replaced state");
                    return None;
                }
                match kind {
                    Deferred::AdvanceLevel => engine::advance(&self.state, &mut self.dice),
                    Deferred::Reset => {
                        info!("auto reset after game over");
                        return Some(self.restart());
                    }
                }
            }
        };
        if step.is_noop(&self.state) {
            return None;
        }
        Some(self.commit(step))
    }

    fn commit(&mut self, step: Step) -> Frame {
        let full = step.has(|e| matches!(e, Effect::LevelUp { .. }));
        if full {
            self.retire_token();
        }
        self.state = step.state;
        for effect in &step.effects {
            match effect {
                Effect::Schedule(kind) => self.defer(*kind),
                Effect::LevelUp { level } => info!(
                    level,
                    target = self.state.target,
                    decay_ms = self.state.decay_ms,
                    setback_chance = self.state.setback_chance,
                    "level up"
                ),
                Effect::GameOver => info!(level = self.state.level, "game over"),
                _ => {}
            }
        }
        if full {
            self.arm();
        }
        debug!(
            count = self.state.count,
            lives = self.state.lives,
            locked = self.state.locked,
            "transition committed"
        );
        self.frame(step.effects, full)
    }

    fn restart(&mut self) -> Frame {
        self.retire_token();
        let step = engine::reset(&mut self.dice);
        self.state = step.state;
        self.arm();
        info!(target = self.state.target, "game reset");
        self.frame(step.effects, true)
    }

    fn retire_token(&mut self) {
        let cancelled = self.timers.invalidate(self.token);
        self.token = self.timers.issue_token();
        debug!(cancelled, "timers for replaced state cancelled");
    }

    fn arm(&mut self) {
        let on_decay = Self::trigger(self.this.clone(), Input::DecayTick);
        let on_setback = Self::trigger(self.this.clone(), Input::SetbackTick);
        self.timers.arm(
            self.token,
            self.state.decay_ms,
            self.config.setback_interval_ms,
            on_decay,
            on_setback,
        );
    }

    fn defer(&mut self, kind: Deferred) {
        let ms = match kind {
            Deferred::AdvanceLevel => self.config.advance_delay_ms,
            Deferred::Reset => self.config.game_over_reset_ms,
        };
        let input = Input::Deferred { kind, token: self.token };
        let callback = Self::trigger(self.this.clone(), input);
        self.timers.after(self.token, ms, callback);
        debug!(?kind, ms, "deferred action scheduled");
    }

    fn trigger(this: Weak<RefCell<Self>>, input: Input) -> impl FnMut() + 'static {
        move || {
            if let Some(session) = this.upgrade() {
                dispatch(&session, input);
            }
        }
    }

    fn frame(&self, effects: Vec<Effect>, full: bool) -> Frame {
        Frame { state: self.state.clone(), effects, full }
    }
}

/// Applies one input and notifies the sink if anything changed.
pub fn dispatch<B, D>(session: &Rc<RefCell<Session<B, D>>>, input: Input)
where
    B: TimerBackend + 'static,
    D: Dice + 'static,
{
    let (frame, sink) = {
        let Ok(mut s) = session.try_borrow_mut() else {
            warn!(?input, "session busy, input dropped");
            return;
        };
        (s.apply(input), s.sink.clone())
    };
    if let Some(frame) = frame {
        sink(&frame);
    }
}
