//! Timer Manager and deferred-action scheduler.
//!
//! Every task is registered under a `SessionToken`. Invalidating a token drops
//! the handles of all its tasks, which cancels them. The periodic decay and
//! setback tasks are additionally re-armed as a pair: `arm` always disarms
//! first, so at most one of each is ever alive.

use gloo_timers::callback::{Interval, Timeout};
use tracing::debug;

/// Turns callbacks into running timers. Dropping the handle cancels the timer.
pub trait TimerBackend {
    type Handle;

    fn interval(&self, ms: u32, callback: Box<dyn FnMut()>) -> Self::Handle;
    fn timeout(&self, ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setInterval` / `setTimeout` through gloo's cancel-on-drop wrappers.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

// held only so that dropping it clears the timer
#[allow(dead_code)]
pub enum BrowserHandle {
    Interval(Interval),
    Timeout(Timeout),
}

impl TimerBackend for BrowserTimers {
    type Handle = BrowserHandle;

    fn interval(&self, ms: u32, callback: Box<dyn FnMut()>) -> BrowserHandle {
        BrowserHandle::Interval(Interval::new(ms, callback))
    }

    fn timeout(&self, ms: u32, callback: Box<dyn FnOnce()>) -> BrowserHandle {
        BrowserHandle::Timeout(Timeout::new(ms, callback))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Decay,
    Setback,
    Deferred,
}

impl TaskKind {
    fn is_periodic(self) -> bool {
        matches!(self, TaskKind::Decay | TaskKind::Setback)
    }
}

struct Task<H> {
    token: SessionToken,
    kind: TaskKind,
    _handle: H,
}

pub struct Scheduler<B: TimerBackend> {
    backend: B,
    next_token: u64,
    tasks: Vec<Task<B::Handle>>,
}

impl<B: TimerBackend> Scheduler<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, next_token: 0, tasks: Vec::new() }
    }

    pub fn issue_token(&mut self) -> SessionToken {
        self.next_token += 1;
        SessionToken(self.next_token)
    }

    pub fn every(
        &mut self,
        token: SessionToken,
        kind: TaskKind,
        ms: u32,
        callback: impl FnMut() + 'static,
    ) {
        let handle = self.backend.interval(ms, Box::new(callback));
        self.tasks.push(Task { token, kind, _handle: handle });
    }

    pub fn after(&mut self, token: SessionToken, ms: u32, callback: impl FnOnce() + 'static) {
        let handle = self.backend.timeout(ms, Box::new(callback));
        self.tasks.push(Task { token, kind: TaskKind::Deferred, _handle: handle });
    }

    /// Starts the decay/setback pair, replacing whatever pair was running.
    pub fn arm(
        &mut self,
        token: SessionToken,
        decay_ms: u32,
        setback_ms: u32,
        on_decay: impl FnMut() + 'static,
        on_setback: impl FnMut() + 'static,
    ) {
        self.disarm();
        self.every(token, TaskKind::Decay, decay_ms, on_decay);
        self.every(token, TaskKind::Setback, setback_ms, on_setback);
        debug!(
            decay_ms,
            setback_ms,
            deferred = self.active(TaskKind::Deferred),
            "timers armed"
        );
    }

    pub fn disarm(&mut self) {
        self.tasks.retain(|t| !t.kind.is_periodic());
    }

    /// Cancels every task registered under `token`.
    pub fn invalidate(&mut self, token: SessionToken) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.token != token);
        before - self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn active(&self, kind: TaskKind) -> usize {
        self.tasks.iter().filter(|t| t.kind == kind).count()
    }
}
