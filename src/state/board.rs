// What the view shows, folded from session frames.
use std::rc::Rc;
use yew::Reducible;

use crate::model::{Effect, GameState};
use crate::session::Frame;

#[derive(Clone, Debug, PartialEq)]
pub struct ToastNote {
    pub id: u64,
    pub text: String,
    pub duration_ms: u32,
    /// Cleared by the hide timer; the text stays so it can fade out.
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardState {
    pub game: Option<GameState>,
    pub toast: Option<ToastNote>,
    /// Id of the running celebration pulse, if any.
    pub celebrating: Option<u64>,
    /// Bumped on every count change; keys the bubble so its animation replays.
    pub pop_seq: u64,
    /// The latest frame was a misclick.
    pub misclicked: bool,
    pub default_toast_ms: u32,
    next_id: u64,
}

impl BoardState {
    pub fn new(default_toast_ms: u32) -> Self {
        Self {
            game: None,
            toast: None,
            celebrating: None,
            pop_seq: 0,
            misclicked: false,
            default_toast_ms,
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn show_toast(&mut self, text: String, duration_ms: u32) {
        let id = self.next_id();
        self.toast = Some(ToastNote { id, text, duration_ms, visible: true });
    }

    pub fn progress_pct(&self) -> f64 {
        self.game.as_ref().map(|g| g.progress_pct()).unwrap_or(0.0)
    }

    pub fn is_over(&self) -> bool {
        self.game.as_ref().is_some_and(|g| g.is_over())
    }
}

#[derive(Clone, Debug)]
pub enum BoardAction {
    Frame(Frame),
    ShowToast { text: String, duration_ms: Option<u32> },
    HideToast { id: u64 },
    EndCelebration { id: u64 },
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            BoardAction::Frame(frame) => {
                new.misclicked = false;
                for effect in &frame.effects {
                    match effect {
                        Effect::Pop => new.pop_seq += 1,
                        Effect::Misclick => new.misclicked = true,
                        Effect::Celebrate => new.celebrating = Some(new.next_id()),
                        _ => {}
                    }
                    // later toasts in the same frame replace earlier ones
                    if let Some(text) = effect.toast_text() {
                        let ms = new.default_toast_ms;
                        new.show_toast(text, ms);
                    }
                }
                if frame.full {
                    new.celebrating = None;
                }
                new.game = Some(frame.state);
            }
            BoardAction::ShowToast { text, duration_ms } => {
                let ms = duration_ms.unwrap_or(new.default_toast_ms);
                new.show_toast(text, ms);
            }
            BoardAction::HideToast { id } => match new.toast.as_mut() {
                Some(t) if t.id == id && t.visible => t.visible = false,
                _ => return self,
            },
            BoardAction::EndCelebration { id } => {
                if new.celebrating != Some(id) {
                    return self;
                }
                new.celebrating = None;
            }
        }
        Rc::new(new)
    }
}
