use super::{
    controls_panel::ControlsPanel, count_bubble::CountBubble, game_over_overlay::GameOverOverlay,
    header::Header, progress_bar::ProgressBar, stats_panel::StatsPanel, toast::Toast,
};
use crate::config::GameConfig;
use crate::session::{self, Frame, FrameSink, Input, Session};
use crate::state::{BoardAction, BoardState};
use crate::timers::BrowserTimers;
use crate::util::BrowserDice;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

type GameSession = Rc<RefCell<Session<BrowserTimers, BrowserDice>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: GameConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let board = {
        let toast_ms = props.config.toast_ms;
        use_reducer(move || BoardState::new(toast_ms))
    };
    let session = use_mut_ref(|| None::<GameSession>);

    let send = {
        let session = session.clone();
        Callback::from(move |input: Input| {
            let current = session.borrow().clone();
            if let Some(current) = current {
                session::dispatch(&current, input);
            }
        })
    };

    // Mount: start the session and bind the keyboard shortcuts
    {
        let session = session.clone();
        let dispatcher = board.dispatcher();
        let config = props.config.clone();
        let send = send.clone();
        use_effect_with((), move |_| {
            let sink: FrameSink = {
                let dispatcher = dispatcher.clone();
                Rc::new(move |frame: &Frame| dispatcher.dispatch(BoardAction::Frame(frame.clone())))
            };
            let started = Session::start(BrowserTimers, BrowserDice, config.clone(), sink);
            *session.borrow_mut() = Some(started);

            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if config.is_increment_key(&e.code()) {
                    e.prevent_default();
                    send.emit(Input::Increment);
                }
            }) as Box<dyn FnMut(_)>);
            let window = web_sys::window();
            let bound = window.as_ref().is_some_and(|w| {
                w.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                    .is_ok()
            });
            if !bound {
                warn!("keyboard shortcuts unavailable");
                dispatcher.dispatch(BoardAction::ShowToast {
                    text: "Keyboard shortcuts unavailable, use the buttons".to_string(),
                    duration_ms: Some(3000),
                });
            }

            move || {
                if let Some(w) = &window {
                    let _ = w.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
                if let Some(current) = session.borrow_mut().take() {
                    current.borrow_mut().shutdown();
                }
            }
        });
    }
    // Effect: hide the toast after its duration; a newer toast cancels the old timer
    {
        let dispatcher = board.dispatcher();
        use_effect_with(board.toast.clone(), move |toast| {
            let timeout = toast.as_ref().filter(|t| t.visible).map(|t| {
                let id = t.id;
                Timeout::new(t.duration_ms, move || {
                    dispatcher.dispatch(BoardAction::HideToast { id })
                })
            });
            move || drop(timeout)
        });
    }
    // Effect: end the celebration pulse
    {
        let dispatcher = board.dispatcher();
        let celebrate_ms = props.config.celebrate_ms;
        use_effect_with(board.celebrating, move |celebrating| {
            let timeout = celebrating.map(|id| {
                Timeout::new(celebrate_ms, move || {
                    dispatcher.dispatch(BoardAction::EndCelebration { id })
                })
            });
            move || drop(timeout)
        });
    }

    let on_increment = {
        let send = send.clone();
        Callback::from(move |_: ()| send.emit(Input::Increment))
    };
    let on_reset = {
        let send = send.clone();
        Callback::from(move |_: ()| send.emit(Input::Reset))
    };

    let Some(game) = board.game.clone() else {
        return html! {
            <div class="app"><div class="card">{"Loading..."}</div></div>
        };
    };
    let card_class = classes!("card", board.celebrating.is_some().then_some("celebrate"));

    html! {
        <div class="app">
            <div class={card_class}>
                <Header />
                <StatsPanel level={game.level} target={game.target} lives={game.lives} />
                <CountBubble count={game.count} pop_seq={board.pop_seq} misclicked={board.misclicked} />
                <ProgressBar pct={board.progress_pct()} />
                <ControlsPanel on_increment={on_increment} on_reset={on_reset.clone()} />
                <Toast note={board.toast.clone()} />
                <GameOverOverlay show={board.is_over()} level={game.level} restart={on_reset} />
                <div class="footer">{"Press Space/Enter to increment • Watch out for decay and setbacks!"}</div>
            </div>
        </div>
    }
}
