use crate::state::ToastNote;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ToastProps {
    pub note: Option<ToastNote>,
}

/// Live region for short status messages. Hiding only drops the `show`
/// class so the last text fades out instead of vanishing.
#[function_component]
pub fn Toast(props: &ToastProps) -> Html {
    let (text, visible) = match &props.note {
        Some(note) => (note.text.clone(), note.visible),
        None => (String::new(), false),
    };
    html! {
        <div id="toast" class={classes!("toast", visible.then_some("show"))} aria-live="polite">{ text }</div>
    }
}
