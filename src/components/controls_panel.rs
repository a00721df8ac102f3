use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_increment: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let increment_cb = {
        let cb = props.on_increment.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    // keydown on a focused button would otherwise double up with the window shortcut
    let swallow_keys = Callback::from(|e: KeyboardEvent| {
        if e.code() == "Space" || e.code() == "Enter" {
            e.prevent_default();
        }
    });
    html! {
        <div class="controls">
            <button id="inc" type="button" class="btn" onclick={increment_cb} onkeydown={swallow_keys.clone()}>{"Increment"}</button>
            <button id="reset" type="button" class="btn btn-ghost" onclick={reset_cb} onkeydown={swallow_keys}>{"Reset"}</button>
        </div>
    }
}
