use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub level: u32,
    pub restart: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_: MouseEvent| restart_cb.emit(()));
    html! {
        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); border-radius:inherit;">
            <div style="background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:20px 28px; border-radius:12px; text-align:center; min-width:240px;">
                <h2 style="margin:0 0 12px 0; color:#f85149;">{"Game Over"}</h2>
                <p style="margin:4px 0;">{ format!("Reached level {}", props.level) }</p>
                <p style="margin:4px 0; opacity:0.7; font-size:12px;">{"Starting over in a moment..."}</p>
                <div style="margin-top:16px; display:flex; justify-content:center;">
                    <button type="button" class="btn" onclick={restart_btn}>{"Restart now"}</button>
                </div>
            </div>
        </div>
    }
}
