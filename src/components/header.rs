use yew::prelude::*;

#[function_component]
pub fn Header() -> Html {
    html! {
        <div class="header">
            <div class="icon" role="img" aria-label="logo">{"📎"}</div>
            <div>
                <div class="title">{"Counter Quest — Hard Mode"}</div>
                <div class="subtitle">{"Progress decays over time. Reach the target before you run out of lives!"}</div>
            </div>
        </div>
    }
}
