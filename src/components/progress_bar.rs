use crate::util::format_pct;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressBarProps {
    pub pct: f64,
}

#[function_component]
pub fn ProgressBar(props: &ProgressBarProps) -> Html {
    html! {
        <div class="progress" aria-hidden="true">
            <div class="progress-fill" id="progress" style={format!("width: {}", format_pct(props.pct))}></div>
        </div>
    }
}
