use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub level: u32,
    pub target: u32,
    pub lives: u32,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:6px;"; // icon | label | value
    let value_style = "font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div class="meta">
            <div class="level-badge">{ format!("Level {}", props.level) }</div>
            <div class="target" style={row_style}>
                <span>{"🎯"}</span>
                <span>{"Target:"}</span>
                <strong id="target" style={value_style}>{ props.target }</strong>
            </div>
            <div class="target" style={row_style}>
                <span style="color:#f85149;">{"❤"}</span>
                <span>{"Lives:"}</span>
                <strong id="lives" style={value_style}>{ props.lives }</strong>
            </div>
        </div>
    }
}
