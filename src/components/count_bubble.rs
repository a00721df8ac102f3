use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CountBubbleProps {
    pub count: u32,
    pub pop_seq: u64,
    pub misclicked: bool,
}

#[function_component]
pub fn CountBubble(props: &CountBubbleProps) -> Html {
    // a new key remounts the bubble so the animation plays again
    let class = classes!(
        "count-bubble",
        (props.pop_seq > 0).then_some("pop"),
        props.misclicked.then_some("misclick")
    );
    html! {
        <div class="counter">
            <div key={props.pop_seq.to_string()} id="count" class={class}>{ props.count }</div>
        </div>
    }
}
