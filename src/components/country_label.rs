use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CountryLabelProps {
    /// Text and page position; `None` hides the label.
    pub label: Option<(String, f64, f64)>,
}

#[function_component]
pub fn CountryLabel(props: &CountryLabelProps) -> Html {
    let Some((text, x, y)) = &props.label else {
        return html! {};
    };
    html! {
        <div class="countryLabel" style={format!("position:absolute; left:{}px; top:{}px; pointer-events:none; background:rgba(0,0,0,0.8); color:#fff; padding:2px 8px; border-radius:4px; font-size:13px; white-space:nowrap;", x, y)}>
            { text.clone() }
        </div>
    }
}
