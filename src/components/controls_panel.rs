use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::model::FetchMode;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub token: String,
    pub mode: FetchMode,
    pub token_ref: NodeRef,
    pub on_token: Callback<String>,
    pub on_mode: Callback<FetchMode>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let token_cb = {
        let cb = props.on_token.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    let mode_cb = {
        let cb = props.on_mode.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(mode) = FetchMode::from_value(&input.value()) {
                cb.emit(mode);
            }
        })
    };
    let radios = FetchMode::ALL.iter().map(|&mode| {
        let onchange = mode_cb.clone();
        html! {
            <label style="display:flex; align-items:center; gap:4px; cursor:pointer;">
                <input type="radio" name="shutterstockFetchType" value={mode.as_str()} checked={props.mode == mode} {onchange} />
                <span>{ mode.as_str() }</span>
            </label>
        }
    });
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(255,255,255,0.92); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:240px; display:flex; flex-direction:column; gap:6px; font-size:13px;">
        <label for="shutterstockToken" style="font-weight:600;">{"Shutterstock API Token"}</label>
        <input
            id="shutterstockToken"
            type="password"
            autocomplete="off"
            ref={props.token_ref.clone()}
            value={props.token.clone()}
            oninput={token_cb}
        />
        <div style="display:flex; gap:12px;">{ for radios }</div>
        <div style="font-size:11px; opacity:0.7;">{"Click a country to fetch a random preview."}</div>
    </div>}
}
