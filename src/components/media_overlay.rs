use yew::prelude::*;

use crate::geo::Margins;
use crate::overlay::{OverlayState, RenderedMedia};

#[derive(Properties, PartialEq, Clone)]
pub struct MediaOverlayProps {
    pub state: OverlayState,
    /// Size of the map area the overlay is laid out in.
    pub viewport: (f64, f64),
    pub margins: Margins,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn MediaOverlay(props: &MediaOverlayProps) -> Html {
    let Some(content) = props.state.content() else {
        return html! {};
    };
    let (vw, vh) = props.viewport;
    let frame = content.media.as_ref().map(|m| m.frame(vw, vh));
    let (close_x, close_y) = frame.map(|f| (f.x, f.y)).unwrap_or((20.0, 20.0));
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let media = match (&content.media, frame) {
        (Some(RenderedMedia::Image { url, width, height }), Some(f)) => html! {
            <img
                src={url.clone()}
                width={width.to_string()}
                height={height.to_string()}
                style={format!("position:absolute; left:{}px; top:{}px; pointer-events:auto;", f.x, f.y)}
            />
        },
        (Some(RenderedMedia::Video { url }), Some(f)) => html! {
            <div style={format!("position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; pointer-events:auto;", f.x, f.y, f.width, f.height)}>
                <video key={url.clone()} width="100%" height="100%" controls=true autoplay=true>
                    <source type="video/mp4" src={url.clone()} />
                </video>
            </div>
        },
        _ => html! {},
    };

    let m = props.margins;
    html! {
        <>
            <div style={format!("position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; pointer-events:none;", m.left, m.top, vw, vh)}>
                { media }
                <button
                    id="close"
                    onclick={close_cb}
                    style={format!("position:absolute; left:{}px; top:{}px; pointer-events:auto; font-weight:700; border-radius:50%; width:28px; height:28px;", close_x, close_y)}
                >{"✕"}</button>
            </div>
            <div id="desc" style="position:absolute; left:50%; bottom:12px; transform:translateX(-50%); background:rgba(0,0,0,0.8); color:#fff; padding:6px 14px; border-radius:8px; font-size:15px; max-width:80%; text-align:center;">
                { content.caption.clone() }
            </div>
        </>
    }
}
