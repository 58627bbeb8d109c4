use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let rs = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; left:12px; bottom:12px; background:rgba(255,255,255,0.9); border:1px solid #30363d; border-radius:8px; padding:6px; display:flex; gap:6px; align-items:center;">
        <button title="Zoom out" onclick={zo}> {"-"} </button>
        <button title="Zoom in" onclick={zi}> {"+"} </button>
        <span style="width:6px;"></span>
        <button onclick={rs}> {"Reset"} </button>
    </div>}
}
