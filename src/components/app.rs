use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use yew::prelude::*;

use super::{
    controls_panel::ControlsPanel,
    country_label::CountryLabel,
    map_canvas::{MapCanvas, SharedMap},
    media_overlay::MediaOverlay,
};
use crate::config::AppConfig;
use crate::dispatch::{Effect, Inputs, Interaction, dispatch, on_media_response};
use crate::error::DataJoinError;
use crate::map::RenderedMap;
use crate::media;
use crate::model::FetchMode;
use crate::overlay::OverlayState;
use crate::util::{cerror, clog};

#[derive(Clone, PartialEq)]
enum MapLoad {
    Loading,
    Ready(SharedMap),
    Failed(String),
}

async fn load_map(config: &AppConfig) -> Result<RenderedMap, DataJoinError> {
    let world = media::load_text("world geometry", &config.world_url).await?;
    let names = media::load_text("country names", &config.names_url).await?;
    RenderedMap::initialize(&world, &config.world_object, &names)
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_location());
    let map_load = use_state(|| MapLoad::Loading);
    let overlay = use_reducer(OverlayState::default);
    let token = use_state(String::new);
    let mode = use_state(FetchMode::default);
    let hovered = use_state_eq(|| None::<String>);
    let label = use_state_eq(|| None::<(String, f64, f64)>);
    let viewport = use_state_eq(|| (0.0_f64, 0.0_f64));
    let token_ref = use_node_ref();

    // Load geometry + names once; failure replaces the map with the error.
    {
        let config = config.clone();
        let map_load = map_load.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_map(&config).await {
                    Ok(map) => map_load.set(MapLoad::Ready(SharedMap(Rc::new(map)))),
                    Err(e) => {
                        cerror(&format!("map failed to render: {}", e));
                        map_load.set(MapLoad::Failed(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    // Executes every effect except fetches.
    let apply_effects: Callback<Vec<Effect>> = {
        let overlay = overlay.clone();
        let hovered = hovered.clone();
        let label = label.clone();
        let token_ref = token_ref.clone();
        Callback::from(move |effects: Vec<Effect>| {
            for effect in effects {
                match effect {
                    Effect::Overlay(action) => overlay.dispatch(action),
                    Effect::Highlight(id) => hovered.set(id),
                    Effect::ShowLabel { text, x, y } => label.set(Some((text, x, y))),
                    Effect::HideLabel => label.set(None),
                    Effect::FocusToken => {
                        if let Some(el) = token_ref.cast::<HtmlElement>() {
                            let _ = el.focus();
                        }
                    }
                    Effect::Alert(msg) => {
                        if let Some(win) = web_sys::window() {
                            let _ = win.alert_with_message(&msg);
                        }
                    }
                    Effect::Log(msg) => clog(&msg),
                    Effect::LogError(msg) => cerror(&msg),
                    Effect::Fetch(query) => cerror(&format!("unscheduled fetch: {:?}", query)),
                }
            }
        })
    };

    // Fetches run as detached tasks; the last response to arrive wins.
    let run_effects: Callback<Vec<Effect>> = {
        let apply = apply_effects.clone();
        let api_base = config.api_base.clone();
        Callback::from(move |effects: Vec<Effect>| {
            let (fetches, rest): (Vec<_>, Vec<_>) = effects
                .into_iter()
                .partition(|e| matches!(e, Effect::Fetch(_)));
            apply.emit(rest);
            for effect in fetches {
                let Effect::Fetch(query) = effect else {
                    continue;
                };
                let apply = apply.clone();
                let api_base = api_base.clone();
                spawn_local(async move {
                    let result = media::search(&api_base, &query).await;
                    apply.emit(on_media_response(&query, result, js_sys::Math::random()));
                });
            }
        })
    };

    let on_interaction = {
        let map_load = map_load.clone();
        let token = token.clone();
        let mode = mode.clone();
        let run = run_effects.clone();
        let label_offset = config.label_offset;
        Callback::from(move |interaction: Interaction| {
            let empty = RenderedMap::default();
            let map = match &*map_load {
                MapLoad::Ready(shared) => shared.0.as_ref(),
                _ => &empty,
            };
            let inputs = Inputs {
                token: &token,
                mode: *mode,
                label_offset,
            };
            run.emit(dispatch(map, interaction, &inputs));
        })
    };
    let on_close = {
        let cb = on_interaction.clone();
        Callback::from(move |_| cb.emit(Interaction::Close))
    };
    let on_token = {
        let token = token.clone();
        Callback::from(move |v: String| token.set(v))
    };
    let on_mode = {
        let mode = mode.clone();
        Callback::from(move |m: FetchMode| mode.set(m))
    };
    let on_resize = {
        let viewport = viewport.clone();
        Callback::from(move |size: (f64, f64)| viewport.set(size))
    };

    let surface = match &*map_load {
        MapLoad::Loading => html! {
            <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); opacity:0.7;">{"Loading map…"}</div>
        },
        MapLoad::Failed(msg) => html! {
            <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:#fff; border:2px solid #f85149; padding:16px 24px; border-radius:12px; max-width:520px;">
                <h3 style="margin:0 0 8px 0; color:#f85149;">{"Map unavailable"}</h3>
                <p style="margin:0; font-size:13px;">{ msg.clone() }</p>
            </div>
        },
        MapLoad::Ready(map) => html! {
            <MapCanvas
                map={map.clone()}
                hovered={(*hovered).clone()}
                zoom={config.zoom}
                margins={config.margins}
                on_interaction={on_interaction.clone()}
                on_resize={on_resize}
            />
        },
    };

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; overflow:hidden;">
            { surface }
            <MediaOverlay
                state={(*overlay).clone()}
                viewport={*viewport}
                margins={config.margins}
                on_close={on_close}
            />
            <CountryLabel label={(*label).clone()} />
            <ControlsPanel
                token={(*token).clone()}
                mode={*mode}
                token_ref={token_ref}
                on_token={on_token}
                on_mode={on_mode}
            />
        </div>
    }
}
