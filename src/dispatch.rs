//! Interaction dispatch: pointer and close events in, effects out.
//! Nothing here touches the DOM; the Yew layer executes the returned effects.

use crate::error::MediaError;
use crate::map::RenderedMap;
use crate::model::{FetchMode, MediaQuery, SearchResponse};
use crate::overlay::{OverlayAction, OverlayContent};

/// Pointer position on the map surface plus the country under it, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub target_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    Hover(PointerEvent),
    HoverOut,
    Click(PointerEvent),
    Close,
}

/// Current values of the page inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct Inputs<'a> {
    pub token: &'a str,
    pub mode: FetchMode,
    pub label_offset: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Overlay(OverlayAction),
    Fetch(MediaQuery),
    Highlight(Option<String>),
    ShowLabel { text: String, x: f64, y: f64 },
    HideLabel,
    FocusToken,
    Alert(String),
    Log(String),
    LogError(String),
}

pub fn dispatch(map: &RenderedMap, interaction: Interaction, inputs: &Inputs<'_>) -> Vec<Effect> {
    match interaction {
        Interaction::Hover(ev) => on_hover(map, ev, inputs),
        Interaction::HoverOut => vec![Effect::Highlight(None), Effect::HideLabel],
        Interaction::Click(ev) => on_click(map, ev, inputs),
        Interaction::Close => on_close(inputs),
    }
}

fn on_hover(map: &RenderedMap, ev: PointerEvent, inputs: &Inputs<'_>) -> Vec<Effect> {
    match ev.target_id.as_deref().and_then(|id| map.get(id)) {
        Some(country) => vec![
            Effect::Highlight(Some(country.id.clone())),
            Effect::ShowLabel {
                text: country.name.clone(),
                x: ev.x + inputs.label_offset,
                y: ev.y,
            },
        ],
        None => vec![Effect::Highlight(None), Effect::HideLabel],
    }
}

fn on_click(map: &RenderedMap, ev: PointerEvent, inputs: &Inputs<'_>) -> Vec<Effect> {
    let Some(country) = ev.target_id.as_deref().and_then(|id| map.get(id)) else {
        return Vec::new();
    };
    let mut effects = on_close(inputs);
    match MediaQuery::new(&country.name, inputs.token, inputs.mode) {
        Some(query) => {
            effects.push(Effect::Log(format!(
                "searching {}s for {}",
                query.mode, query.country_name
            )));
            effects.push(Effect::Fetch(query));
        }
        None => effects.push(Effect::Overlay(OverlayAction::Show(OverlayContent::prompt()))),
    }
    effects
}

fn on_close(inputs: &Inputs<'_>) -> Vec<Effect> {
    let mut effects = vec![Effect::Overlay(OverlayAction::Clear)];
    if inputs.token.trim().is_empty() {
        effects.push(Effect::FocusToken);
    }
    effects
}

/// Continuation of a `Fetch` effect. `r` in [0, 1) selects the item.
pub fn on_media_response(
    query: &MediaQuery,
    result: Result<SearchResponse, MediaError>,
    r: f64,
) -> Vec<Effect> {
    let failure = match result {
        Ok(response) => {
            match OverlayContent::from_response(&query.country_name, query.mode, &response, r) {
                Ok(content) => return vec![Effect::Overlay(OverlayAction::Show(content))],
                Err(e) => e,
            }
        }
        Err(e) => e,
    };
    let mut effects = vec![Effect::LogError(format!(
        "{} search for {} failed: {}",
        query.mode, query.country_name, failure
    ))];
    if let Some(text) = failure.status_text() {
        effects.push(Effect::Alert(text.to_string()));
        if failure.is_unauthorized() {
            effects.push(Effect::FocusToken);
        }
    }
    effects
}
