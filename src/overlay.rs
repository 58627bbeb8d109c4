//! Media overlay state. At most one media element is ever shown.

use std::rc::Rc;
use yew::Reducible;

use crate::error::MediaError;
use crate::model::{FetchMode, MediaItem, SearchResponse};

pub const TOKEN_PROMPT: &str = "Please provide Shutterstock API Token";

#[derive(Clone, Debug, PartialEq)]
pub enum RenderedMedia {
    Image { url: String, width: u32, height: u32 },
    Video { url: String },
}

/// Placement of the media element (and the close control at its top-left corner), in px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RenderedMedia {
    pub fn from_item(item: &MediaItem, mode: FetchMode) -> Result<Self, MediaError> {
        match mode {
            FetchMode::Image => item
                .assets
                .preview
                .as_ref()
                .map(|p| RenderedMedia::Image {
                    url: p.url.clone(),
                    width: p.width,
                    height: p.height,
                }),
            FetchMode::Video => item
                .assets
                .preview_mp4
                .as_ref()
                .map(|p| RenderedMedia::Video { url: p.url.clone() }),
        }
        .ok_or(MediaError::MissingPreview(mode))
    }

    /// Images are centred at preview size; videos take 60% x 80% offset by 20% / 10%.
    pub fn frame(&self, viewport_w: f64, viewport_h: f64) -> Frame {
        match self {
            RenderedMedia::Image { width, height, .. } => {
                let (w, h) = (*width as f64, *height as f64);
                Frame {
                    x: (viewport_w - w) / 2.0,
                    y: (viewport_h - h) / 2.0,
                    width: w,
                    height: h,
                }
            }
            RenderedMedia::Video { .. } => Frame {
                x: viewport_w * 0.2,
                y: viewport_h * 0.1,
                width: viewport_w * 0.6,
                height: viewport_h * 0.8,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayContent {
    pub caption: String,
    pub media: Option<RenderedMedia>,
}

impl OverlayContent {
    pub fn prompt() -> Self {
        Self {
            caption: TOKEN_PROMPT.to_string(),
            media: None,
        }
    }

    /// Pick one item with `r` in [0, 1). Zero items yields a "no results" caption.
    pub fn from_response(
        country_name: &str,
        mode: FetchMode,
        response: &SearchResponse,
        r: f64,
    ) -> Result<Self, MediaError> {
        let Some(item) = pick(&response.data, r) else {
            return Ok(Self {
                caption: format!("{} - No results found", country_name),
                media: None,
            });
        };
        let media = RenderedMedia::from_item(item, mode)?;
        Ok(Self {
            caption: format!("{} - {}", country_name, item.description),
            media: Some(media),
        })
    }
}

pub fn pick<T>(items: &[T], r: f64) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let idx = (r.clamp(0.0, 1.0) * items.len() as f64).floor() as usize;
    items.get(idx.min(items.len() - 1))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OverlayState {
    #[default]
    Hidden,
    Shown(OverlayContent),
}

impl OverlayState {
    pub fn is_shown(&self) -> bool {
        matches!(self, OverlayState::Shown(_))
    }

    pub fn content(&self) -> Option<&OverlayContent> {
        match self {
            OverlayState::Shown(c) => Some(c),
            OverlayState::Hidden => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayAction {
    Clear,
    Show(OverlayContent),
}

impl Reducible for OverlayState {
    type Action = OverlayAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            OverlayAction::Clear => {
                if !self.is_shown() {
                    return self;
                }
                Rc::new(OverlayState::Hidden)
            }
            // Replaces any previous caption and media wholesale.
            OverlayAction::Show(content) => Rc::new(OverlayState::Shown(content)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImagePreview, MediaAssets, VideoPreview};

    fn video_item(desc: &str, url: &str) -> MediaItem {
        MediaItem {
            description: desc.into(),
            assets: MediaAssets {
                preview: None,
                preview_mp4: Some(VideoPreview { url: url.into() }),
            },
        }
    }

    fn image_item(desc: &str) -> MediaItem {
        MediaItem {
            description: desc.into(),
            assets: MediaAssets {
                preview: Some(ImagePreview {
                    url: format!("https://img/{desc}.jpg"),
                    width: 450,
                    height: 300,
                }),
                preview_mp4: None,
            },
        }
    }

    #[test]
    fn pick_is_uniform_and_bounded() {
        let items = [1, 2, 3, 4];
        assert_eq!(pick(&items, 0.0), Some(&1));
        assert_eq!(pick(&items, 0.49), Some(&2));
        assert_eq!(pick(&items, 0.999), Some(&4));
        assert_eq!(pick(&items, 1.0), Some(&4));
        assert_eq!(pick::<i32>(&[], 0.5), None);
    }

    #[test]
    fn caption_joins_name_and_description() {
        let resp = SearchResponse {
            data: vec![image_item("Louvre"), image_item("Eiffel")],
        };
        let c = OverlayContent::from_response("France", FetchMode::Image, &resp, 0.7).unwrap();
        assert_eq!(c.caption, "France - Eiffel");
        assert!(matches!(c.media, Some(RenderedMedia::Image { width: 450, .. })));
    }

    #[test]
    fn empty_results_show_caption_only() {
        let c = OverlayContent::from_response(
            "Nauru",
            FetchMode::Video,
            &SearchResponse::default(),
            0.3,
        )
        .unwrap();
        assert_eq!(c.caption, "Nauru - No results found");
        assert!(c.media.is_none());
    }

    #[test]
    fn missing_preview_for_mode_is_an_error() {
        let resp = SearchResponse {
            data: vec![video_item("Tokyo skyline", "https://v/1.mp4")],
        };
        assert_eq!(
            OverlayContent::from_response("Japan", FetchMode::Image, &resp, 0.0),
            Err(MediaError::MissingPreview(FetchMode::Image))
        );
    }

    #[test]
    fn frames_centre_images_and_inset_videos() {
        let img = RenderedMedia::Image {
            url: "u".into(),
            width: 400,
            height: 200,
        };
        assert_eq!(
            img.frame(1000.0, 800.0),
            Frame {
                x: 300.0,
                y: 300.0,
                width: 400.0,
                height: 200.0,
            }
        );
        let vid = RenderedMedia::Video { url: "v".into() };
        assert_eq!(
            vid.frame(1000.0, 500.0),
            Frame {
                x: 200.0,
                y: 50.0,
                width: 600.0,
                height: 400.0,
            }
        );
    }

    #[test]
    fn clear_is_idempotent_and_show_replaces() {
        let hidden = Rc::new(OverlayState::Hidden);
        let still = hidden.clone().reduce(OverlayAction::Clear);
        assert!(Rc::ptr_eq(&hidden, &still));

        let first = hidden.reduce(OverlayAction::Show(OverlayContent::prompt()));
        let second = first.reduce(OverlayAction::Show(OverlayContent {
            caption: "Japan - Tokyo skyline".into(),
            media: Some(RenderedMedia::Video { url: "v".into() }),
        }));
        assert_eq!(second.content().unwrap().caption, "Japan - Tokyo skyline");
        let cleared = second.reduce(OverlayAction::Clear);
        assert_eq!(*cleared, OverlayState::Hidden);
        assert_eq!(*cleared.clone().reduce(OverlayAction::Clear), OverlayState::Hidden);
    }
}
