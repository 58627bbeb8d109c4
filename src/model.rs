//! Core data models for the world media map.
//! Countries come from the startup data join; media types mirror the search API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longitude/latitude pair in degrees.
pub type LonLat = (f64, f64);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BBox {
    pub fn of_rings(rings: &[Vec<LonLat>]) -> Option<Self> {
        let mut points = rings.iter().flatten();
        let &(lon, lat) = points.next()?;
        let mut b = BBox {
            min_lon: lon,
            min_lat: lat,
            max_lon: lon,
            max_lat: lat,
        };
        for &(lon, lat) in points {
            b.min_lon = b.min_lon.min(lon);
            b.min_lat = b.min_lat.min(lat);
            b.max_lon = b.max_lon.max(lon);
            b.max_lat = b.max_lat.max(lat);
        }
        Some(b)
    }

    pub fn contains(&self, (lon, lat): LonLat) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Identifier from the geometry dataset, normalised (see `geo::names::normalize_id`).
    pub id: String,
    pub name: String,
    /// Closed rings; outer boundaries and holes alike, filled with the even-odd rule.
    pub rings: Vec<Vec<LonLat>>,
    pub bbox: Option<BBox>,
}

impl Country {
    pub fn new(id: String, name: String, rings: Vec<Vec<LonLat>>) -> Self {
        let bbox = BBox::of_rings(&rings);
        Self {
            id,
            name,
            rings,
            bbox,
        }
    }

    /// Even-odd containment over every ring.
    pub fn contains(&self, p: LonLat) -> bool {
        match self.bbox {
            Some(b) if b.contains(p) => {}
            _ => return false,
        }
        let mut inside = false;
        for ring in &self.rings {
            if ring.len() < 3 {
                continue;
            }
            let mut j = ring.len() - 1;
            for i in 0..ring.len() {
                let (xi, yi) = ring[i];
                let (xj, yj) = ring[j];
                if (yi > p.1) != (yj > p.1) && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi {
                    inside = !inside;
                }
                j = i;
            }
        }
        inside
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    #[default]
    Image,
    Video,
}

impl FetchMode {
    pub const ALL: [FetchMode; 2] = [FetchMode::Image, FetchMode::Video];

    pub fn as_str(self) -> &'static str {
        match self {
            FetchMode::Image => "image",
            FetchMode::Video => "video",
        }
    }

    pub fn from_value(v: &str) -> Option<Self> {
        match v.trim() {
            "image" => Some(FetchMode::Image),
            "video" => Some(FetchMode::Video),
            _ => None,
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One search, built at click time. The token lives only as long as the request.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaQuery {
    pub country_name: String,
    pub mode: FetchMode,
    pub token: String,
}

impl MediaQuery {
    /// `None` when the token is blank; that is a prompt, not a request.
    pub fn new(country_name: &str, token: &str, mode: FetchMode) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self {
            country_name: country_name.to_string(),
            mode,
            token: token.to_string(),
        })
    }

    /// `<base>/v2/{mode}s/search`, without the query string.
    pub fn endpoint(&self, api_base: &str) -> String {
        format!("{}/v2/{}s/search", api_base.trim_end_matches('/'), self.mode)
    }

    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Keep the token out of logs.
impl fmt::Debug for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaQuery")
            .field("country_name", &self.country_name)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

// ---------------- Search API payloads -----------------

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<MediaItem>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MediaItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assets: MediaAssets,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MediaAssets {
    pub preview: Option<ImagePreview>,
    pub preview_mp4: Option<VideoPreview>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ImagePreview {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VideoPreview {
    pub url: String,
}
