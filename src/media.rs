//! Network access: startup data loads and the media search request.

use gloo_net::http::{Request, Response};

use crate::error::{DataJoinError, MediaError};
use crate::model::{MediaQuery, SearchResponse};

/// GET `url` as text; any transport failure or non-2xx status is a load error.
pub async fn load_text(what: &'static str, url: &str) -> Result<String, DataJoinError> {
    let fail = |reason: String| DataJoinError::Load {
        what,
        url: url.to_string(),
        reason,
    };
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| fail(e.to_string()))?;
    if !resp.ok() {
        return Err(fail(format!("HTTP {} {}", resp.status(), resp.status_text())));
    }
    resp.text().await.map_err(|e| fail(e.to_string()))
}

/// One search request. No retries, no timeout beyond the browser's.
pub async fn search(api_base: &str, query: &MediaQuery) -> Result<SearchResponse, MediaError> {
    let encoded = js_sys::encode_uri_component(&query.country_name);
    let url = format!("{}?query={}", query.endpoint(api_base), String::from(encoded));
    let resp = Request::get(&url)
        .header("Authorization", &query.authorization())
        .send()
        .await
        .map_err(|e| MediaError::Network(e.to_string()))?;
    decode(resp).await
}

async fn decode(resp: Response) -> Result<SearchResponse, MediaError> {
    if !resp.ok() {
        return Err(MediaError::Http {
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }
    resp.json::<SearchResponse>()
        .await
        .map_err(|e| MediaError::Decode(e.to_string()))
}
