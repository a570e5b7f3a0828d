// Adapters layer: concrete implementations for external systems (HTTP APIs, local storage).

pub mod epgstation;
pub mod mirakurun;
pub mod storage;

use crate::utils::error::{DumpError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

/// 在 base URL 的路徑後面追加 segment（不會像 `Url::join` 一樣取代最後一段）
pub(crate) fn api_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DumpError::InvalidConfigValue {
            field: "endpoint".to_string(),
            value: base.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn parse_base_url(field: &str, endpoint: &str) -> Result<Url> {
    Url::parse(endpoint).map_err(|e| DumpError::InvalidConfigValue {
        field: field.to_string(),
        value: endpoint.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

/// `Name: value` 形式的額外 header 轉為 HeaderMap（前後空白會被去除）
pub fn build_header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();

    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| {
                DumpError::InvalidConfigValue {
                    field: "header".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
        let header_value =
            HeaderValue::from_str(value.trim()).map_err(|e| DumpError::InvalidConfigValue {
                field: "header".to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })?;
        map.append(header_name, header_value);
    }

    Ok(map)
}

/// 送出 GET 並將 JSON 回應解碼；連線失敗、非 2xx 與解碼失敗都視為上游錯誤
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    operation: &'static str,
    url: &Url,
) -> Result<T> {
    let to_error = |source: reqwest::Error| DumpError::UpstreamFetch {
        operation,
        url: url.to_string(),
        source,
    };

    let response = request.send().await.map_err(to_error)?;
    tracing::debug!("API response status: {}", response.status());

    response
        .error_for_status()
        .map_err(to_error)?
        .json::<T>()
        .await
        .map_err(to_error)
}

pub(crate) fn get(client: &Client, url: &Url, headers: &HeaderMap) -> RequestBuilder {
    client.get(url.clone()).headers(headers.clone())
}
