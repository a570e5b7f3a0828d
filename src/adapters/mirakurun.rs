use crate::adapters::{api_url, fetch_json, get};
use crate::domain::model::{ChannelCategory, SourceService};
use crate::utils::error::Result;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirakurunChannel {
    #[serde(rename = "type")]
    pub channel_type: ChannelCategory,
    #[serde(default)]
    pub channel: String,
}

/// `GET /api/services` 的一筆資料（只取用得到的欄位）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirakurunService {
    pub id: u64,
    pub service_id: u16,
    pub network_id: u16,
    #[serde(default)]
    pub transport_stream_id: Option<u16>,
    pub name: String,
    #[serde(default, rename = "type")]
    pub service_type: Option<u8>,
    #[serde(default)]
    pub remote_control_key_id: Option<u16>,
    pub channel: MirakurunChannel,
}

impl From<MirakurunService> for SourceService {
    fn from(service: MirakurunService) -> Self {
        SourceService {
            id: service.id,
            name: service.name,
            half_width_name: None,
            category: service.channel.channel_type,
            service_id: service.service_id,
            network_id: service.network_id,
            transport_stream_id: service.transport_stream_id,
            remote_control_key_id: service.remote_control_key_id,
            service_type: service.service_type,
        }
    }
}

/// Mirakurun / mirakc 的 API client
pub struct MirakurunClient {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
}

impl MirakurunClient {
    pub fn new(client: Client, base_url: Url, headers: HeaderMap) -> Self {
        Self {
            client,
            base_url,
            headers,
        }
    }

    pub async fn get_services(&self) -> Result<Vec<MirakurunService>> {
        let url = api_url(&self.base_url, &["api", "services"])?;
        tracing::info!("Fetching Mirakurun services: {}", url);

        let services: Vec<MirakurunService> = fetch_json(
            get(&self.client, &url, &self.headers),
            "Mirakurun services",
            &url,
        )
        .await?;

        tracing::debug!("Received {} services from Mirakurun", services.len());
        Ok(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DumpError;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer, headers: HeaderMap) -> MirakurunClient {
        MirakurunClient::new(
            Client::new(),
            Url::parse(&server.base_url()).unwrap(),
            headers,
        )
    }

    #[tokio::test]
    async fn test_get_services_decodes_listing() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {
                        "id": 3273601024u64,
                        "serviceId": 1024,
                        "networkId": 32736,
                        "transportStreamId": 32736,
                        "name": "ＮＨＫ総合１・東京",
                        "type": 1,
                        "logoId": 0,
                        "remoteControlKeyId": 1,
                        "epgReady": true,
                        "epgUpdatedAt": 1700000000000u64,
                        "channel": { "type": "GR", "channel": "27" }
                    },
                    {
                        "id": 400101,
                        "serviceId": 101,
                        "networkId": 4,
                        "name": "ＮＨＫ　ＢＳ",
                        "channel": { "type": "BS", "channel": "BS15_0" }
                    }
                ]));
        });

        let services = client_for(&server, HeaderMap::new())
            .get_services()
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].transport_stream_id, Some(32736));
        assert_eq!(services[0].channel.channel_type, ChannelCategory::Terrestrial);
        assert_eq!(services[1].service_type, None);
        assert_eq!(services[1].remote_control_key_id, None);

        let source = SourceService::from(services[1].clone());
        assert_eq!(source.category, ChannelCategory::Bs);
        assert_eq!(source.id, 400101);
    }

    #[tokio::test]
    async fn test_request_headers_are_sent() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/services")
                .header("Authorization", "Basic dXNlcjpwYXNz");
            then.status(200).json_body(serde_json::json!([]));
        });

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Basic dXNlcjpwYXNz".parse().unwrap());
        let services = client_for(&server, headers).get_services().await.unwrap();

        api_mock.assert();
        assert!(services.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_is_upstream_fetch_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(503);
        });

        let err = client_for(&server, HeaderMap::new())
            .get_services()
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(
            err,
            DumpError::UpstreamFetch {
                operation: "Mirakurun services",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_upstream_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/services");
            then.status(200).body("not json");
        });

        let err = client_for(&server, HeaderMap::new())
            .get_services()
            .await
            .unwrap_err();
        assert!(matches!(err, DumpError::UpstreamFetch { .. }));
    }
}
