use crate::adapters::{api_url, fetch_json, get};
use crate::domain::model::{ChannelCategory, SourceService};
use crate::domain::ports::ScheduleSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// `GET /api/channels` 的一筆資料
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpgStationChannel {
    pub id: u64,
    pub service_id: u16,
    pub network_id: u16,
    pub name: String,
    #[serde(default)]
    pub half_width_name: String,
    pub channel_type: ChannelCategory,
    #[serde(default)]
    pub channel: String,
    #[serde(default, rename = "type")]
    pub service_type: Option<u8>,
    #[serde(default)]
    pub remote_control_key_id: Option<u16>,
}

impl From<EpgStationChannel> for SourceService {
    fn from(channel: EpgStationChannel) -> Self {
        SourceService {
            id: channel.id,
            name: channel.name,
            half_width_name: Some(channel.half_width_name).filter(|name| !name.is_empty()),
            category: channel.channel_type,
            service_id: channel.service_id,
            network_id: channel.network_id,
            // EPGStation 不提供 TSID，之後由 Mirakurun 的索引補上
            transport_stream_id: None,
            remote_control_key_id: channel.remote_control_key_id,
            service_type: channel.service_type,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpgStationProgram {
    pub id: u64,
    pub channel_id: u64,
    pub start_at: i64,
    pub end_at: i64,
    pub name: String,
}

/// `GET /api/schedules/{channelId}` 的一筆資料
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EpgStationSchedule {
    pub programs: Vec<EpgStationProgram>,
}

/// EPGStation 的 API client
pub struct EpgStationClient {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
    schedule_days: u32,
}

impl EpgStationClient {
    pub fn new(client: Client, base_url: Url, headers: HeaderMap, schedule_days: u32) -> Self {
        Self {
            client,
            base_url,
            headers,
            schedule_days,
        }
    }

    pub async fn get_channels(&self) -> Result<Vec<EpgStationChannel>> {
        let url = api_url(&self.base_url, &["api", "channels"])?;
        tracing::info!("Fetching EPGStation channels: {}", url);

        let channels: Vec<EpgStationChannel> = fetch_json(
            get(&self.client, &url, &self.headers),
            "EPGStation channels",
            &url,
        )
        .await?;

        tracing::debug!("Received {} channels from EPGStation", channels.len());
        Ok(channels)
    }

    /// 從現在起 `schedule_days` 天內的節目表
    pub async fn get_channel_schedules(&self, channel_id: u64) -> Result<Vec<EpgStationSchedule>> {
        let channel = channel_id.to_string();
        let mut url = api_url(&self.base_url, &["api", "schedules", channel.as_str()])?;
        url.query_pairs_mut()
            .append_pair("startAt", &chrono::Utc::now().timestamp_millis().to_string())
            .append_pair("days", &self.schedule_days.to_string())
            .append_pair("isHalfWidth", "true");
        tracing::info!("Fetching EPGStation schedules for channel {}: {}", channel_id, url);

        fetch_json(
            get(&self.client, &url, &self.headers),
            "EPGStation schedules",
            &url,
        )
        .await
    }
}

#[async_trait]
impl ScheduleSource for EpgStationClient {
    async fn has_upcoming_programs(&self, channel_id: u64) -> Result<bool> {
        let schedules = self.get_channel_schedules(channel_id).await?;
        Ok(schedules.iter().any(|schedule| !schedule.programs.is_empty()))
    }
}
