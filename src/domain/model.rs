use crate::core::transport_index::TransportStreamIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 廣播類別（調諧空間）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelCategory {
    Terrestrial,
    Bs,
    Cs,
    Sky,
    /// 上游回報的其他種別（例如 BS4K）
    Other(String),
}

impl ChannelCategory {
    /// 固定輸出順序：GR, BS, CS, SKY
    pub const CANONICAL_ORDER: [ChannelCategory; 4] = [
        ChannelCategory::Terrestrial,
        ChannelCategory::Bs,
        ChannelCategory::Cs,
        ChannelCategory::Sky,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::Terrestrial => "GR",
            Self::Bs => "BS",
            Self::Cs => "CS",
            Self::Sky => "SKY",
            Self::Other(label) => label,
        }
    }

    pub fn is_satellite(&self) -> bool {
        matches!(self, Self::Bs | Self::Cs | Self::Sky)
    }
}

impl From<String> for ChannelCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "GR" => Self::Terrestrial,
            "BS" => Self::Bs,
            "CS" => Self::Cs,
            "SKY" => Self::Sky,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ChannelCategory {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ChannelCategory> for String {
    fn from(value: ChannelCategory) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for ChannelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 與上游無關的服務資料，由 Mirakurun 或 EPGStation 的回應轉換而來
#[derive(Debug, Clone, PartialEq)]
pub struct SourceService {
    /// Mirakurun 與 EPGStation 共用的服務唯一 ID
    pub id: u64,
    pub name: String,
    pub half_width_name: Option<String>,
    pub category: ChannelCategory,
    pub service_id: u16,
    pub network_id: u16,
    pub transport_stream_id: Option<u16>,
    pub remote_control_key_id: Option<u16>,
    pub service_type: Option<u8>,
}

/// extract 階段的結果：要輸出的服務，以及由 Mirakurun 建立的 TSID 索引
#[derive(Debug, Clone, Default)]
pub struct SourceListing {
    pub services: Vec<SourceService>,
    pub transport_stream_ids: TransportStreamIndex,
}

/// channel file 中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub name: String,
    /// 分組時（排序前）的位置
    pub order_index: Option<usize>,
    pub remote_control_key_id: Option<u16>,
    pub service_type: u8,
    pub service_id: u16,
    pub network_id: u16,
    pub transport_stream_id: Option<u16>,
    pub enabled: bool,
}

impl ChannelRecord {
    /// 缺少或為 0 時以 service ID 代替
    pub fn effective_remote_control_key_id(&self) -> u16 {
        self.remote_control_key_id
            .filter(|&key| key > 0)
            .unwrap_or(self.service_id)
    }

    /// 缺少或為 0 時以最終序列中的位置代替
    pub fn effective_channel_index(&self, position: usize) -> usize {
        self.order_index
            .filter(|&index| index != 0)
            .unwrap_or(position)
    }
}
