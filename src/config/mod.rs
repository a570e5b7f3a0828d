#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::build_header_map;
use crate::domain::model::SourceService;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DumpError, Result};
use crate::utils::normalize::normalize_service_name;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_MIRAKURUN_PORT: u16 = 40772;
pub const DEFAULT_EPGSTATION_PORT: u16 = 8888;
pub const DEFAULT_SCHEDULE_DAYS: u32 = 7;

/// 輸出對象的 BonDriver 種類，決定讀取哪個上游以及名稱正規化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverType {
    #[serde(rename = "BonDriver_Mirakurun")]
    Mirakurun,
    #[serde(rename = "BonDriver_mirakc")]
    Mirakc,
    #[serde(rename = "BonDriver_EPGStation")]
    EpgStation,
}

impl DriverType {
    pub const ALL: [DriverType; 3] = [Self::Mirakurun, Self::Mirakc, Self::EpgStation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mirakurun => "BonDriver_Mirakurun",
            Self::Mirakc => "BonDriver_mirakc",
            Self::EpgStation => "BonDriver_EPGStation",
        }
    }

    pub fn default_output_path(&self) -> String {
        format!("{}.ch2", self.as_str())
    }

    /// 是否以 EPGStation 的頻道列表為主（否則使用 Mirakurun 的服務列表）
    pub fn reads_epgstation_channels(&self) -> bool {
        matches!(self, Self::EpgStation)
    }

    /// 輸出用的名稱
    ///
    /// Mirakurun / mirakc 對 `name` 做 NFKC；EPGStation 對 `halfWidthName` 做 NFKC
    /// （沒有時退回 `name`）。
    pub fn display_name(&self, service: &SourceService, normalize: bool) -> String {
        if !normalize {
            return service.name.clone();
        }

        match self {
            Self::Mirakurun | Self::Mirakc => normalize_service_name(&service.name),
            Self::EpgStation => normalize_service_name(
                service.half_width_name.as_deref().unwrap_or(&service.name),
            ),
        }
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverType {
    type Err = DumpError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|driver| driver.as_str() == value.trim())
            .ok_or_else(|| {
                DumpError::config(format!(
                    "invalid BonDriver type '{}' (expected one of: {})",
                    value,
                    Self::ALL.map(|driver| driver.as_str()).join(", ")
                ))
            })
    }
}

pub fn endpoint_url(scheme: &str, host: &str, port: u16) -> String {
    format!("{}://{}:{}", scheme.trim(), host.trim(), port)
}

/// 解析 `Name: value` 形式的 header
pub fn parse_request_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| DumpError::InvalidConfigValue {
            field: "header".to_string(),
            value: raw.to_string(),
            reason: "expected 'Name: value'".to_string(),
        })?;

    validate_non_empty_string("header", name)?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// 一次執行所需的完整設定
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub driver_type: DriverType,
    pub output_path: String,
    pub mirakurun_endpoint: String,
    pub epgstation_endpoint: String,
    pub request_headers: Vec<(String, String)>,
    pub normalize_names: bool,
    pub strip_disabled: bool,
    pub schedule_days: u32,
}

impl RunConfig {
    pub fn new(driver_type: DriverType) -> Self {
        Self {
            driver_type,
            output_path: driver_type.default_output_path(),
            mirakurun_endpoint: endpoint_url(DEFAULT_SCHEME, DEFAULT_HOST, DEFAULT_MIRAKURUN_PORT),
            epgstation_endpoint: endpoint_url(
                DEFAULT_SCHEME,
                DEFAULT_HOST,
                DEFAULT_EPGSTATION_PORT,
            ),
            request_headers: Vec::new(),
            normalize_names: false,
            strip_disabled: false,
            schedule_days: DEFAULT_SCHEDULE_DAYS,
        }
    }
}

impl ConfigProvider for RunConfig {
    fn driver_type(&self) -> DriverType {
        self.driver_type
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn mirakurun_endpoint(&self) -> &str {
        &self.mirakurun_endpoint
    }

    fn epgstation_endpoint(&self) -> &str {
        &self.epgstation_endpoint
    }

    fn request_headers(&self) -> &[(String, String)] {
        &self.request_headers
    }

    fn normalize_names(&self) -> bool {
        self.normalize_names
    }

    fn strip_disabled(&self) -> bool {
        self.strip_disabled
    }

    fn schedule_days(&self) -> u32 {
        self.schedule_days
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_url("mirakurun", &self.mirakurun_endpoint)?;
        validate_url("epgstation", &self.epgstation_endpoint)?;
        validate_path("output", &self.output_path)?;
        validate_positive_number("schedule_days", self.schedule_days, 1)?;
        build_header_map(&self.request_headers)?;
        Ok(())
    }
}
