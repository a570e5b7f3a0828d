use crate::utils::error::{DumpError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// `--config` 指定的 TOML 設定檔；所有欄位皆為選填，命令列參數優先
///
/// ```toml
/// type = "BonDriver_mirakc"
/// output = "C:/TVTest/BonDriver_mirakc.ch2"
/// normalize = true
///
/// [mirakurun]
/// host = "192.168.1.10"
///
/// [headers]
/// Authorization = "Bearer ${MIRAKC_TOKEN}"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "type")]
    pub driver_type: Option<String>,
    pub output: Option<String>,
    pub normalize: Option<bool>,
    pub strip: Option<bool>,
    pub mirakurun: Option<EndpointConfig>,
    pub epgstation: Option<EndpointConfig>,
    pub headers: Option<BTreeMap<String, String>>,
    pub schedules: Option<ScheduleConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    pub days: Option<u32>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| DumpError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| DumpError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${API_KEY})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| DumpError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 設定檔中的 header，依名稱排序
    pub fn request_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .flatten()
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect()
    }

    pub fn schedule_days(&self) -> Option<u32> {
        self.schedules.as_ref().and_then(|schedules| schedules.days)
    }
}
