use crate::config::toml_config::FileConfig;
use crate::config::{
    endpoint_url, parse_request_header, DriverType, RunConfig, DEFAULT_EPGSTATION_PORT,
    DEFAULT_HOST, DEFAULT_MIRAKURUN_PORT, DEFAULT_SCHEDULE_DAYS, DEFAULT_SCHEME,
};
use crate::utils::error::{DumpError, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "dump-ch2")]
#[command(about = "Generate a BonDriver channel file (.ch2) from Mirakurun, mirakc or EPGStation")]
pub struct CliConfig {
    #[arg(
        short = 't',
        long = "type",
        help = "BonDriver_Mirakurun, BonDriver_mirakc or BonDriver_EPGStation"
    )]
    pub driver_type: Option<String>,

    #[arg(short, long, help = "Output path (default: <type>.ch2)")]
    pub output: Option<String>,

    #[arg(short, long, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Mirakurun/mirakc scheme [default: http]")]
    pub mirakurun_scheme: Option<String>,

    #[arg(long, help = "Mirakurun/mirakc address [default: 127.0.0.1]")]
    pub mirakurun_host: Option<String>,

    #[arg(long, help = "Mirakurun/mirakc port [default: 40772]")]
    pub mirakurun_port: Option<u16>,

    #[arg(long, help = "EPGStation scheme [default: http]")]
    pub epgstation_scheme: Option<String>,

    #[arg(long, help = "EPGStation address [default: 127.0.0.1]")]
    pub epgstation_host: Option<String>,

    #[arg(long, help = "EPGStation port [default: 8888]")]
    pub epgstation_port: Option<u16>,

    #[arg(short = 'H', long = "header", help = "Extra request header, 'Name: value'")]
    pub headers: Vec<String>,

    #[arg(short, long, help = "Normalize service names (full-width to half-width)")]
    pub normalize: bool,

    #[arg(short, long, help = "Disable services without upcoming programs")]
    pub strip: bool,

    #[arg(long, help = "Schedule lookahead in days for --strip [default: 7]")]
    pub schedule_days: Option<u32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併命令列、設定檔與預設值（命令列 > 設定檔 > 預設值）
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let raw_type = self
            .driver_type
            .as_deref()
            .or(file.driver_type.as_deref())
            .ok_or_else(|| DumpError::config("BonDriver type is required (--type)"))?;
        let driver_type: DriverType = raw_type.parse()?;

        let output_path = self
            .output
            .clone()
            .or_else(|| file.output.clone())
            .unwrap_or_else(|| driver_type.default_output_path());

        let mirakurun = file.mirakurun.clone().unwrap_or_default();
        let mirakurun_endpoint = endpoint_url(
            self.mirakurun_scheme
                .as_deref()
                .or(mirakurun.scheme.as_deref())
                .unwrap_or(DEFAULT_SCHEME),
            self.mirakurun_host
                .as_deref()
                .or(mirakurun.host.as_deref())
                .unwrap_or(DEFAULT_HOST),
            self.mirakurun_port
                .or(mirakurun.port)
                .unwrap_or(DEFAULT_MIRAKURUN_PORT),
        );

        let epgstation = file.epgstation.clone().unwrap_or_default();
        let epgstation_endpoint = endpoint_url(
            self.epgstation_scheme
                .as_deref()
                .or(epgstation.scheme.as_deref())
                .unwrap_or(DEFAULT_SCHEME),
            self.epgstation_host
                .as_deref()
                .or(epgstation.host.as_deref())
                .unwrap_or(DEFAULT_HOST),
            self.epgstation_port
                .or(epgstation.port)
                .unwrap_or(DEFAULT_EPGSTATION_PORT),
        );

        let mut request_headers = file.request_headers();
        for raw in &self.headers {
            request_headers.push(parse_request_header(raw)?);
        }

        Ok(RunConfig {
            driver_type,
            output_path,
            mirakurun_endpoint,
            epgstation_endpoint,
            request_headers,
            normalize_names: self.normalize || file.normalize.unwrap_or(false),
            strip_disabled: self.strip || file.strip.unwrap_or(false),
            schedule_days: self
                .schedule_days
                .or(file.schedule_days())
                .unwrap_or(DEFAULT_SCHEDULE_DAYS),
        })
    }
}
