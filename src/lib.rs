pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::config::{DriverType, RunConfig};
pub use crate::core::{channel_file::ChannelFile, engine::DumpEngine, pipeline::ChannelPipeline};
pub use crate::utils::error::{DumpError, Result};
