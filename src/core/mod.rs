pub mod channel_file;
pub mod classifier;
pub mod encoder;
pub mod engine;
pub mod grouper;
pub mod pipeline;
pub mod transport_index;

pub use crate::domain::model::{ChannelCategory, ChannelRecord, SourceListing, SourceService};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ScheduleSource, Storage};
pub use crate::utils::error::Result;
