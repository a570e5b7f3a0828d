use crate::config::DriverType;
use crate::core::channel_file::ChannelFile;
use crate::domain::model::SourceListing;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn driver_type(&self) -> DriverType;
    fn output_path(&self) -> &str;
    fn mirakurun_endpoint(&self) -> &str;
    fn epgstation_endpoint(&self) -> &str;
    fn request_headers(&self) -> &[(String, String)];
    fn normalize_names(&self) -> bool;
    fn strip_disabled(&self) -> bool;
    fn schedule_days(&self) -> u32;
}

/// 回答「該頻道在預覽期間內是否有節目」
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn has_upcoming_programs(&self, channel_id: u64) -> Result<bool>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceListing>;
    async fn transform(&self, listing: SourceListing) -> Result<ChannelFile>;
    async fn load(&self, file: ChannelFile) -> Result<String>;
}
