use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct DumpEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DumpEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序執行 extract / transform / load，回傳寫出的檔案路徑
    ///
    /// 任何一步失敗都會中止，不會寫出部分結果。
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting channel file generation");

        // Extract
        let listing = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} services ({} transport stream IDs indexed)",
            listing.services.len(),
            listing.transport_stream_ids.len()
        );

        // Transform
        let file = self.pipeline.transform(listing).await?;
        tracing::info!(
            "Built channel file with {} channels in {} tuning spaces",
            file.channel_count(),
            file.categories().len()
        );

        // Load
        let output_path = self.pipeline.load(file).await?;
        tracing::info!("Wrote channel file: {}", output_path);

        Ok(output_path)
    }
}
