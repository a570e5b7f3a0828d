use crate::adapters::epgstation::EpgStationClient;
use crate::adapters::mirakurun::MirakurunClient;
use crate::adapters::{build_header_map, parse_base_url};
use crate::config::DriverType;
use crate::core::channel_file::ChannelFile;
use crate::core::classifier::classify_service;
use crate::core::grouper::{group_services, GroupedService};
use crate::core::transport_index::TransportStreamIndex;
use crate::core::{ConfigProvider, Pipeline, ScheduleSource, Storage};
use crate::domain::model::{ChannelRecord, SourceListing, SourceService};
use crate::utils::error::Result;
use reqwest::Client;

/// transform 階段使用的選項
#[derive(Debug, Clone, Copy)]
pub struct RecordOptions {
    pub driver_type: DriverType,
    pub normalize_names: bool,
    pub strip_disabled: bool,
}

pub struct ChannelPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    mirakurun: MirakurunClient,
    epgstation: EpgStationClient,
}

impl<S: Storage, C: ConfigProvider> ChannelPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let headers = build_header_map(config.request_headers())?;
        let client = Client::new();

        let mirakurun = MirakurunClient::new(
            client.clone(),
            parse_base_url("mirakurun", config.mirakurun_endpoint())?,
            headers.clone(),
        );
        let epgstation = EpgStationClient::new(
            client,
            parse_base_url("epgstation", config.epgstation_endpoint())?,
            headers,
            config.schedule_days(),
        );

        Ok(Self {
            storage,
            config,
            mirakurun,
            epgstation,
        })
    }

    fn record_options(&self) -> RecordOptions {
        RecordOptions {
            driver_type: self.config.driver_type(),
            normalize_names: self.config.normalize_names(),
            strip_disabled: self.config.strip_disabled(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ChannelPipeline<S, C> {
    async fn extract(&self) -> Result<SourceListing> {
        // TSID 索引一律由 Mirakurun 的服務列表建立
        let mirakurun_services: Vec<SourceService> = self
            .mirakurun
            .get_services()
            .await?
            .into_iter()
            .map(SourceService::from)
            .collect();
        let transport_stream_ids = TransportStreamIndex::build(&mirakurun_services);
        tracing::debug!(
            "Indexed {} transport stream IDs",
            transport_stream_ids.len()
        );

        let services = if self.config.driver_type().reads_epgstation_channels() {
            self.epgstation
                .get_channels()
                .await?
                .into_iter()
                .map(SourceService::from)
                .collect()
        } else {
            mirakurun_services
        };

        Ok(SourceListing {
            services,
            transport_stream_ids,
        })
    }

    async fn transform(&self, listing: SourceListing) -> Result<ChannelFile> {
        build_channel_file(listing, self.record_options(), &self.epgstation).await
    }

    async fn load(&self, file: ChannelFile) -> Result<String> {
        let path = self.config.output_path().to_string();
        file.write(&self.storage, &path).await?;

        tracing::debug!("Wrote {} channels to {}", file.channel_count(), path);
        Ok(path)
    }
}

/// 分組、排序、分類後累積到 channel file
pub async fn build_channel_file<T: ScheduleSource + ?Sized>(
    listing: SourceListing,
    options: RecordOptions,
    schedules: &T,
) -> Result<ChannelFile> {
    let mut file = ChannelFile::new();

    for group in group_services(listing.services) {
        tracing::debug!(
            "Processing {} services in {}",
            group.services.len(),
            group.category
        );

        for entry in group.services {
            let record =
                resolve_record(entry, &listing.transport_stream_ids, options, schedules).await?;
            file.add_channel(group.category.clone(), record);
        }
    }

    Ok(file)
}

/// 決定一行的所有欄位；只有可播放的服務才會查詢節目表
pub async fn resolve_record<T: ScheduleSource + ?Sized>(
    entry: GroupedService,
    transport_stream_ids: &TransportStreamIndex,
    options: RecordOptions,
    schedules: &T,
) -> Result<ChannelRecord> {
    let service = entry.service;
    let classification = classify_service(&service.name, service.service_type);

    let enabled = if !classification.playable {
        tracing::debug!(
            "Disabling {} (service type 0x{:02x})",
            service.name,
            classification.service_type
        );
        false
    } else if options.strip_disabled {
        let has_programs = schedules.has_upcoming_programs(service.id).await?;
        if !has_programs {
            tracing::debug!("Disabling {} (no upcoming programs)", service.name);
        }
        has_programs
    } else {
        true
    };

    let transport_stream_id = service
        .transport_stream_id
        .filter(|&tsid| tsid != 0)
        .or_else(|| transport_stream_ids.lookup(service.id));

    Ok(ChannelRecord {
        name: options
            .driver_type
            .display_name(&service, options.normalize_names),
        order_index: Some(entry.arrival_index),
        remote_control_key_id: service.remote_control_key_id,
        service_type: classification.service_type,
        service_id: service.service_id,
        network_id: service.network_id,
        transport_stream_id,
        enabled,
    })
}
