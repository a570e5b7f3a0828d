use crate::domain::model::SourceService;
use std::collections::HashMap;

/// 服務唯一 ID → TSID 的對照表
///
/// EPGStation 的 API 不提供 TSID，因此先從 Mirakurun 的服務列表建立此索引，
/// 之後建立每一行時再查詢。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportStreamIndex {
    ids: HashMap<u64, u16>,
}

impl TransportStreamIndex {
    pub fn build(services: &[SourceService]) -> Self {
        let ids = services
            .iter()
            .filter_map(|service| match service.transport_stream_id {
                Some(tsid) if tsid != 0 => Some((service.id, tsid)),
                _ => None,
            })
            .collect();

        Self { ids }
    }

    pub fn lookup(&self, id: u64) -> Option<u16> {
        self.ids.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
