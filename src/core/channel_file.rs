use crate::core::encoder;
use crate::domain::model::{ChannelCategory, ChannelRecord};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::HashMap;

pub const HEADER_LINES: [&str; 2] = [
    "; TVTest チャンネル設定ファイル",
    "; 名称,チューニング空間,チャンネル,リモコン番号,サービスタイプ,サービスID,ネットワークID,TSID,状態",
];

/// BonDriver 用的 channel file (.ch2)
#[derive(Debug, Clone)]
pub struct ChannelFile {
    headers: Vec<String>,
    channels: HashMap<ChannelCategory, Vec<ChannelRecord>>,
}

impl Default for ChannelFile {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelFile {
    pub fn new() -> Self {
        Self {
            headers: HEADER_LINES.iter().map(|line| line.to_string()).collect(),
            channels: HashMap::new(),
        }
    }

    /// 附加到該類別的末尾，不做驗證也不去重
    pub fn add_channel(&mut self, category: ChannelCategory, record: ChannelRecord) {
        self.channels.entry(category).or_default().push(record);
    }

    pub fn channel_count(&self) -> usize {
        self.channels.values().map(Vec::len).sum()
    }

    /// 輸出順序：先 GR, BS, CS, SKY（有資料者），再依字典序排列其他類別
    pub fn categories(&self) -> Vec<&ChannelCategory> {
        let mut categories: Vec<&ChannelCategory> = ChannelCategory::CANONICAL_ORDER
            .iter()
            .filter_map(|category| self.channels.get_key_value(category).map(|(key, _)| key))
            .collect();

        let mut additional: Vec<&ChannelCategory> = self
            .channels
            .keys()
            .filter(|category| !ChannelCategory::CANONICAL_ORDER.contains(*category))
            .collect();
        additional.sort_by(|a, b| a.label().cmp(b.label()));

        categories.extend(additional);
        categories
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = self.headers.clone();

        for (tuning_space, category) in self.categories().into_iter().enumerate() {
            lines.push(format!(";#SPACE({},{})", tuning_space, category));

            let records = self.channels.get(category).map(Vec::as_slice).unwrap_or(&[]);
            for (position, record) in records.iter().enumerate() {
                lines.push(format!(
                    "{},{},{},{},{},{},{},{},{}",
                    record.name,
                    tuning_space,
                    record.effective_channel_index(position),
                    record.effective_remote_control_key_id(),
                    record.service_type,
                    record.service_id,
                    record.network_id,
                    record.transport_stream_id.unwrap_or(0),
                    u8::from(record.enabled),
                ));
            }
        }

        lines
    }

    /// 以 CRLF 連接並轉為 Shift_JIS
    pub fn encode(&self) -> Result<Vec<u8>> {
        encoder::encode_lines(&self.render())
    }

    /// 先完成編碼再寫入，編碼失敗時不會動到目標檔案
    pub async fn write<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let bytes = self.encode()?;
        tracing::debug!("Writing {} bytes to {}", bytes.len(), path);
        storage.write_file(path, &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, service_id: u16) -> ChannelRecord {
        ChannelRecord {
            name: name.to_string(),
            order_index: None,
            remote_control_key_id: None,
            service_type: 0x01,
            service_id,
            network_id: 4,
            transport_stream_id: None,
            enabled: true,
        }
    }

    fn section_markers(file: &ChannelFile) -> Vec<String> {
        file.render()
            .into_iter()
            .filter(|line| line.starts_with(";#SPACE"))
            .collect()
    }

    #[test]
    fn test_render_terrestrial_scenario() {
        let mut file = ChannelFile::new();
        file.add_channel(
            ChannelCategory::Terrestrial,
            ChannelRecord {
                name: "NHK総合".to_string(),
                order_index: Some(0),
                remote_control_key_id: None,
                service_type: 0x01,
                service_id: 101,
                network_id: 32736,
                transport_stream_id: None,
                enabled: true,
            },
        );

        assert_eq!(
            file.render(),
            vec![
                HEADER_LINES[0].to_string(),
                HEADER_LINES[1].to_string(),
                ";#SPACE(0,GR)".to_string(),
                "NHK総合,0,0,101,1,101,32736,0,1".to_string(),
            ]
        );
    }

    #[test]
    fn test_section_order_is_independent_of_insertion_order() {
        let mut file = ChannelFile::new();
        file.add_channel(ChannelCategory::from("NW2"), record("b", 2));
        file.add_channel(ChannelCategory::Sky, record("sky", 1));
        file.add_channel(ChannelCategory::from("BS4K"), record("a", 1));
        file.add_channel(ChannelCategory::Cs, record("cs", 1));
        file.add_channel(ChannelCategory::Terrestrial, record("gr", 1));
        file.add_channel(ChannelCategory::Bs, record("bs", 1));

        assert_eq!(
            section_markers(&file),
            vec![
                ";#SPACE(0,GR)",
                ";#SPACE(1,BS)",
                ";#SPACE(2,CS)",
                ";#SPACE(3,SKY)",
                ";#SPACE(4,BS4K)",
                ";#SPACE(5,NW2)",
            ]
        );
    }

    #[test]
    fn test_missing_categories_do_not_consume_tuning_space() {
        let mut file = ChannelFile::new();
        file.add_channel(ChannelCategory::Cs, record("cs", 1));
        file.add_channel(ChannelCategory::Bs, record("bs", 1));

        let lines = file.render();
        assert_eq!(lines[2], ";#SPACE(0,BS)");
        assert_eq!(lines[3], "bs,0,0,1,1,1,4,0,1");
        assert_eq!(lines[4], ";#SPACE(1,CS)");
        assert_eq!(lines[5], "cs,1,0,1,1,1,4,0,1");
    }

    #[test]
    fn test_data_line_columns() {
        let mut file = ChannelFile::new();
        file.add_channel(ChannelCategory::Bs, record("first", 101));
        file.add_channel(
            ChannelCategory::Bs,
            ChannelRecord {
                name: "WOWOWプライム".to_string(),
                order_index: Some(7),
                remote_control_key_id: Some(9),
                service_type: 0xa5,
                service_id: 191,
                network_id: 4,
                transport_stream_id: Some(16432),
                enabled: false,
            },
        );
        file.add_channel(ChannelCategory::Bs, record("third", 211));

        let lines = file.render();
        assert_eq!(lines[3], "first,0,0,101,1,101,4,0,1");
        assert_eq!(lines[4], "WOWOWプライム,0,7,9,165,191,4,16432,0");
        assert_eq!(lines[5], "third,0,2,211,1,211,4,0,1");
    }

    #[test]
    fn test_duplicates_and_commas_pass_through() {
        let mut file = ChannelFile::new();
        file.add_channel(ChannelCategory::Terrestrial, record("a,b", 1024));
        file.add_channel(ChannelCategory::Terrestrial, record("a,b", 1024));

        assert_eq!(file.channel_count(), 2);
        let lines = file.render();
        assert_eq!(lines[3], "a,b,0,0,1024,1,1024,4,0,1");
        assert_eq!(lines[4], "a,b,0,1,1024,1,1024,4,0,1");
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut file = ChannelFile::new();
        for (i, label) in ["SKY", "X2", "GR", "X1", "BS", "CS"].iter().enumerate() {
            file.add_channel(ChannelCategory::from(*label), record(label, i as u16));
        }

        assert_eq!(file.render(), file.render());
        assert_eq!(file.encode().unwrap(), file.encode().unwrap());
    }

    #[test]
    fn test_empty_file_renders_headers_only() {
        let file = ChannelFile::new();
        assert_eq!(file.render().len(), 2);
        assert_eq!(file.channel_count(), 0);
    }
}
