/// 數位電視服務
pub const VIDEO_SERVICE: u8 = 0x01;
/// 數位聲音服務
pub const AUDIO_SERVICE: u8 = 0x02;

/// 名稱含有此字串時視為廣播電台
const RADIO_MARKER: &str = "ラジオ";

/// 可獨立播放的影像或聲音服務類型
const PLAYABLE_SERVICE_TYPES: [u8; 7] = [
    VIDEO_SERVICE,
    AUDIO_SERVICE,
    0xa1, // 臨時映像サービス
    0xa2, // 臨時音声サービス
    0xa5, // プロモーション映像サービス
    0xa6, // プロモーション音声サービス
    0xad, // 超高精細度4K専用TVサービス
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceClassification {
    pub service_type: u8,
    pub playable: bool,
}

/// 決定服務類型以及是否可供選台
///
/// 上游未提供類型時依名稱推測（一定視為可播放）；有提供時原樣回傳，
/// 並只在類型屬於可播放清單時標記為可播放。
pub fn classify_service(name: &str, service_type: Option<u8>) -> ServiceClassification {
    match service_type {
        None => ServiceClassification {
            service_type: if name.contains(RADIO_MARKER) {
                AUDIO_SERVICE
            } else {
                VIDEO_SERVICE
            },
            playable: true,
        },
        Some(service_type) => ServiceClassification {
            service_type,
            playable: is_playable_service_type(service_type),
        },
    }
}

pub fn is_playable_service_type(service_type: u8) -> bool {
    PLAYABLE_SERVICE_TYPES.contains(&service_type)
}
