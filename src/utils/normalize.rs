use unicode_normalization::UnicodeNormalization;

/// NFKC 正規化：全形英數與符號轉為半形，半形片假名轉為全形
pub fn normalize_service_name(name: &str) -> String {
    name.nfkc().collect()
}
