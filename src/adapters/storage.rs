use crate::domain::ports::Storage;
use crate::utils::error::{DumpError, Result};
use std::fs;

/// 直接寫入本機檔案系統；檔案會被建立或覆寫，但不會建立上層目錄
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        fs::write(path, data).map_err(|source| DumpError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(())
    }
}
