use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Failed to fetch {operation} from {url}: {source}")]
    UpstreamFetch {
        operation: &'static str,
        url: String,
        source: reqwest::Error,
    },

    #[error("Character {character:?} on line {line} cannot be encoded as Shift_JIS")]
    Encoding { character: char, line: usize },

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Encoding,
    Io,
    Configuration,
}

impl DumpError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UpstreamFetch { .. } => ErrorCategory::Upstream,
            Self::Encoding { .. } => ErrorCategory::Encoding,
            Self::Io { .. } => ErrorCategory::Io,
            Self::Configuration { .. } | Self::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Upstream => {
                "Check that Mirakurun/mirakc or EPGStation is reachable and the request headers are correct"
            }
            ErrorCategory::Encoding => {
                "Rename the service upstream or run with --normalize to fold unsupported characters"
            }
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Run with --help to see the accepted options",
        }
    }

    /// 依錯誤類別決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Upstream => 3,
            ErrorCategory::Encoding => 4,
            ErrorCategory::Io => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, DumpError>;
