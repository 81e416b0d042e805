use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: String, column: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No locations parsed. Is the endpoint reachable and format as expected?")]
    NoLocations,

    #[error("No zoo IDs to process.")]
    EmptySelection,

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤分類，決定 CLI 的退出碼與提示訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Http,
    Transport,
    EmptyResult,
    Processing,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::HttpStatus { .. } => ErrorCategory::Http,
            EtlError::ApiError(_) => ErrorCategory::Transport,
            EtlError::TomlError(_)
            | EtlError::ConfigError { .. }
            | EtlError::MissingColumn { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::NoLocations | EtlError::EmptySelection => ErrorCategory::EmptyResult,
            EtlError::CsvError(_) | EtlError::IoError(_) | EtlError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    /// 只有伺服器回應了錯誤狀態碼才算 HTTP 錯誤；連線失敗、逾時不算
    pub fn is_http_status(&self) -> bool {
        matches!(self, EtlError::HttpStatus { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::EmptyResult => 2,
            ErrorCategory::Http => 3,
            ErrorCategory::Configuration | ErrorCategory::Transport | ErrorCategory::Processing => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the command line flags and the --config file",
            ErrorCategory::Http => "The server rejected the request; retry later or check the URL",
            ErrorCategory::Transport => "Check network connectivity and the timeout settings",
            ErrorCategory::EmptyResult => "Verify the input source actually contains data",
            ErrorCategory::Processing => "Check file permissions and the output location",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_category() {
        let http = EtlError::HttpStatus {
            status: 503,
            url: "https://example.com".to_string(),
        };
        assert!(http.is_http_status());
        assert_eq!(http.exit_code(), 3);

        assert_eq!(EtlError::NoLocations.exit_code(), 2);
        assert_eq!(EtlError::EmptySelection.exit_code(), 2);

        let missing = EtlError::MissingColumn {
            path: "zoos.csv".to_string(),
            column: "zoo_id".to_string(),
        };
        assert!(!missing.is_http_status());
        assert_eq!(missing.exit_code(), 1);
        assert_eq!(missing.to_string(), "zoos.csv has no 'zoo_id' column");
    }
}
