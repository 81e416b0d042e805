use crate::config::{ArtsConfig, HttpConfig, LocationsConfig};
use crate::domain::model::Holdings;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_seconds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `--config` 指定的 TOML 檔，所有欄位皆可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub http: Option<HttpSection>,
    pub locations: Option<LocationsSection>,
    pub arts: Option<ArtsSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    pub user_agent: Option<String>,
    pub connect_timeout_secs: Option<f64>,
    pub read_timeout_secs: Option<f64>,
    pub max_retries: Option<u32>,
    pub backoff_factor: Option<f64>,
    pub backoff_max_secs: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationsSection {
    pub url: Option<String>,
    pub out: Option<String>,
    pub fetch_delay_secs: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtsSection {
    pub url: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub haltung: Option<Holdings>,
    pub sleep_secs: Option<f64>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${ZOO_ETL_OUT})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn locations_config(&self) -> Result<LocationsConfig> {
        let mut config = LocationsConfig::default();
        if let Some(http) = &self.http {
            http.apply(&mut config.http)?;
        }
        if let Some(section) = &self.locations {
            if let Some(url) = &section.url {
                config.url = url.clone();
            }
            if let Some(out) = &section.out {
                config.out = out.clone();
            }
            if let Some(delay) = section.fetch_delay_secs {
                config.fetch_delay = validate_seconds("locations.fetch_delay_secs", delay)?;
            }
        }
        Ok(config)
    }

    pub fn arts_config(&self) -> Result<ArtsConfig> {
        let mut config = ArtsConfig::default();
        if let Some(http) = &self.http {
            http.apply(&mut config.http)?;
        }
        if let Some(section) = &self.arts {
            if let Some(url) = &section.url {
                config.url = url.clone();
            }
            if let Some(out_dir) = &section.out_dir {
                config.out_dir = out_dir.clone();
            }
            if let Some(holdings) = section.haltung {
                config.holdings = holdings;
            }
            if let Some(sleep) = section.sleep_secs {
                config.sleep = validate_seconds("arts.sleep_secs", sleep)?;
            }
        }
        Ok(config)
    }
}

impl HttpSection {
    fn apply(&self, http: &mut HttpConfig) -> Result<()> {
        if let Some(user_agent) = &self.user_agent {
            http.user_agent = user_agent.clone();
        }
        if let Some(connect) = self.connect_timeout_secs {
            http.connect_timeout = validate_seconds("http.connect_timeout_secs", connect)?;
        }
        if let Some(read) = self.read_timeout_secs {
            http.read_timeout = validate_seconds("http.read_timeout_secs", read)?;
        }
        if let Some(max_retries) = self.max_retries {
            http.max_retries = max_retries;
        }
        if let Some(backoff_factor) = self.backoff_factor {
            http.backoff_factor = backoff_factor;
        }
        if let Some(backoff_max) = self.backoff_max_secs {
            http.backoff_max = validate_seconds("http.backoff_max_secs", backoff_max)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert_eq!(config.locations_config().unwrap(), LocationsConfig::default());
        assert_eq!(config.arts_config().unwrap(), ArtsConfig::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let toml_content = r#"
[http]
max_retries = 5
read_timeout_secs = 45.0
backoff_max_secs = 30.0

[locations]
out = "data/zoos.csv"

[arts]
out_dir = "data/arts"
haltung = 1
sleep_secs = 2.5
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        let locations = config.locations_config().unwrap();
        assert_eq!(locations.out, "data/zoos.csv");
        assert_eq!(locations.http.max_retries, 5);
        assert_eq!(locations.http.read_timeout, Duration::from_secs(45));
        assert_eq!(locations.http.backoff_max, Duration::from_secs(30));
        // 沒有覆蓋的欄位保留各自的預設值
        assert_eq!(locations.http.connect_timeout, Duration::from_secs(10));

        let arts = config.arts_config().unwrap();
        assert_eq!(arts.out_dir, PathBuf::from("data/arts"));
        assert_eq!(arts.holdings, Holdings::Former);
        assert_eq!(arts.sleep, Duration::from_millis(2500));
        assert_eq!(arts.http.connect_timeout, Duration::from_secs(5));
        assert!(arts.http.retry_post);
    }

    #[test]
    fn test_invalid_haltung_is_rejected() {
        let result = FileConfig::from_toml_str("[arts]\nhaltung = 2\n");
        assert!(matches!(result, Err(EtlError::TomlError(_))));
    }

    #[test]
    fn test_oversized_sleep_is_rejected() {
        let config = FileConfig::from_toml_str("[arts]\nsleep_secs = 1e30\n").unwrap();
        assert!(matches!(
            config.arts_config(),
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(FileConfig::from_toml_str("[arts]\nconcurrency = 4\n").is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ZOO_ETL_TEST_AJAX_URL", "https://mirror.example.org/ajax.php");

        let config = FileConfig::from_toml_str("[arts]\nurl = \"${ZOO_ETL_TEST_AJAX_URL}\"\n").unwrap();
        let arts = config.arts_config().unwrap();
        assert_eq!(arts.url, "https://mirror.example.org/ajax.php");
        assert!(arts.validate().is_ok());

        std::env::remove_var("ZOO_ETL_TEST_AJAX_URL");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[locations]\nurl = \"http://localhost:8080/map_zoos.php\"\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        let locations = config.locations_config().unwrap();
        assert_eq!(locations.url, "http://localhost:8080/map_zoos.php");
    }
}
