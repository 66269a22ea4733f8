use crate::adapters::EMBEDDED;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub read_timeout_seconds: u64,
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            read_timeout_seconds: 10,
            shutdown_timeout_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// `embedded`, a path to a JSON file, or an http(s) URL.
    pub source: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: EMBEDDED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with_env(content, |name| std::env::var(name).ok())
    }

    /// 與 `from_toml_str` 相同，但由 `lookup` 提供變數值
    pub fn from_toml_str_with_env<L>(content: &str, lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the looked-up value; unknown variables are left as is.
    fn substitute_env_vars<L>(content: &str, lookup: L) -> Result<String>
    where
        L: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        // 驗證監聽位址與逾時設定
        validation::validate_socket_addr("server.bind", &self.server.bind)?;
        validation::validate_positive_number(
            "server.read_timeout_seconds",
            self.server.read_timeout_seconds,
            1,
        )?;
        validation::validate_positive_number(
            "server.shutdown_timeout_seconds",
            self.server.shutdown_timeout_seconds,
            1,
        )?;

        // 驗證目錄來源：embedded、URL 或檔案路徑
        let source = self.catalog.source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            validation::validate_url("catalog.source", source)?;
        } else if source != EMBEDDED {
            validation::validate_path("catalog.source", source)?;
        }

        // 驗證日誌層級
        validation::validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind", &self.server.bind)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.server.read_timeout_seconds)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_seconds)
    }

    pub fn catalog_source(&self) -> &str {
        &self.catalog.source
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:8080"

[catalog]
source = "./data/courses.json"

[logging]
level = "debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.catalog_source(), "./data/courses.json");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.read_timeout(), Duration::from_secs(10));
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
        assert_eq!(config.catalog_source(), "embedded");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CATALOG_URL", "https://courses.example.com/data.json"),
            ("PORT", "8081"),
        ]);

        let toml_content = r#"
[server]
bind = "127.0.0.1:${PORT}"

[catalog]
source = "${CATALOG_URL}"
"#;

        let config = TomlConfig::from_toml_str_with_env(toml_content, |name| {
            env.get(name).map(|value| value.to_string())
        })
        .unwrap();
        assert_eq!(config.catalog_source(), "https://courses.example.com/data.json");
        assert_eq!(config.bind_addr().unwrap().port(), 8081);
    }

    #[test]
    fn test_unknown_env_var_is_kept() {
        let config = TomlConfig::from_toml_str_with_env(
            r#"
[catalog]
source = "${CATALOG_URL}"
"#,
            |_| None,
        )
        .unwrap();
        assert_eq!(config.catalog_source(), "${CATALOG_URL}");
    }

    #[test]
    fn test_config_validation() {
        let bad_bind = TomlConfig::from_toml_str("[server]\nbind = \"nowhere\"\n").unwrap();
        assert!(bad_bind.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());

        let bad_source = TomlConfig::from_toml_str("[catalog]\nsource = \"\"\n").unwrap();
        assert!(bad_source.validate().is_err());

        let zero_timeout =
            TomlConfig::from_toml_str("[server]\nread_timeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:4000\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:4000");
    }
}
