use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub power_bi: PowerBiConfig,
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Каталог со статикой frontend (trunk dist)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

/// Service principal для Power BI REST API
#[derive(Debug, Deserialize, Clone)]
pub struct PowerBiConfig {
    #[serde(default = "default_power_bi_api_base")]
    pub api_base: String,
    #[serde(default = "default_authority")]
    pub authority: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_power_bi_scope")]
    pub scope: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Внешний сервис метаданных: аккаунты, активные отчёты, избранное
#[derive(Debug, Deserialize, Clone)]
pub struct MetadataConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Параметры опроса задания экспорта
#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Бюджет времени на опрос в рамках одной попытки
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,
    #[serde(default = "default_session_retention_hours")]
    pub session_retention_hours: i64,
}

impl ExportConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            poll_interval_ms: default_poll_interval_ms(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            session_retention_hours: default_session_retention_hours(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

fn default_power_bi_api_base() -> String {
    "https://api.powerbi.com/v1.0/myorg".to_string()
}

fn default_authority() -> String {
    "https://login.microsoftonline.com".to_string()
}

fn default_power_bi_scope() -> String {
    "https://analysis.windows.net/powerbi/api/.default".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_poll_interval_ms() -> u64 {
    4000
}

fn default_attempt_timeout_secs() -> u64 {
    600
}

fn default_session_retention_hours() -> i64 {
    24
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[power_bi]
tenant_id = ""
client_id = ""
client_secret = ""

[metadata]
base_url = "http://127.0.0.1:8081/api"

[export]
max_attempts = 3
poll_interval_ms = 4000
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(config_path) = config_path_next_to_exe() {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.export.max_attempts == 0 {
        anyhow::bail!("export.max_attempts must be at least 1");
    }
    if config.power_bi.client_id.is_empty() {
        tracing::warn!("power_bi.client_id is empty: embedding and export will fail");
    }
    Ok(config)
}

fn config_path_next_to_exe() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    Some(exe_path.parent()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.export.max_attempts, 3);
        assert_eq!(config.export.poll_interval(), Duration::from_millis(4000));
        assert_eq!(config.power_bi.api_base, "https://api.powerbi.com/v1.0/myorg");
    }

    #[test]
    fn test_export_section_is_optional() {
        let config = parse_config(
            r#"
            [power_bi]
            tenant_id = "t"
            client_id = "c"
            client_secret = "s"

            [metadata]
            base_url = "https://meta.example.com"
            api_key = "k"
            "#,
        )
        .unwrap();

        assert_eq!(config.export.max_attempts, 3);
        assert_eq!(config.export.attempt_timeout(), Duration::from_secs(600));
        assert_eq!(config.metadata.api_key.as_deref(), Some("k"));
        assert_eq!(config.server.static_dir, "dist");
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let result = parse_config(
            r#"
            [power_bi]
            tenant_id = ""
            client_id = ""
            client_secret = ""

            [metadata]
            base_url = "x"

            [export]
            max_attempts = 0
            "#,
        );
        assert!(result.is_err());
    }
}
