use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_log_format() -> String { "compact".into() }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise `SERVER_HOST` / `SERVER_PORT` over defaults.
    /// Only a missing file falls back; a file that fails to parse or validate is an error.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).map_err(|e| anyhow!("invalid config file {path}: {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::from_env(),
            Err(e) => return Err(anyhow!("cannot read config file {path}: {e}")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            cfg.logging.format = format;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.logging.normalize();
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        let lower = self.format.trim().to_ascii_lowercase();
        self.format = match lower.as_str() {
            "json" => "json".into(),
            _ => "compact".into(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 5000
            worker_threads = 2

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn normalize_fixes_host_threads_and_format() {
        let mut cfg = parse(
            r#"
            [server]
            host = "  "
            port = 8081
            worker_threads = 0

            [logging]
            format = "PRETTY"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn zero_port_rejected() {
        let mut cfg = parse("[server]\nhost = \"127.0.0.1\"\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    fn temp_config(content: &str) -> std::path::PathBuf {
        let tmp = std::env::temp_dir().join(format!("student_api_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&tmp, content).unwrap();
        tmp
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let tmp = temp_config("[server]\nport = \"not a number\n");
        let res = AppConfig::load_or_env_from(tmp.to_str().unwrap());
        let _ = std::fs::remove_file(&tmp);
        assert!(res.is_err());
    }

    #[test]
    fn invalid_port_in_config_file_is_an_error() {
        let tmp = temp_config("[server]\nhost = \"127.0.0.1\"\nport = 0\n");
        let res = AppConfig::load_or_env_from(tmp.to_str().unwrap());
        let _ = std::fs::remove_file(&tmp);
        assert!(res.is_err());
    }

    #[test]
    fn valid_config_file_wins_over_env() {
        let tmp = temp_config("[server]\nhost = \"0.0.0.0\"\nport = 7000\n");
        let cfg = AppConfig::load_or_env_from(tmp.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&tmp);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:7000");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    // the only test touching SERVER_* / LOG_FORMAT, so no other test races on them
    #[test]
    fn missing_file_falls_back_to_env() {
        std::env::set_var("SERVER_HOST", "0.0.0.0");
        std::env::set_var("SERVER_PORT", "5050");
        std::env::set_var("LOG_FORMAT", "JSON");
        let direct = AppConfig::from_env();
        let loaded = AppConfig::load_or_env_from("/nonexistent/student_api.toml");
        std::env::remove_var("SERVER_HOST");
        std::env::remove_var("SERVER_PORT");
        std::env::remove_var("LOG_FORMAT");

        assert_eq!(direct.bind_addr(), "0.0.0.0:5050");
        let loaded = loaded.unwrap();
        assert_eq!(loaded.bind_addr(), "0.0.0.0:5050");
        assert_eq!(loaded.logging.format, "json");
    }

    #[test]
    fn load_from_file_reads_toml() {
        let tmp = std::env::temp_dir().join(format!("student_api_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&tmp, "[server]\nhost = \"127.0.0.1\"\nport = 9090\n").unwrap();
        let cfg = load_from_file(tmp.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        let _ = std::fs::remove_file(&tmp);
        assert!(load_from_file("/nonexistent/student_api.toml").is_err());
    }
}
