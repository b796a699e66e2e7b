use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub data_file: PathBuf,
    pub session_ttl: Duration,
    /// Interval of the background sweep over the task-list cache. `None` disables it.
    pub cache_sweep_interval: Option<Duration>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_DATA_FILE: &str = "./database.json";
    const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
    const DEFAULT_CACHE_SWEEP_SECS: u64 = 60;

    pub fn from_env() -> Self {
        let host = std::env::var("TASKBOARD_HOST").unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let http_port = env_or("TASKBOARD_HTTP_PORT", Self::DEFAULT_HTTP_PORT);
        let data_file = std::env::var("TASKBOARD_DATA_FILE")
            .unwrap_or_else(|_| Self::DEFAULT_DATA_FILE.to_string());
        let session_ttl_secs = env_or("TASKBOARD_SESSION_TTL_SECS", Self::DEFAULT_SESSION_TTL_SECS);
        let sweep_secs = env_or("TASKBOARD_CACHE_SWEEP_SECS", Self::DEFAULT_CACHE_SWEEP_SECS);

        Self {
            host,
            http_port,
            data_file: PathBuf::from(data_file),
            session_ttl: Duration::from_secs(session_ttl_secs),
            cache_sweep_interval: sweep_interval(sweep_secs),
            allowed_origins: parse_origins(
                &std::env::var("TASKBOARD_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            http_port: Self::DEFAULT_HTTP_PORT,
            data_file: PathBuf::from(Self::DEFAULT_DATA_FILE),
            session_ttl: Duration::from_secs(Self::DEFAULT_SESSION_TTL_SECS),
            cache_sweep_interval: sweep_interval(Self::DEFAULT_CACHE_SWEEP_SECS),
            allowed_origins: vec!["*".to_string()],
        }
    }
}

fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => parse_or(name, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(name: &str, raw: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    raw.trim().parse::<T>().unwrap_or_else(|_| {
        warn!("{} has invalid value '{}', using default {}", name, raw, default);
        default
    })
}

fn sweep_interval(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
