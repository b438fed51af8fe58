use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://192.168.4.1:8080";

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub server: ServerSettings,
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub base_url: String,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Login and register have no timeout unless this is set.
    #[serde(default)]
    pub auth_timeout_secs: Option<u64>,
    pub wells_timeout_secs: u64,
    pub query_timeout_secs: u64,
}

impl ServerSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout_secs: None,
            auth_timeout_secs: None,
            wells_timeout_secs: 5,
            query_timeout_secs: 10,
        }
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn auth_timeout(&self) -> Option<Duration> {
        self.auth_timeout_secs.map(Duration::from_secs)
    }

    pub fn wells_timeout(&self) -> Duration {
        Duration::from_secs(self.wells_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    pub width: f64,
    pub height: f64,
}

pub fn load_client_config() -> anyhow::Result<ClientConfig> {
    load_client_config_from("config/client")
}

/// Defaults, then the optional file at `path`, then `DRILLING__*` environment overrides.
pub fn load_client_config_from(path: &str) -> anyhow::Result<ClientConfig> {
    load_client_config_with(path, environment())
}

/// `DRILLING__SERVER__QUERY_TIMEOUT_SECS=30` sets `server.query_timeout_secs`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("DRILLING")
        .separator("__")
        .try_parsing(true)
}

fn load_client_config_with(path: &str, env: config::Environment) -> anyhow::Result<ClientConfig> {
    let settings = config::Config::builder()
        .set_default("server.base_url", DEFAULT_BASE_URL)?
        .set_default("server.wells_timeout_secs", 5_i64)?
        .set_default("server.query_timeout_secs", 10_i64)?
        .set_default("chart.width", 800.0)?
        .set_default("chart.height", 400.0)?
        .add_source(config::File::with_name(path).required(false))
        .add_source(env)
        .build()?;

    let config: ClientConfig = settings.try_deserialize()?;
    if config.chart.width <= 0.0 || config.chart.height <= 0.0 {
        anyhow::bail!(
            "chart size must be positive, got {}x{}",
            config.chart.width,
            config.chart.height
        );
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_client_config_from("config/does-not-exist").unwrap();
        assert_eq!(config.server.wells_timeout(), Duration::from_secs(5));
        assert_eq!(config.server.query_timeout(), Duration::from_secs(10));
        assert_eq!(config.server.auth_timeout(), None);
        assert_eq!(config.chart.width, 800.0);
        assert_eq!(config.chart.height, 400.0);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("drilling-client-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[server]\nbase_url = \"http://10.0.0.5:9000\"\nquery_timeout_secs = 30\nauth_timeout_secs = 3\n\n[chart]\nwidth = 640.0\nheight = 320.0\n",
        )
        .unwrap();

        let config = load_client_config_from(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.server.query_timeout(), Duration::from_secs(30));
        assert_eq!(config.server.wells_timeout(), Duration::from_secs(5));
        assert_eq!(config.server.auth_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.chart.width, 640.0);
    }

    #[test]
    fn test_rejects_empty_chart() {
        let path = std::env::temp_dir().join(format!("drilling-chart-{}.toml", std::process::id()));
        std::fs::write(&path, "[chart]\nwidth = 0.0\nheight = 100.0\n").unwrap();

        let result = load_client_config_from(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let path = std::env::temp_dir().join(format!("drilling-env-{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nquery_timeout_secs = 30\n").unwrap();

        let env = env_with(&[
            ("DRILLING__SERVER__QUERY_TIMEOUT_SECS", "42"),
            ("DRILLING__SERVER__BASE_URL", "http://10.0.0.9:8080"),
            ("DRILLING__CHART__WIDTH", "1024"),
            ("OTHER__SERVER__WELLS_TIMEOUT_SECS", "99"),
        ]);
        let config = load_client_config_with(path.to_str().unwrap(), env).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.query_timeout(), Duration::from_secs(42));
        assert_eq!(config.server.base_url, "http://10.0.0.9:8080");
        assert_eq!(config.server.wells_timeout(), Duration::from_secs(5));
        assert_eq!(config.chart.width, 1024.0);
    }

    #[test]
    fn test_environment_can_invalidate_chart() {
        let env = env_with(&[("DRILLING__CHART__HEIGHT", "-1")]);
        assert!(load_client_config_with("config/does-not-exist", env).is_err());
    }
}
