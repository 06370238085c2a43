use serde::Deserialize;
use std::time::Duration;

const CONFIG_FILE: &str = "config/dashboard";
const ENV_PREFIX: &str = "AQ_DASHBOARD";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub backend: BackendSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    /// Sent as `X-AUTH-TOKEN` on every backend request
    pub auth_token: String,
    pub timeout_secs: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
    /// Upper bound on live sensor page sessions
    pub max_sessions: usize,
}

impl DashboardConfig {
    fn validate(self) -> anyhow::Result<Self> {
        anyhow::ensure!(
            self.backend.timeout_secs > 0,
            "backend.timeout_secs must be greater than zero"
        );
        anyhow::ensure!(
            self.server.max_sessions > 0,
            "server.max_sessions must be greater than zero"
        );
        Ok(self)
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("backend.timeout_secs", 10)?
        .set_default("server.bind", "0.0.0.0:3000")?
        .set_default("server.max_sessions", 1024)?)
}

/// Loads `config/dashboard.*`, overridden by `AQ_DASHBOARD__SECTION__KEY` variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = builder()?
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    settings.try_deserialize::<DashboardConfig>()?.validate()
}
