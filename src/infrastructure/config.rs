use crate::application::query_cache::CacheKeyPolicy;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub feature_service: FeatureServiceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Where the precomputed trend datasets are hosted
#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    #[serde(default = "default_counties_url")]
    pub us_counties_url: String,
    #[serde(default = "default_states_url")]
    pub us_states_url: String,
    #[serde(default = "default_latest_numbers_url")]
    pub latest_numbers_url: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            us_counties_url: default_counties_url(),
            us_states_url: default_states_url(),
            latest_numbers_url: default_latest_numbers_url(),
        }
    }
}

fn default_counties_url() -> String {
    "http://localhost:8000/data/us-counties.json".to_string()
}

fn default_states_url() -> String {
    "http://localhost:8000/data/us-states.json".to_string()
}

fn default_latest_numbers_url() -> String {
    "http://localhost:8000/data/latest-numbers.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeatureServiceSettings {
    #[serde(default = "default_feature_service_url")]
    pub url: String,
    /// No timeout unless set
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl FeatureServiceSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for FeatureServiceSettings {
    fn default() -> Self {
        Self {
            url: default_feature_service_url(),
            timeout_secs: None,
        }
    }
}

fn default_feature_service_url() -> String {
    "https://services9.arcgis.com/6Hv9AANartyT7fJW/ArcGIS/rest/services/USCounties_cases_V1/FeatureServer/1"
        .to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CacheSettings {
    #[serde(default)]
    pub key_policy: CacheKeyPolicy,
}

/// Reads `config/app.*` when present, then `COVID19_*` environment overrides
/// (`COVID19_FEATURE_SERVICE__URL`, `COVID19_CACHE__KEY_POLICY`, ...).
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix("COVID19")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
