use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::upstream::{DemoRouteConfig, RoutingConfig, ScheduleConfig, TokenServiceConfig};

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "ROUTERELAY_CONFIG";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0. Every section has defaults, so a file holding
/// only `version: "1.0.0"` is a valid configuration.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub token_service: TokenServiceConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub demo_route: DemoRouteConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Builds the figment used to load the configuration.
///
/// Layers, lowest priority first:
/// - `version: "1.0.0"`, so a missing file yields the defaults
/// - the YAML file at `path`
/// - `ROUTERELAY_*` variables, `__` separating nested keys
///   (e.g. `ROUTERELAY_ROUTING__BASE_URL`)
/// - the legacy `TOKEN_API_URL` variable, mapped onto `token_service.url`
pub fn figment(path: &str) -> Figment {
    Figment::new()
        .merge(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(path))
        .merge(
            Env::prefixed("ROUTERELAY_")
                .ignore(&["CONFIG"])
                .split("__"),
        )
        .merge(
            Env::raw()
                .only(&["TOKEN_API_URL"])
                .map(|_| "token_service.url".into()),
        )
}

/// Extracts a `ConfigV1` from a figment, migrating older versions when they exist.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load the configuration from the file named by `ROUTERELAY_CONFIG`,
/// falling back to `./config.yaml`.
pub fn load_config() -> Result<ConfigV1, figment::Error> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    extract_config(&figment(&path))
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
