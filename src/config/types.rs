//! The configuration structs used to build the AppConfig, and their impls.
use std::{collections::BTreeMap, path::Path};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use lazy_regex::regex_is_match;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::{ConfigError, ConfigResult};

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    #[serde(default)]
    pub provider_config: ProviderConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// Mailing list provider values as they were found in the environment.
/// All of them are optional here, a missing value is only an error once a request needs it.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ProviderConfig {
    pub api_key: Option<SecretString>,
    pub list_id: Option<String>,
    pub datacenter: Option<String>,
    /// Replaces `https://{datacenter}.api.mailchimp.com` when set.
    pub api_base_url: Option<String>,
}

/// A complete set of provider values, ready to build the outbound request from.
#[derive(Clone, Debug)]
pub struct ProviderSettings {
    pub api_key: SecretString,
    pub list_id: String,
    pub base_url: String,
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// Loads the configuration for the environment named by `APP_ENVIRONMENT` (defaults to `local`)
    /// from the `config` directory under the current working directory.
    pub fn load() -> ConfigResult<Self> {
        let config_dir = std::env::current_dir()?.join("config");
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()?;

        let config = Self::figment(&config_dir, environment).extract()?;
        Ok(config)
    }

    pub fn figment(config_dir: &Path, environment: Environment) -> Figment {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            // e.g. `APP_NET_CONFIG__APP_PORT=5001` sets `net_config.app_port`
            .merge(Env::prefixed("APP_").split("__"))
            // e.g. `MAILCHIMP_LIST_ID` sets `provider_config.list_id`
            .merge(Serialized::default("provider_config", provider_env()))
    }
}

impl ProviderConfig {
    pub const API_KEY: &'static str = "MAILCHIMP_API_KEY";
    pub const LIST_ID: &'static str = "MAILCHIMP_LIST_ID";
    pub const DATACENTER: &'static str = "MAILCHIMP_DATACENTER";

    /// Checks that every required value is present and well-formed.
    /// Empty values count as missing.
    pub fn resolve(&self) -> ConfigResult<ProviderSettings> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty());
        let list_id = non_empty(self.list_id.as_deref());
        let datacenter = non_empty(self.datacenter.as_deref());

        let (api_key, list_id, datacenter) = match (api_key, list_id, datacenter) {
            (Some(api_key), Some(list_id), Some(datacenter)) => (api_key, list_id, datacenter),
            (api_key, list_id, datacenter) => {
                let missing = [
                    (api_key.is_none(), Self::API_KEY),
                    (list_id.is_none(), Self::LIST_ID),
                    (datacenter.is_none(), Self::DATACENTER),
                ]
                .into_iter()
                .filter_map(|(is_missing, name)| is_missing.then_some(name))
                .collect();
                return Err(ConfigError::ProviderValuesMissing(missing));
            }
        };

        // Both end up in the request URL.
        if !regex_is_match!(r"^[a-z0-9-]+$"i, datacenter) {
            return Err(ConfigError::ProviderValueInvalid(Self::DATACENTER));
        }
        if !regex_is_match!(r"^[a-z0-9_-]+$"i, list_id) {
            return Err(ConfigError::ProviderValueInvalid(Self::LIST_ID));
        }

        let base_url = match non_empty(self.api_base_url.as_deref()) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{datacenter}.api.mailchimp.com"),
        };

        Ok(ProviderSettings {
            api_key: api_key.clone(),
            list_id: list_id.to_string(),
            base_url,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The `MAILCHIMP_*` variables as raw strings. figment's `Env` would parse an all-digit
/// list id as an integer and drop its leading zeros.
fn provider_env() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter_map(|(key, value)| {
            let key = key.strip_prefix("MAILCHIMP_")?.to_lowercase();
            Some((key, value))
        })
        .collect()
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
