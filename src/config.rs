// src/config.rs

pub mod cookie;

use self::cookie::load_or_create_external_config;
use crate::{constants, error::AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_view_url")]
    pub view_url: String,
    #[serde(default = "default_player_url")]
    pub player_url: String,
}

fn default_view_url() -> String {
    constants::api::VIEW_URL.to_string()
}

fn default_player_url() -> String {
    constants::api::PLAYER_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            view_url: default_view_url(),
            player_url: default_player_url(),
        }
    }
}

/// 本地配置文件 (~/.bili-sub-dl/config.json) 的内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        Self {
            cookie: None,
            network: NetworkConfig {
                connect_timeout_secs: Some(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
                timeout_secs: Some(constants::DEFAULT_TIMEOUT_SECS),
                user_agent: None,
            },
            api: ApiConfig::default(),
        }
    }
}

/// 运行时使用的配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub view_api_url: String,
    pub player_api_url: String,
}

impl AppConfig {
    pub fn new() -> AppResult<Self> {
        Ok(Self::from_external(load_or_create_external_config()?))
    }

    pub fn from_external(external_config: ExternalConfig) -> Self {
        let network = external_config.network;
        Self {
            user_agent: network
                .user_agent
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(
                network
                    .connect_timeout_secs
                    .unwrap_or(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            timeout: Duration::from_secs(
                network.timeout_secs.unwrap_or(constants::DEFAULT_TIMEOUT_SECS),
            ),
            view_api_url: external_config.api.view_url,
            player_api_url: external_config.api.player_url,
        }
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            view_api_url: constants::api::VIEW_URL.to_string(),
            player_api_url: constants::api::PLAYER_URL.to_string(),
        }
    }
}
