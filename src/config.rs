/*
 *  SteamLadder bot - Discord bot for looking up SteamLadder profiles within Discord.
 *  Copyright (C) 2025  Manuel de Castro
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
use serde::{Deserialize, Serialize};
use serenity::all::UserId;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://steamladder.com/api";
pub const DEFAULT_TIMEOUT_S: u64 = 30;
/// Configuration file read from the working directory, if present.
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {0}: {1}")]
    Read(String, #[source] std::io::Error),
    #[error("Could not parse {0}: {1}")]
    Parse(String, #[source] serde_json::Error),
    #[error("Missing setting: {0}")]
    Missing(&'static str),
    #[error("Invalid Discord user ID in {0}: {1:?}")]
    InvalidAdmin(&'static str, String),
    #[error("Invalid request timeout in {0}: {1:?}")]
    InvalidTimeout(&'static str, String),
}

/**
 * Data structure encapsulating the configuration of the bot.
 *
 * Every setting can be given in `config.json`, and overridden with an environmental variable.
 */
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    /// Token of the Discord bot (`DISCORD_TOKEN`).
    pub discord_token: Option<String>,
    /// Token for SteamLadder's API (`STEAMLADDER_API_TOKEN`).
    pub steamladder_token: Option<String>,
    /// Root of SteamLadder's API, without the version (`STEAMLADDER_API_URL`).
    pub api_url: String,
    /// Users allowed to force profile updates (`DISCORD_ADMIN_USER_IDS`, comma separated).
    pub admin_ids: HashSet<UserId>,
    /// Seconds to wait for SteamLadder before giving up (`STEAMLADDER_TIMEOUT_S`).
    pub timeout_s: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            discord_token: None,
            steamladder_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            admin_ids: HashSet::new(),
            timeout_s: DEFAULT_TIMEOUT_S,
        }
    }
}

impl BotConfig {
    /**
     * Loads the configuration from `config.json` (if it exists) and the process' environment.
     */
    pub fn load() -> Result<BotConfig, ConfigError> {
        let file = if Path::new(CONFIG_FILE).exists() {
            Some(
                fs::read_to_string(CONFIG_FILE)
                    .map_err(|e| ConfigError::Read(CONFIG_FILE.to_string(), e))?,
            )
        } else {
            None
        };

        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /**
     * Builds the configuration from the contents of a configuration file and an environment
     * lookup. Environmental variables take precedence over the file.
     */
    pub fn from_sources(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<BotConfig, ConfigError> {
        let mut config: BotConfig = match file {
            Some(json) => serde_json::from_str(json)
                .map_err(|e| ConfigError::Parse(CONFIG_FILE.to_string(), e))?,
            None => BotConfig::default(),
        };

        if let Some(token) = env("DISCORD_TOKEN") {
            config.discord_token = Some(token);
        }
        if let Some(token) = env("STEAMLADDER_API_TOKEN") {
            config.steamladder_token = Some(token);
        }
        if let Some(url) = env("STEAMLADDER_API_URL") {
            config.api_url = url;
        }
        if let Some(ids) = env("DISCORD_ADMIN_USER_IDS") {
            config.admin_ids = parse_admin_ids(&ids)?;
        }
        if let Some(timeout) = env("STEAMLADDER_TIMEOUT_S") {
            config.timeout_s = timeout
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or(ConfigError::InvalidTimeout("STEAMLADDER_TIMEOUT_S", timeout))?;
        }

        if config.timeout_s == 0 {
            return Err(ConfigError::InvalidTimeout(
                "timeout_s",
                config.timeout_s.to_string(),
            ));
        }
        if config.discord_token.as_deref().unwrap_or_default().is_empty() {
            return Err(ConfigError::Missing("DISCORD_TOKEN"));
        }
        if config
            .steamladder_token
            .as_deref()
            .unwrap_or_default()
            .is_empty()
        {
            return Err(ConfigError::Missing("STEAMLADDER_API_TOKEN"));
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_s)
    }
}

/// Parses a comma separated list of Discord user IDs. Blank entries are skipped.
fn parse_admin_ids(ids: &str) -> Result<HashSet<UserId>, ConfigError> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u64>()
                .ok()
                .filter(|id| *id != 0)
                .map(UserId::new)
                .ok_or_else(|| ConfigError::InvalidAdmin("DISCORD_ADMIN_USER_IDS", id.to_string()))
        })
        .collect()
}
