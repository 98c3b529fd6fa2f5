use std::env;
use std::time::Duration;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub token: String,
    pub guild_id: u64,
    pub log_channel_id: u64,
    pub blacklist_role_id: u64,
    #[serde(default = "default_privileged_role")]
    pub privileged_role: String,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_calipso_path")]
    pub calipso_path: String,
    #[serde(default = "default_blacklist_path")]
    pub blacklist_path: String,
    #[serde(default)]
    pub check_image: Option<String>,
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,
    #[serde(default = "default_geolocation_lang")]
    pub geolocation_lang: String,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_presence_interval")]
    pub presence_interval_secs: u64
}

impl Config {
    /// Bound on every outbound HTTP call (geolocation and webhook).
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    /// `DISCORD_TOKEN` wins over whatever is in the file.
    pub fn apply_env(mut self) -> Self {
        if let Ok(token) = env::var("DISCORD_TOKEN") {
            if !token.trim().is_empty() {
                self.token = token;
            }
        }

        self
    }
}

fn default_privileged_role() -> String { "👑".to_string() }
fn default_data_path() -> String { "data.json".to_string() }
fn default_calipso_path() -> String { "calipso.json".to_string() }
fn default_blacklist_path() -> String { "blacklist.json".to_string() }
fn default_geolocation_url() -> String { "http://ip-api.com/json".to_string() }
fn default_geolocation_lang() -> String { "es".to_string() }
fn default_http_timeout() -> u64 { 10 }
fn default_presence_interval() -> u64 { 60 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{
            "token": "abc",
            "guild_id": 1,
            "log_channel_id": 2,
            "blacklist_role_id": 3
        }"#).unwrap();

        assert_eq!(config.privileged_role, "👑");
        assert_eq!(config.blacklist_path, "blacklist.json");
        assert_eq!(config.geolocation_url, "http://ip-api.com/json");
        assert_eq!(config.presence_interval_secs, 60);
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert!(config.webhook_url.is_none());
        assert!(config.check_image.is_none());
    }
}
