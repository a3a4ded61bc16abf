//! Configuration management using config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_auth_login_url() -> String {
    "http://localhost:5000/login".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the tracker backend (Steam Web API proxy)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Login endpoint of the auth collaborator; its redirect back carries
    /// the account id as a query parameter
    #[serde(default = "default_auth_login_url")]
    pub auth_login_url: String,

    /// Account to load at startup when no login redirect is present
    #[serde(default)]
    pub steam_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_login_url: default_auth_login_url(),
            steam_id: String::new(),
        }
    }
}

impl Config {
    /// Load config from file, creating default if it doesn't exist
    pub fn load() -> Self {
        if Path::new(CONFIG_PATH).exists() {
            match fs::read_to_string(CONFIG_PATH) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Error parsing config.toml: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config.toml: {}", e);
                }
            }
        }

        let config = Config::default();
        let _ = config.save();
        config
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(CONFIG_PATH, content)?;
        Ok(())
    }
}
