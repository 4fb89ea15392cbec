// Configuration loader
// Loads API key from ~/.weaver/config.toml or environment variable

use anyhow::{bail, Context, Result};
use std::fs;

use super::settings::Config;

/// Load configuration from the weaver config file or environment
pub fn load_config() -> Result<Config> {
    // Try loading from ~/.weaver/config.toml first
    if let Some(config) = try_load_from_weaver_config()? {
        return Ok(config);
    }

    // Fall back to environment variable
    if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
        if !api_key.is_empty() {
            let config = Config::with_api_key(api_key);
            config.validate().context("Configuration validation failed")?;
            return Ok(config);
        }
    }

    // No config found - tell the user how to set one up
    bail!(
        "No configuration found.\n\n\
        Create \x1b[1;36m~/.weaver/config.toml\x1b[0m:\n\n\
        api_key = \"sk-ant-...\"\n\
        model = \"claude-sonnet-4-20250514\"\n\n\
        Alternatively, set environment variable:\n\
        export ANTHROPIC_API_KEY=\"sk-ant-...\""
    );
}

fn try_load_from_weaver_config() -> Result<Option<Config>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home.join(".weaver/config.toml");

    if !config_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file {:?}", config_path))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {:?}", config_path))?;

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(Some(config))
}
