//! Configuration commands for managing mailform settings.
//!
//! - `config set`: Set a configuration value
//! - `config get`: Print a single configuration value
//! - `config show`: Display current configuration

use owo_colors::OwoColorize;
use serde_json::json;
use url::Url;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{API_URL_ENV, Config};
use crate::error::{MailformError, Result};
use crate::paths;

const VALID_KEYS: &str = "directory.url, directory.fetch_delay_ms, directory.timeout";

/// Reject underscore notation in the section part of a key
fn validate_config_key(key: &str) -> Result<&str> {
    if let Some((section, rest)) = key.split_once('_')
        && !section.contains('.')
    {
        return Err(MailformError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{section}.{rest}'"
        )));
    }
    Ok(key)
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        MailformError::Config(format!(
            "invalid value '{value}' for {key}: expected a non-negative integer"
        ))
    })
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let url = config.directory_url();
    let url_from_env = std::env::var(API_URL_ENV).is_ok_and(|v| !v.is_empty());

    let json_output = json!({
        "directory": {
            "url": url,
            "url_from_env": url_from_env,
            "fetch_delay_ms": config.directory.fetch_delay_ms,
            "timeout": config.directory.timeout,
        },
        "config_file": paths::config_path().to_string_lossy(),
    });

    let mut text = format!("{}\n\n", "Configuration:".cyan().bold());
    text.push_str(&format!("{}:\n", "directory".cyan()));
    match &url {
        Some(url) if url_from_env => {
            text.push_str(&format!("  url: {url} (from {API_URL_ENV})\n"))
        }
        Some(url) => text.push_str(&format!("  url: {url}\n")),
        None => text.push_str(&format!("  url: {}\n", "not configured".dimmed())),
    }
    text.push_str(&format!(
        "  fetch_delay_ms: {}\n",
        config.directory.fetch_delay_ms
    ));
    text.push_str(&format!("  timeout: {}s\n", config.directory.timeout));
    text.push_str(&format!(
        "\n{}: {}",
        "Config file".dimmed(),
        paths::config_path().display()
    ));

    CommandOutput::new(json_output).with_text(text).print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let key = validate_config_key(key)?;
    let mut config = Config::load()?;

    match key {
        "directory.url" => {
            let parsed = Url::parse(value)
                .map_err(|e| MailformError::Config(format!("invalid URL '{value}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(MailformError::Config(format!(
                    "invalid URL '{value}': scheme must be http or https"
                )));
            }
            config.directory.url = Some(value.to_string());
        }
        "directory.fetch_delay_ms" => {
            config.directory.fetch_delay_ms = parse_number(key, value)?;
        }
        "directory.timeout" => {
            let timeout = parse_number(key, value)?;
            if timeout == 0 {
                return Err(MailformError::Config(
                    "directory.timeout must be at least 1 second".to_string(),
                ));
            }
            config.directory.timeout = timeout;
        }
        _ => {
            return Err(MailformError::Config(format!(
                "unknown config key '{key}'. Valid keys: {VALID_KEYS}"
            )));
        }
    }

    config.save()?;
    println!("Set {} = {}", key.cyan(), value);
    Ok(())
}

/// Get a configuration value
pub fn cmd_config_get(key: &str) -> Result<()> {
    let key = validate_config_key(key)?;
    let config = Config::load()?;

    let value = match key {
        "directory.url" => config
            .directory_url()
            .ok_or_else(|| MailformError::Config("directory.url not set".to_string()))?,
        "directory.fetch_delay_ms" => config.directory.fetch_delay_ms.to_string(),
        "directory.timeout" => config.directory.timeout.to_string(),
        _ => {
            return Err(MailformError::Config(format!(
                "unknown config key '{key}'. Valid keys: {VALID_KEYS}"
            )));
        }
    };

    println!("{value}");
    Ok(())
}
