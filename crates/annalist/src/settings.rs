//! Exporter settings.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Built-in defaults
//! 2. `annalist.toml` in the working directory, or the `--config` file
//! 3. Environment variables (`.env` is loaded into the environment first)
//! 4. Command-line flags

use annalist_error::{AnnalistError, AnnalistResult, ConfigError};
use config::{Config, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "annalist.toml";

/// Export directory used when `DOWNLOAD_DIR` is unset.
pub const DEFAULT_DOWNLOAD_DIR: &str = "exports";

/// Pause between page requests when `REQUEST_DELAY` is unset, in milliseconds.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

static CHANNEL_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{17,20}$").expect("static pattern compiles"));

/// Settings supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `CHANNEL_ID`
    pub channel_id: Option<String>,
    /// Replaces `DOWNLOAD_DIR`
    pub download_dir: Option<PathBuf>,
    /// Forces a single pass
    pub once: bool,
    /// Forces JSON logs
    pub json_logs: bool,
}

/// Settings as read from the layered sources, before validation.
///
/// Keys are the lowercased environment variable names, so the same names work
/// in `annalist.toml`.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    discord_token: Option<String>,
    channel_id: Option<String>,
    download_dir: Option<String>,
    request_delay: Option<String>,
    sync_interval_ms: Option<String>,
    exit_on_idle: Option<String>,
    log_format: Option<String>,
}

/// Validated exporter configuration.
#[derive(Clone, derive_getters::Getters)]
pub struct ExporterConfig {
    /// Discord bot token
    token: String,
    /// Channel snowflake ID
    channel_id: String,
    /// Directory holding export files
    download_dir: PathBuf,
    /// Pause after each non-empty page
    request_delay: Duration,
    /// Delay between periodic passes; zero disables them
    sync_interval: Duration,
    /// Exit after the initial pass
    exit_on_idle: bool,
    /// Emit JSON logs
    json_logs: bool,
}

impl std::fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExporterConfig")
            .field("token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("download_dir", &self.download_dir)
            .field("request_delay", &self.request_delay)
            .field("sync_interval", &self.sync_interval)
            .field("exit_on_idle", &self.exit_on_idle)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}

impl ExporterConfig {
    /// Load from the process environment and the optional config file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source cannot be read or a setting is
    /// missing or invalid.
    pub fn load(file: Option<&Path>, overrides: &ConfigOverrides) -> AnnalistResult<Self> {
        Self::load_from(file, None, overrides)
    }

    /// Load with an explicit environment instead of the process one.
    ///
    /// # Errors
    ///
    /// Same as [`ExporterConfig::load`].
    #[instrument(skip(env, overrides))]
    pub fn load_from(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
        overrides: &ConfigOverrides,
    ) -> AnnalistResult<Self> {
        debug!("Loading exporter configuration");

        let file_source = match file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let environment = Environment::default()
            .ignore_empty(true)
            .source(env.map(|vars| vars.into_iter().collect()));

        let raw: RawSettings = Config::builder()
            .set_default("download_dir", DEFAULT_DOWNLOAD_DIR)
            .and_then(|b| {
                b.set_default("request_delay", DEFAULT_REQUEST_DELAY_MS.to_string())
            })
            .and_then(|b| b.set_default("sync_interval_ms", "0"))
            .and_then(|b| b.set_default("exit_on_idle", "true"))
            .map_err(config_error("Invalid default"))?
            .add_source(file_source)
            .add_source(environment)
            .set_override_option("channel_id", overrides.channel_id.clone())
            .and_then(|b| {
                b.set_override_option(
                    "download_dir",
                    overrides
                        .download_dir
                        .as_ref()
                        .map(|dir| dir.to_string_lossy().into_owned()),
                )
            })
            .and_then(|b| {
                b.set_override_option("sync_interval_ms", overrides.once.then_some("0"))
            })
            .and_then(|b| {
                b.set_override_option("log_format", overrides.json_logs.then_some("json"))
            })
            .map_err(config_error("Invalid override"))?
            .build()
            .map_err(config_error("Failed to read configuration"))?
            .try_deserialize()
            .map_err(config_error("Failed to parse configuration"))?;

        let mut config = Self::validate(raw)?;
        if overrides.once {
            config.exit_on_idle = true;
        }
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn validate(raw: RawSettings) -> AnnalistResult<Self> {
        let token = required(raw.discord_token, "DISCORD_TOKEN")?;

        let channel_id = required(raw.channel_id, "CHANNEL_ID")?;
        if !is_valid_channel_id(&channel_id) {
            return Err(ConfigError::invalid(
                "CHANNEL_ID",
                format!("must be a Discord ID of 17-20 digits, got {:?}", channel_id),
            )
            .into());
        }

        let download_dir = raw
            .download_dir
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_DIR.to_string());

        let request_delay = parse_millis(
            raw.request_delay,
            DEFAULT_REQUEST_DELAY_MS,
            "REQUEST_DELAY",
            1,
        )?;
        let sync_interval = parse_millis(raw.sync_interval_ms, 0, "SYNC_INTERVAL_MS", 0)?;

        let exit_on_idle = match raw.exit_on_idle {
            None => true,
            Some(value) => parse_flag(&value).ok_or_else(|| {
                ConfigError::invalid(
                    "EXIT_ON_IDLE",
                    format!("must be true/false, yes/no, on/off or 1/0, got {:?}", value),
                )
            })?,
        };

        let json_logs = match raw.log_format.as_deref().map(str::trim) {
            None | Some("") | Some("text") | Some("pretty") => false,
            Some(format) if format.eq_ignore_ascii_case("json") => true,
            Some(other) => {
                return Err(ConfigError::invalid(
                    "LOG_FORMAT",
                    format!("must be text or json, got {:?}", other),
                )
                .into());
            }
        };

        Ok(Self {
            token,
            channel_id,
            download_dir: PathBuf::from(download_dir),
            request_delay,
            sync_interval,
            exit_on_idle,
            json_logs,
        })
    }
}

/// Whether `id` looks like a Discord snowflake (17-20 ASCII digits).
pub fn is_valid_channel_id(id: &str) -> bool {
    CHANNEL_ID_PATTERN.is_match(id)
}

/// Parse a boolean flag the way shell users write them.
///
/// Accepts `true/false`, `1/0`, `yes/no`, `y/n` and `on/off`, ignoring case
/// and surrounding whitespace.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[track_caller]
fn required(value: Option<String>, name: &'static str) -> AnnalistResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::invalid(name, "must be set to a non-empty value").into()),
    }
}

#[track_caller]
fn parse_millis(
    value: Option<String>,
    default: u64,
    name: &'static str,
    min: u64,
) -> AnnalistResult<Duration> {
    let Some(value) = value else {
        return Ok(Duration::from_millis(default));
    };

    match value.trim().parse::<u64>() {
        Ok(ms) if ms >= min => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::invalid(
            name,
            format!("must be an integer of at least {}, got {:?}", min, value),
        )
        .into()),
    }
}

fn config_error(context: &'static str) -> impl Fn(config::ConfigError) -> AnnalistError {
    move |e| ConfigError::new(format!("{}: {}", context, e)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        for value in ["true", "TRUE", "1", "yes", "y", " on "] {
            assert_eq!(parse_flag(value), Some(true), "{value}");
        }
        for value in ["false", "0", "No", "n", "off"] {
            assert_eq!(parse_flag(value), Some(false), "{value}");
        }
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_channel_id_pattern() {
        assert!(is_valid_channel_id("12345678901234567"));
        assert!(is_valid_channel_id("12345678901234567890"));
        assert!(!is_valid_channel_id("1234567890123456"));
        assert!(!is_valid_channel_id("123456789012345678901"));
        assert!(!is_valid_channel_id("1234567890123456a"));
        assert!(!is_valid_channel_id(" 12345678901234567"));
    }

    #[test]
    fn test_parse_millis_bounds() {
        assert_eq!(
            parse_millis(None, 1000, "REQUEST_DELAY", 1).unwrap(),
            Duration::from_millis(1000)
        );
        assert_eq!(
            parse_millis(Some("250".to_string()), 1000, "REQUEST_DELAY", 1).unwrap(),
            Duration::from_millis(250)
        );
        assert!(parse_millis(Some("0".to_string()), 1000, "REQUEST_DELAY", 1).is_err());
        assert!(parse_millis(Some("-5".to_string()), 0, "SYNC_INTERVAL_MS", 0).is_err());
        assert!(parse_millis(Some("soon".to_string()), 0, "SYNC_INTERVAL_MS", 0).is_err());
    }
}
