//! TOML-based configuration for the appointment sheet.
//!
//! Supports a config file (`appointment-sheet.toml`) with environment
//! variable expansion in the database path.
//!
//! Example configuration:
//! ```toml
//! [database]
//! path = "${CRM_DB_PATH}"
//! dialect = "sqlite"
//!
//! [reminders]
//! enabled = true
//! lead_days = 1
//! send_time = "09:00"
//! remindable_statuses = ["Open", "Confirmed"]
//!
//! [logging]
//! filter = "appointment_sheet=info"
//! ```

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::Dialect;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "APPOINTMENT_SHEET_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    #[error("Invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("No database path configured")]
    NoDatabase,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub reminders: ReminderSettings,
    pub logging: LoggingSettings,
}

/// Where appointments are read from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite database file (supports ${ENV_VAR} expansion).
    pub path: Option<String>,

    /// Dialect used when printing generated SQL.
    pub dialect: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: None,
            dialect: "sqlite".to_string(),
        }
    }
}

impl DatabaseSettings {
    /// Database path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<PathBuf, SettingsError> {
        let raw = self.path.as_deref().ok_or(SettingsError::NoDatabase)?;
        Ok(PathBuf::from(expand_env_vars(raw)?))
    }

    pub fn dialect(&self) -> Result<Dialect, SettingsError> {
        self.dialect
            .parse()
            .map_err(|_| SettingsError::UnsupportedDialect(self.dialect.clone()))
    }
}

/// Automated SMS reminder schedule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Whether automated reminders are sent at all.
    pub enabled: bool,

    /// Days before the appointment the reminder goes out.
    pub lead_days: u32,

    /// Time of day the reminder batch is sent ("HH:MM").
    pub send_time: String,

    /// Appointment statuses that still receive reminders.
    pub remindable_statuses: Vec<String>,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            lead_days: 1,
            send_time: "09:00".to_string(),
            remindable_statuses: vec!["Open".to_string(), "Confirmed".to_string()],
        }
    }
}

impl ReminderSettings {
    pub fn send_time(&self) -> Result<NaiveTime, SettingsError> {
        NaiveTime::parse_from_str(self.send_time.trim(), "%H:%M")
            .map_err(|_| SettingsError::InvalidTime(self.send_time.clone()))
    }
}

/// Log output settings. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "appointment_sheet=info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `APPOINTMENT_SHEET_CONFIG`
    /// 2. `./appointment-sheet.toml`
    /// 3. `~/.config/appointment-sheet/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("appointment-sheet.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("appointment-sheet").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut var_name = String::new();
        if braced {
            while let Some(ch) = chars.next_if(|&ch| ch != '}') {
                var_name.push(ch);
            }
            chars.next_if_eq(&'}');
        } else {
            while let Some(ch) = chars.next_if(|&ch| ch.is_alphanumeric() || ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
