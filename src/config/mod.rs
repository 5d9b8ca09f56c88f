//! Configuration module for the appointment sheet.
//!
//! Handles the settings file, environment variables, and reminder schedule.

mod settings;

pub use settings::{
    expand_env_vars, DatabaseSettings, LoggingSettings, ReminderSettings, Settings,
    SettingsError, CONFIG_ENV_VAR,
};
