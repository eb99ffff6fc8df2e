use std::{fs, path::Path, time::Duration};

use toml::{Table, Value};
use tracing::warn;

use crate::coordinator::TransitionTimings;

pub const DEFAULT_CONFIG_FILE: &str = "card.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSettings {
    pub service_base_url: String,
    pub exit_delay_ms: u64,
    pub enter_duration_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:3000".into(),
            exit_delay_ms: 1000,
            enter_duration_ms: 600,
            request_timeout_ms: 10_000,
        }
    }
}

impl CardSettings {
    pub fn timings(&self) -> TransitionTimings {
        TransitionTimings {
            exit_delay: Duration::from_millis(self.exit_delay_ms),
            enter_duration: Duration::from_millis(self.enter_duration_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

pub fn load_settings() -> CardSettings {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Defaults, then the optional TOML file at `path`, then the environment.
pub fn load_settings_from(path: &Path) -> CardSettings {
    let mut settings = CardSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut CardSettings, raw: &str) {
    let file_cfg = match raw.parse::<Table>() {
        Ok(table) => table,
        Err(error) => {
            warn!(%error, "ignoring unreadable card settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("service_base_url").and_then(Value::as_str) {
        settings.service_base_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("exit_delay_ms").and_then(millis) {
        settings.exit_delay_ms = v;
    }
    if let Some(v) = file_cfg.get("enter_duration_ms").and_then(millis) {
        settings.enter_duration_ms = v;
    }
    if let Some(v) = file_cfg.get("request_timeout_ms").and_then(millis) {
        settings.request_timeout_ms = v;
    }
}

fn apply_env_overrides(settings: &mut CardSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CARD_SERVICE_URL") {
        settings.service_base_url = v;
    }
    if let Some(v) = lookup("APP__SERVICE_BASE_URL") {
        settings.service_base_url = v;
    }
}

// Accepts `1000` as well as `"1000"`.
fn millis(value: &Value) -> Option<u64> {
    value
        .as_integer()
        .and_then(|v| u64::try_from(v).ok())
        .or_else(|| value.as_str()?.trim().parse().ok())
}
