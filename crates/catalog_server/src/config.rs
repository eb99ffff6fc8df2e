use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};

#[derive(Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub fixture_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            fixture_path: "./data/db.json".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("fixture_path") {
                settings.fixture_path = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Ok(v) = std::env::var("FIXTURE_PATH") {
        settings.fixture_path = v;
    }
    if let Ok(v) = std::env::var("APP__FIXTURE_PATH") {
        settings.fixture_path = v;
    }

    settings
}

/// Resolves the configured fixture path and checks that it points at a file.
pub fn prepare_fixture_path(raw_fixture_path: &str) -> anyhow::Result<PathBuf> {
    let path = normalize_fixture_path(raw_fixture_path);
    let metadata = fs::metadata(&path)
        .with_context(|| format!("fixture file '{}' is not readable", path.display()))?;
    if !metadata.is_file() {
        return Err(anyhow!("fixture path '{}' is not a file", path.display()));
    }
    Ok(path)
}

fn normalize_fixture_path(raw_fixture_path: &str) -> PathBuf {
    let raw_fixture_path = raw_fixture_path.trim();

    if raw_fixture_path.is_empty() {
        return PathBuf::from(Settings::default().fixture_path);
    }

    Path::new(&raw_fixture_path.replace('\\', "/")).to_path_buf()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
