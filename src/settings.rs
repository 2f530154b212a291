use crate::generation::GenerationPreference;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_level: String,
    /// Interface generation to bind to. `auto` detects it from the OS build.
    #[serde(default)]
    pub shell_generation: GenerationPreference,
    /// Print command results as JSON instead of text.
    #[serde(default)]
    pub json_output: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            shell_generation: GenerationPreference::Auto,
            json_output: false,
        }
    }
}

impl Settings {
    pub fn level_filter(&self) -> log::LevelFilter {
        use log::LevelFilter;
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut content = String::new();
    if let Ok(mut file) = File::open(SETTINGS_FILE) {
        if file.read_to_string(&mut content).is_ok() {
            if let Ok(settings) = serde_json::from_str::<Settings>(&content) {
                return settings;
            }
        }
    }
    Settings::default()
}

/// Loads the settings, writing the defaults to `settings.json` when there is
/// no such file yet so they can be edited. An existing file is never
/// overwritten, even when it does not parse.
pub fn load_or_create_settings() -> Settings {
    let settings = load_settings();
    if !Path::new(SETTINGS_FILE).exists() {
        save_settings(&settings);
    }
    settings
}

pub fn save_settings(settings: &Settings) {
    if let Ok(json) = serde_json::to_string_pretty(settings) {
        if let Err(e) =
            File::create(SETTINGS_FILE).and_then(|mut file| file.write_all(json.as_bytes()))
        {
            eprintln!("Failed to save settings: {}", e);
        }
    }
}
