use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use storefront_core::config::{AppConfig, LoadOptions, DEFAULT_CONFIG_PATHS};
use toml::Value;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            )
        }
    };

    let entries = effective_entries(&config);
    let lines: Vec<String> = entries.iter().map(render_line).collect();
    let message = format!(
        "effective config (source precedence: env > file > default):\n{}",
        lines.join("\n")
    );

    match serde_json::to_value(&entries) {
        Ok(data) => CommandResult::success_with_data("config", message, data),
        Err(_) => CommandResult::success("config", message),
    }
}

fn effective_entries(config: &AppConfig) -> Vec<ConfigEntry> {
    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let relation_table = config
        .recommendations
        .relation_table_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in>".to_string());

    vec![
        ConfigEntry {
            key: "database.url",
            value: config.database.url.clone(),
            source: source("database.url", &["STOREFRONT_DATABASE_URL"]),
        },
        ConfigEntry {
            key: "database.max_connections",
            value: config.database.max_connections.to_string(),
            source: source("database.max_connections", &["STOREFRONT_DATABASE_MAX_CONNECTIONS"]),
        },
        ConfigEntry {
            key: "database.timeout_secs",
            value: config.database.timeout_secs.to_string(),
            source: source("database.timeout_secs", &["STOREFRONT_DATABASE_TIMEOUT_SECS"]),
        },
        ConfigEntry {
            key: "recommendations.max_results",
            value: config.recommendations.max_results.to_string(),
            source: source(
                "recommendations.max_results",
                &["STOREFRONT_RECOMMENDATIONS_MAX_RESULTS"],
            ),
        },
        ConfigEntry {
            key: "recommendations.history_capacity",
            value: config.recommendations.history_capacity.to_string(),
            source: source(
                "recommendations.history_capacity",
                &["STOREFRONT_RECOMMENDATIONS_HISTORY_CAPACITY"],
            ),
        },
        ConfigEntry {
            key: "recommendations.relation_table_path",
            value: relation_table,
            source: source(
                "recommendations.relation_table_path",
                &["STOREFRONT_RECOMMENDATIONS_RELATION_TABLE_PATH"],
            ),
        },
        ConfigEntry {
            key: "voice.language",
            value: config.voice.language.clone(),
            source: source("voice.language", &["STOREFRONT_VOICE_LANGUAGE"]),
        },
        ConfigEntry {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source("logging.level", &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"]),
        },
        ConfigEntry {
            key: "logging.format",
            value: config.logging.format.as_str().to_string(),
            source: source(
                "logging.format",
                &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
            ),
        },
    ]
}

fn detect_config_path() -> Option<PathBuf> {
    DEFAULT_CONFIG_PATHS.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env_is_set(key)) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn env_is_set(key: &str) -> bool {
    env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false)
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(entry: &ConfigEntry) -> String {
    format!("- {} = {} (source: {})", entry.key, entry.value, entry.source)
}
