//! Application configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Override for the tasks file location (default: ~/.taskflow/tasks.json)
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Ask before deleting a task
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            confirm_delete: true,
        }
    }
}

/// Application data directory
/// All platforms: ~/.taskflow
pub fn data_dir() -> PathBuf {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .expect("Failed to get home directory");
    PathBuf::from(home_dir).join(".taskflow")
}

pub fn get_config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Path of the tasks file, honoring the config override
pub fn tasks_file_path(config: &Config) -> PathBuf {
    config
        .data_file
        .clone()
        .unwrap_or_else(|| data_dir().join("tasks.json"))
}

pub fn load_config() -> Result<Config> {
    let config_path = get_config_path();

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;

    Ok(config)
}

pub fn save_config(config: &Config) -> Result<()> {
    let config_path = get_config_path();

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(config_path, content)?;

    Ok(())
}

/// Point the store at a different tasks file
pub fn set_data_file(path: String) -> Result<()> {
    let mut config = load_config()?;
    config.data_file = Some(PathBuf::from(path));
    save_config(&config)?;
    println!("✓ Data file set to: {}", config.data_file.as_ref().unwrap().display());
    Ok(())
}

pub fn set_confirm_delete(value: bool) -> Result<()> {
    let mut config = load_config()?;
    config.confirm_delete = value;
    save_config(&config)?;
    println!("✓ Delete confirmation {}", if value { "enabled" } else { "disabled" });
    Ok(())
}

pub fn show_config() -> Result<()> {
    let config = load_config()?;
    println!("Current configuration:");
    println!("  Tasks file:      {}", tasks_file_path(&config).display());
    println!("  Confirm delete:  {}", config.confirm_delete);
    println!();
    println!("Config file: {}", get_config_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.data_file.is_none());
        assert!(config.confirm_delete);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.data_file.is_none());
        assert!(config.confirm_delete);
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            data_file: Some(PathBuf::from("/tmp/tasks.json")),
            confirm_delete: false,
        };
        let content = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&content).unwrap();
        assert_eq!(back.data_file, config.data_file);
        assert_eq!(back.confirm_delete, config.confirm_delete);
    }

    #[test]
    fn test_tasks_file_honors_override() {
        let config = Config {
            data_file: Some(PathBuf::from("/tmp/elsewhere.json")),
            confirm_delete: true,
        };
        assert_eq!(tasks_file_path(&config), PathBuf::from("/tmp/elsewhere.json"));
    }
}
