//! Settings loaded from TOML
//!
//! Read from ~/.config/tetrs-arcade/settings.toml (or platform equivalent).
//! Missing files and missing keys fall back to defaults.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Game settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub pause: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub toggle_info: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub start: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Visual settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: keys(&["a", "Left"]),
            move_right: keys(&["d", "Right"]),
            soft_drop: keys(&["s", "Down"]),
            rotate: keys(&["w", "Up"]),
            hard_drop: keys(&["Space"]),
            pause: keys(&["p"]),
            toggle_info: keys(&["h"]),
            start: keys(&["Enter"]),
            quit: keys(&["Esc", "q"]),
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetrs-arcade", "tetrs-arcade")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::debug!("No config directory, using default settings");
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::debug!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

impl VisualSettings {
    /// Get the block characters based on style
    pub fn block_char(&self) -> &'static str {
        match self.block_style.as_str() {
            "bracket" => "[]",
            "round" => "()",
            _ => "██", // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.keys.hard_drop, vec!["Space".to_string()]);
        assert_eq!(settings.visual.block_char(), "██");
    }

    #[test]
    fn test_single_key_or_list() {
        let settings = Settings::from_toml_str(
            r#"
            [keys]
            rotate = "x"
            move_left = ["j", "Left"]

            [visual]
            block_style = "bracket"
            "#,
        )
        .unwrap();
        assert_eq!(settings.keys.rotate, vec!["x".to_string()]);
        assert_eq!(settings.keys.move_left, vec!["j".to_string(), "Left".to_string()]);
        // Untouched bindings keep their defaults
        assert_eq!(settings.keys.quit, vec!["Esc".to_string(), "q".to_string()]);
        assert_eq!(settings.visual.block_char(), "[]");
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(Settings::from_toml_str("[keys\nrotate = ").is_err());
        assert!(Settings::from_toml_str("[keys]\nrotate = 5").is_err());
    }
}
