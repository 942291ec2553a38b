/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Suppliers offered when the config has none.
pub const DEFAULT_SUPPLIERS: [&str; 4] = ["Spark", "Velvet", "Daily", "Trofima"];

const VALID_THEMES: [&str; 3] = ["System", "Dark", "Light"];

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Suppliers listed in the entry form, in display order.
    pub suppliers: Vec<String>,
    /// Supplier preselected in the entry form. Empty = first supplier.
    pub default_supplier: String,
    /// `System`, `Dark` or `Light`.
    pub current_theme: String,
    /// Directory for the delivery database. Empty = platform default.
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            suppliers: DEFAULT_SUPPLIERS.iter().map(|s| s.to_string()).collect(),
            default_supplier: String::new(),
            current_theme: "System".to_string(),
            data_dir: String::new(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `pallet-log.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("pallet-log.json")))
            .unwrap_or_else(|| PathBuf::from("pallet-log.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// The supplier the entry form starts with.
    pub fn initial_supplier(&self) -> &str {
        if self.suppliers.contains(&self.default_supplier) {
            &self.default_supplier
        } else {
            self.suppliers.first().map(String::as_str).unwrap_or_default()
        }
    }

    /// Trims and dedupes suppliers and resets invalid fields.
    pub fn sanitize(&mut self) {
        let mut seen = Vec::with_capacity(self.suppliers.len());
        for name in self.suppliers.drain(..) {
            let name = name.trim().to_string();
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        self.suppliers = seen;
        if self.suppliers.is_empty() {
            self.suppliers = Self::default().suppliers;
        }

        self.default_supplier = self.default_supplier.trim().to_string();
        if !self.suppliers.contains(&self.default_supplier) {
            self.default_supplier.clear();
        }

        if !VALID_THEMES.contains(&self.current_theme.as_str()) {
            self.current_theme = "System".to_string();
        }
    }
}
