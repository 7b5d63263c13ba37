use crate::error::{PlatedexError, Result};
use crate::model::ItemKind;
use crate::sort::SortKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for platedex, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlatedexConfig {
    /// Item kind used when `--kind` is not given
    pub default_kind: ItemKind,

    /// Sort order used by `list` when `--sort` is not given
    pub default_sort: SortKey,

    /// Prefix for money values in CSV exports (e.g. "€", "$"); may be empty
    pub currency_symbol: String,

    /// Digit grouping character for exported numbers
    pub thousands_separator: String,

    /// Separator between whole and minor currency units
    pub decimal_separator: String,
}

impl Default for PlatedexConfig {
    fn default() -> Self {
        Self {
            default_kind: ItemKind::Owned,
            default_sort: SortKey::default(),
            currency_symbol: String::new(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "default-kind",
    "default-sort",
    "currency-symbol",
    "thousands-separator",
    "decimal-separator",
];

impl PlatedexConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: PlatedexConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-kind" => Some(self.default_kind.to_string()),
            "default-sort" => Some(self.default_sort.to_string()),
            "currency-symbol" => Some(self.currency_symbol.clone()),
            "thousands-separator" => Some(self.thousands_separator.clone()),
            "decimal-separator" => Some(self.decimal_separator.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-kind" => {
                self.default_kind = value.parse().map_err(PlatedexError::Validation)?;
            }
            "default-sort" => {
                self.default_sort = value.parse().map_err(PlatedexError::Validation)?;
            }
            "currency-symbol" => {
                self.currency_symbol = digit_free(key, value)?;
            }
            "thousands-separator" => {
                self.thousands_separator = digit_free(key, value)?;
            }
            "decimal-separator" => {
                if value.is_empty() {
                    return Err(PlatedexError::Validation(
                        "decimal-separator cannot be empty".to_string(),
                    ));
                }
                self.decimal_separator = digit_free(key, value)?;
            }
            other => {
                return Err(PlatedexError::Validation(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}

/// Formatting strings end up inside exported amounts, and import keeps only
/// the digits of an amount, so a digit here would change the number.
fn digit_free(key: &str, value: &str) -> Result<String> {
    if value.chars().any(|c| c.is_ascii_digit()) {
        return Err(PlatedexError::Validation(format!(
            "{} cannot contain digits: {:?}",
            key, value
        )));
    }
    Ok(value.to_string())
}
