use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::GroceryError;
use crate::matcher::MatchStrictness;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct GroceryConfig {
    /// How tolerant name matching is when folding new entries into a list
    #[serde(default)]
    pub matching: MatchStrictness,
    /// Name given to the list that is auto-created when the store is empty
    #[serde(default = "default_list_name")]
    pub default_list_name: String,
    /// Directory holding the JSON snapshots
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
}

impl Default for GroceryConfig {
    fn default() -> Self {
        Self {
            matching: MatchStrictness::default(),
            default_list_name: default_list_name(),
            storage_dir: default_storage_dir(),
        }
    }
}

// Default value functions
pub(crate) fn default_list_name() -> String {
    "Grocery List".to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".grocery")
}

impl GroceryConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`] for the lookup order.
    pub fn load() -> Result<Self, GroceryError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with GROCERY__ prefix
/// 2. grocery.toml file in current directory
/// 3. Default values
///
/// Environment variable format: GROCERY__MATCHING=permissive
pub fn load_config() -> Result<GroceryConfig, GroceryError> {
    let builder = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("grocery").required(false))
        .add_source(
            Environment::with_prefix("GROCERY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    from_builder(builder)
}

fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<GroceryConfig, GroceryError> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}
