use crate::constants::DEFAULT_INVENTORY_PREFIX;
use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use serde_yaml::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// directory inventories are created in and listed from
    pub temp_dir: PathBuf,
    /// name prefix shared by every generated inventory
    pub prefix: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            temp_dir: std::env::temp_dir(),
            prefix: DEFAULT_INVENTORY_PREFIX.to_string(),
        }
    }
}

impl InventoryConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_yaml::from_reader(reader)?;

        if value.is_null() {
            return Ok(InventoryConfig::default());
        }

        Ok(serde_yaml::from_value(value)?)
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                let file = std::fs::File::open(path)
                    .with_context(|| format!("Could not open config file {}", path.display()))?;
                InventoryConfig::from_reader(file)
                    .with_context(|| format!("Could not parse config file {}", path.display()))
            }
            None => Ok(InventoryConfig::default()),
        }
    }

    pub fn default_dest_pattern(&self) -> String {
        format!("{}*", self.prefix)
    }
}
