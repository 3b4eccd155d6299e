//! Configuration file support for resgraph.
//!
//! Provides YAML-based configuration through `resgraph.config.yml` files,
//! including data structures, file loading, and validation. Command-line
//! values always win over configured ones.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::{OutputFormat, ViewKind};
use crate::inventory::domain::FilterDimension;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "resgraph.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
    pub view: Option<ViewKind>,
    pub filters: Option<FilterConfig>,
    pub case_insensitive_ids: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Default filters, one list per dimension.
#[derive(Debug, Deserialize, Default)]
pub struct FilterConfig {
    pub resource_group: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub resource_type: Option<Vec<String>>,
    pub location: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl FilterConfig {
    fn lists(&self) -> [(FilterDimension, Option<&Vec<String>>); 4] {
        [
            (FilterDimension::ResourceGroup, self.resource_group.as_ref()),
            (FilterDimension::Type, self.resource_type.as_ref()),
            (FilterDimension::Location, self.location.as_ref()),
            (FilterDimension::Category, self.category.as_ref()),
        ]
    }

    /// Configured list filters as `DIMENSION=VALUE[,VALUE...]` expressions.
    ///
    /// The name pattern is not included; it is passed on separately.
    pub fn to_expressions(&self) -> Vec<String> {
        self.lists()
            .into_iter()
            .filter_map(|(dimension, values)| {
                values
                    .filter(|values| !values.is_empty())
                    .map(|values| format!("{}={}", dimension, values.join(",")))
            })
            .collect()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let Some(filters) = &config.filters else {
        return Ok(());
    };

    for (dimension, values) in filters.lists() {
        for (i, value) in values.into_iter().flatten().enumerate() {
            if value.trim().is_empty() {
                bail!(
                    "Invalid config: filters.{}[{}] must not be empty.\n\n\
                     💡 Hint: Remove the empty entry or give it a value (e.g., \"rg-prod\").",
                    config_key(dimension),
                    i
                );
            }
            if value.contains(',') {
                bail!(
                    "Invalid config: filters.{}[{}] must not contain ','.\n\n\
                     💡 Hint: List each value as its own entry.",
                    config_key(dimension),
                    i
                );
            }
        }
    }

    if let Some(name) = &filters.name {
        if name.trim().is_empty() {
            bail!(
                "Invalid config: filters.name must not be empty.\n\n\
                 💡 Hint: Use a pattern such as \"web-*\" or remove the field."
            );
        }
    }

    Ok(())
}

fn config_key(dimension: FilterDimension) -> &'static str {
    match dimension {
        FilterDimension::ResourceGroup => "resource_group",
        FilterDimension::Type => "type",
        FilterDimension::Location => "location",
        FilterDimension::Category => "category",
        FilterDimension::Name => "name",
    }
}

/// Warnings for unknown fields in the config file.
pub fn unknown_field_warnings(config: &ConfigFile) -> Vec<String> {
    let mut keys: Vec<String> = config.unknown_fields.keys().cloned().collect();
    if let Some(filters) = &config.filters {
        keys.extend(
            filters
                .unknown_fields
                .keys()
                .map(|key| format!("filters.{}", key)),
        );
    }
    keys.sort();
    keys.into_iter()
        .map(|key| format!("⚠️  Warning: Unknown config field '{}' will be ignored.", key))
        .collect()
}
