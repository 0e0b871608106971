//! Config - Grid Configuration
//!
//! Loaded from a TOML grid definition: feature switches, pagination defaults,
//! the column schema and the optional stable row key.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::column::{ColumnSchema, ColumnSpec};
use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_MIN_COLUMN_WIDTH, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;
use crate::i18n::Locale;

/// File name of the default grid definition
pub const CONFIG_FILE_NAME: &str = "grid.toml";

/// Optional grid capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GridFeatures {
    /// Global search box
    pub searchable: bool,
    /// Per-column filters
    pub filterable: bool,
    /// Export action
    pub exportable: bool,
    /// Row selection checkboxes
    pub selectable: bool,
    /// Page-by-page display
    pub paginated: bool,
}

impl Default for GridFeatures {
    fn default() -> Self {
        Self {
            searchable: true,
            filterable: true,
            exportable: true,
            selectable: false,
            paginated: true,
        }
    }
}

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GridConfig {
    /// Initial page size
    pub page_size: usize,
    /// Page sizes offered to the user
    pub page_size_options: Vec<usize>,
    /// Display locale; detected from the system when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    /// Column whose value identifies a row across sorting and paging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_key: Option<String>,
    /// Narrowest width a resize can produce, in pixels
    pub min_column_width: f32,
    /// Number of memoized filter/sort results kept per stage
    pub cache_capacity: usize,
    /// Capability switches
    pub features: GridFeatures,
    /// Column schema in display order
    pub columns: Vec<ColumnSpec>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            locale: None,
            row_key: None,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            features: GridFeatures::default(),
            columns: Vec::new(),
        }
    }
}

impl GridConfig {
    /// Parse a TOML grid definition
    pub fn from_toml(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a grid definition from a file
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = ?path, "Loading grid config");
        let value = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse grid config");
            e
        })?;

        // Detect system locale if not set
        if config.locale.is_none() {
            config.locale = Some(Locale::detect());
        }

        Ok(config)
    }

    /// Load the grid definition from the user's config directory
    pub fn try_load_default() -> Result<Self> {
        let path = default_config_path()?;
        if !path.exists() {
            info!(path = ?path, "No grid config found, using defaults");
            return Ok(Self {
                locale: Some(Locale::detect()),
                ..Self::default()
            });
        }
        Self::load(&path)
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// JSON schema of the grid definition format
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(GridConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidPageSize { size: 0 });
        }
        if let Some(size) = self.page_size_options.iter().find(|s| **s == 0) {
            return Err(Error::InvalidPageSize { size: *size });
        }
        let schema = self.schema()?;
        if let Some(key) = &self.row_key {
            schema.require(key)?;
        }
        Ok(())
    }

    /// Column schema built from the configured columns
    pub fn schema(&self) -> Result<ColumnSchema> {
        ColumnSchema::new(self.columns.clone())
    }

    /// Effective locale
    pub fn locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }
}

/// Path of the default grid definition
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}
