//! Configuration for head rendering and asset bundling.
//!
//! # Sections
//!
//! | Section      | Purpose                                           |
//! |--------------|---------------------------------------------------|
//! | `[seo]`      | Titles, meta fallbacks, slug sanitization         |
//! | `[bundling]` | Script/stylesheet bundling switches and cache TTL |
//!
//! # Example
//!
//! ```toml
//! [seo]
//! default_title = "Shop"
//! page_title_separator = " - "
//!
//! [bundling]
//! enable_js_bundling = true
//! cache_minutes = 120
//! ```

mod bundling;
pub mod defaults;
mod error;
mod seo;

pub use bundling::BundlingConfig;
pub use error::ConfigError;
pub use seo::{SeoConfig, TitleAdjustment};

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Root configuration, usually loaded from a `pagehead.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadConfig {
    /// `[seo]` section.
    #[serde(default)]
    pub seo: SeoConfig,

    /// `[bundling]` section.
    #[serde(default)]
    pub bundling: BundlingConfig,
}

impl HeadConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}
