//! `[bundling]` section configuration.
//!
//! Process-wide defaults for script/stylesheet bundling; a render call may
//! still override the flag per location.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[bundling]` section in pagehead.toml.
///
/// # Example
/// ```toml
/// [bundling]
/// enable_js_bundling = true
/// enable_css_bundling = false
/// cache_minutes = 120
/// directory = "bundles"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BundlingConfig {
    /// Bundle script references unless a render call overrides it.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable_js_bundling: bool,

    /// Bundle stylesheet references unless a render call overrides it.
    #[serde(default = "defaults::r#false")]
    pub enable_css_bundling: bool,

    /// How long a generated bundle is trusted before its rebuild flag
    /// expires and the sources are re-checked.
    #[serde(default = "defaults::bundling::cache_minutes")]
    #[educe(Default = defaults::bundling::cache_minutes())]
    pub cache_minutes: u64,

    /// Directory under the web root where bundle artifacts are written.
    #[serde(default = "defaults::bundling::directory")]
    #[educe(Default = defaults::bundling::directory())]
    pub directory: String,

    /// First token of the rebuild cache key.
    #[serde(default = "defaults::bundling::cache_namespace")]
    #[educe(Default = defaults::bundling::cache_namespace())]
    pub cache_namespace: String,
}
