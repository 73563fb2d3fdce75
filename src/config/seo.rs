//! `[seo]` section configuration.
//!
//! Titles, meta fallbacks and the sanitization rules applied to generated
//! bundle names.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// Policy for combining the page-specific title with the site default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleAdjustment {
    /// `Site - Page`
    PagenameAfterSitename,
    /// `Page - Site` (default)
    #[default]
    SitenameAfterPagename,
}

/// `[seo]` section in pagehead.toml.
///
/// # Example
/// ```toml
/// [seo]
/// default_title = "Shop"
/// page_title_separator = " - "
/// title_adjustment = "sitename-after-pagename"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SeoConfig {
    /// Separator placed between title parts.
    #[serde(default = "defaults::seo::page_title_separator")]
    #[educe(Default = defaults::seo::page_title_separator())]
    pub page_title_separator: String,

    /// Site-wide title used when no page title was contributed.
    #[serde(default)]
    pub default_title: String,

    /// How the page title and the default title are combined.
    #[serde(default)]
    pub title_adjustment: TitleAdjustment,

    /// Fallback `<meta name="description">` content.
    #[serde(default)]
    pub default_meta_description: String,

    /// Fallback `<meta name="keywords">` content.
    #[serde(default)]
    pub default_meta_keywords: String,

    /// Transliterate non-western characters when sanitizing generated names.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub transliterate_slugs: bool,

    /// Keep unicode characters in sanitized names instead of dropping them.
    #[serde(default = "defaults::r#false")]
    pub allow_unicode_slugs: bool,
}

#[cfg(test)]
mod tests {
    use super::super::HeadConfig;
    use super::*;

    #[test]
    fn test_seo_defaults() {
        let config: HeadConfig = toml::from_str("[seo]").unwrap();

        assert_eq!(config.seo.page_title_separator, " - ");
        assert_eq!(config.seo.default_title, "");
        assert!(matches!(
            config.seo.title_adjustment,
            TitleAdjustment::SitenameAfterPagename
        ));
        assert!(config.seo.transliterate_slugs);
        assert!(!config.seo.allow_unicode_slugs);
    }

    #[test]
    fn test_title_adjustment_parsing() {
        let config = r#"
            [seo]
            title_adjustment = "pagename-after-sitename"
        "#;
        let config: HeadConfig = toml::from_str(config).unwrap();

        assert!(matches!(
            config.seo.title_adjustment,
            TitleAdjustment::PagenameAfterSitename
        ));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [seo]
            default_titel = "typo"
        "#;
        let result: Result<HeadConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
