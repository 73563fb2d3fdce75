//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [seo] Section Defaults
// ============================================================================

pub mod seo {
    pub fn page_title_separator() -> String {
        " - ".into()
    }
}

// ============================================================================
// [bundling] Section Defaults
// ============================================================================

pub mod bundling {
    pub fn cache_minutes() -> u64 {
        120
    }

    pub fn directory() -> String {
        "bundles".into()
    }

    pub fn cache_namespace() -> String {
        "pagehead".into()
    }
}
