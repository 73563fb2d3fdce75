//! Located asset references and HTML tag rendering.
//!
//! Script and stylesheet references carry a production path, a debug path
//! served in development mode, and bundling flags. De-duplication keys on
//! the production path only.

use rustc_hash::FxHashSet;

// ============================================================================
// Locations
// ============================================================================

/// Placement slot for scripts and stylesheets within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceLocation {
    /// Inside `<head>`.
    Head,
    /// Just before `</body>`.
    Footer,
}

impl ResourceLocation {
    pub(crate) const COUNT: usize = 2;

    pub(crate) const fn index(self) -> usize {
        match self {
            ResourceLocation::Head => 0,
            ResourceLocation::Footer => 1,
        }
    }
}

/// Ordered part lists indexed by the closed location enum.
#[derive(Debug)]
pub(crate) struct LocatedParts<T> {
    slots: [Vec<T>; ResourceLocation::COUNT],
}

impl<T> Default for LocatedParts<T> {
    fn default() -> Self {
        Self {
            slots: [const { Vec::new() }; ResourceLocation::COUNT],
        }
    }
}

impl<T> LocatedParts<T> {
    pub fn push(&mut self, location: ResourceLocation, item: T) {
        self.slots[location.index()].push(item);
    }

    pub fn push_front(&mut self, location: ResourceLocation, item: T) {
        self.slots[location.index()].insert(0, item);
    }

    pub fn get(&self, location: ResourceLocation) -> &[T] {
        &self.slots[location.index()]
    }
}

// ============================================================================
// References
// ============================================================================

/// Script reference contributed by a view component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRef {
    /// Production (minified) path.
    pub src: String,
    /// Path served in development mode.
    pub debug_src: String,
    /// Render individually instead of joining the location's bundle.
    pub exclude_from_bundle: bool,
    /// Emit the `async` attribute.
    pub is_async: bool,
}

/// Stylesheet reference contributed by a view component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRef {
    /// Production (minified) path.
    pub src: String,
    /// Path served in development mode.
    pub debug_src: String,
    /// Render individually instead of joining the location's bundle.
    pub exclude_from_bundle: bool,
}

/// Common view over script and stylesheet references.
pub(crate) trait AssetRef {
    fn src(&self) -> &str;
    fn debug_src(&self) -> &str;
    fn exclude_from_bundle(&self) -> bool;
    fn is_async(&self) -> bool;

    /// Path to serve for the current environment mode.
    fn pick(&self, development: bool) -> &str {
        if development { self.debug_src() } else { self.src() }
    }
}

impl AssetRef for ScriptRef {
    fn src(&self) -> &str {
        &self.src
    }
    fn debug_src(&self) -> &str {
        &self.debug_src
    }
    fn exclude_from_bundle(&self) -> bool {
        self.exclude_from_bundle
    }
    fn is_async(&self) -> bool {
        self.is_async
    }
}

impl AssetRef for StyleRef {
    fn src(&self) -> &str {
        &self.src
    }
    fn debug_src(&self) -> &str {
        &self.debug_src
    }
    fn exclude_from_bundle(&self) -> bool {
        self.exclude_from_bundle
    }
    fn is_async(&self) -> bool {
        false
    }
}

/// Keep the first occurrence for each production path, preserving order.
pub(crate) fn dedup_by_src<'a, T: AssetRef>(
    parts: impl Iterator<Item = &'a T>,
) -> Vec<&'a T> {
    let mut seen = FxHashSet::default();
    parts.filter(|part| seen.insert(part.src())).collect()
}

// ============================================================================
// Tag Rendering
// ============================================================================

/// Append a `<script>` reference followed by a line break.
pub(crate) fn script_tag(out: &mut String, src: &str, is_async: bool) {
    if is_async {
        out.push_str(&format!("<script async src=\"{src}\"></script>\n"));
    } else {
        out.push_str(&format!("<script src=\"{src}\"></script>\n"));
    }
}

/// Append a stylesheet `<link>` reference followed by a line break.
pub(crate) fn stylesheet_tag(out: &mut String, href: &str) {
    out.push_str(&format!(
        "<link href=\"{href}\" rel=\"stylesheet\" type=\"text/css\" />\n"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(src: &str, debug_src: &str) -> ScriptRef {
        ScriptRef {
            src: src.into(),
            debug_src: debug_src.into(),
            exclude_from_bundle: false,
            is_async: false,
        }
    }

    #[test]
    fn test_located_parts_push_and_push_front() {
        let mut parts = LocatedParts::default();
        parts.push(ResourceLocation::Head, "a");
        parts.push(ResourceLocation::Head, "b");
        parts.push_front(ResourceLocation::Head, "c");

        assert_eq!(parts.get(ResourceLocation::Head), &["c", "a", "b"]);
        assert!(parts.get(ResourceLocation::Footer).is_empty());
    }

    #[test]
    fn test_located_parts_isolated_per_location() {
        let mut parts = LocatedParts::default();
        parts.push(ResourceLocation::Head, 1);
        parts.push(ResourceLocation::Footer, 2);

        assert_eq!(parts.get(ResourceLocation::Head), &[1]);
        assert_eq!(parts.get(ResourceLocation::Footer), &[2]);
    }

    #[test]
    fn test_dedup_keys_on_production_path_only() {
        let parts = vec![script("a.js", "a.debug.js"), script("a.js", "b.debug.js")];
        let deduped = dedup_by_src(parts.iter());

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].debug_src, "a.debug.js");
    }

    #[test]
    fn test_dedup_preserves_order() {
        let parts = vec![script("b.js", ""), script("a.js", ""), script("b.js", "")];
        let deduped = dedup_by_src(parts.iter());

        let srcs: Vec<_> = deduped.iter().map(|p| p.src.as_str()).collect();
        assert_eq!(srcs, ["b.js", "a.js"]);
    }

    #[test]
    fn test_script_tag_async() {
        let mut out = String::new();
        script_tag(&mut out, "main.js", true);
        assert_eq!(out, "<script async src=\"main.js\"></script>\n");
    }

    #[test]
    fn test_script_tag_plain() {
        let mut out = String::new();
        script_tag(&mut out, "main.js", false);
        assert_eq!(out, "<script src=\"main.js\"></script>\n");
    }

    #[test]
    fn test_stylesheet_tag() {
        let mut out = String::new();
        stylesheet_tag(&mut out, "site.css");
        assert_eq!(
            out,
            "<link href=\"site.css\" rel=\"stylesheet\" type=\"text/css\" />\n"
        );
    }
}
