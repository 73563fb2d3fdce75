//! Per-request accumulation of head fragments and asset references.

use crate::assets::{LocatedParts, ResourceLocation, ScriptRef, StyleRef};
use crate::bundle::{self, BundleKind, RenderContext};
use crate::config::{HeadConfig, TitleAdjustment};
use anyhow::Result;
use rustc_hash::FxHashSet;

/// Collects head fragments contributed while a single request renders.
///
/// Created once per request, mutated by view components during rendering and
/// discarded when the response is written. Mutators are additive only; all
/// generators are total and render absent data as the empty string.
///
/// `add_*` pushes to the back of a category list, `append_*` inserts at the
/// front. Most categories render in reverse of storage order, so appended
/// parts come out last and added parts come out first-from-the-end; see the
/// individual generators.
#[derive(Debug, Default)]
pub struct PageHeadBuilder {
    title_parts: Vec<String>,
    meta_description_parts: Vec<String>,
    meta_keyword_parts: Vec<String>,
    canonical_url_parts: Vec<String>,
    head_custom_parts: Vec<String>,
    page_css_class_parts: Vec<String>,
    script_parts: LocatedParts<ScriptRef>,
    inline_script_parts: LocatedParts<String>,
    css_parts: LocatedParts<StyleRef>,
    edit_page_url: Option<String>,
    active_menu_item: Option<String>,
}

/// Push a non-empty part to the back of a category list.
fn push_part(list: &mut Vec<String>, part: &str) {
    if !part.is_empty() {
        list.push(part.to_owned());
    }
}

/// Insert a non-empty part at the front of a category list.
fn push_front_part(list: &mut Vec<String>, part: &str) {
    if !part.is_empty() {
        list.insert(0, part.to_owned());
    }
}

/// Join parts in reverse of storage order.
fn join_reversed(parts: &[String], separator: &str) -> String {
    parts
        .iter()
        .rev()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

impl PageHeadBuilder {
    // ========================================================================
    // Title
    // ========================================================================

    pub fn add_title_part(&mut self, part: &str) {
        push_part(&mut self.title_parts, part);
    }

    pub fn append_title_part(&mut self, part: &str) {
        push_front_part(&mut self.title_parts, part);
    }

    /// Finalize the page title.
    ///
    /// Contributed parts are joined in reverse of storage order with the
    /// configured separator. Without any parts the default title is
    /// returned. With `add_default_title` the specific title and the
    /// default are combined per the configured adjustment policy.
    pub fn generate_title(&self, config: &HeadConfig, add_default_title: bool) -> String {
        let seo = &config.seo;
        let specific = join_reversed(&self.title_parts, &seo.page_title_separator);

        if specific.is_empty() {
            return seo.default_title.clone();
        }
        if !add_default_title {
            return specific;
        }
        match seo.title_adjustment {
            TitleAdjustment::PagenameAfterSitename => format!(
                "{}{}{specific}",
                seo.default_title, seo.page_title_separator
            ),
            TitleAdjustment::SitenameAfterPagename => format!(
                "{specific}{}{}",
                seo.page_title_separator, seo.default_title
            ),
        }
    }

    // ========================================================================
    // Meta
    // ========================================================================

    pub fn add_meta_description_part(&mut self, part: &str) {
        push_part(&mut self.meta_description_parts, part);
    }

    pub fn append_meta_description_part(&mut self, part: &str) {
        push_front_part(&mut self.meta_description_parts, part);
    }

    /// Join description parts in reverse of storage order, falling back to
    /// the configured default when nothing was contributed.
    pub fn generate_meta_description(&self, config: &HeadConfig) -> String {
        let description = join_reversed(&self.meta_description_parts, ", ");
        if description.is_empty() {
            config.seo.default_meta_description.clone()
        } else {
            description
        }
    }

    pub fn add_meta_keyword_part(&mut self, part: &str) {
        push_part(&mut self.meta_keyword_parts, part);
    }

    pub fn append_meta_keyword_part(&mut self, part: &str) {
        push_front_part(&mut self.meta_keyword_parts, part);
    }

    /// Join keyword parts in reverse of storage order, falling back to the
    /// configured default when nothing was contributed.
    pub fn generate_meta_keywords(&self, config: &HeadConfig) -> String {
        let keywords = join_reversed(&self.meta_keyword_parts, ", ");
        if keywords.is_empty() {
            config.seo.default_meta_keywords.clone()
        } else {
            keywords
        }
    }

    // ========================================================================
    // Scripts
    // ========================================================================

    pub fn add_script_part(
        &mut self,
        location: ResourceLocation,
        src: &str,
        debug_src: &str,
        exclude_from_bundle: bool,
        is_async: bool,
    ) {
        if let Some(part) = script_ref(src, debug_src, exclude_from_bundle, is_async) {
            self.script_parts.push(location, part);
        }
    }

    pub fn append_script_part(
        &mut self,
        location: ResourceLocation,
        src: &str,
        debug_src: &str,
        exclude_from_bundle: bool,
        is_async: bool,
    ) {
        if let Some(part) = script_ref(src, debug_src, exclude_from_bundle, is_async) {
            self.script_parts.push_front(location, part);
        }
    }

    /// Render the script references of one location, bundling per the
    /// effective bundling flag (`bundle` argument, else configuration).
    pub fn generate_scripts(
        &self,
        ctx: &RenderContext<'_>,
        location: ResourceLocation,
        bundle: Option<bool>,
    ) -> Result<String> {
        bundle::render_references(
            ctx,
            BundleKind::Script,
            self.script_parts.get(location),
            bundle,
        )
    }

    // ========================================================================
    // Inline Scripts
    // ========================================================================

    pub fn add_inline_script_part(&mut self, location: ResourceLocation, script: &str) {
        if self.accepts_inline_script(location, script) {
            self.inline_script_parts.push(location, script.to_owned());
        }
    }

    pub fn append_inline_script_part(&mut self, location: ResourceLocation, script: &str) {
        if self.accepts_inline_script(location, script) {
            self.inline_script_parts
                .push_front(location, script.to_owned());
        }
    }

    /// Identical script bodies are inserted at most once per location.
    fn accepts_inline_script(&self, location: ResourceLocation, script: &str) -> bool {
        !script.is_empty()
            && !self
                .inline_script_parts
                .get(location)
                .iter()
                .any(|existing| existing == script)
    }

    /// Render the inline scripts of one location in storage order, one per
    /// line. Inline scripts are never bundled.
    pub fn generate_inline_scripts(&self, location: ResourceLocation) -> String {
        let mut out = String::new();
        for script in self.inline_script_parts.get(location) {
            out.push_str(script);
            out.push('\n');
        }
        out
    }

    // ========================================================================
    // Stylesheets
    // ========================================================================

    pub fn add_css_file_part(
        &mut self,
        location: ResourceLocation,
        src: &str,
        debug_src: &str,
        exclude_from_bundle: bool,
    ) {
        if let Some(part) = style_ref(src, debug_src, exclude_from_bundle) {
            self.css_parts.push(location, part);
        }
    }

    pub fn append_css_file_part(
        &mut self,
        location: ResourceLocation,
        src: &str,
        debug_src: &str,
        exclude_from_bundle: bool,
    ) {
        if let Some(part) = style_ref(src, debug_src, exclude_from_bundle) {
            self.css_parts.push_front(location, part);
        }
    }

    /// Render the stylesheet references of one location, bundling per the
    /// effective bundling flag. Bundling is forced off when the request
    /// runs under a non-root path base.
    pub fn generate_css_files(
        &self,
        ctx: &RenderContext<'_>,
        location: ResourceLocation,
        bundle: Option<bool>,
    ) -> Result<String> {
        bundle::render_references(
            ctx,
            BundleKind::Stylesheet,
            self.css_parts.get(location),
            bundle,
        )
    }

    // ========================================================================
    // Canonical URLs
    // ========================================================================

    pub fn add_canonical_url_part(&mut self, part: &str) {
        push_part(&mut self.canonical_url_parts, part);
    }

    pub fn append_canonical_url_part(&mut self, part: &str) {
        push_front_part(&mut self.canonical_url_parts, part);
    }

    /// One `<link rel="canonical">` element per line, in storage order.
    pub fn generate_canonical_urls(&self) -> String {
        let mut out = String::new();
        for url in &self.canonical_url_parts {
            out.push_str(&format!("<link rel=\"canonical\" href=\"{url}\" />\n"));
        }
        out
    }

    // ========================================================================
    // Custom Head Markup
    // ========================================================================

    pub fn add_head_custom_part(&mut self, part: &str) {
        push_part(&mut self.head_custom_parts, part);
    }

    pub fn append_head_custom_part(&mut self, part: &str) {
        push_front_part(&mut self.head_custom_parts, part);
    }

    /// Distinct custom elements in first-seen order, one per line.
    pub fn generate_head_custom(&self) -> String {
        let mut seen = FxHashSet::default();
        let mut out = String::new();
        for part in &self.head_custom_parts {
            if seen.insert(part.as_str()) {
                out.push_str(part);
                out.push('\n');
            }
        }
        out
    }

    // ========================================================================
    // Page CSS Classes
    // ========================================================================

    pub fn add_page_css_class_part(&mut self, part: &str) {
        push_part(&mut self.page_css_class_parts, part);
    }

    pub fn append_page_css_class_part(&mut self, part: &str) {
        push_front_part(&mut self.page_css_class_parts, part);
    }

    /// Space-joined class list in reverse of storage order.
    pub fn generate_page_css_classes(&self) -> String {
        join_reversed(&self.page_css_class_parts, " ")
    }

    // ========================================================================
    // Singletons
    // ========================================================================

    /// Record the admin "edit page" URL for the current page. Last write wins.
    pub fn set_edit_page_url(&mut self, url: &str) {
        self.edit_page_url = Some(url.to_owned());
    }

    pub fn edit_page_url(&self) -> Option<&str> {
        self.edit_page_url.as_deref()
    }

    /// Record the system name of the menu item to mark active. Last write wins.
    pub fn set_active_menu_item(&mut self, system_name: &str) {
        self.active_menu_item = Some(system_name.to_owned());
    }

    pub fn active_menu_item(&self) -> Option<&str> {
        self.active_menu_item.as_deref()
    }
}

/// Build a script reference; empty `src` yields nothing, empty `debug_src`
/// falls back to `src`.
fn script_ref(
    src: &str,
    debug_src: &str,
    exclude_from_bundle: bool,
    is_async: bool,
) -> Option<ScriptRef> {
    if src.is_empty() {
        return None;
    }
    let debug_src = if debug_src.is_empty() { src } else { debug_src };
    Some(ScriptRef {
        src: src.to_owned(),
        debug_src: debug_src.to_owned(),
        exclude_from_bundle,
        is_async,
    })
}

/// Build a stylesheet reference with the same empty-path rules as
/// [`script_ref`].
fn style_ref(src: &str, debug_src: &str, exclude_from_bundle: bool) -> Option<StyleRef> {
    if src.is_empty() {
        return None;
    }
    let debug_src = if debug_src.is_empty() { src } else { debug_src };
    Some(StyleRef {
        src: src.to_owned(),
        debug_src: debug_src.to_owned(),
        exclude_from_bundle,
    })
}
