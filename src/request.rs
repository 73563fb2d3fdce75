//! Request and site context used while rendering asset references.

use std::path::{Path, PathBuf};

/// Per-request URL and filesystem context.
///
/// Supplies the request's path base (non-empty under virtual-directory
/// hosting), the physical web root backing static files, and the
/// environment mode that selects debug or production asset variants.
#[derive(Debug, Clone)]
pub struct RequestContext {
    path_base: String,
    web_root: PathBuf,
    development: bool,
}

impl RequestContext {
    pub fn new(
        path_base: impl Into<String>,
        web_root: impl Into<PathBuf>,
        development: bool,
    ) -> Self {
        let mut path_base = path_base.into();
        // hosting at "/" is the same as having no path base
        if path_base == "/" {
            path_base.clear();
        }
        Self {
            path_base,
            web_root: web_root.into(),
            development,
        }
    }

    /// Whether debug asset variants should be served.
    pub fn development(&self) -> bool {
        self.development
    }

    /// Physical directory that backs the site's static files.
    pub fn web_root(&self) -> &Path {
        &self.web_root
    }

    /// Whether the application is hosted under a virtual directory.
    pub fn has_path_base(&self) -> bool {
        !self.path_base.is_empty()
    }

    /// Resolve an app-relative (`~/…`) path into a URL for output.
    /// Other paths pass through unchanged.
    pub fn content(&self, src: &str) -> String {
        match src.strip_prefix("~/") {
            Some(rest) => format!("{}/{rest}", self.path_base),
            None => src.to_owned(),
        }
    }

    /// App-relative portion of a resolved URL, with the path base removed.
    pub fn strip_path_base<'a>(&self, url: &'a str) -> &'a str {
        if self.path_base.is_empty() {
            return url;
        }
        url.strip_prefix(self.path_base.as_str()).unwrap_or(url)
    }

    /// Map a site-relative URL path onto the web root.
    pub fn map_path(&self, url_path: &str) -> PathBuf {
        let relative: PathBuf = url_path
            .trim_start_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        self.web_root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_resolves_app_relative_paths() {
        let ctx = RequestContext::new("/shop", "wwwroot", false);
        assert_eq!(ctx.content("~/js/site.js"), "/shop/js/site.js");
    }

    #[test]
    fn test_content_at_root() {
        let ctx = RequestContext::new("", "wwwroot", false);
        assert_eq!(ctx.content("~/js/site.js"), "/js/site.js");
    }

    #[test]
    fn test_content_passes_plain_paths_through() {
        let ctx = RequestContext::new("/shop", "wwwroot", false);
        assert_eq!(ctx.content("https://cdn.example.com/a.js"), "https://cdn.example.com/a.js");
        assert_eq!(ctx.content("main.js"), "main.js");
    }

    #[test]
    fn test_root_slash_counts_as_no_path_base() {
        let ctx = RequestContext::new("/", "wwwroot", false);
        assert!(!ctx.has_path_base());
    }

    #[test]
    fn test_strip_path_base() {
        let ctx = RequestContext::new("/shop", "wwwroot", false);
        assert_eq!(ctx.strip_path_base("/shop/js/site.js"), "/js/site.js");
        assert_eq!(ctx.strip_path_base("/other/site.js"), "/other/site.js");
    }

    #[test]
    fn test_map_path_joins_web_root() {
        let ctx = RequestContext::new("", "/srv/wwwroot", false);
        assert_eq!(
            ctx.map_path("/js/site.js"),
            PathBuf::from("/srv/wwwroot/js/site.js")
        );
    }

    #[test]
    fn test_map_path_ignores_empty_segments() {
        let ctx = RequestContext::new("", "/srv/wwwroot", false);
        assert_eq!(
            ctx.map_path("js//site.js"),
            PathBuf::from("/srv/wwwroot/js/site.js")
        );
    }
}
