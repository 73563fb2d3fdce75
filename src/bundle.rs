//! Bundle naming, rebuild gating and reference rendering.
//!
//! A bundle is one concatenated, minified artifact produced from the
//! bundle-eligible references of a single location. Its name is derived
//! from the ordered source paths, so any change to the list, its order or
//! a path yields a new artifact. Rebuilds are gated by the inverted
//! [`RebuildCache`](crate::cache::RebuildCache) and serialized by a
//! process-wide lock; no two bundle writes run concurrently even for
//! unrelated bundles.

use crate::assets::{AssetRef, dedup_by_src, script_tag, stylesheet_tag};
use crate::cache::RebuildCache;
use crate::config::HeadConfig;
use crate::request::RequestContext;
use crate::slug;
use anyhow::{Context as _, Result, ensure};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Serializes physical bundle writes across all locations and kinds.
static REBUILD_LOCK: Mutex<()> = Mutex::new(());

// ============================================================================
// Types
// ============================================================================

/// Kind of asset being bundled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    Script,
    Stylesheet,
}

impl BundleKind {
    /// File extension, also the tag inside the rebuild cache key.
    pub fn extension(self) -> &'static str {
        match self {
            BundleKind::Script => "js",
            BundleKind::Stylesheet => "css",
        }
    }
}

/// One bundling job: ordered inputs and the artifacts to produce.
#[derive(Debug, Clone)]
pub struct BundleSpec {
    pub kind: BundleKind,
    /// Physical source files, in reference order.
    pub input_files: Vec<PathBuf>,
    /// Artifact path under the bundles directory.
    pub output_file: PathBuf,
    /// JSON descriptor written next to the web root for debugging.
    pub descriptor_file: PathBuf,
}

/// External bundler/minifier collaborator.
///
/// Failures propagate unmodified to the render call; there is no fallback
/// to unbundled output.
pub trait Bundler: Send + Sync {
    fn process(&self, spec: &BundleSpec) -> Result<()>;
}

/// Everything a render call needs besides the accumulated fragments.
pub struct RenderContext<'a> {
    pub config: &'a HeadConfig,
    pub request: RequestContext,
    pub cache: &'a dyn RebuildCache,
    pub bundler: &'a dyn Bundler,
}

// ============================================================================
// Bundle Naming
// ============================================================================

/// Deterministic output name for an ordered list of source paths.
///
/// Concatenates each path followed by a comma, hashes the UTF-16LE bytes
/// with SHA-256, base64url-encodes the digest and sanitizes it into a
/// URL-safe slug. The name changes whenever the list, its order or any
/// path changes.
pub fn bundle_file_name(config: &HeadConfig, parts: &[&str]) -> Result<String> {
    ensure!(!parts.is_empty(), "cannot name a bundle with no input parts");

    let mut hash_input = String::new();
    for part in parts {
        hash_input.push_str(part);
        hash_input.push(',');
    }

    let utf16: Vec<u8> = hash_input.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let digest = Sha256::digest(&utf16);
    let encoded = URL_SAFE_NO_PAD.encode(digest);

    Ok(slug::se_name(
        &encoded,
        config.seo.transliterate_slugs,
        config.seo.allow_unicode_slugs,
    ))
}

// ============================================================================
// Reference Rendering
// ============================================================================

/// Render all references of one location as HTML tags, bundling the
/// eligible ones when the effective bundling flag is on.
pub(crate) fn render_references<T: AssetRef>(
    ctx: &RenderContext<'_>,
    kind: BundleKind,
    parts: &[T],
    bundle_override: Option<bool>,
) -> Result<String> {
    if parts.is_empty() {
        return Ok(String::new());
    }

    let mut bundle = bundle_override.unwrap_or(match kind {
        BundleKind::Script => ctx.config.bundling.enable_js_bundling,
        BundleKind::Stylesheet => ctx.config.bundling.enable_css_bundling,
    });

    // Bundled stylesheets carry relative url() references that cannot be
    // rewritten under a virtual directory. Scripts are unaffected.
    if kind == BundleKind::Stylesheet && ctx.request.has_path_base() {
        bundle = false;
    }

    let mut out = String::new();

    if bundle {
        let eligible = dedup_by_src(parts.iter().filter(|p| !p.exclude_from_bundle()));
        let excluded = dedup_by_src(parts.iter().filter(|p| p.exclude_from_bundle()));

        if !eligible.is_empty() {
            let href = rebuild_and_reference(ctx, kind, &eligible)?;
            match kind {
                BundleKind::Script => script_tag(&mut out, &href, false),
                BundleKind::Stylesheet => stylesheet_tag(&mut out, &href),
            }
        }
        for part in excluded {
            emit_individual(ctx, &mut out, kind, part);
        }
    } else {
        for part in dedup_by_src(parts.iter()) {
            emit_individual(ctx, &mut out, kind, part);
        }
    }

    Ok(out)
}

/// Ensure the bundle artifact for `eligible` exists (rebuilding if the
/// cache says so) and return the URL to reference it by.
fn rebuild_and_reference<T: AssetRef>(
    ctx: &RenderContext<'_>,
    kind: BundleKind,
    eligible: &[&T],
) -> Result<String> {
    let request = &ctx.request;
    let bundling = &ctx.config.bundling;

    let bundles_dir = request.web_root().join(&bundling.directory);
    fs::create_dir_all(&bundles_dir)
        .with_context(|| format!("creating bundle directory {}", bundles_dir.display()))?;

    let development = request.development();
    let chosen: Vec<&str> = eligible.iter().map(|p| p.pick(development)).collect();

    // Resolve each reference to its physical source under the web root.
    let input_files = chosen
        .iter()
        .map(|src| {
            let resolved = request.content(src);
            request.map_path(request.strip_path_base(&resolved))
        })
        .collect();

    let name = bundle_file_name(ctx.config, &chosen)?;
    let ext = kind.extension();
    let spec = BundleSpec {
        kind,
        input_files,
        output_file: bundles_dir.join(format!("{name}.{ext}")),
        descriptor_file: request.web_root().join(format!("{name}.json")),
    };

    let cache_key = format!(
        "{}.minification.shouldrebuild.{ext}-{name}",
        bundling.cache_namespace
    );
    let ttl = Duration::from_secs(bundling.cache_minutes.saturating_mul(60));

    // Two-phase write: a miss stores `true` so concurrent requests racing
    // this rebuild keep seeing "rebuild needed" until the artifact exists,
    // then `false` is written explicitly.
    let should_rebuild = ctx.cache.get_or(&cache_key, ttl, true)?;
    if should_rebuild {
        {
            let _guard = REBUILD_LOCK.lock();
            crate::log!(
                "bundle";
                "rebuilding {} from {} source file(s)",
                spec.output_file.display(),
                spec.input_files.len()
            );
            ctx.bundler.process(&spec).inspect_err(|e| {
                crate::log!("error"; "bundle rebuild failed for {}: {e}", spec.output_file.display());
            })?;
        }
        ctx.cache.set(&cache_key, false, ttl)?;
    }

    Ok(request.content(&format!("~/{}/{name}.min.{ext}", bundling.directory)))
}

/// Emit one individual reference tag for a part rendered outside a bundle.
fn emit_individual<T: AssetRef>(
    ctx: &RenderContext<'_>,
    out: &mut String,
    kind: BundleKind,
    part: &T,
) {
    let src = ctx.request.content(part.pick(ctx.request.development()));
    match kind {
        BundleKind::Script => script_tag(out, &src, part.is_async()),
        BundleKind::Stylesheet => stylesheet_tag(out, &src),
    }
}
