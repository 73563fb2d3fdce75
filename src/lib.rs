//! Pagehead - per-request HTML head aggregation and asset bundling.
//!
//! A [`PageHeadBuilder`] is created once per request. View components
//! contribute title/meta/script/stylesheet fragments while the page renders,
//! and the document template asks for the finalized strings at the end.
//! Script and stylesheet references can optionally be bundled into a single
//! content-addressed artifact on disk, guarded by a TTL cache so the bundler
//! does not run on every request.
//!
//! # Example
//!
//! ```no_run
//! use pagehead::{
//!     ConcatBundler, HeadConfig, MemoryCache, PageHeadBuilder, RenderContext,
//!     RequestContext, ResourceLocation,
//! };
//!
//! let config = HeadConfig::default();
//! let cache = MemoryCache::default();
//! let bundler = ConcatBundler;
//!
//! // One builder per request.
//! let mut head = PageHeadBuilder::default();
//! head.add_title_part("Checkout");
//! head.add_script_part(ResourceLocation::Head, "~/js/site.js", "", false, false);
//!
//! let ctx = RenderContext {
//!     config: &config,
//!     request: RequestContext::new("", "wwwroot", false),
//!     cache: &cache,
//!     bundler: &bundler,
//! };
//! let title = head.generate_title(&config, true);
//! let scripts = head.generate_scripts(&ctx, ResourceLocation::Head, None)?;
//! # anyhow::Ok(())
//! ```

pub mod assets;
pub mod bundle;
pub mod cache;
pub mod config;
pub mod head;
pub mod log;
pub mod minify;
pub mod request;
pub mod slug;

pub use assets::{ResourceLocation, ScriptRef, StyleRef};
pub use bundle::{BundleKind, BundleSpec, Bundler, RenderContext, bundle_file_name};
pub use cache::{MemoryCache, RebuildCache};
pub use config::{ConfigError, HeadConfig, TitleAdjustment};
pub use head::PageHeadBuilder;
pub use minify::ConcatBundler;
pub use request::RequestContext;
