//! Default bundler: concatenation with a light minification pass.
//!
//! A real minification engine can be plugged in behind the
//! [`Bundler`](crate::bundle::Bundler) trait; this implementation keeps the
//! pipeline working without one. CSS is minified by stripping indentation
//! and blank lines; scripts are concatenated untouched since whitespace
//! stripping is not safe without a parser.

use crate::bundle::{BundleKind, BundleSpec, Bundler};
use anyhow::{Context as _, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Bundler that concatenates source files on disk.
///
/// Writes the plain artifact, a `.min.*` sibling and a JSON descriptor
/// recording the inputs that produced it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcatBundler;

/// Descriptor written next to each produced bundle (for debugging).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BundleDescriptor {
    output_file_name: String,
    input_files: Vec<String>,
}

impl Bundler for ConcatBundler {
    fn process(&self, spec: &BundleSpec) -> Result<()> {
        let mut combined = String::new();
        for input in &spec.input_files {
            let source = fs::read_to_string(input)
                .with_context(|| format!("reading bundle input {}", input.display()))?;
            combined.push_str(&source);
            if !combined.ends_with('\n') {
                combined.push('\n');
            }
        }

        fs::write(&spec.output_file, &combined)
            .with_context(|| format!("writing bundle {}", spec.output_file.display()))?;

        let minified = match spec.kind {
            BundleKind::Script => combined,
            BundleKind::Stylesheet => strip_css_whitespace(&combined),
        };
        let min_file = minified_path(&spec.output_file);
        fs::write(&min_file, minified)
            .with_context(|| format!("writing minified bundle {}", min_file.display()))?;

        let descriptor = BundleDescriptor {
            output_file_name: spec.output_file.display().to_string(),
            input_files: spec
                .input_files
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        };
        let json = serde_json::to_vec_pretty(&descriptor)?;
        fs::write(&spec.descriptor_file, json).with_context(|| {
            format!("writing bundle descriptor {}", spec.descriptor_file.display())
        })?;

        Ok(())
    }
}

/// `bundles/abc.js` → `bundles/abc.min.js`
fn minified_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let ext = output.extension().and_then(|s| s.to_str()).unwrap_or_default();
    output.with_file_name(format!("{stem}.min.{ext}"))
}

/// Remove indentation and blank lines. Line breaks are kept as separators;
/// collapsing them would merge tokens (e.g. a descendant-combinator selector
/// split over two lines).
fn strip_css_whitespace(css: &str) -> String {
    css.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn spec_in(dir: &TempDir, kind: BundleKind, inputs: &[(&str, &str)]) -> BundleSpec {
        let mut input_files = Vec::new();
        for (name, content) in inputs {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            input_files.push(path);
        }
        let ext = kind.extension();
        BundleSpec {
            kind,
            input_files,
            output_file: dir.path().join(format!("out.{ext}")),
            descriptor_file: dir.path().join("out.json"),
        }
    }

    #[test]
    fn test_concatenates_in_order() {
        let dir = TempDir::new().unwrap();
        let spec = spec_in(
            &dir,
            BundleKind::Script,
            &[("a.js", "var a = 1;"), ("b.js", "var b = 2;")],
        );
        ConcatBundler.process(&spec).unwrap();

        let combined = fs::read_to_string(&spec.output_file).unwrap();
        assert_eq!(combined, "var a = 1;\nvar b = 2;\n");
    }

    #[test]
    fn test_writes_min_sibling() {
        let dir = TempDir::new().unwrap();
        let spec = spec_in(&dir, BundleKind::Script, &[("a.js", "var a = 1;\n")]);
        ConcatBundler.process(&spec).unwrap();

        let min = fs::read_to_string(dir.path().join("out.min.js")).unwrap();
        assert_eq!(min, "var a = 1;\n");
    }

    #[test]
    fn test_css_minified() {
        let dir = TempDir::new().unwrap();
        let spec = spec_in(
            &dir,
            BundleKind::Stylesheet,
            &[("a.css", "body {\n  color: red;\n}\n\n")],
        );
        ConcatBundler.process(&spec).unwrap();

        let min = fs::read_to_string(dir.path().join("out.min.css")).unwrap();
        assert_eq!(min, "body {\ncolor: red;\n}");
    }

    #[test]
    fn test_css_minify_keeps_descendant_combinators() {
        let dir = TempDir::new().unwrap();
        let spec = spec_in(
            &dir,
            BundleKind::Stylesheet,
            &[("a.css", "div\np {\n  color: red;\n}\n")],
        );
        ConcatBundler.process(&spec).unwrap();

        // "div p" is a different selector from "divp"
        let min = fs::read_to_string(dir.path().join("out.min.css")).unwrap();
        assert!(!min.contains("divp"));
        assert_eq!(min, "div\np {\ncolor: red;\n}");
    }

    #[test]
    fn test_writes_descriptor() {
        let dir = TempDir::new().unwrap();
        let spec = spec_in(&dir, BundleKind::Script, &[("a.js", "1;")]);
        ConcatBundler.process(&spec).unwrap();

        let descriptor: serde_json::Value =
            serde_json::from_slice(&fs::read(&spec.descriptor_file).unwrap()).unwrap();
        assert_eq!(descriptor["inputFiles"].as_array().unwrap().len(), 1);
        assert!(
            descriptor["outputFileName"]
                .as_str()
                .unwrap()
                .ends_with("out.js")
        );
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = TempDir::new().unwrap();
        let spec = BundleSpec {
            kind: BundleKind::Script,
            input_files: vec![dir.path().join("missing.js")],
            output_file: dir.path().join("out.js"),
            descriptor_file: dir.path().join("out.json"),
        };
        assert!(ConcatBundler.process(&spec).is_err());
    }

    #[test]
    fn test_minified_path() {
        assert_eq!(
            minified_path(Path::new("bundles/abc.css")),
            PathBuf::from("bundles/abc.min.css")
        );
    }
}
