//! `uvpack.toml` recipe parsing.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use uvpack_source::{Sha256Digest, SourceRef};

/// The top-level recipe for a packaged library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata (required).
    pub package: PackageConfig,
    /// Where the upstream source comes from (required).
    pub source: SourceConfig,
    /// Build configuration.
    #[serde(default)]
    pub build: Option<BuildConfig>,
    /// Default target configuration.
    #[serde(default)]
    pub target: Option<TargetConfig>,
}

/// Package metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Package name (required).
    pub name: String,
    /// Upstream version being packaged.
    #[serde(default = "default_version")]
    pub version: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Source section: a release archive with its digest, or an unpacked tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to a `.tar.gz` release archive.
    #[serde(default)]
    pub archive: Option<String>,
    /// Path to an already-unpacked source tree.
    #[serde(default)]
    pub dir: Option<String>,
    /// Expected SHA-256 of the archive (required with `archive`).
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Build section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build type passed to the generator (default: Release).
    #[serde(default)]
    pub build_type: Option<String>,
    /// Treat the source tree as already built; package its existing
    /// `out/<build_type>` without invoking the toolchain.
    #[serde(default)]
    pub prebuilt: Option<bool>,
}

/// Target section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetConfig {
    /// Default platform descriptor (e.g. `linux-x86_64-gcc13`).
    #[serde(default)]
    pub default: Option<String>,
    /// Default link mode (`static` or `shared`).
    #[serde(default)]
    pub link_mode: Option<String>,
}

impl Recipe {
    /// Search upward from `start_dir` for an `uvpack.toml`, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("uvpack.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let recipe: Recipe = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((recipe, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a recipe from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing uvpack.toml")
    }

    /// Resolve the recipe's source reference, with relative paths taken
    /// against the recipe directory.
    pub fn source_ref(&self, recipe_dir: &Path) -> Result<SourceRef> {
        match (&self.source.archive, &self.source.dir) {
            (Some(archive), None) => {
                let Some(ref sha256) = self.source.sha256 else {
                    bail!("[source] archive requires an expected sha256 digest");
                };
                let digest = Sha256Digest::parse(sha256)?;
                Ok(SourceRef::Archive {
                    path: resolve_path(recipe_dir, archive),
                    sha256: digest,
                })
            }
            (None, Some(dir)) => Ok(SourceRef::Directory {
                path: resolve_path(recipe_dir, dir),
            }),
            (Some(_), Some(_)) => bail!("[source] cannot name both an archive and a dir"),
            (None, None) => bail!("[source] must name an archive or a dir"),
        }
    }

    /// Build type passed to the generator.
    pub fn build_type(&self) -> &str {
        self.build
            .as_ref()
            .and_then(|b| b.build_type.as_deref())
            .unwrap_or("Release")
    }

    /// Whether the source tree is already built.
    pub fn prebuilt(&self) -> bool {
        self.build
            .as_ref()
            .and_then(|b| b.prebuilt)
            .unwrap_or(false)
    }

    /// The default target descriptor, if the recipe names one.
    pub fn default_target(&self) -> Option<&str> {
        self.target.as_ref().and_then(|t| t.default.as_deref())
    }

    /// The default link mode, if the recipe names one.
    pub fn default_link_mode(&self) -> Option<&str> {
        self.target.as_ref().and_then(|t| t.link_mode.as_deref())
    }
}

fn resolve_path(recipe_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        recipe_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_recipe() {
        let toml_str = r#"
[package]
name = "libuv"
version = "1.31.0"
description = "Cross-platform asynchronous I/O"

[source]
archive = "v1.31.0.tar.gz"
sha256 = "ab041ea5d1965a33d4e03ea87718b8922ba4e54abb46c71cf9e040edef2556c0"

[build]
build_type = "Debug"

[target]
default = "linux-x86_64-gcc13"
link-mode = "shared"
"#;
        let recipe = Recipe::from_str(toml_str).unwrap();
        assert_eq!(recipe.package.name, "libuv");
        assert_eq!(recipe.package.version, "1.31.0");
        assert_eq!(recipe.build_type(), "Debug");
        assert!(!recipe.prebuilt());
        assert_eq!(recipe.default_target(), Some("linux-x86_64-gcc13"));
        assert_eq!(recipe.default_link_mode(), Some("shared"));
    }

    #[test]
    fn parse_minimal_recipe() {
        let toml_str = r#"
[package]
name = "libuv"

[source]
dir = "vendor/libuv"
"#;
        let recipe = Recipe::from_str(toml_str).unwrap();
        assert_eq!(recipe.build_type(), "Release");
        assert!(recipe.default_target().is_none());

        let source = recipe.source_ref(Path::new("/project")).unwrap();
        match source {
            SourceRef::Directory { path } => {
                assert_eq!(path, PathBuf::from("/project/vendor/libuv"))
            }
            other => panic!("expected directory source, got {other:?}"),
        }
    }

    #[test]
    fn archive_without_digest_rejected() {
        let toml_str = r#"
[package]
name = "libuv"

[source]
archive = "v1.31.0.tar.gz"
"#;
        let recipe = Recipe::from_str(toml_str).unwrap();
        assert!(recipe.source_ref(Path::new("/p")).is_err());
    }

    #[test]
    fn conflicting_sources_rejected() {
        let toml_str = r#"
[package]
name = "libuv"

[source]
archive = "a.tar.gz"
dir = "vendor"
sha256 = "ab041ea5d1965a33d4e03ea87718b8922ba4e54abb46c71cf9e040edef2556c0"
"#;
        let recipe = Recipe::from_str(toml_str).unwrap();
        assert!(recipe.source_ref(Path::new("/p")).is_err());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(Recipe::from_str("this is not valid toml [[[").is_err());
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("uvpack.toml"),
            "[package]\nname = \"libuv\"\n[source]\ndir = \"vendor\"\n",
        )
        .unwrap();

        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (recipe, found_dir) = Recipe::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(recipe.package.name, "libuv");
        assert_eq!(found_dir, dir.path());
    }
}
