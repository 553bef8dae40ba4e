//! Staging resolved artifacts into the package layout.
//!
//! Layout:
//! ```text
//! <package>/
//!   include/            exported headers (*.h, nested dirs preserved)
//!   lib/                libraries and import libraries
//!   bin/                DLLs (Windows shared builds only)
//!   share/              link-metadata manifest (non-Windows targets)
//!   licenses/           upstream LICENSE files
//! ```
//!
//! Every expected library file is checked before anything is copied, so a
//! missing artifact aborts staging with nothing written.

use std::path::{Path, PathBuf};

use serde::Serialize;
use uvpack_platform::PlatformDescriptor;

use crate::artifact::ArtifactSet;
use crate::error::{ResolveError, Result};
use crate::policy::unversioned_alias;

/// Directory layout of a staged package.
#[derive(Debug, Clone)]
pub struct PackageLayout {
    root: PathBuf,
}

impl PackageLayout {
    pub fn new(root: PathBuf) -> Self {
        PackageLayout { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn include_dir(&self) -> PathBuf {
        self.root.join("include")
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    pub fn share_dir(&self) -> PathBuf {
        self.root.join("share")
    }

    pub fn licenses_dir(&self) -> PathBuf {
        self.root.join("licenses")
    }
}

/// The link-metadata manifest consumed by downstream build configuration.
#[derive(Debug, Serialize)]
struct PackageInfo<'a> {
    os: String,
    link_mode: String,
    link_libraries: &'a [String],
    system_libraries: &'a [String],
}

/// What staging produced.
#[derive(Debug)]
pub struct StageReport {
    /// Files copied into the package, in copy order.
    pub copied: Vec<PathBuf>,
    /// Where the link-metadata manifest was written.
    pub manifest_path: PathBuf,
    /// The unversioned shared-object symlink, when one was created.
    pub symlink: Option<PathBuf>,
}

/// Copy resolved artifacts into `package_dir` and write the manifest.
pub fn stage(
    platform: &PlatformDescriptor,
    artifacts: &ArtifactSet,
    source_dir: &Path,
    package_dir: &Path,
) -> Result<StageReport> {
    // Verify everything up front: a missing artifact aborts with nothing
    // staged.
    for lib in &artifacts.library_paths {
        if !lib.is_file() {
            return Err(ResolveError::ArtifactMissing { path: lib.clone() });
        }
    }
    for root in &artifacts.header_paths {
        if !root.is_dir() {
            return Err(ResolveError::ArtifactMissing { path: root.clone() });
        }
    }

    let layout = PackageLayout::new(package_dir.to_path_buf());
    let mut copied = Vec::new();

    // Headers, nested structure preserved.
    std::fs::create_dir_all(layout.include_dir())?;
    for root in &artifacts.header_paths {
        copy_headers(root, &layout.include_dir(), &mut copied)?;
    }

    // Libraries: DLLs go to bin/, everything else to lib/.
    std::fs::create_dir_all(layout.lib_dir())?;
    for lib in &artifacts.library_paths {
        let name = lib
            .file_name()
            .ok_or_else(|| ResolveError::ArtifactMissing { path: lib.clone() })?;
        let dest = if lib.extension().is_some_and(|e| e == "dll") {
            std::fs::create_dir_all(layout.bin_dir())?;
            layout.bin_dir().join(name)
        } else {
            layout.lib_dir().join(name)
        };
        std::fs::copy(lib, &dest)?;
        copied.push(dest);
    }

    // Unversioned alias next to the versioned shared object.
    let symlink = match unversioned_alias(platform) {
        Some((link, target)) => create_alias(&layout.lib_dir(), link, target)?,
        None => None,
    };

    // Upstream license files.
    std::fs::create_dir_all(layout.licenses_dir())?;
    for entry in std::fs::read_dir(source_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with("LICENSE") && entry.path().is_file() {
            let dest = layout.licenses_dir().join(&name);
            std::fs::copy(entry.path(), &dest)?;
            copied.push(dest);
        }
    }

    // Link-metadata manifest. Windows packages carry it at the root next
    // to bin/; everything else under share/.
    let manifest_path = if platform.os.is_windows() {
        layout.root().join("package-info.json")
    } else {
        std::fs::create_dir_all(layout.share_dir())?;
        layout.share_dir().join("package-info.json")
    };
    let info = PackageInfo {
        os: platform.os.to_string(),
        link_mode: platform.link_mode.to_string(),
        link_libraries: &artifacts.link_library_names,
        system_libraries: &artifacts.system_library_names,
    };
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&info)?)?;

    Ok(StageReport {
        copied,
        manifest_path,
        symlink,
    })
}

/// Recursively copy `*.h` out of a header root, preserving subdirectories.
fn copy_headers(from: &Path, to: &Path, copied: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let sub = to.join(entry.file_name());
            std::fs::create_dir_all(&sub)?;
            copy_headers(&path, &sub, copied)?;
        } else if path.extension().is_some_and(|e| e == "h") {
            let dest = to.join(entry.file_name());
            std::fs::copy(&path, &dest)?;
            copied.push(dest);
        }
    }
    Ok(())
}

#[cfg(unix)]
fn create_alias(lib_dir: &Path, link: &str, target: &str) -> Result<Option<PathBuf>> {
    let link_path = lib_dir.join(link);
    std::os::unix::fs::symlink(target, &link_path)?;
    Ok(Some(link_path))
}

#[cfg(not(unix))]
fn create_alias(_lib_dir: &Path, _link: &str, _target: &str) -> Result<Option<PathBuf>> {
    // No symlinks on this host; downstream consumers use the versioned name.
    Ok(None)
}
