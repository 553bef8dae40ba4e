//! Staging upstream source into the build workspace.
//!
//! Archives are verified against their expected digest, then unpacked with
//! the system `tar` into `<work_dir>/source` (the top-level directory of
//! the archive is stripped, so the layout is stable regardless of the
//! upstream folder name). Directory sources are copied so the build never
//! mutates the original tree.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::checksum::Sha256Digest;
use crate::error::{Result, SourceError};

/// Where a recipe's source comes from.
#[derive(Debug, Clone)]
pub enum SourceRef {
    /// A release archive (`.tar.gz`) with its expected digest.
    Archive { path: PathBuf, sha256: Sha256Digest },
    /// An already-unpacked source tree.
    Directory { path: PathBuf },
}

/// Verify and stage the source, returning the staged source root.
///
/// On checksum mismatch nothing is written under `work_dir`.
pub fn acquire(source: &SourceRef, work_dir: &Path) -> Result<PathBuf> {
    let dest = work_dir.join("source");
    match source {
        SourceRef::Archive { path, sha256 } => {
            if !path.is_file() {
                return Err(SourceError::NotFound { path: path.clone() });
            }
            let actual = Sha256Digest::compute_file(path)?;
            if actual != *sha256 {
                return Err(SourceError::ChecksumMismatch {
                    path: path.clone(),
                    expected: sha256.as_str().to_string(),
                    actual: actual.as_str().to_string(),
                });
            }
            extract_archive(path, &dest)?;
        }
        SourceRef::Directory { path } => {
            if !path.is_dir() {
                return Err(SourceError::NotFound { path: path.clone() });
            }
            copy_tree(path, &dest)?;
        }
    }
    Ok(dest)
}

/// Unpack an archive with the system `tar`, stripping the top-level folder.
fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    let status = Command::new("tar")
        .arg("-xzf")
        .arg(archive)
        .arg("-C")
        .arg(dest)
        .arg("--strip-components=1")
        .status()
        .map_err(|e| SourceError::ExtractFailed {
            detail: format!("running tar: {e}"),
        })?;
    if !status.success() {
        return Err(SourceError::ExtractFailed {
            detail: format!("tar exited with {status} for {}", archive.display()),
        });
    }
    Ok(())
}

/// Recursively copy a source tree.
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    std::fs::create_dir_all(to)?;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_source_is_copied() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("upstream");
        std::fs::create_dir_all(src.join("include")).unwrap();
        std::fs::write(src.join("include/uv.h"), "// header").unwrap();

        let work = dir.path().join("work");
        std::fs::create_dir_all(&work).unwrap();

        let staged = acquire(&SourceRef::Directory { path: src.clone() }, &work).unwrap();
        assert_eq!(staged, work.join("source"));
        assert!(staged.join("include/uv.h").is_file());
        // Original untouched
        assert!(src.join("include/uv.h").is_file());
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = acquire(
            &SourceRef::Directory {
                path: dir.path().join("nope"),
            },
            dir.path(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn checksum_mismatch_aborts_before_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("libuv-1.31.0.tar.gz");
        std::fs::write(&archive, b"not really a tarball").unwrap();

        let wrong = Sha256Digest::compute(b"some other content");
        let work = dir.path().join("work");
        std::fs::create_dir_all(&work).unwrap();

        let err = acquire(
            &SourceRef::Archive {
                path: archive,
                sha256: wrong,
            },
            &work,
        )
        .unwrap_err();

        assert!(matches!(err, SourceError::ChecksumMismatch { .. }));
        // Nothing staged
        assert!(!work.join("source").exists());
    }

    #[test]
    fn archive_extraction_roundtrip() {
        // Needs the system tar; skip quietly where it is unavailable.
        if Command::new("tar").arg("--version").output().is_err() {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let upstream = dir.path().join("libuv-1.31.0");
        std::fs::create_dir_all(upstream.join("include")).unwrap();
        std::fs::write(upstream.join("include/uv.h"), "// uv").unwrap();

        let archive = dir.path().join("v1.31.0.tar.gz");
        let status = Command::new("tar")
            .arg("-czf")
            .arg(&archive)
            .arg("-C")
            .arg(dir.path())
            .arg("libuv-1.31.0")
            .status()
            .unwrap();
        assert!(status.success());

        let digest = Sha256Digest::compute_file(&archive).unwrap();
        let work = dir.path().join("work");
        std::fs::create_dir_all(&work).unwrap();

        let staged = acquire(
            &SourceRef::Archive {
                path: archive,
                sha256: digest,
            },
            &work,
        )
        .unwrap();

        // Top-level folder stripped: include/ sits directly under source/
        assert!(staged.join("include/uv.h").is_file());
    }
}
