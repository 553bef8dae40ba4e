//! `uvpack clean` — remove build and package output.

use std::fs;
use std::path::Path;

use anyhow::Result;

/// Remove the staged build tree and the package output directory.
pub fn run(project_dir: &Path) -> Result<()> {
    for name in ["build", "package"] {
        let dir = project_dir.join(name);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            println!("Removed {}", dir.display());
        } else {
            println!("Already clean: {} does not exist", dir.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_build_and_package() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        let package = dir.path().join("package");
        fs::create_dir_all(build.join("source")).unwrap();
        fs::create_dir(&package).unwrap();

        run(dir.path()).unwrap();
        assert!(!build.exists());
        assert!(!package.exists());
    }

    #[test]
    fn clean_handles_already_clean() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
    }
}
