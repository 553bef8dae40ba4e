//! `uvpack doctor` — toolchain diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use crate::recipe::Recipe;

/// Print toolchain diagnostic information.
pub fn run(project_dir: &Path) -> Result<()> {
    println!("=== uvpack doctor ===");
    println!();

    println!("uvpack version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    // External tools the build plans can call.
    println!("--- Build Tools ---");
    print_tool_status("python", &["--version"]);
    print_tool_status("ninja", &["--version"]);
    print_tool_status("cmake", &["--version"]);
    print_tool_status("tar", &["--version"]);
    println!();

    // Recipe status
    println!("--- Recipe Status ---");
    match Recipe::find_and_load(project_dir) {
        Ok(Some((recipe, dir))) => {
            println!("  uvpack.toml: found at {}", dir.display());
            println!("  Package:     {}", recipe.package.name);
            println!("  Version:     {}", recipe.package.version);
            if let Some(target) = recipe.default_target() {
                println!("  Default target: {target}");
            }
        }
        Ok(None) => {
            println!("  uvpack.toml: not found");
        }
        Err(e) => {
            println!("  uvpack.toml: error: {e}");
        }
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn doctor_runs_without_error() {
        let dir = tempfile::tempdir().unwrap();
        super::run(dir.path()).unwrap();
    }
}
