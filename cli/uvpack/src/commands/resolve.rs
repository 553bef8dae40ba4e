//! `uvpack resolve` — preview artifact and link metadata for a target.

use std::path::Path;

use anyhow::Result;

use uvpack_platform::{LinkMode, PlatformDescriptor};

/// Print what `package` would resolve for a target, without building.
pub fn run(target: &str, link: Option<&str>, json: bool) -> Result<()> {
    let link_mode: LinkMode = link.unwrap_or("static").parse()?;
    let platform = PlatformDescriptor::parse(target, link_mode)?;
    platform.validate()?;

    // Resolution is a pure function of the descriptor; the preview uses
    // the conventional tree layout.
    let source_dir = Path::new("source");
    let out_dir = source_dir.join("out/Release");
    let artifacts = uvpack_resolve::resolve(&platform, source_dir, &out_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&artifacts)?);
        return Ok(());
    }

    println!("Target: {platform}");
    println!();
    println!("Expected artifacts:");
    for path in &artifacts.library_paths {
        if let Some(name) = path.file_name() {
            println!("  {}", name.to_string_lossy());
        }
    }
    println!("Link libraries:   {}", artifacts.link_library_names.join(" "));
    println!(
        "System libraries: {}",
        if artifacts.system_library_names.is_empty() {
            "(none)".to_string()
        } else {
            artifacts.system_library_names.join(" ")
        }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_preview_runs() {
        run("linux-x86_64-gcc13", Some("shared"), false).unwrap();
        run("windows-x86_64-msvc16", None, true).unwrap();
    }

    #[test]
    fn resolve_preview_rejects_old_msvc() {
        assert!(run("windows-x86_64-msvc12", None, false).is_err());
    }

    #[test]
    fn resolve_preview_rejects_unsupported_os() {
        assert!(run("neutrino-x86_64-gcc9", None, false).is_err());
    }
}
