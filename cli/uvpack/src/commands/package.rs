//! `uvpack package` — acquire source, build, stage the package.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use uvpack_platform::{LinkMode, PlatformDescriptor};
use uvpack_resolve::{resolve, stage};

use crate::recipe::Recipe;

/// Run the full packaging pipeline.
pub fn run(
    project_dir: &Path,
    recipe: &Recipe,
    target: Option<&str>,
    link: Option<&str>,
    out: Option<&str>,
) -> Result<()> {
    let platform = resolve_platform(recipe, target, link)?;
    platform
        .validate()
        .context("platform validation failed")?;

    println!("Target: {platform}");

    // Stage the source. The checksum is verified in here, before anything
    // is built.
    let work_dir = project_dir.join("build");
    std::fs::create_dir_all(&work_dir)
        .with_context(|| format!("creating {}", work_dir.display()))?;
    let source_ref = recipe.source_ref(project_dir)?;
    let source_dir =
        uvpack_source::acquire(&source_ref, &work_dir).context("acquiring source")?;

    // Drive the external build, unless the tree is already built.
    let build_type = recipe.build_type();
    let plan = uvpack_build::plan(&platform, &source_dir, build_type)?;
    if recipe.prebuilt() {
        log::info!("prebuilt source tree, skipping build step");
    } else {
        uvpack_build::run(&plan)
            .with_context(|| format!("building {} {}", recipe.package.name, recipe.package.version))?;
    }
    let build_output_dir = source_dir.join(&plan.output_subdir);

    // Resolve and stage.
    let artifacts = resolve(&platform, &source_dir, &build_output_dir)?;
    let package_dir = match out {
        Some(path) => PathBuf::from(path),
        None => project_dir.join("package"),
    };
    let report = stage(&platform, &artifacts, &source_dir, &package_dir)?;

    println!(
        "Packaged {} {} ({} files)",
        recipe.package.name,
        recipe.package.version,
        report.copied.len()
    );
    println!("Link line: {}", artifacts.full_link_line().join(" "));
    println!("Manifest:  {}", report.manifest_path.display());
    if let Some(link) = report.symlink {
        println!("Symlink:   {}", link.display());
    }

    Ok(())
}

/// Combine CLI flags with recipe defaults into a platform descriptor.
fn resolve_platform(
    recipe: &Recipe,
    target: Option<&str>,
    link: Option<&str>,
) -> Result<PlatformDescriptor> {
    let link_mode: LinkMode = link
        .or(recipe.default_link_mode())
        .unwrap_or("static")
        .parse()?;

    let Some(descriptor) = target.or(recipe.default_target()) else {
        bail!("no target platform: pass --target or set [target] default in uvpack.toml");
    };

    Ok(PlatformDescriptor::parse(descriptor, link_mode)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvpack_platform::TargetOs;

    fn recipe(toml_str: &str) -> Recipe {
        Recipe::from_str(toml_str).unwrap()
    }

    #[test]
    fn flag_overrides_recipe_default() {
        let r = recipe(
            r#"
[package]
name = "libuv"
[source]
dir = "vendor"
[target]
default = "linux-x86_64-gcc13"
link-mode = "shared"
"#,
        );
        let p = resolve_platform(&r, Some("windows-x86_64-msvc16"), Some("static")).unwrap();
        assert_eq!(p.os, TargetOs::Windows);
        assert!(!p.is_shared());
    }

    #[test]
    fn recipe_default_used_without_flags() {
        let r = recipe(
            r#"
[package]
name = "libuv"
[source]
dir = "vendor"
[target]
default = "linux-x86_64-gcc13"
link-mode = "shared"
"#,
        );
        let p = resolve_platform(&r, None, None).unwrap();
        assert_eq!(p.os, TargetOs::Linux);
        assert!(p.is_shared());
    }

    #[test]
    fn static_is_the_default_link_mode() {
        let r = recipe(
            r#"
[package]
name = "libuv"
[source]
dir = "vendor"
"#,
        );
        let p = resolve_platform(&r, Some("linux-x86_64-gcc13"), None).unwrap();
        assert!(!p.is_shared());
    }

    #[test]
    fn missing_target_is_an_error() {
        let r = recipe(
            r#"
[package]
name = "libuv"
[source]
dir = "vendor"
"#,
        );
        assert!(resolve_platform(&r, None, None).is_err());
    }
}
