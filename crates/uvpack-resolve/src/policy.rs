//! The platform policy table.
//!
//! Everything here is a pure function of the platform descriptor: no
//! filesystem probing, no environment reads. Existence of the expected
//! files is checked later, during staging.

use std::collections::BTreeSet;
use std::path::Path;

use uvpack_platform::{LinkMode, PlatformDescriptor, TargetOs};

use crate::artifact::ArtifactSet;
use crate::error::{ResolveError, Result};

/// Resolve the artifact set for a platform against a staged source tree.
///
/// `source_dir` is the staged source root (headers live in its `include/`);
/// `build_output_dir` is where the external build put the compiled
/// libraries.
pub fn resolve(
    platform: &PlatformDescriptor,
    source_dir: &Path,
    build_output_dir: &Path,
) -> Result<ArtifactSet> {
    let file_names = library_file_names(platform)?;

    let mut header_paths = BTreeSet::new();
    header_paths.insert(source_dir.join("include"));

    let library_paths = file_names
        .iter()
        .map(|name| build_output_dir.join(name))
        .collect();

    Ok(ArtifactSet {
        header_paths,
        library_paths,
        link_library_names: link_library_names(platform),
        system_library_names: system_library_names(platform.os)?,
    })
}

/// The unversioned alias created next to the versioned shared object on
/// Unix-like targets: `libuv.so -> libuv.so.1`.
pub fn unversioned_alias(platform: &PlatformDescriptor) -> Option<(&'static str, &'static str)> {
    if platform.is_shared()
        && platform.os.is_unix_like()
        && !platform.os.is_apple()
    {
        Some(("libuv.so", "libuv.so.1"))
    } else {
        None
    }
}

/// File names the build is expected to have produced.
fn library_file_names(platform: &PlatformDescriptor) -> Result<Vec<&'static str>> {
    let shared = platform.is_shared();
    match platform.os {
        TargetOs::Windows => {
            if platform.is_mingw() {
                Ok(if shared {
                    vec!["libuv.dll", "libuv.dll.a"]
                } else {
                    vec!["libuv_a.a"]
                })
            } else {
                Ok(if shared {
                    vec!["uv.dll", "uv.lib"]
                } else {
                    vec!["uv_a.lib"]
                })
            }
        }
        TargetOs::Linux | TargetOs::Android | TargetOs::SunOs | TargetOs::Aix => Ok(if shared {
            vec!["libuv.so.1"]
        } else {
            vec!["libuv_a.a"]
        }),
        TargetOs::Macos | TargetOs::Ios | TargetOs::Watchos | TargetOs::Tvos => Ok(if shared {
            vec!["libuv.1.dylib"]
        } else {
            vec!["libuv_a.a"]
        }),
        TargetOs::Neutrino | TargetOs::WindowsCe | TargetOs::Other => {
            Err(ResolveError::UnsupportedPlatform {
                os: platform.os.to_string(),
            })
        }
    }
}

/// The package's own link names. Shared builds link `uv`; static builds
/// link the `_a`-suffixed archive.
fn link_library_names(platform: &PlatformDescriptor) -> Vec<String> {
    match platform.link_mode {
        LinkMode::Shared => vec!["uv".to_string()],
        LinkMode::Static => vec!["uv_a".to_string()],
    }
}

/// Extra system libraries each OS needs after `uv` itself.
fn system_library_names(os: TargetOs) -> Result<Vec<String>> {
    let names: &[&str] = match os {
        TargetOs::Windows => &["Psapi", "Ws2_32", "Iphlpapi", "Userenv"],
        TargetOs::Linux => &["pthread", "dl"],
        TargetOs::Android => &["dl"],
        TargetOs::SunOs => &["kstat", "nsl", "sendfile", "socket"],
        TargetOs::Aix => &["perfstat"],
        TargetOs::Macos | TargetOs::Ios | TargetOs::Watchos | TargetOs::Tvos => &[],
        TargetOs::Neutrino | TargetOs::WindowsCe | TargetOs::Other => {
            return Err(ResolveError::UnsupportedPlatform { os: os.to_string() })
        }
    };
    Ok(names.iter().map(|s| s.to_string()).collect())
}
