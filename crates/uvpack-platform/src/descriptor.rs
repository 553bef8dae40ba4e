//! Complete platform descriptor.
//!
//! Assembles OS + architecture + compiler + link mode into the single
//! immutable value that drives source selection, build orchestration,
//! and artifact resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compiler::{Compiler, CompilerFamily};
use crate::error::PlatformError;
use crate::os::{Arch, TargetOs};

/// Static vs. dynamic linking selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkMode {
    Static,
    Shared,
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkMode::Static => write!(f, "static"),
            LinkMode::Shared => write!(f, "shared"),
        }
    }
}

impl FromStr for LinkMode {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(LinkMode::Static),
            "shared" => Ok(LinkMode::Shared),
            other => Err(PlatformError::InvalidDescriptor {
                detail: format!("link mode must be 'static' or 'shared', got '{other}'"),
            }),
        }
    }
}

/// An immutable description of the build target.
///
/// Constructed once per invocation; every downstream decision (generator
/// choice, artifact names, link flags) is a function of this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformDescriptor {
    pub os: TargetOs,
    pub arch: Arch,
    pub compiler: Compiler,
    pub link_mode: LinkMode,
}

impl PlatformDescriptor {
    pub fn new(os: TargetOs, arch: Arch, compiler: Compiler, link_mode: LinkMode) -> Self {
        PlatformDescriptor {
            os,
            arch,
            compiler,
            link_mode,
        }
    }

    /// Parse a descriptor string of the form `<os>-<arch>-<compiler><version>`,
    /// e.g. `windows-x86_64-msvc16` or `macos-x86_64-apple-clang14`.
    pub fn parse(descriptor: &str, link_mode: LinkMode) -> Result<Self, PlatformError> {
        let mut parts = descriptor.splitn(3, '-');
        let (os, arch, compiler) = match (parts.next(), parts.next(), parts.next()) {
            (Some(os), Some(arch), Some(compiler)) => (os, arch, compiler),
            _ => {
                return Err(PlatformError::InvalidDescriptor {
                    detail: format!(
                        "'{descriptor}' does not match <os>-<arch>-<compiler><version>"
                    ),
                })
            }
        };

        let os: TargetOs = os.parse()?;
        let arch: Arch = arch.parse()?;
        let compiler = parse_compiler(compiler)?;

        Ok(PlatformDescriptor::new(os, arch, compiler, link_mode))
    }

    /// Descriptor for the machine uvpack is running on, assuming the given
    /// compiler.
    pub fn host(compiler: Compiler, link_mode: LinkMode) -> Self {
        PlatformDescriptor::new(TargetOs::host(), Arch::host(), compiler, link_mode)
    }

    /// Validate the descriptor before any build step runs.
    pub fn validate(&self) -> Result<(), PlatformError> {
        self.compiler.validate()
    }

    pub fn is_shared(&self) -> bool {
        self.link_mode == LinkMode::Shared
    }

    /// Windows with a non-MSVC toolchain.
    pub fn is_mingw(&self) -> bool {
        self.os.is_windows() && self.compiler.family != CompilerFamily::Msvc
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}{} ({})",
            self.os, self.arch, self.compiler.family, self.compiler.version, self.link_mode
        )
    }
}

/// Split `msvc16` / `gcc13.2` / `apple-clang14` into family and version.
fn parse_compiler(s: &str) -> Result<Compiler, PlatformError> {
    let digit_at = s.find(|c: char| c.is_ascii_digit());
    let Some(at) = digit_at else {
        return Err(PlatformError::InvalidDescriptor {
            detail: format!("compiler '{s}' is missing a version"),
        });
    };
    let family: CompilerFamily = s[..at].trim_end_matches('-').parse()?;
    let version = Compiler::parse_version(&s[at..])?;
    Ok(Compiler::new(family, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_windows_msvc() {
        let p = PlatformDescriptor::parse("windows-x86_64-msvc16", LinkMode::Shared).unwrap();
        assert_eq!(p.os, TargetOs::Windows);
        assert_eq!(p.arch, Arch::X86_64);
        assert_eq!(p.compiler.family, CompilerFamily::Msvc);
        assert_eq!(p.compiler.version, semver::Version::new(16, 0, 0));
        assert!(p.is_shared());
        assert!(!p.is_mingw());
    }

    #[test]
    fn parse_apple_clang_with_hyphen() {
        let p = PlatformDescriptor::parse("macos-x86_64-apple-clang14", LinkMode::Static).unwrap();
        assert_eq!(p.compiler.family, CompilerFamily::AppleClang);
        assert_eq!(p.compiler.version.major, 14);
    }

    #[test]
    fn parse_linux_gcc_minor_version() {
        let p = PlatformDescriptor::parse("linux-x86_64-gcc13.2", LinkMode::Static).unwrap();
        assert_eq!(p.compiler.version, semver::Version::new(13, 2, 0));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(PlatformDescriptor::parse("linux", LinkMode::Static).is_err());
        assert!(PlatformDescriptor::parse("linux-x86_64", LinkMode::Static).is_err());
        assert!(PlatformDescriptor::parse("linux-x86_64-gcc", LinkMode::Static).is_err());
        assert!(PlatformDescriptor::parse("plan9-x86_64-gcc9", LinkMode::Static).is_err());
    }

    #[test]
    fn mingw_detection() {
        let p = PlatformDescriptor::parse("windows-x86_64-gcc12", LinkMode::Static).unwrap();
        assert!(p.is_mingw());
        let p = PlatformDescriptor::parse("linux-x86_64-gcc12", LinkMode::Static).unwrap();
        assert!(!p.is_mingw());
    }

    #[test]
    fn validate_rejects_old_msvc() {
        let p = PlatformDescriptor::parse("windows-x86-msvc12", LinkMode::Static).unwrap();
        assert!(p.validate().is_err());
        let p = PlatformDescriptor::parse("windows-x86-msvc14", LinkMode::Static).unwrap();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn link_mode_roundtrip() {
        assert_eq!("static".parse::<LinkMode>().unwrap(), LinkMode::Static);
        assert_eq!("shared".parse::<LinkMode>().unwrap(), LinkMode::Shared);
        assert!("dynamic".parse::<LinkMode>().is_err());
    }

    #[test]
    fn descriptor_display() {
        let p = PlatformDescriptor::parse("linux-x86_64-gcc13", LinkMode::Shared).unwrap();
        let s = p.to_string();
        assert!(s.contains("linux"));
        assert!(s.contains("shared"));
    }
}
