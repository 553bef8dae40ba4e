//! Compiler identity and version handling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Minimum supported MSVC toolset major version (Visual Studio 2015).
pub const MIN_MSVC_MAJOR: u64 = 14;

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    Msvc,
    Gcc,
    Clang,
    AppleClang,
    Other,
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Other => "other",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CompilerFamily {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "msvc" => Ok(CompilerFamily::Msvc),
            "gcc" => Ok(CompilerFamily::Gcc),
            "clang" => Ok(CompilerFamily::Clang),
            "apple-clang" => Ok(CompilerFamily::AppleClang),
            other => Err(PlatformError::UnknownCompiler {
                name: other.to_string(),
            }),
        }
    }
}

/// A compiler identity: family plus version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    pub family: CompilerFamily,
    pub version: semver::Version,
}

impl Compiler {
    pub fn new(family: CompilerFamily, version: semver::Version) -> Self {
        Compiler { family, version }
    }

    /// Parse a compiler version leniently: `"16"` and `"9.2"` are accepted
    /// alongside full `"16.0.0"` semver strings.
    pub fn parse_version(s: &str) -> Result<semver::Version, PlatformError> {
        let padded = match s.matches('.').count() {
            0 => format!("{s}.0.0"),
            1 => format!("{s}.0"),
            _ => s.to_string(),
        };
        Ok(semver::Version::parse(&padded)?)
    }

    /// Reject compiler versions the packaged library cannot be built with.
    ///
    /// MSVC before the 2015 toolset (major 14) is unsupported; other
    /// families carry no minimum.
    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.family == CompilerFamily::Msvc && self.version.major < MIN_MSVC_MAJOR {
            return Err(PlatformError::UnsupportedCompiler {
                family: self.family.to_string(),
                version: self.version.clone(),
                minimum: semver::Version::new(MIN_MSVC_MAJOR, 0, 0),
            });
        }
        Ok(())
    }

    /// The `GYP_MSVS_VERSION` value for MSVC toolsets GYP can drive.
    pub fn gyp_msvs_version(&self) -> Option<&'static str> {
        if self.family != CompilerFamily::Msvc {
            return None;
        }
        match self.version.major {
            14 => Some("2015"),
            15 => Some("2017"),
            _ => None,
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_version_parse() {
        assert_eq!(
            Compiler::parse_version("16").unwrap(),
            semver::Version::new(16, 0, 0)
        );
        assert_eq!(
            Compiler::parse_version("9.2").unwrap(),
            semver::Version::new(9, 2, 0)
        );
        assert_eq!(
            Compiler::parse_version("13.2.1").unwrap(),
            semver::Version::new(13, 2, 1)
        );
        assert!(Compiler::parse_version("not-a-version").is_err());
    }

    #[test]
    fn msvc_below_minimum_rejected() {
        let c = Compiler::new(CompilerFamily::Msvc, semver::Version::new(12, 0, 0));
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("minimum"));
    }

    #[test]
    fn msvc_at_minimum_accepted() {
        let c = Compiler::new(CompilerFamily::Msvc, semver::Version::new(14, 0, 0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn non_msvc_has_no_minimum() {
        let c = Compiler::new(CompilerFamily::Gcc, semver::Version::new(4, 8, 0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn msvs_year_mapping() {
        let v14 = Compiler::new(CompilerFamily::Msvc, semver::Version::new(14, 0, 0));
        let v15 = Compiler::new(CompilerFamily::Msvc, semver::Version::new(15, 0, 0));
        let v16 = Compiler::new(CompilerFamily::Msvc, semver::Version::new(16, 0, 0));
        let gcc = Compiler::new(CompilerFamily::Gcc, semver::Version::new(14, 0, 0));
        assert_eq!(v14.gyp_msvs_version(), Some("2015"));
        assert_eq!(v15.gyp_msvs_version(), Some("2017"));
        assert_eq!(v16.gyp_msvs_version(), None);
        assert_eq!(gcc.gyp_msvs_version(), None);
    }
}
