//! Operating system and architecture enumerations.
//!
//! Closed enums instead of loose strings: every packaging rule matches
//! exhaustively, so an OS with no rule is a compile-visible case rather
//! than a silent fall-through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetOs {
    Windows,
    Linux,
    Android,
    Macos,
    Ios,
    Watchos,
    Tvos,
    SunOs,
    Aix,
    Neutrino,
    WindowsCe,
    Other,
}

impl TargetOs {
    /// Detect the operating system uvpack itself is running on.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else if cfg!(target_os = "linux") {
            TargetOs::Linux
        } else if cfg!(target_os = "android") {
            TargetOs::Android
        } else if cfg!(target_os = "macos") {
            TargetOs::Macos
        } else {
            TargetOs::Other
        }
    }

    /// True for desktop and embedded Windows.
    pub fn is_windows(self) -> bool {
        matches!(self, TargetOs::Windows | TargetOs::WindowsCe)
    }

    /// True for the Apple platform family.
    pub fn is_apple(self) -> bool {
        matches!(
            self,
            TargetOs::Macos | TargetOs::Ios | TargetOs::Watchos | TargetOs::Tvos
        )
    }

    /// True for platforms with Unix shared-object conventions
    /// (`lib<name>.so`, symlinked unversioned name).
    pub fn is_unix_like(self) -> bool {
        matches!(
            self,
            TargetOs::Linux
                | TargetOs::Android
                | TargetOs::SunOs
                | TargetOs::Aix
                | TargetOs::Neutrino
        ) || self.is_apple()
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::Android => "android",
            TargetOs::Macos => "macos",
            TargetOs::Ios => "ios",
            TargetOs::Watchos => "watchos",
            TargetOs::Tvos => "tvos",
            TargetOs::SunOs => "sunos",
            TargetOs::Aix => "aix",
            TargetOs::Neutrino => "neutrino",
            TargetOs::WindowsCe => "windowsce",
            TargetOs::Other => "other",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TargetOs {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" => Ok(TargetOs::Windows),
            "linux" => Ok(TargetOs::Linux),
            "android" => Ok(TargetOs::Android),
            "macos" => Ok(TargetOs::Macos),
            "ios" => Ok(TargetOs::Ios),
            "watchos" => Ok(TargetOs::Watchos),
            "tvos" => Ok(TargetOs::Tvos),
            "sunos" => Ok(TargetOs::SunOs),
            "aix" => Ok(TargetOs::Aix),
            "neutrino" => Ok(TargetOs::Neutrino),
            "windowsce" => Ok(TargetOs::WindowsCe),
            other => Err(PlatformError::UnknownOs {
                name: other.to_string(),
            }),
        }
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arch {
    X86,
    X86_64,
    Other,
}

impl Arch {
    /// Detect the architecture uvpack itself is running on.
    pub fn host() -> Self {
        if cfg!(target_arch = "x86_64") {
            Arch::X86_64
        } else if cfg!(target_arch = "x86") {
            Arch::X86
        } else {
            Arch::Other
        }
    }

    /// The `target_arch` value GYP expects, if this architecture has one.
    pub fn gyp_target_arch(self) -> Option<&'static str> {
        match self {
            Arch::X86 => Some("ia32"),
            Arch::X86_64 => Some("x64"),
            Arch::Other => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Other => "other",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Arch {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86" => Ok(Arch::X86),
            "x86_64" | "x64" => Ok(Arch::X86_64),
            other => Err(PlatformError::UnknownArch {
                name: other.to_string(),
            }),
        }
    }
}
