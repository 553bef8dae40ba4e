//! Generator selection and build-plan assembly.
//!
//! libuv's primary build driver is GYP emitting ninja files. GYP cannot
//! drive MinGW toolchains or MSVC from 2019 on, so those fall back to the
//! upstream CMake build.

use std::path::{Path, PathBuf};

use uvpack_platform::{CompilerFamily, LinkMode, PlatformDescriptor};

use crate::error::{BuildError, Result};

/// Which external build system drives the compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Gyp,
    Cmake,
}

impl Generator {
    /// Pick the generator for a platform.
    pub fn select(platform: &PlatformDescriptor) -> Generator {
        let msvc_2019_or_later = platform.compiler.family == CompilerFamily::Msvc
            && platform.compiler.version.major >= 16;
        if platform.is_mingw() || msvc_2019_or_later {
            Generator::Cmake
        } else {
            Generator::Gyp
        }
    }
}

/// One external command: program, arguments, extra environment, and the
/// directory it runs in.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    /// Render the command for error messages and logs.
    pub fn render(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// The ordered external steps that produce the build output.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub generator: Generator,
    pub steps: Vec<CommandSpec>,
    /// Where compiled artifacts land, relative to the source root.
    pub output_subdir: PathBuf,
}

/// Assemble the build plan for a platform against a staged source tree.
pub fn plan(platform: &PlatformDescriptor, source_dir: &Path, build_type: &str) -> Result<BuildPlan> {
    let generator = Generator::select(platform);
    match generator {
        Generator::Gyp => plan_gyp(platform, source_dir, build_type),
        Generator::Cmake => plan_cmake(platform, source_dir, build_type),
    }
}

fn plan_gyp(platform: &PlatformDescriptor, source_dir: &Path, build_type: &str) -> Result<BuildPlan> {
    let target_arch = platform.arch.gyp_target_arch().ok_or_else(|| {
        BuildError::Unsupported {
            detail: format!("GYP has no target_arch for '{}'", platform.arch),
        }
    })?;
    let uv_library = match platform.link_mode {
        LinkMode::Shared => "shared_library",
        LinkMode::Static => "static_library",
    };

    let mut env = Vec::new();
    if let Some(year) = platform.compiler.gyp_msvs_version() {
        env.push(("GYP_MSVS_VERSION".to_string(), year.to_string()));
    }

    let configure = CommandSpec {
        program: "python".to_string(),
        args: vec![
            "gyp_uv.py".to_string(),
            "-f".to_string(),
            "ninja".to_string(),
            format!("-Dtarget_arch={target_arch}"),
            format!("-Duv_library={uv_library}"),
        ],
        env: env.clone(),
        cwd: source_dir.to_path_buf(),
    };
    let compile = CommandSpec {
        program: "ninja".to_string(),
        args: vec!["-C".to_string(), format!("out/{build_type}")],
        env,
        cwd: source_dir.to_path_buf(),
    };

    Ok(BuildPlan {
        generator: Generator::Gyp,
        steps: vec![configure, compile],
        output_subdir: PathBuf::from("out").join(build_type),
    })
}

fn plan_cmake(platform: &PlatformDescriptor, source_dir: &Path, build_type: &str) -> Result<BuildPlan> {
    let shared = match platform.link_mode {
        LinkMode::Shared => "ON",
        LinkMode::Static => "OFF",
    };
    let out = format!("out/{build_type}");

    let configure = CommandSpec {
        program: "cmake".to_string(),
        args: vec![
            "-S".to_string(),
            ".".to_string(),
            "-B".to_string(),
            out.clone(),
            format!("-DCMAKE_BUILD_TYPE={build_type}"),
            format!("-DBUILD_SHARED_LIBS={shared}"),
        ],
        env: Vec::new(),
        cwd: source_dir.to_path_buf(),
    };
    let compile = CommandSpec {
        program: "cmake".to_string(),
        args: vec![
            "--build".to_string(),
            out,
            "--config".to_string(),
            build_type.to_string(),
        ],
        env: Vec::new(),
        cwd: source_dir.to_path_buf(),
    };

    Ok(BuildPlan {
        generator: Generator::Cmake,
        steps: vec![configure, compile],
        output_subdir: PathBuf::from("out").join(build_type),
    })
}
