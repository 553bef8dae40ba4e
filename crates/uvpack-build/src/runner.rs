//! Running the external build steps.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{BuildError, Result};
use crate::generator::BuildPlan;

/// Locate a required external tool on PATH.
pub fn ensure_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| BuildError::ToolNotFound {
        name: name.to_string(),
    })
}

/// Run every step of a build plan in order.
///
/// Checks that each step's program exists before launching anything, so a
/// missing toolchain is reported up front rather than mid-build. The first
/// non-zero exit aborts the run.
pub fn run(plan: &BuildPlan) -> Result<()> {
    for step in &plan.steps {
        ensure_tool(&step.program)?;
    }
    for step in &plan.steps {
        log::info!("running: {} (in {})", step.render(), step.cwd.display());
        let status = Command::new(&step.program)
            .args(&step.args)
            .envs(step.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&step.cwd)
            .status()?;
        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: step.render(),
                code: status.code(),
            });
        }
    }
    Ok(())
}
