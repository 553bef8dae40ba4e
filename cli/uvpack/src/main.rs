//! uvpack CLI — fetch, build, and package libuv for distribution.

mod commands;
mod recipe;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};

use recipe::Recipe;

#[derive(Parser)]
#[command(name = "uvpack", version, about = "Fetch, build, and package libuv")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: verify source, build, stage the package
    Package {
        /// Target platform descriptor (e.g. linux-x86_64-gcc13)
        #[arg(long)]
        target: Option<String>,
        /// Link mode (static, shared)
        #[arg(long)]
        link: Option<String>,
        /// Package output directory (default: ./package)
        #[arg(long)]
        out: Option<String>,
    },
    /// Preview artifact and link metadata for a target without building
    Resolve {
        /// Target platform descriptor (e.g. windows-x86_64-msvc16)
        target: String,
        /// Link mode (static, shared)
        #[arg(long)]
        link: Option<String>,
        /// Print the artifact set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check toolchain and recipe status
    Doctor,
    /// Remove build and package output
    Clean,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Package { target, link, out } => {
            let (recipe, project_dir) = load_recipe_required(&cwd)?;
            commands::package::run(
                &project_dir,
                &recipe,
                target.as_deref(),
                link.as_deref(),
                out.as_deref(),
            )
        }

        Commands::Resolve { target, link, json } => {
            commands::resolve::run(&target, link.as_deref(), json)
        }

        Commands::Doctor => commands::doctor::run(&cwd),

        Commands::Clean => {
            let project_dir = match Recipe::find_and_load(&cwd)? {
                Some((_, dir)) => dir,
                None => cwd,
            };
            commands::clean::run(&project_dir)
        }
    }
}

/// Load the recipe, erroring if none is found.
fn load_recipe_required(cwd: &Path) -> anyhow::Result<(Recipe, std::path::PathBuf)> {
    match Recipe::find_and_load(cwd)? {
        Some((recipe, dir)) => Ok((recipe, dir)),
        None => anyhow::bail!("no uvpack.toml found in {} or any parent", cwd.display()),
    }
}
