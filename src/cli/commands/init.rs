//! malla init - Initialize a malla root in the current directory

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, robot_ok};
use crate::config::Config;
use crate::error::{MallaError, Result};
use crate::utils::ensure_dir;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Overwrite an existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run(ctx: &AppContext, args: &InitArgs) -> Result<()> {
    run_without_context(ctx.output_format == OutputFormat::Json, args)
}

/// Init must work before any root exists, so it never builds an app context.
pub fn run_without_context(robot: bool, args: &InitArgs) -> Result<()> {
    let base = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let root = base.join(".malla");
    ensure_dir(&root)?;

    let config_path = root.join("config.toml");
    if config_path.exists() && !args.force {
        return Err(MallaError::Config(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }
    std::fs::write(&config_path, Config::default_toml())?;

    if robot {
        emit_json(&robot_ok(serde_json::json!({
            "root": root.display().to_string(),
            "config": config_path.display().to_string(),
        })))?;
    } else {
        println!("Initialized malla root at {}", root.display());
    }
    Ok(())
}
