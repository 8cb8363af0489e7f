//! malla import - Replace progress from a portable file
//!
//! The payload is validated before anything is touched: a malformed file is
//! a blocking error and leaves the stored progress exactly as it was.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, robot_ok};
use crate::error::{MallaError, Result};
use crate::transfer;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Payload file produced by `malla export`
    pub path: PathBuf,
}

pub fn run(ctx: &AppContext, args: &ImportArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.path)
        .map_err(|err| MallaError::Config(format!("read {}: {err}", args.path.display())))?;

    let next = transfer::import_payload(&raw, &ctx.catalog)?;
    ctx.store.save(&next);
    info!(count = next.len(), "progress replaced from import");

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(serde_json::json!({
            "path": args.path.display().to_string(),
            "completed": next.to_vec(),
        }))),
        OutputFormat::Human => {
            println!("Imported {} completed courses.", next.len());
            Ok(())
        }
        OutputFormat::Plain => {
            println!("imported\t{}", next.len());
            Ok(())
        }
    }
}
