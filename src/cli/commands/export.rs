//! malla export - Write progress to a portable file

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, robot_ok};
use crate::error::Result;
use crate::transfer;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination file
    #[arg(long, short, default_value = "malla-progreso.json")]
    pub output: PathBuf,
}

pub fn run(ctx: &AppContext, args: &ExportArgs) -> Result<()> {
    let completed = ctx.store.load();
    let payload = transfer::export_payload(&completed)?;
    std::fs::write(&args.output, payload)?;

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(serde_json::json!({
            "path": args.output.display().to_string(),
            "count": completed.len(),
        }))),
        OutputFormat::Human => {
            println!(
                "Exported {} completed courses to {}",
                completed.len(),
                args.output.display()
            );
            Ok(())
        }
        OutputFormat::Plain => {
            println!("{}\t{}", args.output.display(), completed.len());
            Ok(())
        }
    }
}
