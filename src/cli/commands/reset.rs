//! malla reset - Clear all recorded progress

use std::io::Write;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, robot_ok};
use crate::core::CompletedSet;
use crate::error::{MallaError, Result};

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

pub fn run(ctx: &AppContext, args: &ResetArgs) -> Result<()> {
    let completed = ctx.store.load();

    if !args.yes {
        if ctx.output_format != OutputFormat::Human {
            return Err(MallaError::ConfirmationRequired(
                "pass --yes to reset without a prompt".to_string(),
            ));
        }
        if !confirm(&format!(
            "Erase all recorded progress ({} courses)?",
            completed.len()
        ))? {
            println!("Reset aborted.");
            return Ok(());
        }
    }

    ctx.store.save(&CompletedSet::new());

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(serde_json::json!({
            "cleared": completed.len(),
        }))),
        OutputFormat::Human => {
            println!("Progress cleared ({} courses un-marked).", completed.len());
            Ok(())
        }
        OutputFormat::Plain => {
            println!("cleared\t{}", completed.len());
            Ok(())
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
