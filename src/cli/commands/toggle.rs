//! malla toggle - Mark a course completed, or un-mark it
//!
//! The single state transition: validate against the catalog, persist on
//! success, and report a locked course as a no-op rather than an error.

use clap::Args;
use console::style;
use itertools::Itertools;
use tracing::debug;

use crate::app::AppContext;
use crate::catalog::CourseId;
use crate::cli::output::{OutputFormat, emit_json, robot_ok};
use crate::core::{self, ToggleAction};
use crate::error::{MallaError, Result};

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Course id to toggle
    pub id: CourseId,
}

pub fn run(ctx: &AppContext, args: &ToggleArgs) -> Result<()> {
    let course = ctx
        .catalog
        .get(args.id)
        .ok_or(MallaError::CourseNotFound(args.id))?;

    let completed = ctx.store.load();
    let missing = core::missing_prerequisites(course, &completed);
    let outcome = core::toggle(course, &completed);
    debug!(target: "toggle", id = course.id, action = outcome.action.as_str(), "transition");

    match outcome.action {
        ToggleAction::Marked | ToggleAction::Unmarked => ctx.store.save(&outcome.next),
        ToggleAction::Rejected => {}
    }

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(serde_json::json!({
            "id": course.id,
            "name": course.name,
            "action": outcome.action,
            "missing": missing,
            "completed": outcome.next.to_vec(),
        }))),
        OutputFormat::Human => {
            match outcome.action {
                ToggleAction::Marked => {
                    println!("{} #{} {} marked completed", style("✓").green(), course.id, course.name);
                }
                ToggleAction::Unmarked => {
                    println!("{} #{} {} un-marked", style("○").cyan(), course.id, course.name);
                }
                ToggleAction::Rejected => {
                    println!(
                        "#{} {} is locked (needs {})",
                        course.id,
                        course.name,
                        missing.iter().join(", ")
                    );
                }
            }
            Ok(())
        }
        OutputFormat::Plain => {
            println!("{}\t{}", course.id, outcome.action.as_str());
            Ok(())
        }
    }
}
