//! malla check - Audit the active catalog
//!
//! The hard invariants (unique ids, no dangling or self prerequisites,
//! acyclic relation) are enforced when the catalog loads; this reports the
//! advisory ones on demand.

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CheckArgs {}

pub fn run(ctx: &AppContext, _args: &CheckArgs) -> Result<()> {
    let issues = ctx.catalog.audit();
    let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(serde_json::json!({
            "courses": ctx.catalog.len(),
            "cycles": ctx.catalog.cycles().len(),
            "issues": rendered,
        }))),
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout.title("Catalog");
            layout.kv("root", &ctx.root.display().to_string());
            layout.kv("config", &ctx.config_path.display().to_string());
            layout.kv("courses", &ctx.catalog.len().to_string());
            layout.kv("cycles", &ctx.catalog.cycles().len().to_string());
            layout.blank();
            if rendered.is_empty() {
                layout.push_line("No issues found.");
            } else {
                layout.section("Issues");
                for issue in &rendered {
                    layout.bullet(issue);
                }
            }
            emit_human(layout);
            Ok(())
        }
        OutputFormat::Plain => {
            for issue in &rendered {
                println!("{issue}");
            }
            Ok(())
        }
    }
}
