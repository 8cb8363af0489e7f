//! malla show - Render the curriculum with per-course status
//!
//! A pure render: status is recomputed from the catalog and the stored
//! completed set on every invocation, nothing is cached or mutated.

use clap::Args;
use console::style;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::catalog::{Catalog, CourseId};
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::core::{self, CompletedSet, CourseStatus};
use crate::error::{MallaError, Result};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Show a single course instead of the whole curriculum
    pub id: Option<CourseId>,

    /// Only show courses with this status: completed, eligible, locked
    #[arg(long)]
    pub status: Option<String>,
}

/// What the presenter receives for one course.
#[derive(Debug, Clone, Serialize)]
struct CourseView {
    id: CourseId,
    name: String,
    status: CourseStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    prereqs: Vec<CourseId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<CourseId>,
}

#[derive(Debug, Clone, Serialize)]
struct CycleView {
    label: String,
    courses: Vec<CourseView>,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let completed = ctx.store.load();
    debug!(target: "show", completed = completed.len(), mode = ?ctx.output_format, "rendering");

    if let Some(id) = args.id {
        return show_course(ctx, id, &completed);
    }

    let filter = match &args.status {
        Some(raw) => Some(raw.parse::<CourseStatus>().map_err(MallaError::Config)?),
        None => None,
    };

    let cycles = build_views(&ctx.catalog, &completed, filter);
    match ctx.output_format {
        OutputFormat::Human => {
            show_human(ctx, &cycles, &completed);
            Ok(())
        }
        OutputFormat::Json => emit_json(&robot_ok(serde_json::json!({
            "completed": completed.to_vec(),
            "total": ctx.catalog.len(),
            "cycles": cycles,
        }))),
        OutputFormat::Plain => {
            for cycle in &cycles {
                for course in &cycle.courses {
                    println!(
                        "{}\t{}\t{}\t{}",
                        course.id,
                        course.status.as_str(),
                        cycle.label,
                        course.name
                    );
                }
            }
            Ok(())
        }
    }
}

/// Build the view model cycle by cycle. Cycle entries that reference unknown
/// courses are skipped; `malla check` reports them.
fn build_views(
    catalog: &Catalog,
    completed: &CompletedSet,
    filter: Option<CourseStatus>,
) -> Vec<CycleView> {
    let mut views = Vec::with_capacity(catalog.cycles().len());
    for cycle in catalog.cycles() {
        let courses: Vec<CourseView> = cycle
            .courses
            .iter()
            .filter_map(|&id| catalog.get(id))
            .map(|course| CourseView {
                id: course.id,
                name: course.name.clone(),
                status: core::status(course, completed),
                prereqs: course.prereqs.clone(),
                missing: core::missing_prerequisites(course, completed),
            })
            .filter(|view| filter.is_none_or(|wanted| view.status == wanted))
            .collect();

        if courses.is_empty() && filter.is_some() {
            continue;
        }
        views.push(CycleView {
            label: cycle.label.clone(),
            courses,
        });
    }
    views
}

fn show_human(ctx: &AppContext, cycles: &[CycleView], completed: &CompletedSet) {
    let mut layout = HumanLayout::new();
    for cycle in cycles {
        layout.section(&format!("{} ({})", cycle.label, cycle.courses.len()));
        for course in &cycle.courses {
            layout.push_line(course_line(course));
        }
        layout.blank();
    }
    layout.push_line(format!(
        "Completed: {} of {}",
        completed.len(),
        ctx.catalog.len()
    ));
    emit_human(layout);
}

fn course_line(view: &CourseView) -> String {
    let marker = match view.status {
        CourseStatus::Completed => style("✓").green().to_string(),
        CourseStatus::Eligible => style("○").cyan().to_string(),
        CourseStatus::Locked => style("✗").dim().to_string(),
    };

    let name = if view.status == CourseStatus::Locked {
        style(&view.name).dim().to_string()
    } else {
        view.name.clone()
    };

    let mut line = format!("{marker} #{:<3} {name}", view.id);
    if view.status == CourseStatus::Locked {
        let needs = format!(" (needs {})", view.missing.iter().join(", "));
        line.push_str(&style(needs).dim().to_string());
    }
    line
}

fn show_course(ctx: &AppContext, id: CourseId, completed: &CompletedSet) -> Result<()> {
    let course = ctx
        .catalog
        .get(id)
        .ok_or(MallaError::CourseNotFound(id))?;

    let view = CourseView {
        id: course.id,
        name: course.name.clone(),
        status: core::status(course, completed),
        prereqs: course.prereqs.clone(),
        missing: core::missing_prerequisites(course, completed),
    };

    match ctx.output_format {
        OutputFormat::Human => {
            let cycle_label = ctx
                .catalog
                .cycles()
                .iter()
                .find(|cycle| cycle.courses.contains(&id))
                .map_or_else(|| "-".to_string(), |cycle| cycle.label.clone());

            let mut layout = HumanLayout::new();
            layout.title(&format!("#{} {}", view.id, view.name));
            layout.kv("status", view.status.as_str());
            layout.kv("cycle", &cycle_label);
            if view.prereqs.is_empty() {
                layout.kv("prereqs", "none");
            } else {
                layout.kv("prereqs", &view.prereqs.iter().join(", "));
            }
            if !view.missing.is_empty() {
                layout.kv("missing", &view.missing.iter().join(", "));
            }
            emit_human(layout);
            Ok(())
        }
        OutputFormat::Json => emit_json(&robot_ok(&view)),
        OutputFormat::Plain => {
            println!("{}\t{}\t{}", view.id, view.status.as_str(), view.name);
            Ok(())
        }
    }
}
