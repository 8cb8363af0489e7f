//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod check;
pub mod export;
pub mod import;
pub mod init;
pub mod reset;
pub mod show;
pub mod toggle;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .malla root in the current directory
    Init(init::InitArgs),

    /// Render the curriculum with per-course status
    Show(show::ShowArgs),

    /// Mark a course completed, or un-mark it
    Toggle(toggle::ToggleArgs),

    /// Clear all recorded progress
    Reset(reset::ResetArgs),

    /// Write progress to a portable file
    Export(export::ExportArgs),

    /// Replace progress from a portable file
    Import(import::ImportArgs),

    /// Audit the active catalog
    Check(check::CheckArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Toggle(args) => toggle::run(ctx, args),
        Commands::Reset(args) => reset::run(ctx, args),
        Commands::Export(args) => export::run(ctx, args),
        Commands::Import(args) => import::run(ctx, args),
        Commands::Check(args) => check::run(ctx, args),
    }
}
