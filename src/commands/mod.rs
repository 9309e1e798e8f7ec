//! Command dispatch and handlers.

pub mod generate;
pub mod rewrite;
pub mod scan;

use std::env;
use std::path::Path;

use crate::cli::Command;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `BERTH_REPLAY` names a cassette file, all port interactions are
/// replayed from it instead of touching the real clock, disk, or network.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = match env::var("BERTH_REPLAY") {
        Ok(path) => ServiceContext::replaying(Path::new(&path))?,
        Err(_) => ServiceContext::live(),
    };
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Scan { path } => scan::run(ctx, path),
        Command::Generate { path, output, prefs } => {
            generate::run(ctx, path, output.as_deref(), &prefs.to_preferences())
        }
        Command::Rewrite { path, prefs } => rewrite::run(ctx, path, &prefs.to_preferences()),
    }
}
