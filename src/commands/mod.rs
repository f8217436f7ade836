//! Command dispatch and handlers.

pub mod delete;
pub mod history;
pub mod mkdir;
pub mod rename;
pub mod revisions;
pub mod write;

use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::BridgeConfig;
use crate::context::ServiceContext;
use crate::controller::{NullVersionsController, TfsVersionsController};
use crate::versions::VersionsController;

/// Environment variable naming a directory to record cassettes into.
pub const RECORD_VAR: &str = "TFVC_RECORD";

/// Dispatch a parsed command line to its handler.
///
/// When `TFVC_RECORD` is set to a directory path, filesystem and backend
/// interactions are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = BridgeConfig::from_env();
    let (ctx, session) = if let Ok(dir) = env::var(RECORD_VAR) {
        let (ctx, session) = ServiceContext::recording_at(PathBuf::from(dir))?;
        info!(dir = %session.output_dir().display(), "recording session");
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(cli, &ctx, &config);

    // Finish recording even when the command failed.
    if let Some(session) = session {
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch with an explicit context and configuration.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    cli: &Cli,
    ctx: &ServiceContext,
    config: &BridgeConfig,
) -> Result<(), String> {
    let mut controller: Box<dyn VersionsController + '_> = if cli.null {
        Box::new(NullVersionsController::new(ctx))
    } else {
        Box::new(TfsVersionsController::new(ctx, config))
    };

    match &cli.command {
        Command::Write { path, author, source } => {
            write::run(&*controller, path, author, source.as_deref())
        }
        Command::Delete { paths } => delete::run(&*controller, paths),
        Command::Mkdir { path, author } => mkdir::run(&*controller, path, author),
        Command::Rename { from, to } => rename::run(&*controller, from, to),
        Command::Revisions { label, paths } => {
            revisions::run(&*controller, label.as_deref(), paths)
        }
        Command::History { depth, paths } => history::run(&mut *controller, *depth, paths),
    }
}

fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
