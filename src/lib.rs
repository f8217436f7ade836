//! Persist wiki page revisions through the TFVC command line.
//!
//! A host calls a [`VersionsController`](versions::VersionsController);
//! [`TfsVersionsController`](controller::TfsVersionsController) performs the
//! local file I/O and keeps the TFVC workspace in step by shelling out to
//! `tf.exe`.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod ports;
pub mod tf;
pub mod versions;

use clap::Parser;

pub use error::BridgeError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}
