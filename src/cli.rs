//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `tfvc-bridge`.
#[derive(Debug, Parser)]
#[command(name = "tfvc-bridge", version, about = "Keep wiki page files under TFVC")]
pub struct Cli {
    /// Only touch local files; issue no backend commands.
    #[arg(long, global = true)]
    pub null: bool,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a file and add or check it out.
    Write {
        /// File to write.
        path: PathBuf,
        /// Author recorded for the version.
        #[arg(long, default_value = "")]
        author: String,
        /// Read content from this file instead of stdin.
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Delete files or directories.
    Delete {
        /// Paths to delete.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Create and register a directory.
    Mkdir {
        /// Directory to create.
        path: PathBuf,
        /// Author recorded for the version.
        #[arg(long, default_value = "")]
        author: String,
    },
    /// Move a file locally.
    Rename {
        /// Current path.
        from: PathBuf,
        /// New path.
        to: PathBuf,
    },
    /// List the files that exist, with their modification times.
    Revisions {
        /// Revision label.
        #[arg(long)]
        label: Option<String>,
        /// Files to look up.
        paths: Vec<PathBuf>,
    },
    /// Show version history.
    History {
        /// History depth to configure first.
        #[arg(long)]
        depth: Option<u32>,
        /// Files to look up.
        paths: Vec<PathBuf>,
    },
}
