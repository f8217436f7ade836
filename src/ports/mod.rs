//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the versions controllers and an
//! external system (the local disk and the backend command line).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod shell;

pub use filesystem::FileSystem;
pub use shell::{CommandLine, ShellExecutor, ShellOutput};
