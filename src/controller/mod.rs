//! [`VersionsController`](crate::versions::VersionsController) implementations.

pub mod null;
pub mod tfs;

pub use null::NullVersionsController;
pub use tfs::TfsVersionsController;
