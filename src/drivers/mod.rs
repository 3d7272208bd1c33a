//! Custom GPU driver packages: import from ZIP, list, remove.

mod error;
mod manifest;
mod repository;

pub use error::DriverError;
pub use manifest::{DriverManifest, MANIFEST_FILE};
pub use repository::{DriverRepository, FsDriverRepository};

/// Installed driver ids, or an empty list when the repository can't be
/// read. Used where a missing driver catalogue must not block the caller.
pub fn installed_or_empty(repo: &dyn DriverRepository) -> Vec<String> {
    repo.list().unwrap_or_else(|err| {
        tracing::warn!("Could not list custom drivers: {}", err);
        Vec::new()
    })
}
