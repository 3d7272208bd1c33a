use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::error::DriverError;
use super::manifest::{DriverManifest, MANIFEST_FILE};

/// Storage for user-installed GPU drivers.
///
/// Each installed driver is identified by the name from its package
/// manifest.
pub trait DriverRepository {
    /// Installed driver identifiers, sorted.
    fn list(&self) -> Result<Vec<String>, DriverError>;

    /// Install the package at `archive`, replacing any previous install of
    /// the same driver. Returns the identifier.
    fn import(&self, archive: &Path) -> Result<String, DriverError>;

    /// Delete an installed driver.
    fn remove(&self, id: &str) -> Result<(), DriverError>;
}

/// Drivers stored as one directory per identifier under `root`.
#[derive(Debug, Clone)]
pub struct FsDriverRepository {
    root: PathBuf,
}

/// Prefix of the scratch directory an import extracts into before it is
/// moved into place. Entries starting with `.` are never listed.
const STAGING_PREFIX: &str = ".import-";

/// Prefix of the directory a replaced install is parked in until the new
/// one is in place.
const BACKUP_PREFIX: &str = ".replaced-";

impl FsDriverRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn driver_dir(&self, id: &str) -> Option<PathBuf> {
        let plain = !id.is_empty()
            && !id.starts_with('.')
            && !id.contains(['/', '\\', '\0']);
        plain.then(|| self.root.join(id))
    }
}

impl DriverRepository for FsDriverRepository {
    fn list(&self) -> Result<Vec<String>, DriverError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(DriverError::io(&self.root, err)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| DriverError::io(&self.root, err))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_dir && !name.starts_with('.') {
                ids.push(name);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn import(&self, archive_path: &Path) -> Result<String, DriverError> {
        let file = File::open(archive_path).map_err(|err| DriverError::io(archive_path, err))?;
        let mut archive = ZipArchive::new(file)?;

        let (index, prefix) = find_manifest(&mut archive)?.ok_or(DriverError::MissingManifest)?;
        let manifest = {
            let mut entry = archive.by_index(index)?;
            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .map_err(|err| DriverError::io(archive_path, err))?;
            DriverManifest::from_slice(entry.name(), &bytes)?
        };
        let id = manifest.identifier()?.to_string();
        let dest = self
            .driver_dir(&id)
            .ok_or_else(|| DriverError::InvalidIdentifier(id.clone()))?;

        tracing::info!(
            "Importing driver '{}' ({} {}) from {}",
            id,
            manifest.vendor,
            manifest.driver_version,
            archive_path.display()
        );

        fs::create_dir_all(&self.root).map_err(|err| DriverError::io(&self.root, err))?;
        let staging = self.root.join(format!("{}{}", STAGING_PREFIX, std::process::id()));
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|err| DriverError::io(&staging, err))?;
        }

        let backup = self.root.join(format!("{}{}", BACKUP_PREFIX, std::process::id()));
        let installed = extract(&mut archive, &prefix, &staging)
            .and_then(|_| move_into_place(&staging, &dest, &backup));
        if let Err(err) = installed {
            let _ = fs::remove_dir_all(&staging);
            tracing::warn!("Driver import failed: {}", err);
            return Err(err);
        }

        Ok(id)
    }

    fn remove(&self, id: &str) -> Result<(), DriverError> {
        let dir = self
            .driver_dir(id)
            .filter(|dir| dir.is_dir())
            .ok_or_else(|| DriverError::NotFound(id.to_string()))?;
        fs::remove_dir_all(&dir).map_err(|err| DriverError::io(&dir, err))?;
        tracing::info!("Removed driver '{}'", id);
        Ok(())
    }
}

/// Rename `staging` to `dest`. An existing `dest` is parked at `backup`
/// first and put back if the rename fails.
fn move_into_place(staging: &Path, dest: &Path, backup: &Path) -> Result<(), DriverError> {
    if !dest.exists() {
        return fs::rename(staging, dest).map_err(|err| DriverError::io(dest, err));
    }

    tracing::debug!("Replacing existing driver directory {}", dest.display());
    if backup.exists() {
        fs::remove_dir_all(backup).map_err(|err| DriverError::io(backup, err))?;
    }
    fs::rename(dest, backup).map_err(|err| DriverError::io(dest, err))?;

    if let Err(err) = fs::rename(staging, dest) {
        if let Err(restore) = fs::rename(backup, dest) {
            tracing::error!(
                "Previous install left at {} after failed restore: {}",
                backup.display(),
                restore
            );
        }
        return Err(DriverError::io(dest, err));
    }

    if let Err(err) = fs::remove_dir_all(backup) {
        tracing::warn!("Failed to clean up {}: {}", backup.display(), err);
    }
    Ok(())
}

/// Locate the shallowest `meta.json`. Returns its entry index and the
/// directory it sits in; that directory becomes the package root.
fn find_manifest<R: Read + io::Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Option<(usize, PathBuf)>, DriverError> {
    let mut best: Option<(usize, PathBuf)> = None;
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let Some(path) = entry.enclosed_name() else {
            continue;
        };
        if path.file_name().and_then(|n| n.to_str()) != Some(MANIFEST_FILE) {
            continue;
        }
        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let shallower = best
            .as_ref()
            .map_or(true, |(_, p)| parent.components().count() < p.components().count());
        if shallower {
            best = Some((index, parent));
        }
    }
    Ok(best)
}

/// Extract every entry below `prefix` into `dest`, dropping the prefix.
/// Entries whose names would escape `dest` are skipped.
fn extract<R: Read + io::Seek>(
    archive: &mut ZipArchive<R>,
    prefix: &Path,
    dest: &Path,
) -> Result<(), DriverError> {
    fs::create_dir_all(dest).map_err(|err| DriverError::io(dest, err))?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(path) = entry.enclosed_name().map(Path::to_path_buf) else {
            tracing::warn!("Skipping unsafe archive entry '{}'", entry.name());
            continue;
        };
        let Ok(relative) = path.strip_prefix(prefix) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|err| DriverError::io(&target, err))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| DriverError::io(parent, err))?;
        }
        let mut out = File::create(&target).map_err(|err| DriverError::io(&target, err))?;
        io::copy(&mut entry, &mut out).map_err(|err| DriverError::io(&target, err))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn driver_dir(root: &Path, name: &str, marker: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("marker"), marker).unwrap();
        dir
    }

    #[test]
    fn replacement_swaps_and_drops_backup() {
        let tmp = TempDir::new().unwrap();
        let dest = driver_dir(tmp.path(), "Turnip", "old");
        let staging = driver_dir(tmp.path(), ".import-1", "new");
        let backup = tmp.path().join(".replaced-1");

        move_into_place(&staging, &dest, &backup).unwrap();

        assert_eq!(fs::read_to_string(dest.join("marker")).unwrap(), "new");
        assert!(!staging.exists());
        assert!(!backup.exists());
    }

    #[test]
    fn failed_rename_restores_previous_install() {
        let tmp = TempDir::new().unwrap();
        let dest = driver_dir(tmp.path(), "Turnip", "old");
        let staging = tmp.path().join(".import-missing");
        let backup = tmp.path().join(".replaced-1");

        let err = move_into_place(&staging, &dest, &backup).unwrap_err();

        assert!(matches!(err, DriverError::Io { .. }));
        assert_eq!(fs::read_to_string(dest.join("marker")).unwrap(), "old");
        assert!(!backup.exists());
    }
}
