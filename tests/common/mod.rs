//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use containerconf::catalog::Catalogs;
use containerconf::gpu::VkVersion;
use containerconf::reconcile::ReconcileContext;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Reconcile context with builtin catalogues and 8 host CPUs.
pub fn context(vk: VkVersion) -> ReconcileContext {
    ReconcileContext::new(Catalogs::builtin(), vk, 8)
}

pub fn shared_context(vk: VkVersion) -> Arc<ReconcileContext> {
    Arc::new(context(vk))
}

/// Write a ZIP archive with the given (name, contents) entries.
/// Names ending in `/` become directory entries.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).expect("Failed to create archive");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();
    for (name, contents) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).expect("Failed to add directory");
        } else {
            zip.start_file(*name, options).expect("Failed to start entry");
            zip.write_all(contents.as_bytes()).expect("Failed to write entry");
        }
    }
    zip.finish().expect("Failed to finish archive");
}

pub fn manifest_json(name: &str) -> String {
    format!(
        r#"{{"schemaVersion":1,"name":"{}","description":"test driver","author":"tests","packageVersion":"1","vendor":"Mesa","driverVersion":"Vulkan 1.3.289","minApi":27,"libraryName":"vulkan.ad07XX.so"}}"#,
        name
    )
}

/// A driver package named `name` at `<dir>/<file>`.
pub fn driver_package(dir: &Path, file: &str, name: &str) -> PathBuf {
    let path = dir.join(file);
    let manifest = manifest_json(name);
    write_zip(
        &path,
        &[
            ("meta.json", manifest.as_str()),
            ("vulkan.ad07XX.so", "\x7fELF"),
            ("lib/", ""),
            ("lib/libextra.so", "extra"),
        ],
    );
    path
}

/// Temp directory with a driver root inside it (not yet created).
pub fn temp_driver_root() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir
        .path()
        .join("installed_components")
        .join("adrenotools_driver");
    (temp_dir, root)
}
