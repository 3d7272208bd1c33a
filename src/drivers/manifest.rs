use serde::{Deserialize, Serialize};

use super::error::DriverError;

/// File name of the manifest inside a driver package.
pub const MANIFEST_FILE: &str = "meta.json";

/// Adrenotools driver package manifest (`meta.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverManifest {
    pub name: String,
    #[serde(default)]
    pub library_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub driver_version: String,
}

impl DriverManifest {
    pub fn from_slice(entry: &str, bytes: &[u8]) -> Result<Self, DriverError> {
        serde_json::from_slice(bytes).map_err(|source| DriverError::InvalidManifest {
            entry: entry.to_string(),
            source,
        })
    }

    /// Directory name the package installs under.
    ///
    /// The name is used verbatim, so it must be a single path component.
    pub fn identifier(&self) -> Result<&str, DriverError> {
        let name = self.name.trim();
        let usable = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if usable {
            Ok(name)
        } else {
            Err(DriverError::InvalidIdentifier(self.name.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_adrenotools_manifest() {
        let json = br#"{
            "schemaVersion": 1,
            "name": "Turnip v25.1",
            "description": "Mesa Turnip",
            "author": "someone",
            "vendor": "Mesa",
            "driverVersion": "25.1.0",
            "minApi": 27,
            "libraryName": "vulkan.ad07XX.so"
        }"#;
        let manifest = DriverManifest::from_slice(MANIFEST_FILE, json).unwrap();
        assert_eq!(manifest.identifier().unwrap(), "Turnip v25.1");
        assert_eq!(manifest.library_name, "vulkan.ad07XX.so");
        assert_eq!(manifest.driver_version, "25.1.0");
    }

    #[test]
    fn rejects_path_like_names() {
        for name in ["", "  ", "..", "a/b", "a\\b"] {
            let manifest = DriverManifest {
                name: name.to_string(),
                library_name: String::new(),
                description: String::new(),
                vendor: String::new(),
                driver_version: String::new(),
            };
            assert!(manifest.identifier().is_err(), "{name:?}");
        }
    }

    #[test]
    fn missing_name_is_a_parse_error() {
        let err = DriverManifest::from_slice("meta.json", br#"{"libraryName":"x.so"}"#).unwrap_err();
        assert!(matches!(err, DriverError::InvalidManifest { .. }));
    }
}
