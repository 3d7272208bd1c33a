//! Typed views over the driver and wrapper key/value blobs.

use std::fmt;

use super::kv::{string_serde, KeyValueSet};
use crate::catalog::{IMAGE_CACHE_SIZES, MAX_DEVICE_MEMORY, VK_MAX_VERSIONS};

const VK_MAX_VERSION: &str = "vkMaxVersion";
const IMAGE_CACHE_SIZE: &str = "imageCacheSize";
const MAX_DEVICE_MEMORY_KEY: &str = "maxDeviceMemory";
const EXPOSED_EXTENSIONS: &str = "exposedDeviceExtensions";

const VERSION: &str = "version";
const VKD3D_VERSION: &str = "vkd3dVersion";
const VKD3D_FEATURE_LEVEL: &str = "vkd3dFeatureLevel";

/// Which device extensions a Vortek-like driver exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExposedExtensions {
    All,
    Only(Vec<String>),
}

/// Graphics driver settings (`graphicsDriverConfig`).
///
/// Values outside their option list read back as the default. Keys this
/// type does not know about survive a round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphicsDriverConfig {
    raw: KeyValueSet,
}

impl GraphicsDriverConfig {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: KeyValueSet::parse(raw),
        }
    }

    pub fn vk_max_version(&self) -> &str {
        option_or_default(&self.raw, VK_MAX_VERSION, VK_MAX_VERSIONS, "1.3")
    }

    pub fn set_vk_max_version(&mut self, version: &str) {
        self.raw.put(VK_MAX_VERSION, version);
    }

    /// Image cache size in MB.
    pub fn image_cache_size(&self) -> &str {
        option_or_default(&self.raw, IMAGE_CACHE_SIZE, IMAGE_CACHE_SIZES, "256")
    }

    pub fn set_image_cache_size(&mut self, size: &str) {
        self.raw.put(IMAGE_CACHE_SIZE, size);
    }

    /// Maximum device memory in MB.
    pub fn max_device_memory(&self) -> &str {
        option_or_default(&self.raw, MAX_DEVICE_MEMORY_KEY, MAX_DEVICE_MEMORY, "4096")
    }

    pub fn set_max_device_memory(&mut self, size: &str) {
        self.raw.put(MAX_DEVICE_MEMORY_KEY, size);
    }

    pub fn exposed_extensions(&self) -> ExposedExtensions {
        match self.raw.get_or(EXPOSED_EXTENSIONS, "all") {
            "all" => ExposedExtensions::All,
            list => ExposedExtensions::Only(
                list.split('|')
                    .filter(|ext| !ext.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }

    /// Store the exposed set; selecting every available extension is
    /// written as `all`.
    pub fn set_exposed_extensions(&mut self, selected: &[String], available: &[String]) {
        let everything = !available.is_empty() && available.iter().all(|ext| selected.contains(ext));
        if everything {
            self.raw.put(EXPOSED_EXTENSIONS, "all");
        } else {
            let ordered: Vec<&str> = available
                .iter()
                .filter(|ext| selected.contains(ext))
                .map(String::as_str)
                .collect();
            self.raw.put(EXPOSED_EXTENSIONS, &ordered.join("|"));
        }
    }

    pub fn as_key_values(&self) -> &KeyValueSet {
        &self.raw
    }
}

impl fmt::Display for GraphicsDriverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

string_serde!(GraphicsDriverConfig);

/// DX wrapper settings (`dxwrapperConfig`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DxWrapperConfig {
    raw: KeyValueSet,
}

impl DxWrapperConfig {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: KeyValueSet::parse(raw),
        }
    }

    /// DXVK version, empty when unset.
    pub fn version(&self) -> &str {
        self.raw.get(VERSION)
    }

    pub fn set_version(&mut self, version: &str) {
        self.raw.put(VERSION, version);
    }

    pub fn vkd3d_version(&self) -> &str {
        self.raw.get(VKD3D_VERSION)
    }

    pub fn set_vkd3d_version(&mut self, version: &str) {
        self.raw.put(VKD3D_VERSION, version);
    }

    pub fn vkd3d_feature_level(&self) -> &str {
        self.raw.get(VKD3D_FEATURE_LEVEL)
    }

    pub fn set_vkd3d_feature_level(&mut self, level: &str) {
        self.raw.put(VKD3D_FEATURE_LEVEL, level);
    }

    pub fn as_key_values(&self) -> &KeyValueSet {
        &self.raw
    }
}

impl fmt::Display for DxWrapperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

string_serde!(DxWrapperConfig);

fn option_or_default<'a>(
    raw: &'a KeyValueSet,
    key: &str,
    options: &[&str],
    default: &'a str,
) -> &'a str {
    let value = raw.get(key);
    if options.contains(&value) {
        value
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphics_defaults_apply_to_missing_and_invalid_values() {
        let cfg = GraphicsDriverConfig::parse("vkMaxVersion=9.9,imageCacheSize=512");
        assert_eq!(cfg.vk_max_version(), "1.3");
        assert_eq!(cfg.image_cache_size(), "512");
        assert_eq!(cfg.max_device_memory(), "4096");
        assert_eq!(cfg.exposed_extensions(), ExposedExtensions::All);
    }

    #[test]
    fn exposed_extensions_collapse_to_all() {
        let available: Vec<String> = ["VK_KHR_a", "VK_KHR_b"].iter().map(|s| s.to_string()).collect();
        let mut cfg = GraphicsDriverConfig::default();

        cfg.set_exposed_extensions(&available[1..], &available);
        assert_eq!(
            cfg.exposed_extensions(),
            ExposedExtensions::Only(vec!["VK_KHR_b".to_string()])
        );

        cfg.set_exposed_extensions(&available, &available);
        assert_eq!(cfg.exposed_extensions(), ExposedExtensions::All);
    }

    #[test]
    fn unknown_keys_survive() {
        let mut cfg = DxWrapperConfig::parse("version=2.4.1,framerate=60");
        cfg.set_vkd3d_feature_level("12_1");
        assert_eq!(cfg.to_string(), "version=2.4.1,framerate=60,vkd3dFeatureLevel=12_1");
        assert_eq!(cfg.vkd3d_version(), "");
    }
}
