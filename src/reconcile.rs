//! Keeps dependent settings of a container record consistent.
//!
//! [`ReconcileContext::reconcile`] is a pure pass run after every edit. It
//! derives the selection indices the editor shows and rewrites the fields
//! that depend on other fields:
//!
//! 1. the graphics driver version resolves against the driver family's list
//!    (edits that change the driver clear the stored version first);
//! 2. the DXVK list is hidden under VKD3D (and the DXVK version pinned), or
//!    reduced for Vortek-like drivers on Vulkan < 1.3;
//! 3. `DXVK_ASYNC=1` tracks whether the effective DXVK version is an async
//!    build;
//! 4. VKD3D gets a version and feature level when it has none;
//! 5. every index lands inside its list.
//!
//! Everything is computed from the final record in one pass, so running it
//! twice changes nothing.

use crate::catalog::{
    self, defaults, Catalogs, DriverFamily, BOX64_PRESETS, BOX64_VERSIONS, DXVK_VERSIONS,
    DXVK_VERSIONS_REDUCED, IMAGE_CACHE_SIZES, LANGUAGES, MAX_DEVICE_MEMORY, MOUSE_WARPS,
    RENDERING_MODES, SCREEN_SIZES, STARTUP_SELECTIONS, STEAM_TYPES, VIDEO_MEMORY_SIZES,
    VK_MAX_VERSIONS, VKD3D_FEATURE_LEVELS, VKD3D_VERSIONS,
};
use crate::config::{ContainerConfig, ExposedExtensions};
use crate::gpu::{GpuInfo, VkVersion};

pub const DXVK_ASYNC: &str = "DXVK_ASYNC";

/// Which DXVK version list applies to the current driver and wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DxvkCatalog {
    #[default]
    Full,
    /// Vortek-like driver on a Vulkan < 1.3 device.
    Reduced,
    /// VKD3D is the wrapper; no DXVK choice is offered.
    Hidden,
}

impl DxvkCatalog {
    pub fn versions(&self) -> &'static [&'static str] {
        match self {
            Self::Full => DXVK_VERSIONS,
            Self::Reduced => DXVK_VERSIONS_REDUCED,
            Self::Hidden => &[],
        }
    }
}

/// Selection indices derived from a record. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    pub graphics_driver: usize,
    pub graphics_driver_version: usize,
    pub dx_wrapper: usize,
    pub dxvk_catalog: DxvkCatalog,
    pub dxvk_version: usize,
    pub vkd3d_version: usize,
    pub vkd3d_feature_level: usize,
    pub audio_driver: usize,
    pub screen_size: usize,
    pub gpu_card: usize,
    pub rendering_mode: usize,
    pub video_memory: usize,
    pub mouse_warp: usize,
    pub language: usize,
    pub steam_type: usize,
    pub box64_version: usize,
    pub box64_preset: usize,
    pub startup_selection: usize,
    pub vk_max_version: usize,
    pub image_cache_size: usize,
    pub max_device_memory: usize,
    /// Indices into the device extension catalogue that are exposed.
    pub exposed_extensions: Vec<usize>,
}

impl Selections {
    pub fn dxvk_versions(&self) -> &'static [&'static str] {
        self.dxvk_catalog.versions()
    }
}

/// Everything the reconciliation pass needs besides the record itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileContext {
    pub catalogs: Catalogs,
    pub vk_api_version: VkVersion,
    pub cpu_count: usize,
}

impl ReconcileContext {
    pub fn new(catalogs: Catalogs, vk_api_version: VkVersion, cpu_count: usize) -> Self {
        Self {
            catalogs,
            vk_api_version,
            cpu_count: cpu_count.max(1),
        }
    }

    /// Context for a GPU provider and a list of installed custom drivers.
    pub fn from_gpu<I, S>(gpu: &dyn GpuInfo, custom_drivers: I, cpu_count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let catalogs = Catalogs::with_gpu(gpu).with_custom_drivers(custom_drivers);
        Self::new(catalogs, gpu.vk_api_version(), cpu_count)
    }

    pub fn driver_family(&self, config: &ContainerConfig) -> DriverFamily {
        DriverFamily::from_id(&config.graphics_driver)
    }

    pub fn dxvk_catalog(&self, config: &ContainerConfig) -> DxvkCatalog {
        if config.dxwrapper == "vkd3d" {
            DxvkCatalog::Hidden
        } else if self.driver_family(config).is_vortek_like() && self.vk_api_version < VkVersion::V1_3
        {
            DxvkCatalog::Reduced
        } else {
            DxvkCatalog::Full
        }
    }

    /// Run every rule over `config` and return it with its selections.
    pub fn reconcile(&self, mut config: ContainerConfig) -> (ContainerConfig, Selections) {
        let family = self.driver_family(&config);
        let is_vkd3d = config.dxwrapper == "vkd3d";
        let dxvk_catalog = self.dxvk_catalog(&config);

        let graphics_driver_version = if config.graphics_driver_version.is_empty() {
            0
        } else {
            index_of(family.versions(), &config.graphics_driver_version).unwrap_or(0)
        };

        let dxvk_versions = dxvk_catalog.versions();
        let dxvk_version = if is_vkd3d {
            0
        } else {
            index_of(dxvk_versions, config.dxwrapper_config.version())
                .or_else(|| index_of(dxvk_versions, defaults::DXVK))
                .unwrap_or(0)
        };
        let effective_dxvk = if is_vkd3d {
            family.forced_dxvk_version()
        } else {
            dxvk_versions.get(dxvk_version).copied().unwrap_or("")
        };

        if is_vkd3d || config.dxwrapper == "dxvk" {
            config.dxwrapper_config.set_version(effective_dxvk);
        }

        if effective_dxvk.to_lowercase().contains("async") {
            config.env_vars.put(DXVK_ASYNC, "1");
        } else {
            config.env_vars.remove(DXVK_ASYNC);
        }

        if is_vkd3d {
            if config.dxwrapper_config.vkd3d_version().is_empty() {
                config
                    .dxwrapper_config
                    .set_vkd3d_version(family.forced_vkd3d_version());
            }
            if config.dxwrapper_config.vkd3d_feature_level().is_empty() {
                config
                    .dxwrapper_config
                    .set_vkd3d_feature_level(defaults::VKD3D_FEATURE_LEVEL);
            }
        }

        let selections = self.selections(&config, dxvk_catalog, graphics_driver_version, dxvk_version);
        (config, selections)
    }

    fn selections(
        &self,
        config: &ContainerConfig,
        dxvk_catalog: DxvkCatalog,
        graphics_driver_version: usize,
        dxvk_version: usize,
    ) -> Selections {
        let catalogs = &self.catalogs;
        let family = self.driver_family(config);
        let driver_config = &config.graphics_driver_config;
        let wrapper_config = &config.dxwrapper_config;

        let vkd3d_version = {
            let stored = wrapper_config.vkd3d_version();
            let wanted = if stored.is_empty() {
                family.forced_vkd3d_version()
            } else {
                stored
            };
            index_of(VKD3D_VERSIONS, wanted).unwrap_or(0)
        };
        let vkd3d_feature_level = {
            let stored = wrapper_config.vkd3d_feature_level();
            let wanted = if stored.is_empty() {
                defaults::VKD3D_FEATURE_LEVEL
            } else {
                stored
            };
            index_of(VKD3D_FEATURE_LEVELS, wanted).unwrap_or(0)
        };

        let screen_size = SCREEN_SIZES
            .iter()
            .position(|label| label.split(' ').next() == Some(config.screen_size.as_str()))
            .unwrap_or(0);

        let exposed_extensions = match driver_config.exposed_extensions() {
            ExposedExtensions::All => (0..catalogs.device_extensions.len()).collect(),
            ExposedExtensions::Only(list) => catalogs
                .device_extensions
                .iter()
                .enumerate()
                .filter(|(_, ext)| list.contains(ext))
                .map(|(i, _)| i)
                .collect(),
        };

        Selections {
            graphics_driver: catalogs
                .graphics_driver_index(&config.graphics_driver)
                .unwrap_or(0),
            graphics_driver_version,
            dx_wrapper: catalogs.dx_wrapper_index(&config.dxwrapper).unwrap_or(0),
            dxvk_catalog,
            dxvk_version,
            vkd3d_version,
            vkd3d_feature_level,
            audio_driver: catalogs.audio_driver_index(&config.audio_driver).unwrap_or(0),
            screen_size,
            gpu_card: catalogs
                .gpu_cards
                .iter()
                .position(|card| card.device_id == config.video_pci_device_id)
                .unwrap_or(0),
            rendering_mode: RENDERING_MODES
                .iter()
                .position(|mode| mode.to_lowercase() == config.offscreen_rendering_mode)
                .unwrap_or(0),
            video_memory: VIDEO_MEMORY_SIZES
                .iter()
                .position(|size| catalog::parse_number(size) == config.video_memory_size)
                .unwrap_or(0),
            mouse_warp: MOUSE_WARPS
                .iter()
                .position(|warp| warp.to_lowercase() == config.mouse_warp_override)
                .unwrap_or(0),
            language: index_of(LANGUAGES, &config.language.to_lowercase())
                .or_else(|| index_of(LANGUAGES, defaults::LANGUAGE))
                .unwrap_or(0),
            steam_type: STEAM_TYPES
                .iter()
                .position(|(id, _)| *id == config.steam_type.to_lowercase())
                .unwrap_or(0),
            box64_version: index_of(BOX64_VERSIONS, &config.box64_version).unwrap_or(0),
            box64_preset: BOX64_PRESETS
                .iter()
                .position(|preset| preset.id == config.box64_preset)
                .unwrap_or(0),
            startup_selection: (config.startup_selection as usize)
                .min(STARTUP_SELECTIONS.len() - 1),
            vk_max_version: index_of(VK_MAX_VERSIONS, driver_config.vk_max_version())
                .unwrap_or(VK_MAX_VERSIONS.len() - 1),
            image_cache_size: index_of(IMAGE_CACHE_SIZES, driver_config.image_cache_size())
                .unwrap_or(2),
            max_device_memory: index_of(MAX_DEVICE_MEMORY, driver_config.max_device_memory())
                .unwrap_or(MAX_DEVICE_MEMORY.len() - 1),
            exposed_extensions,
        }
    }
}

fn index_of(list: &[&str], value: &str) -> Option<usize> {
    list.iter().position(|item| *item == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(vk: VkVersion) -> ReconcileContext {
        ReconcileContext::new(Catalogs::builtin(), vk, 8)
    }

    fn record(driver: &str, wrapper: &str) -> ContainerConfig {
        ContainerConfig {
            graphics_driver: driver.to_string(),
            dxwrapper: wrapper.to_string(),
            ..ContainerConfig::default()
        }
    }

    #[test]
    fn reconcile_is_idempotent() {
        let ctx = ctx(VkVersion::new(1, 1, 0));
        for driver in ["vortek", "turnip", "adreno", "zink"] {
            for wrapper in ["wined3d", "dxvk", "vkd3d"] {
                let (once, sel_once) = ctx.reconcile(record(driver, wrapper));
                let (twice, sel_twice) = ctx.reconcile(once.clone());
                assert_eq!(once, twice, "{driver}/{wrapper}");
                assert_eq!(sel_once, sel_twice, "{driver}/{wrapper}");
            }
        }
    }

    #[test]
    fn unknown_dxvk_version_falls_back_to_default() {
        let mut config = record("turnip", "dxvk");
        config.dxwrapper_config.set_version("0.0.1");
        let (config, sel) = ctx(VkVersion::V1_3).reconcile(config);
        assert_eq!(config.dxwrapper_config.version(), defaults::DXVK);
        assert_eq!(DXVK_VERSIONS[sel.dxvk_version], defaults::DXVK);
    }

    #[test]
    fn reduced_catalog_without_default_uses_first_entry() {
        let (config, sel) = ctx(VkVersion::new(1, 2, 0)).reconcile(record("vortek", "dxvk"));
        assert_eq!(sel.dxvk_catalog, DxvkCatalog::Reduced);
        assert_eq!(sel.dxvk_version, 0);
        assert_eq!(config.dxwrapper_config.version(), "1.10.3");
        assert!(!config.env_vars.has(DXVK_ASYNC));
    }

    #[test]
    fn wined3d_leaves_version_key_alone() {
        let (config, _) = ctx(VkVersion::V1_3).reconcile(record("turnip", "wined3d"));
        assert_eq!(config.dxwrapper_config.version(), "");
        // The default DXVK build is an async one.
        assert_eq!(config.env_vars.get(DXVK_ASYNC), Some("1"));
    }

    #[test]
    fn missing_driver_version_selects_default_entry() {
        let mut config = record("turnip", "dxvk");
        config.graphics_driver_version = "24.3.0".to_string();
        let (_, sel) = ctx(VkVersion::V1_3).reconcile(config.clone());
        assert_eq!(sel.graphics_driver_version, 3);

        config.graphics_driver_version = "not-a-version".to_string();
        let (_, sel) = ctx(VkVersion::V1_3).reconcile(config);
        assert_eq!(sel.graphics_driver_version, 0);
    }

    #[test]
    fn unknown_language_selects_english() {
        let mut config = record("turnip", "dxvk");
        config.language = "klingon".to_string();
        let (_, sel) = ctx(VkVersion::V1_3).reconcile(config);
        assert_eq!(LANGUAGES[sel.language], "english");
    }

    #[test]
    fn startup_selection_is_clamped() {
        let mut config = record("turnip", "dxvk");
        config.startup_selection = 42;
        let (_, sel) = ctx(VkVersion::V1_3).reconcile(config);
        assert_eq!(sel.startup_selection, STARTUP_SELECTIONS.len() - 1);
    }
}
