use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::gpu::{default_gpu_cards, GpuCard, StaticGpuInfo, VkVersion};

/// Application settings (`~/.config/containerconf/config.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub drivers: DriverSettings,
    #[serde(default)]
    pub gpu: GpuSettings,
    #[serde(default)]
    pub host: HostSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where custom GPU drivers are installed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverSettings {
    /// Override for the install root. Defaults to
    /// `<data_dir>/containerconf/installed_components/adrenotools_driver`.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// GPU capabilities reported to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSettings {
    /// Vulkan API version of the active driver (default: "1.3.0").
    #[serde(default = "default_vk_api_version")]
    pub vk_api_version: String,
    /// Device extensions that can be exposed to the guest.
    #[serde(default)]
    pub device_extensions: Vec<String>,
    /// GPU identities for WineD3D (default: builtin list).
    #[serde(default = "default_gpu_cards")]
    pub cards: Vec<GpuCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSettings {
    /// Number of host CPUs offered for affinity (default: detected).
    #[serde(default)]
    pub cpu_count: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file used while the terminal UI owns the screen.
    /// Defaults to `<data_dir>/containerconf/containerconf.log`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_vk_api_version() -> String {
    "1.3.0".to_string()
}

impl Default for GpuSettings {
    fn default() -> Self {
        Self {
            vk_api_version: default_vk_api_version(),
            device_extensions: Vec::new(),
            cards: default_gpu_cards(),
        }
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("containerconf")
}

impl AppSettings {
    pub fn driver_root(&self) -> PathBuf {
        self.drivers.root.clone().unwrap_or_else(|| {
            data_dir()
                .join("installed_components")
                .join("adrenotools_driver")
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(|| data_dir().join("containerconf.log"))
    }

    pub fn cpu_count(&self) -> usize {
        self.host.cpu_count.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// GPU provider built from the `[gpu]` section.
    ///
    /// The version is checked by `validate()`; an unparseable value that
    /// slips through falls back to 1.3.0.
    pub fn gpu_info(&self) -> StaticGpuInfo {
        StaticGpuInfo {
            vk_api_version: self.gpu.vk_api_version.parse().unwrap_or(VkVersion::V1_3),
            device_extensions: self.gpu.device_extensions.clone(),
            cards: self.gpu.cards.clone(),
        }
    }
}
