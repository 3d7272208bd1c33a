//! GPU capability queries.
//!
//! The editor never talks to Vulkan itself. It asks a [`GpuInfo`] provider
//! for the runtime API version, the device extensions it may expose and the
//! GPU cards WineD3D can impersonate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vulkan API version, ordered by (major, minor, patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VkVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VkVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// First version where the full DXVK catalogue is usable.
    pub const V1_3: VkVersion = VkVersion::new(1, 3, 0);
}

impl fmt::Display for VkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid Vulkan version '{0}' (expected MAJOR.MINOR[.PATCH])")]
pub struct ParseVkVersionError(pub String);

impl FromStr for VkVersion {
    type Err = ParseVkVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(ParseVkVersionError(s.to_string()));
        }
        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| ParseVkVersionError(s.to_string()))?;
        }
        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

/// A GPU identity WineD3D can report to applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuCard {
    pub name: String,
    pub device_id: u32,
    pub vendor_id: u32,
}

impl GpuCard {
    pub fn new(name: &str, device_id: u32, vendor_id: u32) -> Self {
        Self {
            name: name.to_string(),
            device_id,
            vendor_id,
        }
    }
}

/// Cards offered when the settings file does not list any.
pub fn default_gpu_cards() -> Vec<GpuCard> {
    vec![
        GpuCard::new("NVIDIA GeForce GTX 480", 0x06c0, 0x10de),
        GpuCard::new("NVIDIA GeForce GTX 660", 0x11c0, 0x10de),
        GpuCard::new("NVIDIA GeForce GTX 1050", 0x1c81, 0x10de),
        GpuCard::new("AMD Radeon HD 7900", 0x6798, 0x1002),
        GpuCard::new("AMD Radeon RX 580", 0x67df, 0x1002),
        GpuCard::new("Intel HD Graphics 620", 0x5916, 0x8086),
    ]
}

/// Source of GPU capability data.
pub trait GpuInfo {
    /// Vulkan API version reported by the active driver.
    fn vk_api_version(&self) -> VkVersion;

    /// Device extensions that can be exposed to the guest.
    fn device_extensions(&self) -> Vec<String>;

    /// GPU identities selectable for WineD3D.
    fn cards(&self) -> Vec<GpuCard>;
}

/// [`GpuInfo`] backed by fixed values, typically from the settings file.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticGpuInfo {
    pub vk_api_version: VkVersion,
    pub device_extensions: Vec<String>,
    pub cards: Vec<GpuCard>,
}

impl Default for StaticGpuInfo {
    fn default() -> Self {
        Self {
            vk_api_version: VkVersion::V1_3,
            device_extensions: Vec::new(),
            cards: default_gpu_cards(),
        }
    }
}

impl GpuInfo for StaticGpuInfo {
    fn vk_api_version(&self) -> VkVersion {
        self.vk_api_version
    }

    fn device_extensions(&self) -> Vec<String> {
        self.device_extensions.clone()
    }

    fn cards(&self) -> Vec<GpuCard> {
        self.cards.clone()
    }
}
