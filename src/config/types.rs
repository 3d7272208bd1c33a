use serde::{Deserialize, Serialize};

use super::blobs::{DxWrapperConfig, GraphicsDriverConfig};
use super::env_vars::EnvVars;
use super::fields::{ButtonBindings, CpuList, Drives, WinComponents, DEFAULT_WIN_COMPONENTS};
use crate::catalog::defaults;

pub const DEFAULT_ENV_VARS: &str = "ZINK_DESCRIPTORS=lazy ZINK_DEBUG=compact \
MESA_SHADER_CACHE_DISABLE=false MESA_SHADER_CACHE_MAX_SIZE=512MB mesa_glthread=true \
WINEESYNC=1 MESA_VK_WSI_PRESENT_MODE=mailbox TU_DEBUG=noconform";

pub const DEFAULT_DRIVES: &str = "D:/storage/emulated/0/Download";

/// DirectInput mapper: standard mapping.
pub const DINPUT_MAPPER_STANDARD: u8 = 1;
/// DirectInput mapper: route through the XInput mapper.
pub const DINPUT_MAPPER_XINPUT: u8 = 2;

/// Configuration of one Wine container.
///
/// This is the record the editor drafts and hands back on save. Equality
/// between the saved and the drafted record is the only dirty signal, so
/// every field takes part in `PartialEq`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub name: String,
    pub executable_path: String,
    pub exec_args: String,
    /// Steam language code (e.g. "english", "schinese").
    pub language: String,
    /// `WIDTHxHEIGHT`.
    pub screen_size: String,

    pub graphics_driver: String,
    /// Empty means the driver family's default version.
    pub graphics_driver_version: String,
    pub graphics_driver_config: GraphicsDriverConfig,
    /// "wined3d", "dxvk", "vkd3d" or "cnc-ddraw".
    pub dxwrapper: String,
    pub dxwrapper_config: DxWrapperConfig,
    pub audio_driver: String,

    /// PCI device id WineD3D reports.
    pub video_pci_device_id: u32,
    pub offscreen_rendering_mode: String,
    /// Video memory in MB, digits only.
    pub video_memory_size: String,
    pub csmt: bool,
    pub strict_shader_math: bool,
    pub mouse_warp_override: String,

    pub show_fps: bool,
    pub launch_real_steam: bool,
    pub allow_steam_updates: bool,
    pub steam_type: String,

    pub sdl_controller_api: bool,
    pub enable_xinput: bool,
    pub enable_dinput: bool,
    pub dinput_mapper_type: u8,
    pub disable_mouse_input: bool,
    pub touchscreen_mode: bool,
    pub emulate_keyboard_mouse: bool,
    pub controller_emulation_bindings: ButtonBindings,

    pub env_vars: EnvVars,
    pub wincomponents: WinComponents,
    pub drives: Drives,

    pub box64_version: String,
    pub box64_preset: String,
    /// 0 normal, 1 essential, 2 aggressive.
    pub startup_selection: u8,
    pub cpu_list: CpuList,
    pub cpu_list_wow64: CpuList,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            name: "Container".to_string(),
            executable_path: String::new(),
            exec_args: String::new(),
            language: defaults::LANGUAGE.to_string(),
            screen_size: "1280x720".to_string(),
            graphics_driver: "vortek".to_string(),
            graphics_driver_version: String::new(),
            graphics_driver_config: GraphicsDriverConfig::default(),
            dxwrapper: "dxvk".to_string(),
            dxwrapper_config: DxWrapperConfig::default(),
            audio_driver: "alsa".to_string(),
            video_pci_device_id: 0x06c0,
            offscreen_rendering_mode: "fbo".to_string(),
            video_memory_size: "2048".to_string(),
            csmt: true,
            strict_shader_math: false,
            mouse_warp_override: "disable".to_string(),
            show_fps: false,
            launch_real_steam: false,
            allow_steam_updates: false,
            steam_type: "normal".to_string(),
            sdl_controller_api: true,
            enable_xinput: true,
            enable_dinput: true,
            dinput_mapper_type: DINPUT_MAPPER_STANDARD,
            disable_mouse_input: false,
            touchscreen_mode: false,
            emulate_keyboard_mouse: false,
            controller_emulation_bindings: ButtonBindings::default(),
            env_vars: EnvVars::parse(DEFAULT_ENV_VARS),
            wincomponents: WinComponents::parse(DEFAULT_WIN_COMPONENTS),
            drives: Drives::parse(DEFAULT_DRIVES),
            box64_version: defaults::BOX64.to_string(),
            box64_preset: "COMPATIBILITY".to_string(),
            startup_selection: 1,
            cpu_list: CpuList::all(cpus),
            cpu_list_wow64: CpuList::all(cpus),
        }
    }
}
