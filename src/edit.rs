//! Field edits on a container record.
//!
//! An edit never mutates the caller's record: [`apply`] copies it, changes
//! the one field, and runs the reconciliation pass over the copy. Choice
//! edits carry an index into the list the editor is showing; an index that
//! is out of range leaves the record as it was.

use crate::catalog::{
    self, BOX64_PRESETS, BOX64_VERSIONS, DINPUT_MAPPER_TYPES, IMAGE_CACHE_SIZES, LANGUAGES,
    MAX_DEVICE_MEMORY, MOUSE_WARPS, RENDERING_MODES, SCREEN_SIZES, STARTUP_SELECTIONS,
    STEAM_TYPES, VIDEO_MEMORY_SIZES, VK_MAX_VERSIONS, VKD3D_FEATURE_LEVELS, VKD3D_VERSIONS,
    WIN_COMPONENT_LEVELS,
};
use crate::config::{
    ButtonBindings, ContainerConfig, CpuList, ExposedExtensions, BINDING_VALUES,
    CONTROLLER_BUTTONS,
};
use crate::reconcile::{ReconcileContext, Selections};

/// One change to one field of a container record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Name(String),
    ExecutablePath(String),
    ExecArgs(String),
    Language(usize),
    /// Index into the screen size list. Index 0 is the custom entry and
    /// keeps the current size.
    ScreenSize(usize),
    /// `WxH` text for the custom entry.
    CustomScreenSize(String),

    GraphicsDriver(usize),
    GraphicsDriverVersion(usize),
    VkMaxVersion(usize),
    ImageCacheSize(usize),
    MaxDeviceMemory(usize),
    ToggleExposedExtension(usize),

    DxWrapper(usize),
    DxvkVersion(usize),
    Vkd3dVersion(usize),
    Vkd3dFeatureLevel(usize),

    AudioDriver(usize),
    ShowFps(bool),
    LaunchRealSteam(bool),
    AllowSteamUpdates(bool),
    SteamType(usize),

    SdlControllerApi(bool),
    EnableXInput(bool),
    EnableDInput(bool),
    DInputMapperType(usize),
    DisableMouseInput(bool),
    TouchscreenMode(bool),
    EmulateKeyboardMouse(bool),
    ButtonBinding { button: usize, binding: usize },

    GpuCard(usize),
    RenderingMode(usize),
    VideoMemory(usize),
    Csmt(bool),
    StrictShaderMath(bool),
    MouseWarp(usize),

    WinComponent { component: usize, level: usize },

    PutEnvVar { name: String, value: String },
    RemoveEnvVar(String),

    AddDrive(String),
    RemoveDrive(char),

    Box64Version(usize),
    Box64Preset(usize),
    StartupSelection(usize),
    CpuList(String),
    CpuListWow64(String),
}

/// Apply `edit` to a copy of `config` and reconcile the result.
pub fn apply(
    ctx: &ReconcileContext,
    config: &ContainerConfig,
    edit: &FieldEdit,
) -> (ContainerConfig, Selections) {
    let mut next = config.clone();
    apply_raw(ctx, &mut next, edit);
    ctx.reconcile(next)
}

fn apply_raw(ctx: &ReconcileContext, config: &mut ContainerConfig, edit: &FieldEdit) {
    let catalogs = &ctx.catalogs;
    match edit {
        FieldEdit::Name(name) => {
            let name = name.trim();
            if !name.is_empty() {
                config.name = name.to_string();
            }
        }
        FieldEdit::ExecutablePath(path) => config.executable_path = path.trim().to_string(),
        FieldEdit::ExecArgs(args) => config.exec_args = args.trim().to_string(),
        FieldEdit::Language(index) => {
            if let Some(code) = LANGUAGES.get(*index) {
                config.language = code.to_string();
            }
        }
        FieldEdit::ScreenSize(index) => {
            if *index > 0 {
                if let Some(label) = SCREEN_SIZES.get(*index) {
                    if let Some(size) = label.split(' ').next() {
                        config.screen_size = size.to_string();
                    }
                }
            }
        }
        FieldEdit::CustomScreenSize(text) => match parse_screen_size(text) {
            Some((width, height)) => config.screen_size = format!("{}x{}", width, height),
            None => tracing::debug!("Ignoring invalid screen size '{}'", text),
        },

        FieldEdit::GraphicsDriver(index) => {
            if let Some(entry) = catalogs.graphics_drivers.get(*index) {
                if entry.id != config.graphics_driver {
                    config.graphics_driver = entry.id.clone();
                    config.graphics_driver_version.clear();
                }
            }
        }
        // Index 0 is the family default, stored as an empty version.
        FieldEdit::GraphicsDriverVersion(index) => {
            let family = ctx.driver_family(config);
            if let Some(version) = family.versions().get(*index) {
                config.graphics_driver_version = if *index == 0 {
                    String::new()
                } else {
                    version.to_string()
                };
            }
        }
        FieldEdit::VkMaxVersion(index) => {
            if let Some(version) = VK_MAX_VERSIONS.get(*index) {
                config.graphics_driver_config.set_vk_max_version(version);
            }
        }
        FieldEdit::ImageCacheSize(index) => {
            if let Some(size) = IMAGE_CACHE_SIZES.get(*index) {
                config.graphics_driver_config.set_image_cache_size(size);
            }
        }
        FieldEdit::MaxDeviceMemory(index) => {
            if let Some(size) = MAX_DEVICE_MEMORY.get(*index) {
                config.graphics_driver_config.set_max_device_memory(size);
            }
        }
        FieldEdit::ToggleExposedExtension(index) => {
            let available = &catalogs.device_extensions;
            let Some(extension) = available.get(*index) else {
                return;
            };
            let mut selected = match config.graphics_driver_config.exposed_extensions() {
                ExposedExtensions::All => available.clone(),
                ExposedExtensions::Only(list) => list,
            };
            if let Some(pos) = selected.iter().position(|ext| ext == extension) {
                selected.remove(pos);
            } else {
                selected.push(extension.clone());
            }
            config
                .graphics_driver_config
                .set_exposed_extensions(&selected, available);
        }

        FieldEdit::DxWrapper(index) => {
            if let Some(entry) = catalogs.dx_wrappers.get(*index) {
                config.dxwrapper = entry.id.clone();
            }
        }
        FieldEdit::DxvkVersion(index) => {
            let versions = ctx.dxvk_catalog(config).versions();
            if let Some(version) = versions.get(*index) {
                config.dxwrapper_config.set_version(version);
            }
        }
        FieldEdit::Vkd3dVersion(index) => {
            if let Some(version) = VKD3D_VERSIONS.get(*index) {
                config.dxwrapper_config.set_vkd3d_version(version);
            }
        }
        FieldEdit::Vkd3dFeatureLevel(index) => {
            if let Some(level) = VKD3D_FEATURE_LEVELS.get(*index) {
                config.dxwrapper_config.set_vkd3d_feature_level(level);
            }
        }

        FieldEdit::AudioDriver(index) => {
            if let Some(entry) = catalogs.audio_drivers.get(*index) {
                config.audio_driver = entry.id.clone();
            }
        }
        FieldEdit::ShowFps(on) => config.show_fps = *on,
        FieldEdit::LaunchRealSteam(on) => {
            config.launch_real_steam = *on;
            if !on {
                config.allow_steam_updates = false;
            }
        }
        FieldEdit::AllowSteamUpdates(on) => {
            if config.launch_real_steam {
                config.allow_steam_updates = *on;
            }
        }
        FieldEdit::SteamType(index) => {
            if let Some((id, _)) = STEAM_TYPES.get(*index) {
                config.steam_type = id.to_string();
            }
        }

        FieldEdit::SdlControllerApi(on) => config.sdl_controller_api = *on,
        FieldEdit::EnableXInput(on) => config.enable_xinput = *on,
        FieldEdit::EnableDInput(on) => config.enable_dinput = *on,
        FieldEdit::DInputMapperType(index) => {
            if *index < DINPUT_MAPPER_TYPES.len() {
                config.dinput_mapper_type = *index as u8 + 1;
            }
        }
        FieldEdit::DisableMouseInput(on) => config.disable_mouse_input = *on,
        FieldEdit::TouchscreenMode(on) => config.touchscreen_mode = *on,
        FieldEdit::EmulateKeyboardMouse(on) => {
            config.emulate_keyboard_mouse = *on;
            if *on && config.controller_emulation_bindings.is_empty() {
                config.controller_emulation_bindings = ButtonBindings::defaults();
            }
        }
        FieldEdit::ButtonBinding { button, binding } => {
            if let (Some(button), Some(binding)) =
                (CONTROLLER_BUTTONS.get(*button), BINDING_VALUES.get(*binding))
            {
                config.controller_emulation_bindings.set(button, binding);
            }
        }

        FieldEdit::GpuCard(index) => {
            if let Some(card) = catalogs.gpu_cards.get(*index) {
                config.video_pci_device_id = card.device_id;
            }
        }
        FieldEdit::RenderingMode(index) => {
            if let Some(mode) = RENDERING_MODES.get(*index) {
                config.offscreen_rendering_mode = mode.to_lowercase();
            }
        }
        FieldEdit::VideoMemory(index) => {
            if let Some(size) = VIDEO_MEMORY_SIZES.get(*index) {
                config.video_memory_size = catalog::parse_number(size);
            }
        }
        FieldEdit::Csmt(on) => config.csmt = *on,
        FieldEdit::StrictShaderMath(on) => config.strict_shader_math = *on,
        FieldEdit::MouseWarp(index) => {
            if let Some(warp) = MOUSE_WARPS.get(*index) {
                config.mouse_warp_override = warp.to_lowercase();
            }
        }

        FieldEdit::WinComponent { component, level } => {
            if *level >= WIN_COMPONENT_LEVELS.len() {
                return;
            }
            let id = config
                .wincomponents
                .iter()
                .nth(*component)
                .map(|(id, _)| id.to_string());
            if let Some(id) = id {
                config.wincomponents.set_level(&id, *level as u8);
            }
        }

        FieldEdit::PutEnvVar { name, value } => {
            let name = name.trim();
            if !name.is_empty() && !name.contains('=') {
                config.env_vars.put(name, value);
            }
        }
        FieldEdit::RemoveEnvVar(name) => {
            config.env_vars.remove(name);
        }

        FieldEdit::AddDrive(path) => {
            if config.drives.add(path).is_none() {
                tracing::debug!("No drive letter left for '{}'", path);
            }
        }
        FieldEdit::RemoveDrive(letter) => {
            config.drives.remove(*letter);
        }

        FieldEdit::Box64Version(index) => {
            if let Some(version) = BOX64_VERSIONS.get(*index) {
                config.box64_version = version.to_string();
            }
        }
        FieldEdit::Box64Preset(index) => {
            if let Some(preset) = BOX64_PRESETS.get(*index) {
                config.box64_preset = preset.id.to_string();
            }
        }
        FieldEdit::StartupSelection(index) => {
            if *index < STARTUP_SELECTIONS.len() {
                config.startup_selection = *index as u8;
            }
        }
        FieldEdit::CpuList(text) => {
            if let Some(list) = CpuList::parse_for_host(text, ctx.cpu_count) {
                config.cpu_list = list;
            }
        }
        FieldEdit::CpuListWow64(text) => {
            if let Some(list) = CpuList::parse_for_host(text, ctx.cpu_count) {
                config.cpu_list_wow64 = list;
            }
        }
    }
}

/// Parse `WxH` (spaces around `x` allowed) into positive dimensions.
pub fn parse_screen_size(text: &str) -> Option<(u32, u32)> {
    let (width, height) = text.to_lowercase().split_once('x').map(|(w, h)| {
        (w.trim().parse::<u32>(), h.trim().parse::<u32>())
    })?;
    match (width, height) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Some((w, h)),
        _ => None,
    }
}
