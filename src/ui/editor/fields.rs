//! Rows of the configuration editor.
//!
//! Rows are derived from the session on every render and every intent, so
//! which rows exist follows the draft: VKD3D rows appear only with VKD3D
//! selected, binding rows only with keyboard/mouse emulation on, and so on.

use crate::catalog::{
    self, BOX64_PRESETS, BOX64_VERSIONS, DINPUT_MAPPER_TYPES, IMAGE_CACHE_SIZES, LANGUAGES,
    MAX_DEVICE_MEMORY, MOUSE_WARPS, RENDERING_MODES, SCREEN_SIZES, STARTUP_SELECTIONS,
    STEAM_TYPES, VIDEO_MEMORY_SIZES, VK_MAX_VERSIONS, VKD3D_FEATURE_LEVELS, VKD3D_VERSIONS,
    WIN_COMPONENT_LEVELS,
};
use crate::config::{win_component_title, BINDING_VALUES, CONTROLLER_BUTTONS};
use crate::edit::FieldEdit;
use crate::reconcile::DxvkCatalog;
use crate::ui::editor::state::EditorSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    General,
    Graphics,
    Steam,
    Controller,
    Wine,
    Components,
    Environment,
    Drives,
    Advanced,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Graphics => "Graphics",
            Self::Steam => "Audio & Steam",
            Self::Controller => "Controller",
            Self::Wine => "Wine",
            Self::Components => "Win Components",
            Self::Environment => "Environment",
            Self::Drives => "Drives",
            Self::Advanced => "Advanced",
        }
    }
}

/// Identity of a row. Stable across edits so focus can follow a row when
/// rows above it appear or disappear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    Name,
    ExecutablePath,
    ExecArgs,
    Language,
    ScreenSize,
    CustomScreenSize,
    GraphicsDriver,
    GraphicsDriverVersion,
    VkMaxVersion,
    ImageCacheSize,
    MaxDeviceMemory,
    Extension(usize),
    DxWrapper,
    DxvkVersion,
    Vkd3dVersion,
    Vkd3dFeatureLevel,
    AudioDriver,
    ShowFps,
    LaunchRealSteam,
    AllowSteamUpdates,
    SteamType,
    SdlControllerApi,
    EnableXInput,
    EnableDInput,
    DInputMapperType,
    DisableMouseInput,
    TouchscreenMode,
    EmulateKeyboardMouse,
    Binding(usize),
    GpuCard,
    RenderingMode,
    VideoMemory,
    Csmt,
    StrictShaderMath,
    MouseWarp,
    WinComponent(usize),
    EnvVar(String),
    AddEnvVar,
    Drive(char),
    AddDrive,
    Box64Version,
    Box64Preset,
    StartupSelection,
    CpuList,
    CpuListWow64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Choice { options: Vec<String>, selected: usize },
    Toggle(bool),
    Text(String),
    /// Opens an empty text prompt; the row has no value of its own.
    Action,
    /// Read-only value.
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub section: Section,
    pub key: FieldKey,
    pub label: String,
    pub control: Control,
}

impl Row {
    fn new(section: Section, key: FieldKey, label: impl Into<String>, control: Control) -> Self {
        Self {
            section,
            key,
            label: label.into(),
            control,
        }
    }

    pub fn value_text(&self) -> String {
        match &self.control {
            Control::Choice { options, selected } => {
                options.get(*selected).cloned().unwrap_or_default()
            }
            Control::Toggle(true) => "[x]".to_string(),
            Control::Toggle(false) => "[ ]".to_string(),
            Control::Text(text) | Control::Label(text) => text.clone(),
            Control::Action => String::new(),
        }
    }

    pub fn is_removable(&self) -> bool {
        matches!(self.key, FieldKey::EnvVar(_) | FieldKey::Drive(_))
    }
}

impl FieldKey {
    /// Edit selecting entry `index` of a choice row.
    pub fn choice_edit(&self, index: usize) -> Option<FieldEdit> {
        let edit = match self {
            Self::Language => FieldEdit::Language(index),
            Self::ScreenSize => FieldEdit::ScreenSize(index),
            Self::GraphicsDriver => FieldEdit::GraphicsDriver(index),
            Self::GraphicsDriverVersion => FieldEdit::GraphicsDriverVersion(index),
            Self::VkMaxVersion => FieldEdit::VkMaxVersion(index),
            Self::ImageCacheSize => FieldEdit::ImageCacheSize(index),
            Self::MaxDeviceMemory => FieldEdit::MaxDeviceMemory(index),
            Self::DxWrapper => FieldEdit::DxWrapper(index),
            Self::DxvkVersion => FieldEdit::DxvkVersion(index),
            Self::Vkd3dVersion => FieldEdit::Vkd3dVersion(index),
            Self::Vkd3dFeatureLevel => FieldEdit::Vkd3dFeatureLevel(index),
            Self::AudioDriver => FieldEdit::AudioDriver(index),
            Self::SteamType => FieldEdit::SteamType(index),
            Self::DInputMapperType => FieldEdit::DInputMapperType(index),
            Self::Binding(button) => FieldEdit::ButtonBinding {
                button: *button,
                binding: index,
            },
            Self::GpuCard => FieldEdit::GpuCard(index),
            Self::RenderingMode => FieldEdit::RenderingMode(index),
            Self::VideoMemory => FieldEdit::VideoMemory(index),
            Self::MouseWarp => FieldEdit::MouseWarp(index),
            Self::WinComponent(component) => FieldEdit::WinComponent {
                component: *component,
                level: index,
            },
            Self::Box64Version => FieldEdit::Box64Version(index),
            Self::Box64Preset => FieldEdit::Box64Preset(index),
            Self::StartupSelection => FieldEdit::StartupSelection(index),
            _ => return None,
        };
        Some(edit)
    }

    pub fn toggle_edit(&self, on: bool) -> Option<FieldEdit> {
        let edit = match self {
            Self::ShowFps => FieldEdit::ShowFps(on),
            Self::LaunchRealSteam => FieldEdit::LaunchRealSteam(on),
            Self::AllowSteamUpdates => FieldEdit::AllowSteamUpdates(on),
            Self::SdlControllerApi => FieldEdit::SdlControllerApi(on),
            Self::EnableXInput => FieldEdit::EnableXInput(on),
            Self::EnableDInput => FieldEdit::EnableDInput(on),
            Self::DisableMouseInput => FieldEdit::DisableMouseInput(on),
            Self::TouchscreenMode => FieldEdit::TouchscreenMode(on),
            Self::EmulateKeyboardMouse => FieldEdit::EmulateKeyboardMouse(on),
            Self::Csmt => FieldEdit::Csmt(on),
            Self::StrictShaderMath => FieldEdit::StrictShaderMath(on),
            // Exposure is a set toggle; the flag itself is implied.
            Self::Extension(index) => FieldEdit::ToggleExposedExtension(*index),
            _ => return None,
        };
        Some(edit)
    }

    /// Edit produced by committing `text` in this row's prompt.
    pub fn text_edit(&self, text: &str) -> Option<FieldEdit> {
        let edit = match self {
            Self::Name => FieldEdit::Name(text.to_string()),
            Self::ExecutablePath => FieldEdit::ExecutablePath(text.to_string()),
            Self::ExecArgs => FieldEdit::ExecArgs(text.to_string()),
            Self::CustomScreenSize => FieldEdit::CustomScreenSize(text.to_string()),
            Self::EnvVar(name) => FieldEdit::PutEnvVar {
                name: name.clone(),
                value: text.to_string(),
            },
            Self::AddEnvVar => {
                let (name, value) = text.split_once('=')?;
                FieldEdit::PutEnvVar {
                    name: name.to_string(),
                    value: value.to_string(),
                }
            }
            Self::AddDrive => FieldEdit::AddDrive(text.to_string()),
            Self::CpuList => FieldEdit::CpuList(text.to_string()),
            Self::CpuListWow64 => FieldEdit::CpuListWow64(text.to_string()),
            _ => return None,
        };
        Some(edit)
    }

    pub fn remove_edit(&self) -> Option<FieldEdit> {
        match self {
            Self::EnvVar(name) => Some(FieldEdit::RemoveEnvVar(name.clone())),
            Self::Drive(letter) => Some(FieldEdit::RemoveDrive(*letter)),
            _ => None,
        }
    }
}

fn choice<S: AsRef<str>>(options: &[S], selected: usize) -> Control {
    Control::Choice {
        options: options.iter().map(|o| o.as_ref().to_string()).collect(),
        selected,
    }
}

/// Rows for the session's current draft, in display order.
pub fn rows(session: &EditorSession) -> Vec<Row> {
    let draft = &session.draft;
    let sel = &session.selections;
    let catalogs = &session.ctx.catalogs;
    let family = session.ctx.driver_family(draft);
    let mut rows = Vec::new();

    use Section::*;

    rows.push(Row::new(General, FieldKey::Name, "Name", Control::Text(draft.name.clone())));
    rows.push(Row::new(
        General,
        FieldKey::ExecutablePath,
        "Executable path",
        Control::Text(draft.executable_path.clone()),
    ));
    rows.push(Row::new(
        General,
        FieldKey::ExecArgs,
        "Exec arguments",
        Control::Text(draft.exec_args.clone()),
    ));
    let languages: Vec<String> = LANGUAGES.iter().map(|code| catalog::language_label(code)).collect();
    rows.push(Row::new(General, FieldKey::Language, "Language", choice(&languages, sel.language)));
    rows.push(Row::new(
        General,
        FieldKey::ScreenSize,
        "Screen size",
        choice(SCREEN_SIZES, sel.screen_size),
    ));
    rows.push(Row::new(
        General,
        FieldKey::CustomScreenSize,
        "Custom size (WxH)",
        Control::Text(draft.screen_size.clone()),
    ));

    let drivers: Vec<&str> = catalogs.graphics_drivers.iter().map(|e| e.label.as_str()).collect();
    rows.push(Row::new(
        Graphics,
        FieldKey::GraphicsDriver,
        "Graphics driver",
        choice(&drivers, sel.graphics_driver),
    ));
    rows.push(Row::new(
        Graphics,
        FieldKey::GraphicsDriverVersion,
        "Driver version",
        choice(family.versions(), sel.graphics_driver_version),
    ));
    if family.is_vortek_like() {
        rows.push(Row::new(
            Graphics,
            FieldKey::VkMaxVersion,
            "Max Vulkan version",
            choice(VK_MAX_VERSIONS, sel.vk_max_version),
        ));
        let cache_sizes: Vec<String> = IMAGE_CACHE_SIZES.iter().map(|s| format!("{} MB", s)).collect();
        rows.push(Row::new(
            Graphics,
            FieldKey::ImageCacheSize,
            "Image cache size",
            choice(&cache_sizes, sel.image_cache_size),
        ));
        let memory: Vec<String> = MAX_DEVICE_MEMORY.iter().map(|s| format!("{} MB", s)).collect();
        rows.push(Row::new(
            Graphics,
            FieldKey::MaxDeviceMemory,
            "Max device memory",
            choice(&memory, sel.max_device_memory),
        ));
        for (index, ext) in catalogs.device_extensions.iter().enumerate() {
            rows.push(Row::new(
                Graphics,
                FieldKey::Extension(index),
                ext.clone(),
                Control::Toggle(sel.exposed_extensions.contains(&index)),
            ));
        }
    }

    let wrappers: Vec<&str> = catalogs.dx_wrappers.iter().map(|e| e.label.as_str()).collect();
    rows.push(Row::new(Graphics, FieldKey::DxWrapper, "DX wrapper", choice(&wrappers, sel.dx_wrapper)));
    if sel.dxvk_catalog != DxvkCatalog::Hidden {
        rows.push(Row::new(
            Graphics,
            FieldKey::DxvkVersion,
            "DXVK version",
            choice(sel.dxvk_versions(), sel.dxvk_version),
        ));
    }
    if draft.dxwrapper == "vkd3d" {
        rows.push(Row::new(
            Graphics,
            FieldKey::Vkd3dVersion,
            "VKD3D version",
            choice(VKD3D_VERSIONS, sel.vkd3d_version),
        ));
        rows.push(Row::new(
            Graphics,
            FieldKey::Vkd3dFeatureLevel,
            "Feature level",
            choice(VKD3D_FEATURE_LEVELS, sel.vkd3d_feature_level),
        ));
    }

    let audio: Vec<&str> = catalogs.audio_drivers.iter().map(|e| e.label.as_str()).collect();
    rows.push(Row::new(Steam, FieldKey::AudioDriver, "Audio driver", choice(&audio, sel.audio_driver)));
    rows.push(Row::new(Steam, FieldKey::ShowFps, "Show FPS", Control::Toggle(draft.show_fps)));
    rows.push(Row::new(
        Steam,
        FieldKey::LaunchRealSteam,
        "Launch real Steam",
        Control::Toggle(draft.launch_real_steam),
    ));
    if draft.launch_real_steam {
        rows.push(Row::new(
            Steam,
            FieldKey::AllowSteamUpdates,
            "Allow Steam updates",
            Control::Toggle(draft.allow_steam_updates),
        ));
    }
    let steam_types: Vec<&str> = STEAM_TYPES.iter().map(|(_, label)| *label).collect();
    rows.push(Row::new(Steam, FieldKey::SteamType, "Steam type", choice(&steam_types, sel.steam_type)));

    if !session.default_profile {
        rows.push(Row::new(
            Controller,
            FieldKey::SdlControllerApi,
            "Use SDL controller API",
            Control::Toggle(draft.sdl_controller_api),
        ));
    }
    rows.push(Row::new(
        Controller,
        FieldKey::EnableXInput,
        "Enable XInput",
        Control::Toggle(draft.enable_xinput),
    ));
    rows.push(Row::new(
        Controller,
        FieldKey::EnableDInput,
        "Enable DirectInput",
        Control::Toggle(draft.enable_dinput),
    ));
    if draft.enable_dinput {
        let mapper = (draft.dinput_mapper_type as usize).saturating_sub(1);
        rows.push(Row::new(
            Controller,
            FieldKey::DInputMapperType,
            "DirectInput mapper",
            choice(DINPUT_MAPPER_TYPES, mapper.min(DINPUT_MAPPER_TYPES.len() - 1)),
        ));
    }
    rows.push(Row::new(
        Controller,
        FieldKey::DisableMouseInput,
        "Disable mouse input",
        Control::Toggle(draft.disable_mouse_input),
    ));
    rows.push(Row::new(
        Controller,
        FieldKey::TouchscreenMode,
        "Touchscreen mode",
        Control::Toggle(draft.touchscreen_mode),
    ));
    rows.push(Row::new(
        Controller,
        FieldKey::EmulateKeyboardMouse,
        "Emulate keyboard & mouse",
        Control::Toggle(draft.emulate_keyboard_mouse),
    ));
    if draft.emulate_keyboard_mouse {
        for (index, button) in CONTROLLER_BUTTONS.iter().enumerate() {
            let bound = draft.controller_emulation_bindings.get(button);
            let selected = BINDING_VALUES.iter().position(|b| *b == bound).unwrap_or(0);
            rows.push(Row::new(
                Controller,
                FieldKey::Binding(index),
                format!("  {}", button),
                choice(BINDING_VALUES, selected),
            ));
        }
    }

    let cards: Vec<&str> = catalogs.gpu_cards.iter().map(|c| c.name.as_str()).collect();
    if !cards.is_empty() {
        rows.push(Row::new(Wine, FieldKey::GpuCard, "GPU name", choice(&cards, sel.gpu_card)));
    }
    rows.push(Row::new(
        Wine,
        FieldKey::RenderingMode,
        "Offscreen rendering",
        choice(RENDERING_MODES, sel.rendering_mode),
    ));
    rows.push(Row::new(
        Wine,
        FieldKey::VideoMemory,
        "Video memory",
        choice(VIDEO_MEMORY_SIZES, sel.video_memory),
    ));
    rows.push(Row::new(Wine, FieldKey::Csmt, "CSMT", Control::Toggle(draft.csmt)));
    rows.push(Row::new(
        Wine,
        FieldKey::StrictShaderMath,
        "Strict shader math",
        Control::Toggle(draft.strict_shader_math),
    ));
    rows.push(Row::new(
        Wine,
        FieldKey::MouseWarp,
        "Mouse warp override",
        choice(MOUSE_WARPS, sel.mouse_warp),
    ));

    for (index, (id, level)) in draft.wincomponents.iter().enumerate() {
        let level = (level as usize).min(WIN_COMPONENT_LEVELS.len() - 1);
        rows.push(Row::new(
            Components,
            FieldKey::WinComponent(index),
            win_component_title(id),
            choice(WIN_COMPONENT_LEVELS, level),
        ));
    }

    for (name, value) in draft.env_vars.iter() {
        rows.push(Row::new(
            Environment,
            FieldKey::EnvVar(name.to_string()),
            name,
            Control::Text(value.to_string()),
        ));
    }
    rows.push(Row::new(Environment, FieldKey::AddEnvVar, "+ Add variable", Control::Action));

    for drive in draft.drives.iter() {
        rows.push(Row::new(
            Drives,
            FieldKey::Drive(drive.letter),
            format!("{}:", drive.letter),
            Control::Label(drive.path.clone()),
        ));
    }
    if draft.drives.next_available_letter().is_some() {
        rows.push(Row::new(Drives, FieldKey::AddDrive, "+ Add drive", Control::Action));
    }

    rows.push(Row::new(
        Advanced,
        FieldKey::Box64Version,
        "Box64 version",
        choice(BOX64_VERSIONS, sel.box64_version),
    ));
    let presets: Vec<&str> = BOX64_PRESETS.iter().map(|p| p.name).collect();
    rows.push(Row::new(Advanced, FieldKey::Box64Preset, "Box64 preset", choice(&presets, sel.box64_preset)));
    rows.push(Row::new(
        Advanced,
        FieldKey::StartupSelection,
        "Startup selection",
        choice(STARTUP_SELECTIONS, sel.startup_selection),
    ));
    rows.push(Row::new(
        Advanced,
        FieldKey::CpuList,
        "Processor affinity",
        Control::Text(draft.cpu_list.to_string()),
    ));
    rows.push(Row::new(
        Advanced,
        FieldKey::CpuListWow64,
        "Processor affinity (32-bit)",
        Control::Text(draft.cpu_list_wow64.to_string()),
    ));

    rows
}
