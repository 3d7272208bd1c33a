//! Choice catalogues offered by the editor.
//!
//! Every list the editor can pick from lives here: graphics drivers and
//! their per-family version lists, DX wrappers, DXVK/VKD3D versions, audio
//! drivers, screen sizes, Box64 presets and so on. Entries carry a display
//! label and the identifier that gets stored in the container record.

use crate::gpu::{GpuCard, GpuInfo};

/// Default component versions used when a record leaves a version empty.
pub mod defaults {
    pub const BOX64: &str = "0.3.6";
    pub const DXVK: &str = "2.6.1-gplasync";
    pub const VKD3D: &str = "2.14.1";
    pub const VKD3D_VORTEK: &str = "2.6";
    pub const VKD3D_FEATURE_LEVEL: &str = "12_1";
    pub const DXVK_FORCED: &str = "2.4.1";
    pub const DXVK_FORCED_VORTEK: &str = "1.10.3";
    pub const TURNIP: &str = "25.2.0";
    pub const ZINK: &str = "22.2.5";
    pub const VIRGL: &str = "23.1.9";
    pub const VORTEK: &str = "2.1-22.2.5";
    pub const ADRENO: &str = "819.2";
    pub const SD8ELITE: &str = "800.51";
    pub const LANGUAGE: &str = "english";
}

pub const GRAPHICS_DRIVERS: &[&str] = &[
    "Vortek (Universal)",
    "Turnip (Adreno)",
    "Adreno (Adreno 6xx/7xx)",
    "SD 8 Elite (Adreno 8xx)",
    "VirGL (Universal)",
    "Zink (Universal)",
];

pub const DX_WRAPPERS: &[&str] = &["WineD3D", "DXVK", "VKD3D", "CNC DDraw"];

pub const DXVK_VERSIONS: &[&str] = &[
    "1.9.2",
    "1.10.3",
    "1.10.9-sarek",
    "2.3.1",
    "2.4.1",
    "2.6.1-gplasync",
    "async-1.10.3",
];

/// DXVK builds that still run on drivers without Vulkan 1.3.
pub const DXVK_VERSIONS_REDUCED: &[&str] = &["1.10.3", "1.10.9-sarek", "1.9.2", "async-1.10.3"];

pub const VKD3D_VERSIONS: &[&str] = &["2.6", "2.8", "2.12", "2.13", "2.14.1"];

pub const VKD3D_FEATURE_LEVELS: &[&str] = &["12_2", "12_1", "12_0", "11_1", "11_0"];

pub const TURNIP_VERSIONS: &[&str] = &["25.2.0", "25.1.0", "25.0.0", "24.3.0"];
pub const VIRGL_VERSIONS: &[&str] = &["23.1.9"];
pub const ZINK_VERSIONS: &[&str] = &["22.2.5"];
pub const VORTEK_VERSIONS: &[&str] = &["2.1-22.2.5", "2.0-22.2.5"];
pub const ADRENO_VERSIONS: &[&str] = &["819.2", "805", "762.10"];
pub const SD8ELITE_VERSIONS: &[&str] = &["800.51", "800.37"];

pub const AUDIO_DRIVERS: &[&str] = &["ALSA", "PulseAudio"];

/// Index 0 is the custom entry; the rest are `WxH (aspect)` labels.
pub const SCREEN_SIZES: &[&str] = &[
    "Custom",
    "640x480 (4:3)",
    "800x600 (4:3)",
    "1024x768 (4:3)",
    "1280x720 (16:9)",
    "1280x800 (16:10)",
    "1366x768 (16:9)",
    "1600x900 (16:9)",
    "1920x1080 (16:9)",
];

pub const RENDERING_MODES: &[&str] = &["FBO", "Backbuffer"];

pub const VIDEO_MEMORY_SIZES: &[&str] = &[
    "32 MB", "64 MB", "128 MB", "256 MB", "512 MB", "1024 MB", "2048 MB", "4096 MB", "6144 MB",
    "8192 MB", "10240 MB", "12288 MB",
];

pub const MOUSE_WARPS: &[&str] = &["Disable", "Enable", "Force"];

pub const WIN_COMPONENT_LEVELS: &[&str] = &["Builtin (Wine)", "Native (Windows)"];

pub const BOX64_VERSIONS: &[&str] = &["0.3.2", "0.3.4", "0.3.6", "0.3.7"];

pub const STARTUP_SELECTIONS: &[&str] = &[
    "Normal (Load all services)",
    "Essential (Load only essential services)",
    "Aggressive (Stop services on startup)",
];

pub const STEAM_TYPES: &[(&str, &str)] = &[
    ("normal", "Normal"),
    ("light", "Light"),
    ("ultralight", "Ultra Light"),
];

pub const DINPUT_MAPPER_TYPES: &[&str] = &["Standard", "XInput Mapper"];

pub const VK_MAX_VERSIONS: &[&str] = &["1.0", "1.1", "1.2", "1.3"];
pub const IMAGE_CACHE_SIZES: &[&str] = &["64", "128", "256", "512", "1024"];
pub const MAX_DEVICE_MEMORY: &[&str] = &["0", "512", "1024", "2048", "4096"];

pub const LANGUAGES: &[&str] = &[
    "arabic",
    "bulgarian",
    "schinese",
    "tchinese",
    "czech",
    "danish",
    "dutch",
    "english",
    "finnish",
    "french",
    "german",
    "greek",
    "hungarian",
    "italian",
    "japanese",
    "koreana",
    "norwegian",
    "polish",
    "portuguese",
    "brazilian",
    "romanian",
    "russian",
    "spanish",
    "latam",
    "swedish",
    "thai",
    "turkish",
    "ukrainian",
    "vietnamese",
];

/// Display name for a Steam language code.
pub fn language_label(code: &str) -> String {
    match code {
        "schinese" => "Simplified Chinese".to_string(),
        "tchinese" => "Traditional Chinese".to_string(),
        "koreana" => "Korean".to_string(),
        "latam" => "Spanish (Latin America)".to_string(),
        "brazilian" => "Portuguese (Brazil)".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Turn a display label into a stored identifier.
///
/// Lowercases, drops parenthesised annotations together with the spaces in
/// front of them, and joins the remaining words with dashes:
/// `"SD 8 Elite (Adreno 8xx)"` becomes `"sd-8-elite"`.
pub fn parse_identifier(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut stripped = String::with_capacity(lower.len());
    let mut depth = 0usize;
    for ch in lower.chars() {
        match ch {
            '(' => {
                depth += 1;
                while stripped.ends_with(' ') {
                    stripped.pop();
                }
            }
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => stripped.push(ch),
            _ => {}
        }
    }
    stripped.replace(" - ", "-").replace(' ', "-")
}

/// Keep only the ASCII digits of a label (`"2048 MB"` -> `"2048"`).
pub fn parse_number(label: &str) -> String {
    label.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Graphics driver families with their own version catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverFamily {
    Turnip,
    Virgl,
    Vortek,
    Adreno,
    Sd8Elite,
    /// Zink and anything unrecognised, including custom drivers.
    Zink,
}

impl DriverFamily {
    pub fn from_id(id: &str) -> Self {
        match id {
            "turnip" => Self::Turnip,
            "virgl" => Self::Virgl,
            "vortek" => Self::Vortek,
            "adreno" => Self::Adreno,
            "sd-8-elite" => Self::Sd8Elite,
            _ => Self::Zink,
        }
    }

    /// Vortek, Adreno and SD 8 Elite share capability limits and forced
    /// wrapper versions.
    pub fn is_vortek_like(&self) -> bool {
        matches!(self, Self::Vortek | Self::Adreno | Self::Sd8Elite)
    }

    pub fn versions(&self) -> &'static [&'static str] {
        match self {
            Self::Turnip => TURNIP_VERSIONS,
            Self::Virgl => VIRGL_VERSIONS,
            Self::Vortek => VORTEK_VERSIONS,
            Self::Adreno => ADRENO_VERSIONS,
            Self::Sd8Elite => SD8ELITE_VERSIONS,
            Self::Zink => ZINK_VERSIONS,
        }
    }

    /// DXVK version pinned while VKD3D is the active wrapper.
    pub fn forced_dxvk_version(&self) -> &'static str {
        if self.is_vortek_like() {
            defaults::DXVK_FORCED_VORTEK
        } else {
            defaults::DXVK_FORCED
        }
    }

    /// VKD3D version applied when a record selects VKD3D without one.
    pub fn forced_vkd3d_version(&self) -> &'static str {
        if self.is_vortek_like() {
            defaults::VKD3D_VORTEK
        } else {
            defaults::VKD3D
        }
    }
}

/// A selectable entry: what the user sees and what the record stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub label: String,
    pub id: String,
}

impl CatalogEntry {
    pub fn from_label(label: &str) -> Self {
        Self {
            label: label.to_string(),
            id: parse_identifier(label),
        }
    }

    /// User-installed driver: the directory name is the identifier.
    pub fn custom_driver(id: &str) -> Self {
        Self {
            label: format!("{} (Custom)", id),
            id: id.to_string(),
        }
    }
}

/// A Box64 tuning preset and the environment it injects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Box64Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub env_vars: &'static [(&'static str, &'static str)],
}

pub const BOX64_PRESETS: &[Box64Preset] = &[
    Box64Preset {
        id: "STABILITY",
        name: "Stability",
        env_vars: &[
            ("BOX64_DYNAREC_SAFEFLAGS", "2"),
            ("BOX64_DYNAREC_FASTNAN", "0"),
            ("BOX64_DYNAREC_FASTROUND", "0"),
            ("BOX64_DYNAREC_X87DOUBLE", "1"),
            ("BOX64_DYNAREC_BIGBLOCK", "0"),
            ("BOX64_DYNAREC_STRONGMEM", "2"),
            ("BOX64_DYNAREC_FORWARD", "128"),
            ("BOX64_DYNAREC_CALLRET", "0"),
            ("BOX64_DYNAREC_WAIT", "0"),
        ],
    },
    Box64Preset {
        id: "COMPATIBILITY",
        name: "Compatibility",
        env_vars: &[
            ("BOX64_DYNAREC_SAFEFLAGS", "2"),
            ("BOX64_DYNAREC_FASTNAN", "0"),
            ("BOX64_DYNAREC_FASTROUND", "0"),
            ("BOX64_DYNAREC_X87DOUBLE", "1"),
            ("BOX64_DYNAREC_BIGBLOCK", "0"),
            ("BOX64_DYNAREC_STRONGMEM", "1"),
            ("BOX64_DYNAREC_FORWARD", "128"),
            ("BOX64_DYNAREC_CALLRET", "0"),
            ("BOX64_DYNAREC_WAIT", "1"),
        ],
    },
    Box64Preset {
        id: "INTERMEDIATE",
        name: "Intermediate",
        env_vars: &[
            ("BOX64_DYNAREC_SAFEFLAGS", "2"),
            ("BOX64_DYNAREC_FASTNAN", "1"),
            ("BOX64_DYNAREC_FASTROUND", "0"),
            ("BOX64_DYNAREC_X87DOUBLE", "1"),
            ("BOX64_DYNAREC_BIGBLOCK", "1"),
            ("BOX64_DYNAREC_STRONGMEM", "0"),
            ("BOX64_DYNAREC_FORWARD", "128"),
            ("BOX64_DYNAREC_CALLRET", "0"),
            ("BOX64_DYNAREC_WAIT", "1"),
        ],
    },
    Box64Preset {
        id: "PERFORMANCE",
        name: "Performance",
        env_vars: &[
            ("BOX64_DYNAREC_SAFEFLAGS", "1"),
            ("BOX64_DYNAREC_FASTNAN", "1"),
            ("BOX64_DYNAREC_FASTROUND", "1"),
            ("BOX64_DYNAREC_X87DOUBLE", "0"),
            ("BOX64_DYNAREC_BIGBLOCK", "3"),
            ("BOX64_DYNAREC_STRONGMEM", "0"),
            ("BOX64_DYNAREC_FORWARD", "512"),
            ("BOX64_DYNAREC_CALLRET", "1"),
            ("BOX64_DYNAREC_WAIT", "1"),
        ],
    },
];

pub fn box64_preset(id: &str) -> Option<&'static Box64Preset> {
    BOX64_PRESETS.iter().find(|preset| preset.id == id)
}

/// All choice lists for one editor session.
///
/// Static lists come from the constants above; the graphics driver list is
/// extended with installed custom drivers, and GPU cards and device
/// extensions come from the [`GpuInfo`] provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogs {
    pub graphics_drivers: Vec<CatalogEntry>,
    pub dx_wrappers: Vec<CatalogEntry>,
    pub audio_drivers: Vec<CatalogEntry>,
    pub gpu_cards: Vec<GpuCard>,
    pub device_extensions: Vec<String>,
}

impl Catalogs {
    pub fn builtin() -> Self {
        Self {
            graphics_drivers: GRAPHICS_DRIVERS
                .iter()
                .map(|label| CatalogEntry::from_label(label))
                .collect(),
            dx_wrappers: DX_WRAPPERS
                .iter()
                .map(|label| CatalogEntry::from_label(label))
                .collect(),
            audio_drivers: AUDIO_DRIVERS
                .iter()
                .map(|label| CatalogEntry::from_label(label))
                .collect(),
            gpu_cards: Vec::new(),
            device_extensions: Vec::new(),
        }
    }

    /// Builtin lists plus GPU data from `gpu`.
    pub fn with_gpu(gpu: &dyn GpuInfo) -> Self {
        let mut catalogs = Self::builtin();
        catalogs.gpu_cards = gpu.cards();
        catalogs.device_extensions = gpu.device_extensions();
        catalogs
    }

    /// Append installed custom drivers after the builtin ones.
    pub fn with_custom_drivers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            let id = id.as_ref();
            if self.graphics_drivers.iter().any(|entry| entry.id == id) {
                continue;
            }
            self.graphics_drivers.push(CatalogEntry::custom_driver(id));
        }
        self
    }

    pub fn graphics_driver_index(&self, id: &str) -> Option<usize> {
        self.graphics_drivers.iter().position(|entry| entry.id == id)
    }

    pub fn dx_wrapper_index(&self, id: &str) -> Option<usize> {
        self.dx_wrappers.iter().position(|entry| entry.id == id)
    }

    pub fn audio_driver_index(&self, id: &str) -> Option<usize> {
        self.audio_drivers.iter().position(|entry| entry.id == id)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::builtin()
    }
}
