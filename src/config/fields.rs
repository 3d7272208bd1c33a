//! Record fields with their own string encodings: Windows components,
//! drive mappings, CPU affinity lists and controller bindings.

use std::collections::BTreeMap;
use std::fmt;

use super::kv::{string_serde, KeyValueSet};

/// Windows component override levels (`direct3d=1,directsound=0,...`).
///
/// Level 0 uses Wine's builtin implementation, 1 the native Windows one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinComponents {
    raw: KeyValueSet,
}

pub const DEFAULT_WIN_COMPONENTS: &str =
    "direct3d=1,directsound=1,directmusic=1,directplay=1,directshow=1,directx=1,vcrun2010=1,wmdecoder=1";

impl WinComponents {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: KeyValueSet::parse(raw),
        }
    }

    /// Components in stored order with their level (unparseable levels read as 0).
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.raw
            .iter()
            .map(|(id, level)| (id, level.parse().unwrap_or(0)))
    }

    pub fn level(&self, id: &str) -> Option<u8> {
        self.iter().find(|(c, _)| *c == id).map(|(_, level)| level)
    }

    pub fn set_level(&mut self, id: &str, level: u8) {
        self.raw.put(id, &level.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Display for WinComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

string_serde!(WinComponents);

/// Display title for a component id.
pub fn win_component_title(id: &str) -> &str {
    match id {
        "direct3d" => "Direct3D",
        "directsound" => "DirectSound",
        "directmusic" => "DirectMusic",
        "directplay" => "DirectPlay",
        "directshow" => "DirectShow",
        "directx" => "DirectX",
        "vcrun2010" => "Visual C++ 2010",
        "wmdecoder" => "Windows Media Decoder",
        other => other,
    }
}

/// One drive letter mapped to a host path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveMapping {
    pub letter: char,
    pub path: String,
}

/// Drive mappings, serialised back to back: `D:/sdcard/DownloadE:/mnt/games`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drives {
    drives: Vec<DriveMapping>,
}

/// C: is the prefix and Z: the host root; neither is user-assignable.
const FIRST_DRIVE: u8 = b'D';
const LAST_DRIVE: u8 = b'Y';

impl Drives {
    pub fn parse(raw: &str) -> Self {
        let bytes = raw.as_bytes();
        let mut starts = Vec::new();
        let mut i = 0;
        while i + 1 < bytes.len() {
            let at_boundary = i == 0 || bytes[i - 1] != b':';
            if bytes[i].is_ascii_uppercase() && bytes[i + 1] == b':' && at_boundary {
                starts.push(i);
                i += 2;
            } else {
                i += 1;
            }
        }

        let mut drives = Vec::new();
        for (n, &start) in starts.iter().enumerate() {
            let end = starts.get(n + 1).copied().unwrap_or(raw.len());
            let path = &raw[start + 2..end];
            if path.is_empty() {
                continue;
            }
            drives.push(DriveMapping {
                letter: bytes[start] as char,
                path: path.to_string(),
            });
        }
        Self { drives }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DriveMapping> {
        self.drives.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.drives.is_empty()
    }

    pub fn next_available_letter(&self) -> Option<char> {
        (FIRST_DRIVE..=LAST_DRIVE)
            .map(char::from)
            .find(|letter| !self.drives.iter().any(|d| d.letter == *letter))
    }

    /// Map `path` to the next free letter. Returns the letter used.
    pub fn add(&mut self, path: &str) -> Option<char> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        let letter = self.next_available_letter()?;
        self.drives.push(DriveMapping {
            letter,
            path: path.to_string(),
        });
        Some(letter)
    }

    pub fn remove(&mut self, letter: char) -> bool {
        let before = self.drives.len();
        self.drives.retain(|d| d.letter != letter);
        self.drives.len() != before
    }
}

impl fmt::Display for Drives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for drive in &self.drives {
            write!(f, "{}:{}", drive.letter, drive.path)?;
        }
        Ok(())
    }
}

string_serde!(Drives);

/// CPU affinity list (`0,1,2,3`), sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuList {
    cpus: Vec<u32>,
}

impl CpuList {
    pub fn all(count: usize) -> Self {
        Self {
            cpus: (0..count.max(1) as u32).collect(),
        }
    }

    pub fn parse(raw: &str) -> Self {
        let mut cpus: Vec<u32> = raw
            .split(',')
            .filter_map(|token| token.trim().parse().ok())
            .collect();
        cpus.sort_unstable();
        cpus.dedup();
        Self { cpus }
    }

    /// Parse user input, dropping CPUs the host does not have.
    /// Returns `None` when nothing valid remains.
    pub fn parse_for_host(raw: &str, cpu_count: usize) -> Option<Self> {
        let mut list = Self::parse(raw);
        list.cpus.retain(|cpu| (*cpu as usize) < cpu_count);
        if list.cpus.is_empty() {
            None
        } else {
            Some(list)
        }
    }

    pub fn contains(&self, cpu: u32) -> bool {
        self.cpus.binary_search(&cpu).is_ok()
    }

    pub fn len(&self) -> usize {
        self.cpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpus.is_empty()
    }
}

impl fmt::Display for CpuList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cpu) in self.cpus.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", cpu)?;
        }
        Ok(())
    }
}

string_serde!(CpuList);

/// Controller buttons in the order the editor lists them.
pub const CONTROLLER_BUTTONS: &[&str] = &[
    "A", "B", "X", "Y", "L1", "L2", "L3", "R1", "R2", "R3", "DPAD_UP", "DPAD_DOWN", "DPAD_LEFT",
    "DPAD_RIGHT", "START", "SELECT",
];

/// Keyboard then mouse bindings a button can emulate.
pub const BINDING_VALUES: &[&str] = &[
    "NONE",
    "KEY_SPACE",
    "KEY_ENTER",
    "KEY_ESC",
    "KEY_TAB",
    "KEY_BKSP",
    "KEY_SHIFT_L",
    "KEY_SHIFT_R",
    "KEY_CTRL_L",
    "KEY_CTRL_R",
    "KEY_ALT_L",
    "KEY_UP",
    "KEY_DOWN",
    "KEY_LEFT",
    "KEY_RIGHT",
    "KEY_W",
    "KEY_A",
    "KEY_S",
    "KEY_D",
    "KEY_Q",
    "KEY_E",
    "KEY_R",
    "KEY_F",
    "KEY_1",
    "KEY_2",
    "KEY_3",
    "KEY_4",
    "MOUSE_LEFT_BUTTON",
    "MOUSE_MIDDLE_BUTTON",
    "MOUSE_RIGHT_BUTTON",
    "MOUSE_WHEEL_UP",
    "MOUSE_WHEEL_DOWN",
];

const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    ("L2", "MOUSE_LEFT_BUTTON"),
    ("R2", "MOUSE_RIGHT_BUTTON"),
    ("A", "KEY_SPACE"),
    ("B", "KEY_Q"),
    ("X", "KEY_E"),
    ("Y", "KEY_TAB"),
    ("SELECT", "KEY_ESC"),
    ("L1", "KEY_SHIFT_L"),
    ("L3", "NONE"),
    ("R1", "KEY_CTRL_R"),
    ("R3", "NONE"),
    ("DPAD_UP", "KEY_UP"),
    ("DPAD_DOWN", "KEY_DOWN"),
    ("DPAD_LEFT", "KEY_LEFT"),
    ("DPAD_RIGHT", "KEY_RIGHT"),
    ("START", "KEY_ENTER"),
];

/// Controller-to-keyboard/mouse bindings, stored as a JSON object string.
///
/// Unparseable JSON reads as an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonBindings {
    map: BTreeMap<String, String>,
}

impl ButtonBindings {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<BTreeMap<String, String>>(raw) {
            Ok(map) => Self { map },
            Err(err) => {
                tracing::debug!("Ignoring unreadable controller bindings: {}", err);
                Self::default()
            }
        }
    }

    pub fn defaults() -> Self {
        Self {
            map: DEFAULT_BINDINGS
                .iter()
                .map(|(button, binding)| (button.to_string(), binding.to_string()))
                .collect(),
        }
    }

    /// Binding for `button`, `NONE` when unset.
    pub fn get(&self, button: &str) -> &str {
        self.map.get(button).map(String::as_str).unwrap_or("NONE")
    }

    pub fn set(&mut self, button: &str, binding: &str) {
        self.map.insert(button.to_string(), binding.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Display for ButtonBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.map.is_empty() {
            return Ok(());
        }
        let json = serde_json::to_string(&self.map).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

string_serde!(ButtonBindings);
