//! Container environment variables, serialised as `K1=V1 K2=V2`.

use std::fmt;

use super::kv::string_serde;

/// Ordered environment variable set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: Vec<(String, String)>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Self {
        let mut vars = Self::new();
        for token in raw.split_whitespace() {
            if let Some((name, value)) = token.split_once('=') {
                if !name.is_empty() {
                    vars.put(name, value);
                }
            }
        }
        vars
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a variable. Whitespace is not representable in the wire format,
    /// so it is stripped from both name and value.
    pub fn put(&mut self, name: &str, value: &str) {
        let name: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        let value: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if name.is_empty() {
            return;
        }
        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.vars.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.vars.len();
        self.vars.retain(|(n, _)| n != name);
        self.vars.len() != before
    }

    /// Overlay `other` on top of `self`; `other` wins on conflicts.
    pub fn extend_from(&mut self, other: &EnvVars) {
        for (name, value) in other.iter() {
            self.put(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl fmt::Display for EnvVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.vars.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

string_serde!(EnvVars);

/// How the editor offers values for a well-known variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvVarKind {
    /// `0`/`1` style switch, listed as (off, on).
    Toggle(&'static str, &'static str),
    /// One value out of a fixed list.
    Choice(&'static [&'static str]),
    /// Free text.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownEnvVar {
    pub name: &'static str,
    pub kind: EnvVarKind,
}

pub const KNOWN_ENV_VARS: &[KnownEnvVar] = &[
    KnownEnvVar {
        name: "ZINK_DESCRIPTORS",
        kind: EnvVarKind::Choice(&["auto", "lazy", "cached", "notemplates"]),
    },
    KnownEnvVar {
        name: "ZINK_DEBUG",
        kind: EnvVarKind::Choice(&["compact", "nir", "spirv", "tgsi", "validation", "sync", "noreorder"]),
    },
    KnownEnvVar {
        name: "MESA_SHADER_CACHE_DISABLE",
        kind: EnvVarKind::Toggle("false", "true"),
    },
    KnownEnvVar {
        name: "MESA_SHADER_CACHE_MAX_SIZE",
        kind: EnvVarKind::Text,
    },
    KnownEnvVar {
        name: "mesa_glthread",
        kind: EnvVarKind::Toggle("false", "true"),
    },
    KnownEnvVar {
        name: "WINEESYNC",
        kind: EnvVarKind::Toggle("0", "1"),
    },
    KnownEnvVar {
        name: "MESA_VK_WSI_PRESENT_MODE",
        kind: EnvVarKind::Choice(&["immediate", "mailbox", "fifo", "relaxed"]),
    },
    KnownEnvVar {
        name: "TU_DEBUG",
        kind: EnvVarKind::Choice(&["noconform", "sysmem", "gmem", "nobin", "flushall", "syncdraw"]),
    },
    KnownEnvVar {
        name: "DXVK_HUD",
        kind: EnvVarKind::Choice(&["0", "fps", "devinfo,fps", "full"]),
    },
    KnownEnvVar {
        name: "DXVK_ASYNC",
        kind: EnvVarKind::Toggle("0", "1"),
    },
    KnownEnvVar {
        name: "MESA_EXTENSION_MAX_YEAR",
        kind: EnvVarKind::Text,
    },
    KnownEnvVar {
        name: "PULSE_LATENCY_MSEC",
        kind: EnvVarKind::Text,
    },
];

pub fn known_env_var(name: &str) -> Option<&'static KnownEnvVar> {
    KNOWN_ENV_VARS.iter().find(|known| known.name == name)
}

impl KnownEnvVar {
    /// Value offered after `current` when cycling, if the kind has a list.
    pub fn cycle(&self, current: &str, forward: bool) -> Option<&'static str> {
        let options: Vec<&'static str> = match self.kind {
            EnvVarKind::Toggle(off, on) => vec![off, on],
            EnvVarKind::Choice(values) => values.to_vec(),
            EnvVarKind::Text => return None,
        };
        let len = options.len();
        let next = match options.iter().position(|v| *v == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        options.get(next).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let vars = EnvVars::parse("ZINK_DESCRIPTORS=lazy  WINEESYNC=1 broken =x");
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("WINEESYNC"), Some("1"));
        assert_eq!(vars.to_string(), "ZINK_DESCRIPTORS=lazy WINEESYNC=1");
    }

    #[test]
    fn put_strips_whitespace_and_replaces() {
        let mut vars = EnvVars::new();
        vars.put("DXVK_HUD", "devinfo, fps");
        vars.put("DXVK_HUD", "fps");
        assert_eq!(vars.to_string(), "DXVK_HUD=fps");
        vars.put("  ", "ignored");
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn extend_from_overrides() {
        let mut base = EnvVars::parse("A=1 B=2");
        base.extend_from(&EnvVars::parse("B=3 C=4"));
        assert_eq!(base.to_string(), "A=1 B=3 C=4");
    }

    #[test]
    fn known_toggle_cycles() {
        let known = known_env_var("WINEESYNC").unwrap();
        assert_eq!(known.cycle("1", true), Some("0"));
        assert_eq!(known.cycle("0", true), Some("1"));
        assert_eq!(known_env_var("PULSE_LATENCY_MSEC").unwrap().cycle("60", true), None);
    }
}
