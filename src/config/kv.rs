//! Ordered `key=value` sets serialised as `k1=v1,k2=v2`.

use std::fmt;

/// Ordered string map with the wire format used by driver, wrapper and
/// Windows component settings.
///
/// Parsing never fails: segments without `=` or with an empty key are
/// dropped, and a missing key reads back as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueSet {
    entries: Vec<(String, String)>,
}

impl KeyValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for segment in raw.split(',') {
            let Some((key, value)) = segment.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            set.put(key, value.trim());
        }
        set
    }

    /// Value for `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Value for `key`, or `fallback` when absent or empty.
    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        match self.get(key) {
            "" => fallback,
            value => value,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Replace the value in place, or append a new entry.
    pub fn put(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for KeyValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Implements `Serialize`/`Deserialize` through the type's string form.
///
/// The type must implement `Display` and provide an infallible
/// `fn parse(&str) -> Self`.
macro_rules! string_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(<$ty>::parse(&raw))
            }
        }
    };
}

pub(crate) use string_serde;

string_serde!(KeyValueSet);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_order() {
        let set = KeyValueSet::parse("version=2.4.1,framerate=0,async=0");
        let keys: Vec<_> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["version", "framerate", "async"]);
        assert_eq!(set.to_string(), "version=2.4.1,framerate=0,async=0");
    }

    #[test]
    fn malformed_segments_are_skipped() {
        let set = KeyValueSet::parse("novalue,=orphan,,ok=1");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("ok"), "1");
    }

    #[test]
    fn missing_key_reads_empty() {
        let set = KeyValueSet::parse("");
        assert!(set.is_empty());
        assert_eq!(set.get("version"), "");
        assert_eq!(set.get_or("version", "2.4.1"), "2.4.1");
    }

    #[test]
    fn put_replaces_in_place() {
        let mut set = KeyValueSet::parse("a=1,b=2");
        set.put("a", "3");
        set.put("c", "4");
        assert_eq!(set.to_string(), "a=3,b=2,c=4");
        assert!(set.remove("b"));
        assert!(!set.remove("b"));
        assert_eq!(set.to_string(), "a=3,c=4");
    }

    #[test]
    fn empty_value_falls_back() {
        let set = KeyValueSet::parse("vkd3dVersion=");
        assert!(set.contains("vkd3dVersion"));
        assert_eq!(set.get_or("vkd3dVersion", "2.14.1"), "2.14.1");
    }
}
