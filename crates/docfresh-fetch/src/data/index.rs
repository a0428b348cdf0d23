use std::collections::HashMap;

use crate::core::parse_index;

/// Mapping from content fingerprint to the location of a newer version.
///
/// Keys are matched exactly. Values are opaque until a download
/// dereferences them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: HashMap<String, String>,
}

impl Index {
    /// Parse a `key=value` payload delimited by newlines and/or commas.
    pub fn parse(payload: &str) -> Self { parse_index(payload) }

    pub fn get(&self, fingerprint: &str) -> Option<&str> {
        self.entries.get(fingerprint).map(String::as_str)
    }

    pub fn contains(&self, fingerprint: &str) -> bool { self.entries.contains_key(fingerprint) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Index {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
