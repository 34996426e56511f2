//! Namespace Keys
//!
//! A namespace is addressed by a `group` and a `kind`. The store keys its
//! tables by a single string, `group/kind`. A key without a separator
//! decodes to an empty group.

/// Separator between group and kind in an encoded key
pub const SEPARATOR: char = '/';

/// Join a group and a kind into a namespace key
pub fn encode(group: &str, kind: &str) -> String {
    let mut key = String::with_capacity(group.len() + kind.len() + 1);
    key.push_str(group);
    key.push(SEPARATOR);
    key.push_str(kind);
    key
}

/// Split a namespace key into `(group, kind)`
///
/// Splits at the first separator only. Parts containing the separator
/// therefore do not round-trip.
pub fn decode(key: &str) -> (String, String) {
    match key.split_once(SEPARATOR) {
        Some((group, kind)) => (group.to_string(), kind.to_string()),
        None => (String::new(), key.to_string()),
    }
}

/// Decoded namespace identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Namespace {
    pub group: String,
    pub kind: String,
}

impl Namespace {
    pub fn from_key(key: &str) -> Self {
        let (group, kind) = decode(key);
        Self { group, kind }
    }

    /// Encoded store key
    pub fn key(&self) -> String {
        encode(&self.group, &self.kind)
    }

    pub fn has_group(&self) -> bool {
        !self.group.is_empty()
    }
}
