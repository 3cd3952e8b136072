//! Core types for the boot integrity checker.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::path::Path;
use std::str::FromStr;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 digest. Always exactly 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashDigest(String);

impl HashDigest {
    /// Encode raw digest bytes, most significant byte first.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        HashDigest(hex::encode(bytes))
    }

    /// Accept a stored digest only if it is 64 lowercase hex characters.
    pub fn parse(s: &str) -> Option<Self> {
        let well_formed = s.len() == DIGEST_HEX_LEN
            && s.bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| HashDigest(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Artifact category. Variant order matches the lexical order of the tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Boot,
    Efi,
    Mbr,
}

impl Category {
    pub fn tag(self) -> &'static str {
        match self {
            Category::Boot => "BOOT",
            Category::Efi => "EFI",
            Category::Mbr => "MBR",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOT" => Ok(Category::Boot),
            "EFI" => Ok(Category::Efi),
            "MBR" => Ok(Category::Mbr),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// ComponentKey: `<category>:<path>`
///
/// Identity is purely lexical. Two keys are equal iff category and path string are equal,
/// and ordering matches the ordering of the rendered string. Keys built from filesystem
/// paths go through [`encode_path`], so distinct paths always give distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentKey {
    pub category: Category,
    pub path: String,
}

impl ComponentKey {
    pub fn new(category: Category, path: impl Into<String>) -> Self {
        Self {
            category,
            path: path.into(),
        }
    }

    /// Key for an on-disk artifact.
    pub fn from_path(category: Category, path: &Path) -> Self {
        Self::new(category, encode_path(path))
    }
}

/// Render a path as key text without losing bytes.
///
/// Valid UTF-8 is kept as is except that `\` is doubled. Bytes that are not UTF-8 become
/// `\xHH`. The mapping is injective: a literal `\xFE` in a name renders as `\\xFE`.
pub fn encode_path(path: &Path) -> String {
    let mut bytes = path.as_os_str().as_encoded_bytes();
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                push_escaped(&mut out, valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                push_escaped(&mut out, std::str::from_utf8(valid).unwrap_or_default());
                let invalid = e.error_len().unwrap_or(rest.len());
                for byte in &rest[..invalid] {
                    let _ = write!(out, "\\x{:02X}", byte);
                }
                bytes = &rest[invalid..];
            }
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '\\' {
            out.push_str("\\\\");
        } else {
            out.push(c);
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.path)
    }
}

impl FromStr for ComponentKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, path) = s
            .split_once(':')
            .ok_or_else(|| format!("Missing category separator in key: {}", s))?;
        if path.is_empty() {
            return Err(format!("Empty path in key: {}", s));
        }
        Ok(ComponentKey::new(tag.parse()?, path))
    }
}

impl Serialize for ComponentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ComponentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Snapshot: ComponentKey -> HashDigest
///
/// Either the recorded baseline or the current state of the boot surface. Backed by a
/// `BTreeMap` so iteration is always in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<ComponentKey, HashDigest>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous digest for the key if any.
    pub fn insert(&mut self, key: ComponentKey, digest: HashDigest) -> Option<HashDigest> {
        self.entries.insert(key, digest)
    }

    pub fn get(&self, key: &ComponentKey) -> Option<&HashDigest> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &ComponentKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentKey, &HashDigest)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ComponentKey> {
        self.entries.keys()
    }
}

impl FromIterator<(ComponentKey, HashDigest)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (ComponentKey, HashDigest)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Firmware boot model. Derived at scan time, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootMode {
    #[serde(rename = "UEFI")]
    Uefi,
    #[serde(rename = "BIOS")]
    Bios,
}

impl fmt::Display for BootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootMode::Uefi => f.write_str("UEFI"),
            BootMode::Bios => f.write_str("BIOS"),
        }
    }
}
