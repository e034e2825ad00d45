//! In-memory INI document.
//!
//! Sections keep their declaration order and so do keys inside a section.
//! Keys are case-insensitive (stored lower-case); section names are not.
//! The `DEFAULT` section is held apart: its keys are visible from every
//! other section unless that section overrides them.

use assetdesk_core::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;

use super::{parser, writer};

/// Name of the section whose keys act as defaults for every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Ordered key → value map of one section. `None` marks a key without value.
pub type Entries = IndexMap<String, Option<String>>;

/// A parsed INI file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IniDocument {
    defaults: Entries,
    sections: IndexMap<String, Entries>,
}

impl IniDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(defaults: Entries, sections: IndexMap<String, Entries>) -> Self {
        Self { defaults, sections }
    }

    /// Parse INI text.
    ///
    /// ```
    /// use assetdesk_content::ini::IniDocument;
    ///
    /// let doc = IniDocument::parse("[Server]\nPort = 8080\n").unwrap();
    /// assert_eq!(doc.get("Server", "port").unwrap(), Some("8080"));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse(text)
    }

    /// Serialize to INI text. Comments and original spacing are not kept.
    pub fn to_ini_string(&self) -> String {
        writer::write(self)
    }

    /// Section names in declaration order, excluding `DEFAULT`.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Number of sections, excluding `DEFAULT`.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns whether the named section exists. Always false for `DEFAULT`.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Keys of the `DEFAULT` section.
    pub fn defaults(&self) -> &Entries {
        &self.defaults
    }

    /// Keys declared directly in a section (no defaults).
    pub fn own_entries(&self, section: &str) -> Option<&Entries> {
        if section == DEFAULT_SECTION {
            return Some(&self.defaults);
        }
        self.sections.get(section)
    }

    /// Add an empty section.
    pub fn add_section(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::invalid("Section name must not be empty"));
        }
        if name == DEFAULT_SECTION {
            return Err(Error::invalid(format!(
                "'{DEFAULT_SECTION}' is reserved and cannot be added"
            )));
        }
        if name.contains(['\n', '\r']) {
            return Err(Error::invalid("Section name must be a single line"));
        }
        if self.sections.contains_key(name) {
            return Err(Error::DuplicateSection(name.to_string()));
        }
        self.sections.insert(name.to_string(), Entries::new());
        Ok(())
    }

    /// Remove a section. Returns whether it existed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        self.sections.shift_remove(name).is_some()
    }

    /// Keys visible from a section: its own keys, then defaults it does not override.
    pub fn keys(&self, section: &str) -> Result<Vec<&str>> {
        let own = self
            .own_entries(section)
            .ok_or_else(|| Error::NoSection(section.to_string()))?;

        let mut keys: Vec<&str> = own.keys().map(String::as_str).collect();
        if section != DEFAULT_SECTION {
            keys.extend(
                self.defaults
                    .keys()
                    .filter(|k| !own.contains_key(*k))
                    .map(String::as_str),
            );
        }
        Ok(keys)
    }

    /// Look up a value, falling back to `DEFAULT`.
    ///
    /// Returns `Ok(None)` for a key declared without a value.
    pub fn get(&self, section: &str, key: &str) -> Result<Option<&str>> {
        let own = self
            .own_entries(section)
            .ok_or_else(|| Error::NoSection(section.to_string()))?;
        let key = normalize_key(key);

        own.get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(Option::as_deref)
            .ok_or_else(|| Error::NoKey {
                section: section.to_string(),
                key,
            })
    }

    /// Set a value, creating the key if needed. `None` writes a bare key.
    pub fn set(&mut self, section: &str, key: &str, value: Option<String>) -> Result<()> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(Error::invalid("Key must not be empty"));
        }
        if key.contains(['=', ':', '\n', '\r'])
            || key.starts_with('[')
            || key.starts_with(parser::COMMENT_PREFIXES)
        {
            return Err(Error::invalid(format!("Key '{key}' cannot be written to INI")));
        }

        let entries = if section == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections
                .get_mut(section)
                .ok_or_else(|| Error::NoSection(section.to_string()))?
        };
        entries.insert(key, value);
        Ok(())
    }

    /// Remove a key from a section. Returns whether it existed there.
    pub fn remove_key(&mut self, section: &str, key: &str) -> Result<bool> {
        let key = normalize_key(key);
        let entries = if section == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections
                .get_mut(section)
                .ok_or_else(|| Error::NoSection(section.to_string()))?
        };
        Ok(entries.shift_remove(&key).is_some())
    }
}

/// Keys are compared case-insensitively.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// One-line preview of a value for listings.
///
/// Takes the first line and, when it is longer than `width` characters,
/// cuts it to `width - 3` characters followed by `...`.
///
/// ```
/// use assetdesk_content::ini::value_preview;
///
/// assert_eq!(value_preview("first\nsecond", 200), "first");
/// assert_eq!(value_preview("abcdefgh", 6), "abc...");
/// ```
pub fn value_preview(value: &str, width: usize) -> String {
    let first = value.lines().next().unwrap_or("");
    if first.chars().count() <= width {
        return first.to_string();
    }
    let mut preview: String = first.chars().take(width.saturating_sub(3)).collect();
    preview.push_str("...");
    preview
}
