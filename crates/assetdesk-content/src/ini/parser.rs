//! INI parser.
//!
//! Follows the dialect most asset tools emit:
//!
//! - `#` and `;` start full-line comments; inline comments are not recognized
//! - `[name]` opens a section, `[DEFAULT]` holds fallback keys
//! - the first `=` or `:` separates key and value; a line without either
//!   declares a key with no value
//! - lines indented deeper than their key continue its value
//! - duplicate sections and duplicate keys within a section are errors

use assetdesk_core::{Error, Result};
use indexmap::IndexMap;

use super::document::{DEFAULT_SECTION, Entries, IniDocument, normalize_key};

pub(crate) const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Where option lines currently land.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Defaults,
    Section(String),
}

impl Target {
    fn name(&self) -> &str {
        match self {
            Target::Defaults => DEFAULT_SECTION,
            Target::Section(name) => name,
        }
    }
}

/// Option whose value may still grow through continuation lines.
#[derive(Debug)]
struct PendingKey {
    target: Target,
    key: String,
    /// `None` for a key declared without a delimiter.
    lines: Option<Vec<String>>,
}

impl PendingKey {
    fn value(&self) -> Option<String> {
        self.lines
            .as_ref()
            .map(|lines| lines.join("\n").trim_end().to_string())
    }
}

#[derive(Default)]
struct Builder {
    defaults: Entries,
    sections: IndexMap<String, Entries>,
}

impl Builder {
    fn entries(&mut self, target: &Target) -> &mut Entries {
        match target {
            Target::Defaults => &mut self.defaults,
            Target::Section(name) => self.sections.entry(name.clone()).or_default(),
        }
    }

    fn flush(&mut self, pending: Option<PendingKey>) {
        if let Some(pending) = pending {
            let value = pending.value();
            self.entries(&pending.target).insert(pending.key, value);
        }
    }
}

/// Parse INI text into a document.
pub fn parse(text: &str) -> Result<IniDocument> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut builder = Builder::default();
    let mut current: Option<Target> = None;
    let mut pending: Option<PendingKey> = None;
    let mut indent_level = 0usize;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let value = line.trim();

        if value.is_empty() {
            // Blank lines inside a value are kept until the final trim.
            if let Some(PendingKey {
                lines: Some(lines), ..
            }) = pending.as_mut()
            {
                lines.push(String::new());
            }
            continue;
        }
        if value.starts_with(COMMENT_PREFIXES) {
            continue;
        }

        let cur_indent = line.chars().take_while(|c| c.is_whitespace()).count();

        if let Some(key) = pending.as_mut() {
            if cur_indent > indent_level {
                let Some(lines) = key.lines.as_mut() else {
                    return Err(Error::syntax(
                        line_no,
                        format!("continuation of key '{}' which has no value", key.key),
                    ));
                };
                lines.push(value.to_string());
                continue;
            }
        }

        indent_level = cur_indent;

        if let Some(name) = section_header(value) {
            builder.flush(pending.take());
            if name == DEFAULT_SECTION {
                current = Some(Target::Defaults);
                continue;
            }
            if builder.sections.contains_key(name) {
                return Err(Error::DuplicateSection(name.to_string()));
            }
            builder.sections.insert(name.to_string(), Entries::new());
            current = Some(Target::Section(name.to_string()));
            continue;
        }

        let Some(target) = current.clone() else {
            return Err(Error::MissingSectionHeader { line: line_no });
        };

        let (raw_key, raw_value) = split_option(value);
        let key = normalize_key(raw_key);
        if key.is_empty() {
            return Err(Error::syntax(line_no, "empty key"));
        }

        builder.flush(pending.take());
        let entries = builder.entries(&target);
        if entries.contains_key(&key) {
            return Err(Error::DuplicateKey {
                section: target.name().to_string(),
                key,
            });
        }
        // Reserve the slot so key order follows the file.
        entries.insert(key.clone(), None);

        pending = Some(PendingKey {
            target,
            key,
            lines: raw_value.map(|v| vec![v.trim().to_string()]),
        });
    }

    builder.flush(pending.take());
    Ok(IniDocument::from_parts(builder.defaults, builder.sections))
}

/// Section name if the stripped line is a `[header]`.
fn section_header(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('[')?;
    let end = inner.rfind(']')?;
    let name = &inner[..end];
    (!name.is_empty()).then_some(name)
}

/// Split at the first `=` or `:`. The value is `None` when neither occurs.
fn split_option(value: &str) -> (&str, Option<&str>) {
    match value.find(['=', ':']) {
        Some(pos) => (&value[..pos], Some(&value[pos + 1..])),
        None => (value, None),
    }
}
