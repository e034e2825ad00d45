//! INI serializer.
//!
//! Output layout: `[DEFAULT]` first when it has keys, then every section in
//! order. Each key is written as `key = value`, or bare `key` when it has no
//! value. Newlines inside a value are followed by a tab so they read back as
//! continuation lines. Every section ends with a blank line.

use std::fmt::Write;

use super::document::{DEFAULT_SECTION, Entries, IniDocument};

/// Serialize a document to INI text.
pub fn write(doc: &IniDocument) -> String {
    let mut out = String::new();

    if !doc.defaults().is_empty() {
        write_section(&mut out, DEFAULT_SECTION, doc.defaults());
    }
    for name in doc.sections() {
        if let Some(entries) = doc.own_entries(name) {
            write_section(&mut out, name, entries);
        }
    }

    out
}

fn write_section(out: &mut String, name: &str, entries: &Entries) {
    let _ = writeln!(out, "[{name}]");
    for (key, value) in entries {
        match value {
            Some(value) => {
                let _ = writeln!(out, "{key} = {}", value.replace('\n', "\n\t"));
            }
            None => {
                let _ = writeln!(out, "{key}");
            }
        }
    }
    out.push('\n');
}
