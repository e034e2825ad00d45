//! `show` and the INI editing commands.
//!
//! Editing commands load the document, apply one change and save straight
//! away through [`save_ini`], re-encoding in the file's original encoding.

use std::io::Write;
use std::path::PathBuf;

use assetdesk_content::ini::{DEFAULT_SECTION, IniDocument, value_preview};
use assetdesk_content::{AssetContent, HeaderSource, ItemTable, OpenedAsset, save_ini};
use assetdesk_core::{Error as CoreError, TextEncoding};

use super::Context;
use crate::error::{Error, Result};

/// An opened file that classified as INI.
struct IniFile {
    path: PathBuf,
    encoding: TextEncoding,
    doc: IniDocument,
}

fn open_ini(ctx: &Context, file: &str) -> Result<IniFile> {
    let opened = ctx.open(file)?;
    match opened.content {
        AssetContent::Ini(doc) => Ok(IniFile {
            path: opened.path,
            encoding: opened.encoding,
            doc,
        }),
        other => Err(Error::NotIni {
            path: opened.path,
            kind: other.kind(),
        }),
    }
}

fn save<W: Write>(ctx: &Context, file: &IniFile, out: &mut W) -> Result<()> {
    let report = save_ini(&file.path, &file.doc, file.encoding, ctx.config.backup)?;
    writeln!(out, "Saved {}", report.path.display())?;
    if let Some(backup) = report.backup {
        writeln!(out, "Backup: {}", backup.display())?;
    }
    Ok(())
}

// ============================================================================
// show
// ============================================================================

/// Print a file as a table, an INI document or raw text.
pub fn cmd_show<W: Write>(
    ctx: &Context,
    file: &str,
    json: bool,
    limit: Option<usize>,
    out: &mut W,
) -> Result<()> {
    let opened = ctx.open(file)?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &opened)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} ({}, {})",
        opened.path.display(),
        opened.content.kind(),
        opened.encoding
    )?;
    let width = ctx.config.preview_width;
    match &opened.content {
        AssetContent::Items {
            table,
            header_source,
        } => show_table(table, header_source, width, limit, out),
        AssetContent::Ini(doc) => show_document(doc, width, limit, out),
        AssetContent::Raw(text) => show_raw(&opened, text, limit, out),
    }
}

fn show_table<W: Write>(
    table: &ItemTable,
    source: &HeaderSource,
    width: usize,
    limit: Option<usize>,
    out: &mut W,
) -> Result<()> {
    match source {
        HeaderSource::File(path) => writeln!(out, "headers: {}", path.display())?,
        HeaderSource::Generated => writeln!(out, "headers: generated")?,
    }
    writeln!(out, "{}", table.headers().join(" | "))?;

    let shown = limit.unwrap_or(table.len()).min(table.len());
    for row in &table.rows()[..shown] {
        let cells: Vec<String> = row.iter().map(|c| value_preview(c, width)).collect();
        writeln!(out, "{}", cells.join(" | "))?;
    }
    write_remaining(table.len() - shown, "rows", out)
}

fn show_document<W: Write>(
    doc: &IniDocument,
    width: usize,
    limit: Option<usize>,
    out: &mut W,
) -> Result<()> {
    if !doc.defaults().is_empty() {
        write_section(doc, DEFAULT_SECTION, width, out)?;
    }
    let shown = limit.unwrap_or(doc.section_count()).min(doc.section_count());
    for name in doc.sections().take(shown) {
        write_section(doc, name, width, out)?;
    }
    write_remaining(doc.section_count() - shown, "sections", out)
}

fn write_section<W: Write>(doc: &IniDocument, name: &str, width: usize, out: &mut W) -> Result<()> {
    writeln!(out, "[{name}]")?;
    if let Some(entries) = doc.own_entries(name) {
        for (key, value) in entries {
            match value {
                Some(value) => writeln!(out, "  {key} = {}", value_preview(value, width))?,
                None => writeln!(out, "  {key}")?,
            }
        }
    }
    Ok(())
}

fn show_raw<W: Write>(
    opened: &OpenedAsset,
    text: &str,
    limit: Option<usize>,
    out: &mut W,
) -> Result<()> {
    log::debug!("showing {} as raw text", opened.path.display());
    let total = text.lines().count();
    let shown = limit.unwrap_or(total).min(total);
    for line in text.lines().take(shown) {
        writeln!(out, "{line}")?;
    }
    write_remaining(total - shown, "lines", out)
}

fn write_remaining<W: Write>(remaining: usize, what: &str, out: &mut W) -> Result<()> {
    if remaining > 0 {
        writeln!(out, "... {remaining} more {what}")?;
    }
    Ok(())
}

// ============================================================================
// Read-only INI commands
// ============================================================================

/// Print section names, one per line.
pub fn cmd_sections<W: Write>(ctx: &Context, file: &str, out: &mut W) -> Result<()> {
    let ini = open_ini(ctx, file)?;
    for name in ini.doc.sections() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Print the keys of a section with a one-line preview of each value.
pub fn cmd_keys<W: Write>(ctx: &Context, file: &str, section: &str, out: &mut W) -> Result<()> {
    let ini = open_ini(ctx, file)?;
    let width = ctx.config.preview_width;
    for key in ini.doc.keys(section)? {
        match ini.doc.get(section, key)? {
            Some(value) => writeln!(out, "{key} = {}", value_preview(value, width))?,
            None => writeln!(out, "{key}")?,
        }
    }
    Ok(())
}

/// Print the full value of a key. Keys without a value print nothing.
pub fn cmd_get<W: Write>(
    ctx: &Context,
    file: &str,
    section: &str,
    key: &str,
    out: &mut W,
) -> Result<()> {
    let ini = open_ini(ctx, file)?;
    match ini.doc.get(section, key)? {
        Some(value) => writeln!(out, "{value}")?,
        None => log::debug!("{section}.{key} has no value"),
    }
    Ok(())
}

// ============================================================================
// Editing commands
// ============================================================================

/// Set (or create) a key and save.
pub fn cmd_set<W: Write>(
    ctx: &Context,
    file: &str,
    section: &str,
    key: &str,
    value: Option<String>,
    out: &mut W,
) -> Result<()> {
    let mut ini = open_ini(ctx, file)?;
    ini.doc.set(section, key, value)?;
    save(ctx, &ini, out)
}

/// Add an empty section and save.
pub fn cmd_add_section<W: Write>(ctx: &Context, file: &str, name: &str, out: &mut W) -> Result<()> {
    let mut ini = open_ini(ctx, file)?;
    ini.doc.add_section(name)?;
    save(ctx, &ini, out)
}

/// Remove a section and save.
pub fn cmd_remove_section<W: Write>(
    ctx: &Context,
    file: &str,
    name: &str,
    out: &mut W,
) -> Result<()> {
    let mut ini = open_ini(ctx, file)?;
    if !ini.doc.remove_section(name) {
        return Err(CoreError::NoSection(name.to_string()).into());
    }
    save(ctx, &ini, out)
}

/// Remove a key from a section and save.
pub fn cmd_remove_key<W: Write>(
    ctx: &Context,
    file: &str,
    section: &str,
    key: &str,
    out: &mut W,
) -> Result<()> {
    let mut ini = open_ini(ctx, file)?;
    if !ini.doc.remove_key(section, key)? {
        return Err(CoreError::NoKey {
            section: section.to_string(),
            key: key.to_string(),
        }
        .into());
    }
    save(ctx, &ini, out)
}
