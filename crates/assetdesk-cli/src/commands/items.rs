//! `items` subcommands: headers, CSV export, header files.

use std::io::Write;
use std::path::{Path, PathBuf};

use assetdesk_content::items::{export_csv_file, save_header_file};
use assetdesk_content::{AssetContent, HeaderSource, ItemTable};
use assetdesk_core::{Error as CoreError, TextEncoding};
use serde::Serialize;

use super::Context;
use crate::error::{Error, Result};

struct ItemFile {
    path: PathBuf,
    encoding: TextEncoding,
    table: ItemTable,
    source: HeaderSource,
}

fn open_items(ctx: &Context, file: &str) -> Result<ItemFile> {
    let opened = ctx.open(file)?;
    match opened.content {
        AssetContent::Items {
            table,
            header_source,
        } => Ok(ItemFile {
            path: opened.path,
            encoding: opened.encoding,
            table,
            source: header_source,
        }),
        _ => Err(Error::NotItems { path: opened.path }),
    }
}

fn apply_rename(table: &mut ItemTable, rename: Option<Vec<String>>) -> Result<()> {
    if let Some(names) = rename {
        let names = names.into_iter().map(|n| n.trim().to_string()).collect();
        table.rename_headers(names)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct HeadersReport<'a> {
    headers: &'a [String],
    source: &'a HeaderSource,
    rows: usize,
}

/// Print the column names of an item file and where they came from.
pub fn cmd_headers<W: Write>(ctx: &Context, file: &str, json: bool, out: &mut W) -> Result<()> {
    let items = open_items(ctx, file)?;
    if json {
        let report = HeadersReport {
            headers: items.table.headers(),
            source: &items.source,
            rows: items.table.len(),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    match &items.source {
        HeaderSource::File(path) => writeln!(out, "# from {}", path.display())?,
        HeaderSource::Generated => writeln!(out, "# generated (no matching header file)")?,
    }
    for (index, name) in items.table.headers().iter().enumerate() {
        writeln!(out, "{index}\t{name}")?;
    }
    Ok(())
}

/// In-memory changes applied to a table before it is exported.
#[derive(Debug, Default)]
pub struct TableEdits {
    /// New column names.
    pub rename: Option<Vec<String>>,
    /// `ROW:COLUMN=VALUE` cell assignments.
    pub set: Vec<String>,
    /// Comma-separated rows to append.
    pub add_rows: Vec<String>,
}

/// Split `ROW:COLUMN=VALUE`. The value may contain `=` and `:`.
pub fn parse_cell_assignment(assignment: &str) -> Result<(usize, &str, &str)> {
    let bad = || CoreError::invalid(format!("Expected ROW:COLUMN=VALUE, got '{assignment}'"));
    let (target, value) = assignment.split_once('=').ok_or_else(bad)?;
    let (row, column) = target.split_once(':').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let column = column.trim();
    if column.is_empty() {
        return Err(bad().into());
    }
    Ok((row, column, value))
}

fn apply_edits(table: &mut ItemTable, edits: TableEdits) -> Result<()> {
    apply_rename(table, edits.rename)?;
    for assignment in &edits.set {
        let (row, column, value) = parse_cell_assignment(assignment)?;
        table.set_cell(row, column, value)?;
    }
    for row in &edits.add_rows {
        table.push_row(row.split(',').map(|v| v.trim().to_string()).collect())?;
    }
    Ok(())
}

/// Export an item file as CSV, encoded like the source.
///
/// Edits change only the exported copy; the item file is left as is.
pub fn cmd_export<W: Write>(
    ctx: &Context,
    file: &str,
    output: &Path,
    edits: TableEdits,
    out: &mut W,
) -> Result<()> {
    let mut items = open_items(ctx, file)?;
    apply_edits(&mut items.table, edits)?;
    export_csv_file(&items.table, output, items.encoding)?;
    writeln!(
        out,
        "Exported {} rows from {} to {} ({})",
        items.table.len(),
        items.path.display(),
        output.display(),
        items.encoding
    )?;
    Ok(())
}

/// Save the (optionally renamed) column names as `H_<stem>.ini`.
pub fn cmd_save_header<W: Write>(
    ctx: &Context,
    file: &str,
    rename: Option<Vec<String>>,
    force: bool,
    out: &mut W,
) -> Result<()> {
    let mut items = open_items(ctx, file)?;
    apply_rename(&mut items.table, rename)?;

    let headers_dir = ctx
        .headers_dir_for(&items.path)
        .ok_or_else(|| CoreError::not_found("headers directory (no Assets folder found)"))?;
    let stem = items
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CoreError::invalid(format!("{} has no file stem", items.path.display())))?;

    let saved = save_header_file(&headers_dir, stem, items.table.headers(), force)?;
    writeln!(out, "Saved header file {}", saved.display())?;
    Ok(())
}
