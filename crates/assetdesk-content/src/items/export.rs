//! CSV export of item tables.

use std::io::Write;
use std::path::Path;

use assetdesk_core::{Error, Result, TextEncoding};

use super::table::ItemTable;

/// Write the table as CSV: the header row, then one row per record.
///
/// Rows end with `\r\n`; line breaks inside quoted cells are kept as-is.
pub fn export_csv<W: Write>(table: &ItemTable, writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv.write_record(table.headers())
        .map_err(|e| Error::export(e.to_string()))?;
    for row in table.rows() {
        csv.write_record(row)
            .map_err(|e| Error::export(e.to_string()))?;
    }
    csv.flush()?;
    Ok(())
}

/// Render the table as a CSV string.
pub fn to_csv_string(table: &ItemTable) -> Result<String> {
    let mut buffer = Vec::new();
    export_csv(table, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::export(e.to_string()))
}

/// Write the table as CSV to `path`, encoded like the source file.
pub fn export_csv_file(table: &ItemTable, path: &Path, encoding: TextEncoding) -> Result<()> {
    let text = to_csv_string(table)?;
    std::fs::write(path, encoding.encode(&text)).map_err(|e| Error::io_with_path(e, path))?;
    log::info!(
        "exported {} rows to {} ({encoding})",
        table.len(),
        path.display()
    );
    Ok(())
}
