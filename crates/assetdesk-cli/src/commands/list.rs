//! `list`: asset files under the assets folder.

use std::io::Write;

use assetdesk_core::find_asset_files;

use super::Context;
use crate::error::Result;

/// Print the asset files, relative to the assets folder's parent.
pub async fn cmd_list<W: Write>(ctx: &Context, json: bool, out: &mut W) -> Result<()> {
    let assets = ctx.require_assets_dir()?;
    let patterns = ctx.config.file_patterns()?;
    let files = find_asset_files(&assets, &patterns).await?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &files)?;
        writeln!(out)?;
        return Ok(());
    }

    if files.is_empty() {
        eprintln!("No matching files under {}", assets.display());
    }
    for file in &files {
        writeln!(out, "{}", file.relative.display())?;
    }
    Ok(())
}
