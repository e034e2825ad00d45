//! Common test utilities and harness for assetdesk CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assetdesk_cli::{AppConfig, Cli, Context, run};
use clap::Parser;
use tempfile::TempDir;

/// INI file with a `DEFAULT` section and a multi-line value.
pub const GAME_INI: &str = "\
; game settings
[DEFAULT]
lang = en

[Main]
Title = Dragon Quest
Width: 800
skip_intro

[Tips]
loading = Press start
    to continue
";

/// Item table with a metadata line and a wrapped `Tip` cell.
pub const ITEMS_TXT: &str = "\
|V.16|4|
1|Sword|A sharp blade|100|
2|Shield|Blocks arrows
and most swords|80|
3|Bow|Ranged|120|
4|Arrow|Pointy|1|
5|Potion|Heals 50 HP|25|
";

/// Header file matching [`ITEMS_TXT`].
pub const ITEMS_HEADER: &str = "ID,Name,Tip,Price";

/// Throwaway `Assets` tree.
///
/// ```text
/// <tmp>/Assets/
///   Config/game.ini
///   Headers/
///   Items/
/// ```
pub struct TestAssets {
    /// Keeps the directory alive.
    pub dir: TempDir,
    /// `<tmp>/Assets`
    pub assets: PathBuf,
}

impl TestAssets {
    /// Create the tree with `Config/game.ini` in place.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("Assets");
        for sub in ["Config", "Headers", "Items"] {
            fs::create_dir_all(assets.join(sub)).unwrap();
        }
        let harness = Self { dir, assets };
        harness.write("Config/game.ini", GAME_INI);
        harness
    }

    /// Write a file relative to the assets folder.
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.assets.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Read a file relative to the assets folder as bytes.
    pub fn read_bytes(&self, relative: &str) -> Vec<u8> {
        fs::read(self.assets.join(relative)).unwrap()
    }

    /// Read a file relative to the assets folder as UTF-8.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.assets.join(relative)).unwrap()
    }

    /// Path relative to the assets folder.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.assets.join(relative)
    }

    /// Add `Items/Item.txt` and its header file.
    pub fn with_items(self) -> Self {
        self.write("Items/Item.txt", ITEMS_TXT);
        self.write("Headers/H_Item.ini", ITEMS_HEADER);
        self
    }

    /// Context pointing at this tree, never prompting.
    pub fn context(&self) -> Context {
        self.context_with(AppConfig::default())
    }

    /// Context with a custom configuration.
    pub fn context_with(&self, config: AppConfig) -> Context {
        Context::new(config, Some(self.assets.clone()), false)
    }

    /// Parse `args` as a command line and run it, returning stdout.
    pub async fn run(&self, args: &[&str]) -> assetdesk_cli::Result<String> {
        run_with(&self.context(), args).await
    }
}

impl Default for TestAssets {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a command line against `ctx`, returning stdout.
pub async fn run_with(ctx: &Context, args: &[&str]) -> assetdesk_cli::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("assetdesk").chain(args.iter().copied())).unwrap();
    let mut out = Vec::new();
    run(ctx, cli.command, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

/// Lines of command output.
pub fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}
