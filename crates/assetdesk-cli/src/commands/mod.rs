//! Subcommand implementations.
//!
//! Every handler writes its output to the supplied writer, so `main` passes
//! stdout and tests pass a buffer.

pub mod ini;
pub mod items;
pub mod list;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use assetdesk_content::{OpenOptions, OpenedAsset, open_asset};
use assetdesk_core::util::paths::expand_tilde;
use assetdesk_core::util::resolver::{PathResolver, Surroundings, headers_dir};

use crate::cli::{Command, ItemsAction};
use crate::config::AppConfig;
use crate::config_handlers::handle_config_command;
use crate::error::{Error, Result};

/// Shared state for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration.
    pub config: AppConfig,
    config_path: Option<String>,
    explicit_assets: Option<PathBuf>,
    prompt: bool,
    surroundings: Option<Surroundings>,
}

impl Context {
    /// Create a context. `prompt` allows asking for the assets folder on a terminal.
    pub fn new(config: AppConfig, explicit_assets: Option<PathBuf>, prompt: bool) -> Self {
        Self {
            config,
            config_path: None,
            explicit_assets,
            prompt,
            surroundings: None,
        }
    }

    /// Resolve the assets folder against fixed process state instead of the
    /// real environment.
    pub fn with_surroundings(mut self, surroundings: Surroundings) -> Self {
        self.surroundings = Some(surroundings);
        self
    }

    /// Remember the `--config` path for config subcommands.
    pub fn with_config_path(mut self, path: Option<String>) -> Self {
        self.config_path = path;
        self
    }

    fn resolver(&self) -> PathResolver {
        self.config.resolver()
    }

    /// Assets folder if one can be found without asking.
    pub fn find_assets_dir(&self) -> Option<PathBuf> {
        let resolver = self.resolver();
        let explicit = self.explicit_assets.as_deref();
        match &self.surroundings {
            Some(around) => resolver.assets_dir_with(explicit, around),
            None => resolver.assets_dir(explicit),
        }
    }

    /// Assets folder, asking on the terminal when it cannot be found.
    pub fn require_assets_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = self.find_assets_dir() {
            return Ok(dir);
        }

        let expected = self
            .explicit_assets
            .clone()
            .unwrap_or_else(|| self.resolver().default_location());
        if self.prompt && io::stdin().is_terminal() {
            if let Some(dir) = prompt_for_folder(&expected)? {
                return Ok(dir);
            }
        }
        Err(Error::AssetsNotFound { expected })
    }

    /// Locate a file given on the command line.
    ///
    /// Tries the path as given, then relative to the assets folder, then
    /// relative to its parent (the form `list` prints).
    pub fn resolve_file(&self, file: &str) -> Result<PathBuf> {
        let given = expand_tilde(file);
        if given.is_file() {
            return Ok(given);
        }

        let assets = self.require_assets_dir()?;
        let mut candidates = vec![assets.join(&given)];
        if let Some(parent) = assets.parent() {
            candidates.push(parent.join(&given));
        }
        candidates
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| assetdesk_core::Error::not_found(file).into())
    }

    /// Header directory for a file: under the `Assets` folder containing it,
    /// else under the resolved assets folder.
    pub fn headers_dir_for(&self, file: &Path) -> Option<PathBuf> {
        let marker = assetdesk_core::util::resolver::DEFAULT_ASSETS_DIR;
        let subdir = &self.config.headers_subdir;
        file.ancestors()
            .skip(1)
            .find(|dir| {
                dir.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.eq_ignore_ascii_case(marker))
            })
            .map(|assets| headers_dir(assets, subdir))
            .or_else(|| {
                self.find_assets_dir()
                    .map(|assets| headers_dir(&assets, subdir))
            })
    }

    /// Open options for a file, using its header directory.
    pub fn open_options(&self, file: &Path) -> Result<OpenOptions> {
        let mut options = OpenOptions::default().with_encodings(self.config.text_encodings()?);
        if let Some(dir) = self.headers_dir_for(file) {
            options = options.with_headers_dir(dir);
        }
        Ok(options)
    }

    /// Resolve, read and classify a file.
    pub fn open(&self, file: &str) -> Result<OpenedAsset> {
        let path = self.resolve_file(file)?;
        let options = self.open_options(&path)?;
        Ok(open_asset(&path, &options)?)
    }
}

fn prompt_for_folder(expected: &Path) -> Result<Option<PathBuf>> {
    eprint!(
        "Assets folder not found at {}.\nEnter the path to the assets folder (empty to cancel): ",
        expected.display()
    );
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(Error::Input)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Ok(None);
    }

    let dir = expand_tilde(answer);
    if dir.is_dir() {
        Ok(Some(dir))
    } else {
        eprintln!("{} is not a directory", dir.display());
        Ok(None)
    }
}

/// Run a subcommand, writing its output to `out`.
pub async fn run<W: Write>(ctx: &Context, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::List { json } => list::cmd_list(ctx, json, out).await,
        Command::Show { file, json, limit } => ini::cmd_show(ctx, &file, json, limit, out),
        Command::Sections { file } => ini::cmd_sections(ctx, &file, out),
        Command::Keys { file, section } => ini::cmd_keys(ctx, &file, &section, out),
        Command::Get { file, section, key } => ini::cmd_get(ctx, &file, &section, &key, out),
        Command::Set {
            file,
            section,
            key,
            value,
            no_value,
        } => {
            let value = if no_value { None } else { value };
            ini::cmd_set(ctx, &file, &section, &key, value, out)
        }
        Command::AddSection { file, name } => ini::cmd_add_section(ctx, &file, &name, out),
        Command::RemoveSection { file, name } => ini::cmd_remove_section(ctx, &file, &name, out),
        Command::RemoveKey { file, section, key } => {
            ini::cmd_remove_key(ctx, &file, &section, &key, out)
        }
        Command::Items { action } => match action {
            ItemsAction::Headers { file, json } => items::cmd_headers(ctx, &file, json, out),
            ItemsAction::Export {
                file,
                output,
                rename,
                set,
                add_row,
            } => {
                let edits = items::TableEdits {
                    rename,
                    set,
                    add_rows: add_row,
                };
                items::cmd_export(ctx, &file, &output, edits, out)
            }
            ItemsAction::SaveHeader {
                file,
                rename,
                force,
            } => items::cmd_save_header(ctx, &file, rename, force, out),
        },
        Command::Config { action } => {
            Ok(handle_config_command(ctx.config_path.as_deref(), action, out)?)
        }
    }
}
