//! Loading of the `.rubocop` file and `RUBOCOP_OPTS` sources

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::tokenizer::tokenize;
use crate::domain::{Origin, SourceResult};
use crate::error::{OptionsError, Result};
use crate::schema::parse_tokens;

/// Name of the per-project options file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".rubocop";

/// Environment variable holding extra options.
pub const ENV_VAR_NAME: &str = "RUBOCOP_OPTS";

/// Read access to environment variables.
pub trait EnvLookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The real process environment. Values that are not valid UTF-8 are
/// converted lossily rather than treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(env_value_to_string)
    }
}

fn env_value_to_string(value: OsString) -> String {
    value.into_string().unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// What sits at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Missing,
    File,
    /// A directory or anything else that is not a regular file.
    Other,
}

/// Read access to the directory options files are looked up in.
pub trait SourceFs {
    /// `Missing` only when nothing is there; any other failure to look is an error.
    fn entry_kind(&self, name: &str) -> io::Result<EntryKind>;
    fn read_to_string(&self, name: &str) -> io::Result<String>;
    /// Full path of `name`, for error messages.
    fn display_path(&self, name: &str) -> PathBuf;
}

/// Files under a root directory on disk.
#[derive(Debug, Clone)]
pub struct DiskFs {
    root: PathBuf,
}

impl DiskFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceFs for DiskFs {
    fn entry_kind(&self, name: &str) -> io::Result<EntryKind> {
        match fs::metadata(self.root.join(name)) {
            Ok(meta) if meta.is_file() => Ok(EntryKind::File),
            Ok(_) => Ok(EntryKind::Other),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(EntryKind::Missing),
            Err(err) => Err(err),
        }
    }

    fn read_to_string(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(name))
    }

    fn display_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// The two non-command-line sources, each present only if it contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSources {
    pub file: Option<SourceResult>,
    pub env: Option<SourceResult>,
}

pub fn load_sources(env: &impl EnvLookup, fs: &impl SourceFs) -> Result<LoadedSources> {
    Ok(LoadedSources { file: load_file_source(fs)?, env: load_env_source(env)? })
}

/// Parse `.rubocop` if it is a regular file. A directory of that name is
/// not configuration and is skipped.
pub fn load_file_source(fs: &impl SourceFs) -> Result<Option<SourceResult>> {
    let io_error = |source| OptionsError::Io { path: fs.display_path(CONFIG_FILE_NAME), source };

    match fs.entry_kind(CONFIG_FILE_NAME).map_err(io_error)? {
        EntryKind::Missing => return Ok(None),
        EntryKind::Other => {
            tracing::debug!(
                "Ignoring {}: not a regular file",
                fs.display_path(CONFIG_FILE_NAME).display()
            );
            return Ok(None);
        }
        EntryKind::File => {}
    }

    let content = fs.read_to_string(CONFIG_FILE_NAME).map_err(io_error)?;
    tracing::debug!("Loading options from {}", fs.display_path(CONFIG_FILE_NAME).display());

    parse_source(Origin::ConfigFile, &content).map(Some)
}

/// Parse `RUBOCOP_OPTS`; unset or blank contributes nothing.
pub fn load_env_source(env: &impl EnvLookup) -> Result<Option<SourceResult>> {
    let Some(raw) = env.lookup(ENV_VAR_NAME) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    tracing::debug!("Loading options from {}", ENV_VAR_NAME);

    parse_source(Origin::Environment, &raw).map(Some)
}

fn parse_source(origin: Origin, content: &str) -> Result<SourceResult> {
    let tokens = tokenize(content, origin)?;
    let parsed = parse_tokens(origin, &tokens)?;
    if !parsed.positionals.is_empty() {
        return Err(OptionsError::Argument(format!("{origin} may not specify target files")));
    }
    Ok(parsed)
}
