//! Option sources and their merging
//!
//! Tokenizes and parses the `.rubocop` file and `RUBOCOP_OPTS`, then merges
//! them with the command line in precedence order (CLI > Env > File).

pub mod loader;
pub mod merge;
pub mod tokenizer;

pub use loader::{
    load_sources, DiskFs, EntryKind, EnvLookup, LoadedSources, ProcessEnv, SourceFs,
    CONFIG_FILE_NAME, ENV_VAR_NAME,
};
pub use merge::merge;
pub use tokenizer::tokenize;
