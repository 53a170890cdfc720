//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CacheConfig, CacheDriver, DEFAULT_CACHE_LIFETIME_MS};
use crate::core::loader::DocumentLoader;

/// modmeta - read, cache and update module metadata JSON files.
#[derive(Parser, Debug)]
#[command(name = "modmeta")]
#[command(
    author,
    version,
    about,
    long_about = r#"modmeta operates on single JSON documents, typically the module.json
files of a module-managed codebase.

Reads print JSON to stdout; mutations rewrite the file pretty-printed,
preserving key order.

Caching is off by default: every load decodes the file. With --cache,
decoded documents are remembered per path for --cache-ttl milliseconds,
so repeated reads within the window may return a stale snapshot even if
the file changed on disk.

Examples:
    modmeta get module.json name
    modmeta set module.json version 1.0
    modmeta update module.json '{"enabled": false}'
    modmeta --cache --cache-driver file show module.json
"#
)]
pub struct Cli {
    /// Enable the read cache.
    #[arg(
        long,
        global = true,
        env = "MODMETA_CACHE",
        long_help = "Cache decoded documents per path. Within the TTL window, repeated\n\
loads return the cached snapshot without re-reading the file."
    )]
    pub cache: bool,

    /// Cache driver (memory/file).
    #[arg(
        long,
        global = true,
        env = "MODMETA_CACHE_DRIVER",
        default_value = "memory",
        value_name = "DRIVER",
        long_help = "Select the cache backing driver.\n\n\
Supported values:\n\
- memory (default): per-process map, gone when the process exits\n\
- file: one entry file per document under the cache directory,\n\
  shared across invocations"
    )]
    pub cache_driver: String,

    /// Cache entry lifetime in milliseconds.
    #[arg(
        long,
        global = true,
        env = "MODMETA_CACHE_TTL",
        default_value_t = DEFAULT_CACHE_LIFETIME_MS,
        value_name = "MS",
        long_help = "How long a cached document stays valid, in milliseconds.\n\n\
A lifetime of 0 expires entries immediately (every load decodes)."
    )]
    pub cache_ttl: u64,

    /// Cache directory for the file driver.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        long_help = "Directory holding file-driver cache entries.\n\n\
Defaults to .modmeta in the current directory."
    )]
    pub cache_dir: Option<PathBuf>,

    /// Verbose mode (log diagnostics to stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at KEY, or a default when absent.
    #[command(
        long_about = "Print the JSON value stored at KEY in FILE.\n\n\
A missing key prints the --default value (itself parsed as JSON, falling\n\
back to a plain string), or null when no default is given. Missing keys\n\
never fail.\n\n\
Examples:\n\
  modmeta get module.json name\n\
  modmeta get module.json priority --default 0\n"
    )]
    Get {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Attribute key.
        #[arg(value_name = "KEY")]
        key: String,

        /// Value to print when KEY is absent.
        #[arg(long, value_name = "JSON")]
        default: Option<String>,
    },

    /// Set KEY to VALUE and write the file.
    #[command(
        long_about = "Set KEY to VALUE in FILE and persist the document.\n\n\
VALUE is parsed as JSON first (false, 3, [\"a\"], {\"k\":1}); anything that\n\
is not valid JSON is stored as a plain string.\n\n\
Examples:\n\
  modmeta set module.json version 1.0\n\
  modmeta set module.json enabled false\n"
    )]
    Set {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Attribute key.
        #[arg(value_name = "KEY")]
        key: String,

        /// New value (JSON, or a bare string).
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Merge a JSON object into the document and write the file.
    #[command(
        long_about = "Merge DATA (a JSON object) into FILE and persist the result.\n\n\
Keys in DATA override existing keys; keys not present in DATA are kept.\n\n\
Example:\n\
  modmeta update module.json '{\"enabled\": false, \"version\": \"2.0\"}'\n"
    )]
    Update {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON object to merge.
        #[arg(value_name = "DATA")]
        data: String,
    },

    /// Set the module's enabled flag to true and write the file.
    Enable {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Set the module's enabled flag to false and write the file.
    Disable {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the document's attributes as pretty JSON.
    #[command(
        long_about = "Print the decoded in-memory attributes, pretty-printed with key\n\
order preserved. With caching enabled this may be a cached snapshot;\n\
use cat for the literal on-disk text."
    )]
    Show {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the raw on-disk file content.
    #[command(
        long_about = "Print the current raw content of FILE, read fresh from disk.\n\n\
Unlike show, this never reflects cached snapshots; the file must still\n\
decode as a valid document."
    )]
    Cat {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print attribute keys, one per line, in document order.
    Keys {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Report whether KEY exists (exit code 0 when present, 1 when absent).
    Has {
        /// Document file path.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Attribute key.
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Remove the file-driver cache directory.
    #[command(
        long_about = "Delete the cache directory used by the file driver, dropping all\n\
remembered documents.\n\n\
Example:\n\
  modmeta clear-cache --cache-dir .modmeta\n"
    )]
    ClearCache,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        init_verbose_logging();
    }

    let driver: CacheDriver = cli.cache_driver.parse().unwrap_or_default();
    let config = CacheConfig {
        enabled: cli.cache,
        driver,
        lifetime_ms: cli.cache_ttl,
        dir: cli.cache_dir.clone(),
    };
    let loader = DocumentLoader::new(config.clone());

    match cli.command {
        Commands::Get { file, key, default } => {
            crate::commands::run_get(&loader, &file, &key, default.as_deref())
        }

        Commands::Set { file, key, value } => {
            crate::commands::run_set(&loader, &file, &key, &value)
        }

        Commands::Update { file, data } => crate::commands::run_update(&loader, &file, &data),

        Commands::Enable { file } => crate::commands::run_set_enabled(&loader, &file, true),

        Commands::Disable { file } => crate::commands::run_set_enabled(&loader, &file, false),

        Commands::Show { file } => crate::commands::run_show(&loader, &file),

        Commands::Cat { file } => crate::commands::run_cat(&loader, &file),

        Commands::Keys { file } => crate::commands::run_keys(&loader, &file),

        Commands::Has { file, key } => crate::commands::run_has(&loader, &file, &key),

        Commands::ClearCache => crate::commands::run_clear_cache(&config),
    }
}

/// Route library diagnostics (cache hits/misses, swallowed write errors)
/// to stderr. Best effort: a logger that fails to start is ignored.
fn init_verbose_logging() {
    if let Ok(handle) = flexi_logger::Logger::try_with_env_or_str("debug")
        .and_then(|logger| logger.log_to_stderr().start())
    {
        // Keep the logger alive for the rest of the process
        std::mem::forget(handle);
    }
}
