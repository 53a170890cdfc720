//! modmeta - a CLI for reading, caching and updating module metadata JSON files
//!
//! modmeta provides:
//! - Key-level reads with default fallback
//! - In-place set/update mutations with pretty-printed persistence
//! - Optional TTL caching of decoded documents (memory or file driver)

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = modmeta::cli::Cli::parse();
    modmeta::cli::run(cli)
}
