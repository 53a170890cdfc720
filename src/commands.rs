//! Command handlers - one run_* function per subcommand
//!
//! Handlers load documents through the cache-aware loader, print results
//! to stdout, and translate the library's typed errors and save()'s
//! boolean contract into command failures.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::cache::store::clear_cache;
use crate::config::CacheConfig;
use crate::core::document::Attributes;
use crate::core::loader::DocumentLoader;

/// Print the value at `key`, or the default (null when none given)
pub fn run_get(
    loader: &DocumentLoader,
    file: &Path,
    key: &str,
    default: Option<&str>,
) -> Result<()> {
    let doc = loader.load(file)?;
    let fallback = default.map(parse_value_arg).unwrap_or(Value::Null);
    let value = doc.get(key).cloned().unwrap_or(fallback);
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Set a single key and persist
pub fn run_set(loader: &DocumentLoader, file: &Path, key: &str, value: &str) -> Result<()> {
    let mut doc = loader.load(file)?;
    doc.set(key, parse_value_arg(value));
    if !doc.save() {
        bail!("failed to write {}", file.display());
    }
    Ok(())
}

/// Merge a JSON object into the document and persist
pub fn run_update(loader: &DocumentLoader, file: &Path, data: &str) -> Result<()> {
    let patch: Attributes = serde_json::from_str(data)
        .with_context(|| format!("DATA must be a JSON object, got: {}", data))?;

    let mut doc = loader.load(file)?;
    if !doc.update(patch) {
        bail!("failed to write {}", file.display());
    }
    Ok(())
}

/// Flip the module's enabled flag and persist
pub fn run_set_enabled(loader: &DocumentLoader, file: &Path, enabled: bool) -> Result<()> {
    let mut patch = Attributes::new();
    patch.insert("enabled".to_string(), Value::Bool(enabled));

    let mut doc = loader.load(file)?;
    if !doc.update(patch) {
        bail!("failed to write {}", file.display());
    }
    Ok(())
}

/// Print the in-memory attributes, pretty-printed
pub fn run_show(loader: &DocumentLoader, file: &Path) -> Result<()> {
    let doc = loader.load(file)?;
    println!("{}", doc.serialized_attributes());
    Ok(())
}

/// Print the raw on-disk content
pub fn run_cat(loader: &DocumentLoader, file: &Path) -> Result<()> {
    let doc = loader.load(file)?;
    print!("{}", doc.current_file_text()?);
    Ok(())
}

/// Print attribute keys in document order
pub fn run_keys(loader: &DocumentLoader, file: &Path) -> Result<()> {
    let doc = loader.load(file)?;
    for key in doc.keys() {
        println!("{}", key);
    }
    Ok(())
}

/// Print true/false for key presence; absent keys exit nonzero
pub fn run_has(loader: &DocumentLoader, file: &Path, key: &str) -> Result<()> {
    let doc = loader.load(file)?;
    if doc.has(key) {
        println!("true");
        Ok(())
    } else {
        println!("false");
        std::process::exit(1);
    }
}

/// Drop the file-driver cache directory
pub fn run_clear_cache(config: &CacheConfig) -> Result<()> {
    let dir = config.cache_dir();
    clear_cache(&dir).with_context(|| format!("failed to clear cache at {}", dir.display()))?;
    Ok(())
}

/// Parse a CLI value argument as JSON, falling back to a plain string.
///
/// Lets users write `set module.json enabled false` without quoting
/// ceremony while still accepting structured values.
fn parse_value_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_arg_json_forms() {
        assert_eq!(parse_value_arg("false"), json!(false));
        assert_eq!(parse_value_arg("3"), json!(3));
        assert_eq!(parse_value_arg("null"), json!(null));
        assert_eq!(parse_value_arg(r#"["a","b"]"#), json!(["a", "b"]));
        assert_eq!(parse_value_arg(r#"{"k":1}"#), json!({"k": 1}));
        assert_eq!(parse_value_arg(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn test_parse_value_arg_bare_string_fallback() {
        assert_eq!(parse_value_arg("Blog"), json!("Blog"));
        assert_eq!(parse_value_arg("1.0.0"), json!("1.0.0"));
    }
}
