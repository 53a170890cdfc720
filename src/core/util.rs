//! Common utilities

use xxhash_rust::xxh3::xxh3_64;

/// Compute a stable hex hash of a cache key.
///
/// Used to derive cache entry file names from arbitrary path keys, which
/// may contain separators and other characters unsafe for file names.
pub fn hash_key(key: &str) -> String {
    format!("{:016x}", xxh3_64(key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_key_is_stable() {
        let a = hash_key("/modules/blog/module.json");
        let b = hash_key("/modules/blog/module.json");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16); // 64-bit hex
    }

    #[test]
    fn test_hash_key_differs_per_key() {
        assert_ne!(hash_key("a/module.json"), hash_key("b/module.json"));
    }
}
