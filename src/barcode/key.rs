//! Cache key derivation for barcode images
//!
//! Keys are derived from the raw SKU, never from the encoded payload, so a
//! SKU keeps its image file even if the payload rule changes.

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a key (10 hex characters)
const DIGEST_BYTES: usize = 5;

/// Longest sanitized SKU suffix appended to the digest
const MAX_SUFFIX_CHARS: usize = 40;

/// Derive the filesystem-safe cache key for a SKU
///
/// `<digest>` or `<digest>_<sanitized sku>`. Only ASCII alphanumerics,
/// `.`, `-` and `_` ever appear.
pub fn cache_key(raw_sku: &str) -> String {
    let trimmed = raw_sku.trim();
    let digest = sku_digest(trimmed);
    let suffix = sanitize(trimmed);

    if suffix.is_empty() {
        digest
    } else {
        format!("{}_{}", digest, suffix)
    }
}

/// SHA-256 over the UTF-8 bytes, first 10 hex chars
fn sku_digest(sku: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sku.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..DIGEST_BYTES])
}

/// Readable copy of the SKU with path-unsafe characters replaced
pub fn sanitize(sku: &str) -> String {
    let cleaned: String = sku
        .chars()
        .take(MAX_SUFFIX_CHARS)
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Windows drops trailing dots from file names
    cleaned.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_deterministic() {
        assert_eq!(cache_key("ABC123"), cache_key("ABC123"));
        assert_eq!(cache_key("ABC123"), cache_key("  ABC123  "));
    }

    #[test]
    fn key_shape() {
        let key = cache_key("ABC123");
        let (digest, suffix) = key.split_once('_').unwrap();
        assert_eq!(digest.len(), 10);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(suffix, "ABC123");
    }

    #[test]
    fn key_never_contains_separators() {
        for sku in ["a/b", "a\\b", "../../etc/passwd", "C:\\x", "x:y*z?", "é/ü", ".."] {
            let key = cache_key(sku);
            assert!(!key.contains('/'), "{key}");
            assert!(!key.contains('\\'), "{key}");
            assert!(
                key.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')),
                "{key}"
            );
        }
    }

    #[test]
    fn unsafe_skus_do_not_collide() {
        // Both sanitize to "a_b"; the digest tells them apart
        assert_ne!(cache_key("a/b"), cache_key("a\\b"));
        assert_ne!(cache_key("999.1234"), cache_key("99999.1234"));
    }

    #[test]
    fn empty_suffix_yields_digest_only() {
        let key = cache_key("...");
        assert_eq!(key.len(), 10);
    }

    #[test]
    fn sanitize_truncates_and_strips_dots() {
        assert_eq!(sanitize("999.1234"), "999.1234");
        assert_eq!(sanitize("abc."), "abc");
        assert_eq!(sanitize(&"x".repeat(100)).len(), MAX_SUFFIX_CHARS);
    }
}
