/// Pre-shared API key checking
///
/// Every request to the versioned API must carry the deployment's static
/// pre-shared key in the `x-api-key` header. The server is configured with
/// the SHA-256 digest of that key, never the plaintext, so the key cannot
/// leak through configuration dumps or logs. Incoming keys are hashed and
/// compared against the configured digest.
///
/// # Example
///
/// ```
/// use tasknest_shared::auth::api_key::{hash_api_key, verify_api_key};
///
/// let configured_digest = hash_api_key("deployment-key");
///
/// assert!(verify_api_key("deployment-key", &configured_digest));
/// assert!(!verify_api_key("guessed-key", &configured_digest));
/// ```
use sha2::{Digest, Sha256};

use super::password::constant_time_compare;

/// Hashes an API key using SHA-256 (hex, 64 chars)
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verifies a presented key against the configured digest
///
/// Hash-then-compare, with a constant-time comparison.
pub fn verify_api_key(key: &str, configured_digest: &str) -> bool {
    constant_time_compare(&hash_api_key(key), configured_digest)
}

/// Checks that a configured digest looks like a SHA-256 hex string
///
/// Used at startup so a misconfigured `API_KEY_HASH` (e.g. the plaintext key
/// pasted by mistake) fails fast instead of rejecting every request.
pub fn is_valid_key_digest(digest: &str) -> bool {
    digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_api_key("key"), hash_api_key("key"));
        assert_ne!(hash_api_key("key"), hash_api_key("other"));
    }

    #[test]
    fn test_verify_api_key() {
        let digest = hash_api_key("deployment-key");

        assert!(verify_api_key("deployment-key", &digest));
        assert!(!verify_api_key("wrong", &digest));
        assert!(!verify_api_key("", &digest));
    }

    #[test]
    fn test_plaintext_never_matches_its_own_digest() {
        // Guards against accidentally configuring the raw key instead of
        // its digest
        let digest = hash_api_key("deployment-key");
        assert!(!verify_api_key(&digest, &digest));
    }

    #[test]
    fn test_is_valid_key_digest() {
        assert!(is_valid_key_digest(&hash_api_key("anything")));
        assert!(!is_valid_key_digest("deployment-key"));
        assert!(!is_valid_key_digest(""));
        assert!(!is_valid_key_digest(&"z".repeat(64)));
    }
}
