/// Credential hashing
///
/// This module provides the one-way transform used for stored passwords and
/// for verification-token digests: a hex-encoded SHA-256 over the plaintext.
///
/// # Contract
///
/// The hash is deterministic and unsalted. Same input, same digest, always:
/// the verification flow depends on it (the client echoes a digest back and
/// the server recomputes it), and existing stored password digests depend on
/// it across releases. Two users with the same password therefore share a
/// digest. That is a known weakness of the scheme; migrating to a salted KDF
/// would require a credential migration and is tracked as a hardening item,
/// not something this function may do unilaterally.
///
/// # Example
///
/// ```
/// use tasknest_shared::auth::password::{hash_password, verify_password};
///
/// let digest = hash_password("Secret1!");
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, hash_password("Secret1!"));
/// assert!(verify_password("Secret1!", &digest));
/// assert!(!verify_password("wrong", &digest));
/// ```
use sha2::{Digest, Sha256};

/// Hashes a secret into a hex-encoded SHA-256 digest (64 chars)
///
/// Accepts any string; never fails.
pub fn hash_password(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verifies a plaintext secret against a stored digest
///
/// Recomputes the digest and compares in constant time so the comparison
/// itself does not leak how much of the digest matched.
pub fn verify_password(secret: &str, stored_digest: &str) -> bool {
    constant_time_compare(&hash_password(secret), stored_digest)
}

/// Constant-time string comparison
///
/// Compares every byte regardless of where the strings first differ.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        diff |= x ^ y;
    }

    diff == 0
}
