/// Email verification tokens
///
/// Issues the short human-enterable code that proves email ownership during
/// registration. The raw token is emailed to the user; only its digest is
/// returned to the HTTP client, which must echo it back together with the raw
/// token during verification. The server never stores either value.
///
/// # Format
///
/// 8 characters, each drawn uniformly from a fixed 70-character alphabet
/// (upper/lower letters, digits, and `!@#$%^&*`), sampled from the OS CSPRNG.
/// Tokens carry no expiry; a code from an old registration email stays valid
/// until a newer registration replaces the digest the client holds.
///
/// # Example
///
/// ```
/// use tasknest_shared::auth::verification::issue_verification_token;
/// use tasknest_shared::auth::password::hash_password;
///
/// let (raw, digest) = issue_verification_token();
/// assert_eq!(raw.len(), 8);
/// assert_eq!(digest, hash_password(&raw));
/// ```
use rand::rngs::OsRng;
use rand::Rng;

use super::password::hash_password;

/// Number of characters in a verification token
pub const TOKEN_LENGTH: usize = 8;

/// Alphabet the token characters are drawn from (70 symbols)
pub const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Issues a fresh verification token
///
/// Returns `(raw, digest)`: the raw token for the verification email and its
/// SHA-256 digest, which round-trips through the client as a correlation
/// handle. Each character is sampled independently from [`TOKEN_ALPHABET`]
/// using `OsRng`.
pub fn issue_verification_token() -> (String, String) {
    let mut rng = OsRng;

    let raw: String = (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_ALPHABET.len());
            TOKEN_ALPHABET[idx] as char
        })
        .collect();

    let digest = hash_password(&raw);
    (raw, digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length() {
        let (raw, digest) = issue_verification_token();
        assert_eq!(raw.len(), TOKEN_LENGTH);
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_token_uses_alphabet() {
        for _ in 0..50 {
            let (raw, _) = issue_verification_token();
            assert!(
                raw.bytes().all(|b| TOKEN_ALPHABET.contains(&b)),
                "Token '{}' contains characters outside the alphabet",
                raw
            );
        }
    }

    #[test]
    fn test_alphabet_size() {
        assert_eq!(TOKEN_ALPHABET.len(), 70);

        // No duplicate symbols, or the distribution would be skewed
        let mut seen = std::collections::HashSet::new();
        assert!(TOKEN_ALPHABET.iter().all(|b| seen.insert(*b)));
    }

    #[test]
    fn test_digest_matches_raw() {
        let (raw, digest) = issue_verification_token();
        assert_eq!(digest, hash_password(&raw));
    }

    #[test]
    fn test_tokens_are_random() {
        let (a, _) = issue_verification_token();
        let (b, _) = issue_verification_token();
        let (c, _) = issue_verification_token();

        // 70^8 possibilities; a collision here means the RNG is broken
        assert!(!(a == b && b == c), "Three identical tokens in a row");
    }
}
