/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: deterministic SHA-256 credential hashing
/// - [`verification`]: email verification token issuance
/// - [`jwt`]: signed 7-day session tokens
/// - [`api_key`]: pre-shared service key hashing and verification
///
/// All verification paths use constant-time comparison. Passwords and the
/// pre-shared key are stored/configured only as digests.
pub mod api_key;
pub mod jwt;
pub mod password;
pub mod verification;
