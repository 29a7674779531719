//! Password hashing with salted SHA-256 digests.
//!
//! Stored format: `BASE64URL(salt)$BASE64URL(SHA256(salt || password))` with
//! a fresh 16-byte random salt per password. Both parts use URL-safe base64
//! encoding without padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; 16];
    rng.fill(&mut salt);

    encode_with_salt(&salt, password)
}

/// Check a password attempt against a stored digest string.
///
/// A stored value that does not parse as `salt$digest` never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_part, _)) = stored.split_once('$') else {
        return false;
    };

    let Ok(salt) = URL_SAFE_NO_PAD.decode(salt_part) else {
        return false;
    };

    encode_with_salt(&salt, password) == stored
}

fn encode_with_salt(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    format!(
        "{}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}
