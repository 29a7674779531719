//! Opaque API token generation and hashing.
//!
//! A token is 32 cryptographically random bytes, URL-safe base64 encoded
//! without padding. The plaintext is returned to the client exactly once at
//! login; only its SHA-256 digest is stored, so a leaked database cannot be
//! replayed as bearer tokens.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a fresh plaintext API token.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();

    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

/// Digest a plaintext token for storage or lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length() {
        // 32 bytes of unpadded base64 is 43 characters
        assert_eq!(generate_token().len(), 43);
    }

    #[test]
    fn test_tokens_are_unique() {
        let first = generate_token();
        let second = generate_token();
        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let token = generate_token();
        assert_eq!(hash_token(&token), hash_token(&token));
    }

    #[test]
    fn test_hash_differs_from_token() {
        let token = generate_token();
        assert_ne!(hash_token(&token), token);
    }
}
