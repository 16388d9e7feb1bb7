use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use rand::prelude::*;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 for opaque tokens and return as hexadecimal string
///
/// Used for remember and activation token digests: only the digest is
/// persisted, so a leaked database row cannot be replayed as a credential.
pub fn hmac_sha256_token(key: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(token.as_bytes());
    let result = mac.finalize();
    format!("{:x}", result.into_bytes())
}

/// Generate a cryptographically secure opaque token
///
/// # Returns
/// * `String` - A base64-encoded random token (32 bytes)
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let random_bytes: [u8; 32] = rng.random();
    general_purpose::STANDARD.encode(random_bytes)
}
