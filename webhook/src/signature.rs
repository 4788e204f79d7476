//! HMAC-SHA256 signature verification over the raw request body, grounded
//! in `webhook/app.py`'s shared-secret signature check. Verification is
//! mandatory whenever a secret is configured; it is skipped only when no
//! secret is set, which [`crate::config::Secrets::signature_required`]
//! gates to non-production use.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies `signature_hex` (a lowercase-hex HMAC-SHA256 digest) against
/// `body` using `secret`. Returns `false` on any malformed hex input rather
/// than panicking — a bad signature header is attacker-controlled input.
pub fn verify(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(expected_bytes) = hex::decode(signature_hex.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);

    mac.verify_slice(&expected_bytes).is_ok()
}

/// Computes the lowercase-hex HMAC-SHA256 digest of `body` under `secret`,
/// used by tests and by the `/webhook/test` smoke-test route to produce a
/// signature a caller can compare against.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signature_verifies() {
        let secret = "shh";
        let body = b"{\"id\":\"evt_1\"}";
        let sig = sign(secret, body);
        assert!(verify(secret, body, &sig));
    }

    #[test]
    fn tampered_body_fails_verification() {
        let secret = "shh";
        let sig = sign(secret, b"{\"id\":\"evt_1\"}");
        assert!(!verify(secret, b"{\"id\":\"evt_2\"}", &sig));
    }

    #[test]
    fn malformed_hex_fails_cleanly() {
        assert!(!verify("shh", b"body", "not-hex!!"));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let sig = sign("secret-a", b"body");
        assert!(!verify("secret-b", b"body", &sig));
    }
}
