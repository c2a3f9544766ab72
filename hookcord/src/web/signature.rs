//! GitHub webhook signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw request body and
//! sends the result in `X-Hub-Signature-256` as `sha256=<hex-digest>`.
//! Reference: https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Verify a GitHub webhook signature.
///
/// # Arguments
///
/// * `secret` - The shared webhook secret
/// * `body` - The request body exactly as received, before any parsing
/// * `signature` - The `X-Hub-Signature-256` header value, if present
///
/// # Returns
///
/// `true` only if the header matches the expected signature.
pub fn verify_signature(secret: &str, body: &[u8], signature: Option<&str>) -> bool {
    let Some(signature) = signature else {
        warn!("github_signature_missing");
        return false;
    };

    let expected_signature = match compute_signature(secret, body) {
        Some(s) => s,
        None => {
            warn!("github_signature_invalid_key");
            return false;
        }
    };

    let valid = constant_time_compare(&expected_signature, signature);

    if !valid {
        warn!(
            expected_length = expected_signature.len(),
            actual_length = signature.len(),
            "github_signature_mismatch"
        );
    }

    valid
}

/// Compute the `sha256=<hex>` signature of `body` under `secret`.
pub fn compute_signature(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body);

    Some(format!(
        "{}{}",
        SIGNATURE_PREFIX,
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    xor_accumulate(a.as_bytes(), b.as_bytes()) == 0
}

/// OR of the byte-wise XOR of `a` and `b`.
///
/// The loop never breaks early: every byte pair is folded in, so the work
/// done does not depend on where the inputs first differ.
fn xor_accumulate(a: &[u8], b: &[u8]) -> u8 {
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b) {
        result |= x ^ y;
    }
    result
}
