//! OTP generation and validation — RFC 4226 (HOTP) and RFC 6238 (TOTP).
//!
//! HMAC over an 8-byte big-endian counter, dynamic truncation, and a
//! drift-tolerant verification window with constant-time code comparison.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::otp::codec;
use crate::otp::types::{Algorithm, OtpError, OtpErrorKind};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Raw HMAC-OTP (RFC 4226 §5.3)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute an HOTP code for the given raw key bytes and counter.
pub fn hotp_raw(key: &[u8], counter: u64, digits: u8, algo: Algorithm) -> String {
    let hmac_result = compute_hmac(key, &counter.to_be_bytes(), algo);
    truncate(&hmac_result, digits)
}

/// Compute HMAC(key, message) using the specified algorithm.
fn compute_hmac(key: &[u8], data: &[u8], algo: Algorithm) -> Vec<u8> {
    match algo {
        Algorithm::Sha1 => {
            let mut mac =
                Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha256 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha512 => {
            let mut mac =
                Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Dynamic truncation per RFC 4226 §5.3: low nibble of the last byte picks
/// a 4-byte window, whose MSB is masked before the decimal reduction.
fn truncate(hmac_result: &[u8], digits: u8) -> String {
    let offset = (hmac_result[hmac_result.len() - 1] & 0x0f) as usize;
    let binary = ((hmac_result[offset] as u32 & 0x7f) << 24)
        | ((hmac_result[offset + 1] as u32) << 16)
        | ((hmac_result[offset + 2] as u32) << 8)
        | (hmac_result[offset + 3] as u32);
    let modulus = 10u32.pow(digits as u32);
    let code = binary % modulus;
    format!("{:0>width$}", code, width = digits as usize)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Time-step helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute the time-step counter for a given unix timestamp.
pub fn time_step_at(unix_seconds: u64, period: u32) -> u64 {
    unix_seconds / period as u64
}

/// Seconds remaining until the time-step at `unix_seconds` expires.
pub fn seconds_remaining_at(unix_seconds: u64, period: u32) -> u32 {
    let p = period as u64;
    (p - (unix_seconds % p)) as u32
}

/// Current unix timestamp in seconds.
pub fn current_unix_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOTP (RFC 6238)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Generate a TOTP code from a Base32 secret at an explicit unix timestamp.
///
/// Fails with `InvalidSecret` when the secret does not decode or decodes to
/// an empty key.
pub fn totp_at(
    secret_b32: &str,
    unix_seconds: u64,
    digits: u8,
    period: u32,
    algo: Algorithm,
) -> Result<String, OtpError> {
    let key = decode_key(secret_b32)?;
    let step = time_step_at(unix_seconds, period);
    Ok(hotp_raw(&key, step, digits, algo))
}

/// Generate a TOTP code from a Base32 secret at the current time.
pub fn totp_now(
    secret_b32: &str,
    digits: u8,
    period: u32,
    algo: Algorithm,
) -> Result<String, OtpError> {
    totp_at(secret_b32, current_unix_time(), digits, period, algo)
}

fn decode_key(secret_b32: &str) -> Result<Vec<u8>, OtpError> {
    let key = codec::decode(secret_b32).map_err(|e| {
        OtpError::new(OtpErrorKind::InvalidSecret, "Secret is not valid base-32")
            .with_detail(e.to_string())
    })?;
    if key.is_empty() {
        return Err(OtpError::new(
            OtpErrorKind::InvalidSecret,
            "Secret decodes to an empty key",
        ));
    }
    Ok(key)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Validate a candidate PIN against a Base32 secret at the current time.
///
/// Checks every counter in `[now - tolerance, now + tolerance]` time-steps.
/// A non-matching PIN is an ordinary `Ok(false)`; only a malformed secret
/// is an error.
pub fn validate(
    secret_b32: &str,
    candidate: &str,
    tolerance_steps: u32,
    digits: u8,
    period: u32,
    algo: Algorithm,
) -> Result<bool, OtpError> {
    validate_at(
        secret_b32,
        candidate,
        tolerance_steps,
        digits,
        period,
        algo,
        current_unix_time(),
    )
}

/// Validate at a specific timestamp.
#[allow(clippy::too_many_arguments)]
pub fn validate_at(
    secret_b32: &str,
    candidate: &str,
    tolerance_steps: u32,
    digits: u8,
    period: u32,
    algo: Algorithm,
    unix_seconds: u64,
) -> Result<bool, OtpError> {
    let key = decode_key(secret_b32)?;

    // A candidate of the wrong shape can never match any computed code.
    if candidate.len() != digits as usize || !candidate.chars().all(|c| c.is_ascii_digit()) {
        return Ok(false);
    }

    let current = time_step_at(unix_seconds, period);
    let start = current.saturating_sub(tolerance_steps as u64);
    let end = current + tolerance_steps as u64;

    for counter in start..=end {
        let generated = hotp_raw(&key, counter, digits, algo);
        if constant_time_eq(generated.as_bytes(), candidate.as_bytes()) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Constant-time comparison (to prevent timing attacks on code verification).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
