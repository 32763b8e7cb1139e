//! Secret key generation.

use rand::RngCore;

use crate::otp::codec;
use crate::otp::types::{OtpError, OtpErrorKind, DEFAULT_SECRET_BYTES};

/// Generate a cryptographically-random secret of `byte_length` bytes,
/// returned Base32-encoded. Fails with `InvalidArgument` for a zero length.
pub fn generate_secret(byte_length: usize) -> Result<String, OtpError> {
    if byte_length == 0 {
        return Err(OtpError::new(
            OtpErrorKind::InvalidArgument,
            "Secret length must be at least one byte",
        ));
    }
    let mut buf = vec![0u8; byte_length];
    rand::thread_rng().fill_bytes(&mut buf);
    Ok(codec::encode(&buf))
}

/// Generate a secret of the default length (128 bits).
pub fn generate_default_secret() -> String {
    // Length is a non-zero constant, so the argument check cannot trip.
    generate_secret(DEFAULT_SECRET_BYTES).expect("default length is non-zero")
}
