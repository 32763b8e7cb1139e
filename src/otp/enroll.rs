//! Enrollment artifact assembly: manual entry key, payload URI, QR image.

use crate::otp::codec;
use crate::otp::qr;
use crate::otp::types::{
    Algorithm, EnrollmentArtifact, EnrollmentParams, OtpError, OtpErrorKind,
};
use crate::otp::uri;

/// Characters per block in the manual entry key. Display hint only; the
/// decoder strips the spaces again.
const MANUAL_KEY_BLOCK: usize = 4;

/// Build the enrollment artifacts for a secret.
///
/// Fails with `InvalidArgument` when either label is empty or the secret is
/// not usable Base32. The caller must record which algorithm the secret was
/// enrolled under and pass the same one to validation later.
pub fn build_enrollment(
    issuer: &str,
    account: &str,
    secret_b32: &str,
    algorithm: Algorithm,
) -> Result<EnrollmentArtifact, OtpError> {
    if issuer.trim().is_empty() {
        return Err(OtpError::new(
            OtpErrorKind::InvalidArgument,
            "Issuer label must not be empty",
        ));
    }
    if account.trim().is_empty() {
        return Err(OtpError::new(
            OtpErrorKind::InvalidArgument,
            "Account label must not be empty",
        ));
    }
    let key = codec::decode(secret_b32).map_err(|e| {
        OtpError::new(OtpErrorKind::InvalidArgument, "Secret is not valid base-32")
            .with_detail(e.to_string())
    })?;
    if key.is_empty() {
        return Err(OtpError::new(
            OtpErrorKind::InvalidArgument,
            "Secret decodes to an empty key",
        ));
    }

    let params = EnrollmentParams::new(issuer, account, codec::normalize(secret_b32))
        .with_algorithm(algorithm);
    let payload_uri = uri::build_otpauth_uri(&params);
    let png = qr::text_to_qr_png(&payload_uri)?;

    Ok(EnrollmentArtifact {
        manual_entry_key: manual_entry_key(&params.secret),
        payload_uri,
        png,
    })
}

/// Group a canonical Base32 secret into 4-character blocks for typing.
pub fn manual_entry_key(secret_b32: &str) -> String {
    codec::normalize(secret_b32)
        .as_bytes()
        .chunks(MANUAL_KEY_BLOCK)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}
