//! Core types for the 2FA toolkit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default secret length in bytes (128 bits; RFC 4226 asks for ≥ 80).
pub const DEFAULT_SECRET_BYTES: usize = 16;
/// Default code width in decimal digits.
pub const DEFAULT_DIGITS: u8 = 6;
/// Default TOTP time-step in seconds.
pub const DEFAULT_PERIOD: u32 = 30;
/// Default drift tolerance in time-steps on either side of "now".
pub const DEFAULT_TOLERANCE: u32 = 1;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Algorithm
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Hash algorithm used for HMAC-based OTP.
///
/// The same value must be threaded through enrollment (the URI `algorithm`
/// parameter) and validation (HMAC hash selection); a secret enrolled under
/// one algorithm never validates under another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Sha1
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri_name())
    }
}

impl Algorithm {
    /// Parse from a case-insensitive string.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SHA1" | "SHA-1" | "HMACSHA1" | "HMAC-SHA1" => Some(Self::Sha1),
            "SHA256" | "SHA-256" | "HMACSHA256" | "HMAC-SHA256" => Some(Self::Sha256),
            "SHA512" | "SHA-512" | "HMACSHA512" | "HMAC-SHA512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// URI-safe name for `otpauth://` parameters.
    pub fn uri_name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }

    /// Algorithm for the caller-facing "secure mode" toggle: SHA-1 for
    /// broadest authenticator compatibility, SHA-512 when requested.
    pub fn for_secure_mode(secure: bool) -> Self {
        if secure {
            Self::Sha512
        } else {
            Self::Sha1
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Enrollment
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parameters carried by an `otpauth://totp/...` enrollment URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentParams {
    /// Issuer (e.g. "SmartMan2FA").
    pub issuer: Option<String>,
    /// Account label (e.g. "user@example.com").
    pub account: String,
    /// Base-32 encoded secret key.
    pub secret: String,
    /// Hash algorithm.
    pub algorithm: Algorithm,
    /// Number of digits in the generated code.
    pub digits: u8,
    /// Time period in seconds.
    pub period: u32,
}

impl EnrollmentParams {
    /// Enrollment with crate defaults (SHA-1, 6 digits, 30 s).
    pub fn new(
        issuer: impl Into<String>,
        account: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            issuer: Some(issuer.into()),
            account: account.into(),
            secret: secret.into(),
            algorithm: Algorithm::default(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
        }
    }

    /// Builder: set algorithm.
    pub fn with_algorithm(mut self, algo: Algorithm) -> Self {
        self.algorithm = algo;
        self
    }
}

/// Everything a caller needs to enroll a secret in an authenticator app.
///
/// All three fields are derived from the same (issuer, account, secret)
/// triple; the PNG is a regenerable rendering of `payload_uri` and carries
/// no state of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentArtifact {
    /// Base-32 secret grouped into 4-character blocks for manual typing.
    pub manual_entry_key: String,
    /// The `otpauth://totp/...` URI consumed by authenticator apps.
    pub payload_uri: String,
    /// PNG image of a QR code whose payload is exactly `payload_uri`.
    pub png: Vec<u8>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Error type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Error kind for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtpErrorKind {
    /// Input is not valid RFC 4648 Base32.
    InvalidEncoding,
    /// Secret fails to decode or decodes to an empty key.
    InvalidSecret,
    /// Missing/empty label, zero byte length, and similar caller mistakes.
    InvalidArgument,
    /// Malformed `otpauth://` URI.
    InvalidUri,
    /// QR matrix or PNG encoding failed.
    QrEncodeFailed,
}

/// Crate-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpError {
    pub kind: OtpErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl fmt::Display for OtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(d) = &self.detail {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for OtpError {}

impl OtpError {
    pub fn new(kind: OtpErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
