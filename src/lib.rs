//! # SmartMan 2FA – TOTP toolkit
//!
//! Stateless two-factor authentication core:
//!
//! - **RFC 4226 / 6238** – HOTP & TOTP generation with SHA-1, SHA-256, SHA-512
//! - **Base32 secrets** – RFC 4648 encoding, tolerant decoding, CSPRNG generation
//! - **Enrollment** – `otpauth://` payload URIs, manual entry keys, QR PNG images
//! - **Validation** – drift-tolerant PIN checks with constant-time comparison
//!
//! Every operation is a pure function of its arguments (plus the system clock
//! and the OS random source where noted); the core performs no I/O and keeps
//! no state. The `smartman2fa` binary in this crate is the thin CLI caller.

pub mod otp;
