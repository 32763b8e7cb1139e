//! `otpauth://totp/...` payload URI generation and parsing per the Google
//! Authenticator key-URI format:
//! <https://github.com/google/google-authenticator/wiki/Key-Uri-Format>
//!
//! Format: `otpauth://totp/ISSUER:ACCOUNT?secret=BASE32&issuer=ISSUER&algorithm=SHA1&digits=6&period=30`
//!
//! Unlike some emitters, the builder always writes `algorithm`, `digits` and
//! `period` explicitly, so the enrolled parameters can never drift from what
//! the verifier later assumes.

use crate::otp::codec;
use crate::otp::types::{Algorithm, EnrollmentParams, OtpError, OtpErrorKind};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Generate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build the `otpauth://` payload URI for an enrollment.
///
/// Labels are percent-encoded; the secret is normalised to canonical Base32.
pub fn build_otpauth_uri(params: &EnrollmentParams) -> String {
    let account = url_encode(&params.account);

    let path = match &params.issuer {
        Some(iss) if !iss.is_empty() => format!("{}:{}", url_encode(iss), account),
        _ => account.clone(),
    };

    let secret = codec::normalize(&params.secret);

    let mut query = vec![format!("secret={}", secret)];
    if let Some(ref iss) = params.issuer {
        query.push(format!("issuer={}", url_encode(iss)));
    }
    query.push(format!("algorithm={}", params.algorithm.uri_name()));
    query.push(format!("digits={}", params.digits));
    query.push(format!("period={}", params.period));

    format!("otpauth://totp/{}?{}", path, query.join("&"))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Parse
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse an `otpauth://totp/...` URI back into its enrollment parameters.
pub fn parse_otpauth_uri(uri: &str) -> Result<EnrollmentParams, OtpError> {
    let url = url::Url::parse(uri).map_err(|e| {
        OtpError::new(OtpErrorKind::InvalidUri, "Invalid URI").with_detail(e.to_string())
    })?;

    if url.scheme() != "otpauth" {
        return Err(OtpError::new(
            OtpErrorKind::InvalidUri,
            format!("Expected scheme 'otpauth', got '{}'", url.scheme()),
        ));
    }
    if url.host_str() != Some("totp") {
        return Err(OtpError::new(
            OtpErrorKind::InvalidUri,
            format!("Unsupported OTP type: {:?}", url.host_str()),
        ));
    }

    // Path is "/ACCOUNT" or "/ISSUER:ACCOUNT".
    let path = url.path();
    let path = path.strip_prefix('/').unwrap_or(path);
    let path_decoded = url_decode(path);

    let (path_issuer, account) = match path_decoded.find(':') {
        Some(pos) => (
            Some(path_decoded[..pos].trim().to_string()),
            path_decoded[pos + 1..].trim().to_string(),
        ),
        None => (None, path_decoded),
    };

    let mut secret = None;
    let mut param_issuer = None;
    let mut algorithm = Algorithm::default();
    let mut digits = crate::otp::types::DEFAULT_DIGITS;
    let mut period = crate::otp::types::DEFAULT_PERIOD;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "secret" => secret = Some(value.to_string()),
            "issuer" => param_issuer = Some(value.to_string()),
            "algorithm" => {
                algorithm = Algorithm::from_str_loose(&value).ok_or_else(|| {
                    OtpError::new(
                        OtpErrorKind::InvalidUri,
                        format!("Unknown algorithm '{}'", value),
                    )
                })?;
            }
            "digits" => {
                if let Ok(d) = value.parse::<u8>() {
                    if (6..=8).contains(&d) {
                        digits = d;
                    }
                }
            }
            "period" => {
                if let Ok(p) = value.parse::<u32>() {
                    if p > 0 {
                        period = p;
                    }
                }
            }
            _ => {} // ignore unknown params
        }
    }

    let secret = secret.ok_or_else(|| {
        OtpError::new(OtpErrorKind::InvalidUri, "Missing 'secret' parameter")
    })?;

    Ok(EnrollmentParams {
        issuer: param_issuer.or(path_issuer),
        account,
        secret,
        algorithm,
        digits,
        period,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  URL encoding helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn url_encode(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                output.push(byte as char);
            }
            _ => output.push_str(&format!("%{:02X}", byte)),
        }
    }
    output
}

fn url_decode(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                result.push(byte as char);
            } else {
                result.push('%');
                result.push_str(&hex);
            }
        } else if c == '+' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> EnrollmentParams {
        EnrollmentParams::new("SmartMan2FA", "user@example.com", "JBSWY3DPEHPK3PXP")
    }

    // ── Generate ─────────────────────────────────────────────────

    #[test]
    fn build_default_uri() {
        let uri = build_otpauth_uri(&params());
        assert_eq!(
            uri,
            "otpauth://totp/SmartMan2FA:user%40example.com?secret=JBSWY3DPEHPK3PXP&issuer=SmartMan2FA&algorithm=SHA1&digits=6&period=30"
        );
    }

    #[test]
    fn build_always_writes_algorithm_digits_period() {
        // Defaults are written out explicitly, never implied.
        let uri = build_otpauth_uri(&params());
        assert!(uri.contains("algorithm=SHA1"));
        assert!(uri.contains("digits=6"));
        assert!(uri.contains("period=30"));
    }

    #[test]
    fn build_secure_mode_uri() {
        let uri = build_otpauth_uri(&params().with_algorithm(Algorithm::Sha512));
        assert!(uri.contains("algorithm=SHA512"));
    }

    #[test]
    fn build_percent_encodes_labels() {
        let p = EnrollmentParams::new("My Corp", "first last@example.com", "ABCDEF");
        let uri = build_otpauth_uri(&p);
        assert!(uri.contains("otpauth://totp/My%20Corp:first%20last%40example.com?"));
        assert!(uri.contains("issuer=My%20Corp"));
    }

    #[test]
    fn build_normalises_secret() {
        let p = EnrollmentParams::new("I", "a", "jbsw y3dp-ehpk 3pxp");
        let uri = build_otpauth_uri(&p);
        assert!(uri.contains("secret=JBSWY3DPEHPK3PXP"));
    }

    #[test]
    fn build_without_issuer_omits_prefix_and_param() {
        let mut p = params();
        p.issuer = None;
        let uri = build_otpauth_uri(&p);
        assert!(uri.starts_with("otpauth://totp/user%40example.com?"));
        assert!(!uri.contains("issuer="));
    }

    // ── Parse ────────────────────────────────────────────────────

    #[test]
    fn parse_basic() {
        let p = parse_otpauth_uri(
            "otpauth://totp/Example:alice@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example",
        )
        .unwrap();
        assert_eq!(p.issuer.as_deref(), Some("Example"));
        assert_eq!(p.account, "alice@example.com");
        assert_eq!(p.secret, "JBSWY3DPEHPK3PXP");
        assert_eq!(p.algorithm, Algorithm::Sha1);
        assert_eq!(p.digits, 6);
        assert_eq!(p.period, 30);
    }

    #[test]
    fn parse_all_params() {
        let p = parse_otpauth_uri(
            "otpauth://totp/Acme:u?secret=ABC&issuer=Acme&algorithm=SHA256&digits=8&period=60",
        )
        .unwrap();
        assert_eq!(p.algorithm, Algorithm::Sha256);
        assert_eq!(p.digits, 8);
        assert_eq!(p.period, 60);
    }

    #[test]
    fn parse_issuer_from_path_only() {
        let p = parse_otpauth_uri("otpauth://totp/Acme:user@ex.com?secret=ABC").unwrap();
        assert_eq!(p.issuer.as_deref(), Some("Acme"));
        assert_eq!(p.account, "user@ex.com");
    }

    #[test]
    fn parse_errors() {
        assert!(parse_otpauth_uri("https://example.com").is_err());
        assert!(parse_otpauth_uri("otpauth://hotp/X?secret=ABC&counter=1").is_err());
        assert!(parse_otpauth_uri("otpauth://totp/X?issuer=NoSecret").is_err());
        assert!(parse_otpauth_uri("otpauth://totp/X?secret=ABC&algorithm=MD5").is_err());
        assert!(parse_otpauth_uri("not a uri").is_err());
    }

    #[test]
    fn parse_error_kind_is_invalid_uri() {
        let err = parse_otpauth_uri("https://example.com").unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidUri);
    }

    // ── Roundtrip ────────────────────────────────────────────────

    #[test]
    fn build_parse_roundtrip() {
        let original = params().with_algorithm(Algorithm::Sha512);
        let reparsed = parse_otpauth_uri(&build_otpauth_uri(&original)).unwrap();
        assert_eq!(reparsed, original);
    }

    // ── URL encoding helpers ─────────────────────────────────────

    #[test]
    fn url_encode_basic() {
        assert_eq!(url_encode("hello"), "hello");
        assert_eq!(url_encode("hello world"), "hello%20world");
        assert_eq!(url_encode("a@b"), "a%40b");
    }

    #[test]
    fn url_decode_basic() {
        assert_eq!(url_decode("hello%20world"), "hello world");
        assert_eq!(url_decode("a%40b"), "a@b");
        assert_eq!(url_decode("no+plus"), "no plus");
    }
}
