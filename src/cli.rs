//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use smartman_2fa::otp::{DEFAULT_SECRET_BYTES, DEFAULT_TOLERANCE};

#[derive(Parser)]
#[command(name = "smartman2fa")]
#[command(version)]
#[command(about = "TOTP two-factor key generation, enrollment and PIN validation", long_about = None)]
pub struct Cli {
    /// Directory for the daily log files
    #[arg(long, global = true, default_value = "logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new random Base32 secret key
    GenerateKey(GenerateKeyArgs),

    /// Build enrollment artifacts: manual entry key, otpauth:// URI, QR image
    GenerateEnrollment(GenerateEnrollmentArgs),

    /// Validate a one-time PIN against a secret
    ValidatePin(ValidatePinArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateKeyArgs {
    /// Secret length in bytes
    #[arg(short, long, default_value_t = DEFAULT_SECRET_BYTES)]
    pub bytes: usize,
}

#[derive(Parser, Debug)]
pub struct GenerateEnrollmentArgs {
    /// Issuer label shown in the authenticator app
    #[arg(short, long, default_value = "SmartMan2FA")]
    pub issuer: String,

    /// Account label (e.g. an e-mail address)
    #[arg(short, long)]
    pub account: String,

    /// Base32 secret key to enroll
    #[arg(short = 'k', long)]
    pub secret: String,

    /// Enroll with SHA-512 instead of SHA-1; validation must then also
    /// pass --secure
    #[arg(long, default_value = "false")]
    pub secure: bool,

    /// Directory for setup_code.txt and qrcode.png
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ValidatePinArgs {
    /// Base32 secret key the PIN is checked against
    #[arg(short = 'k', long)]
    pub secret: String,

    /// Candidate PIN code
    #[arg(short, long)]
    pub pin: String,

    /// Accepted clock drift, in 30-second steps on either side of now
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u32,

    /// The secret was enrolled in secure (SHA-512) mode
    #[arg(long, default_value = "false")]
    pub secure: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_key_defaults() {
        let cli = Cli::parse_from(["smartman2fa", "generate-key"]);
        match cli.command {
            Commands::GenerateKey(args) => assert_eq!(args.bytes, DEFAULT_SECRET_BYTES),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn parse_validate_pin_short_flags() {
        let cli = Cli::parse_from([
            "smartman2fa",
            "validate-pin",
            "-k",
            "JBSWY3DPEHPK3PXP",
            "-p",
            "123456",
        ]);
        match cli.command {
            Commands::ValidatePin(args) => {
                assert_eq!(args.secret, "JBSWY3DPEHPK3PXP");
                assert_eq!(args.pin, "123456");
                assert_eq!(args.tolerance, DEFAULT_TOLERANCE);
                assert!(!args.secure);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn parse_enrollment_with_secure_mode() {
        let cli = Cli::parse_from([
            "smartman2fa",
            "generate-enrollment",
            "-a",
            "frank@example.com",
            "-k",
            "JBSWY3DPEHPK3PXP",
            "--secure",
        ]);
        match cli.command {
            Commands::GenerateEnrollment(args) => {
                assert_eq!(args.issuer, "SmartMan2FA");
                assert_eq!(args.account, "frank@example.com");
                assert!(args.secure);
            }
            _ => panic!("wrong subcommand"),
        }
    }
}
