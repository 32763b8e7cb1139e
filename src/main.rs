//! smartman2fa – thin CLI over the stateless OTP core.
//!
//! Usage:
//!   smartman2fa generate-key --bytes 16
//!   smartman2fa generate-enrollment -a frank@example.com -k JBSWY3DPEHPK3PXP
//!   smartman2fa validate-pin -k JBSWY3DPEHPK3PXP -p 123456
//!
//! Exit code is 0 when the operation succeeds (and, for validate-pin, the
//! PIN matches); non-zero otherwise.

mod cli;
mod logging;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use smartman_2fa::otp::{core, enroll, secret, Algorithm, DEFAULT_DIGITS, DEFAULT_PERIOD};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(&cli.log_dir) {
        eprintln!("failed to set up logging: {e:#}");
        return ExitCode::FAILURE;
    }
    logging::purge_old_logs(&cli.log_dir);

    info!("starting smartman2fa");
    let outcome = run(cli.command);
    info!("exiting smartman2fa");
    match outcome {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::GenerateKey(args) => {
            let key = secret::generate_secret(args.bytes)?;
            println!("{key}");
            info!("generated a new {}-byte secret key", args.bytes);
            Ok(ExitCode::SUCCESS)
        }

        Commands::GenerateEnrollment(args) => {
            let algorithm = Algorithm::for_secure_mode(args.secure);
            let artifact =
                enroll::build_enrollment(&args.issuer, &args.account, &args.secret, algorithm)?;

            fs::create_dir_all(&args.out_dir)
                .with_context(|| format!("creating {}", args.out_dir.display()))?;

            let setup_path = args.out_dir.join("setup_code.txt");
            fs::write(&setup_path, format!("{}\n", artifact.manual_entry_key))
                .with_context(|| format!("writing {}", setup_path.display()))?;
            info!("setup code written to {}", setup_path.display());

            let qr_path = args.out_dir.join("qrcode.png");
            fs::write(&qr_path, &artifact.png)
                .with_context(|| format!("writing {}", qr_path.display()))?;
            info!("QR code written to {}", qr_path.display());

            println!("{}", artifact.payload_uri);
            info!(
                "enrollment generated for account {} (algorithm {})",
                args.account, algorithm
            );
            Ok(ExitCode::SUCCESS)
        }

        Commands::ValidatePin(args) => {
            let algorithm = Algorithm::for_secure_mode(args.secure);
            let valid = core::validate(
                &args.secret,
                &args.pin,
                args.tolerance,
                DEFAULT_DIGITS,
                DEFAULT_PERIOD,
                algorithm,
            )?;
            if valid {
                info!("the pin code is valid");
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                info!("the pin code is invalid");
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
