//! Logging setup for the CLI: stderr plus a per-day log file.
//!
//! The core library never logs; everything below is caller-side plumbing.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use anyhow::Context;
use chrono::Local;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_PREFIX: &str = "smartman2fa_";
/// Log files older than this are deleted at startup.
const RETENTION_DAYS: u64 = 30;

/// Install a subscriber writing to stderr and to `DIR/smartman2fa_YYYYMMDD.log`.
///
/// The file name carries the local date, so each day's run appends to its
/// own file and rotation needs no long-lived state.
pub fn init(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let name = format!("{}{}.log", LOG_PREFIX, Local::now().format("%Y%m%d"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(&name))
        .with_context(|| format!("opening log file {}", name))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Delete log files older than the retention window. Best-effort; failures
/// to stat or remove individual files are ignored.
pub fn purge_old_logs(dir: &Path) {
    purge_older_than(dir, Duration::from_secs(RETENTION_DAYS * 24 * 60 * 60));
}

fn purge_older_than(dir: &Path, max_age: Duration) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let now = SystemTime::now();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(LOG_PREFIX) || !name.ends_with(".log") {
            continue;
        }
        let Ok(meta) = entry.metadata() else { continue };
        let Ok(modified) = meta.modified() else { continue };
        if now.duration_since(modified).map_or(false, |age| age > max_age) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purge_removes_only_expired_log_files() {
        let dir = tempfile::tempdir().unwrap();
        let old_log = dir.path().join("smartman2fa_20200101.log");
        let other = dir.path().join("notes.txt");
        fs::write(&old_log, "old").unwrap();
        fs::write(&other, "keep").unwrap();

        std::thread::sleep(Duration::from_millis(20));
        purge_older_than(dir.path(), Duration::from_millis(1));

        assert!(!old_log.exists());
        assert!(other.exists());
    }

    #[test]
    fn purge_keeps_fresh_log_files() {
        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join("smartman2fa_20990101.log");
        fs::write(&fresh, "fresh").unwrap();

        purge_older_than(dir.path(), Duration::from_secs(3600));

        assert!(fresh.exists());
    }

    #[test]
    fn purge_on_missing_directory_is_a_no_op() {
        purge_older_than(Path::new("definitely/does/not/exist"), Duration::ZERO);
    }
}
