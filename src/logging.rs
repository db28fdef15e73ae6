//! File logger for the terminal front-end.
//!
//! The terminal is in raw mode while playing, so nothing may go to stdout. When a log
//! path is configured every line goes to that file instead; otherwise [`vlog!`] is a
//! cheap flag check.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Open (truncate) `path` and turn logging on.
pub fn init_log_file(path: &str) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    match LOG_FILE.lock() {
        Ok(mut slot) => *slot = Some(file),
        Err(poisoned) => *poisoned.into_inner() = Some(file),
    }
    VERBOSE_LOGGING.store(true, Ordering::Relaxed);
    Ok(())
}

/// Append one line, prefixed with milliseconds since the epoch.
pub fn write_log(message: &str) {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(file) = slot.as_mut() {
            let _ = writeln!(file, "{} {}", ts, message);
            let _ = file.flush();
        }
    }
}

/// Close the log file and turn logging off.
pub fn close_log() {
    VERBOSE_LOGGING.store(false, Ordering::Relaxed);
    if let Ok(mut slot) = LOG_FILE.lock() {
        *slot = None;
    }
}

pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// Log a formatted line to the log file, if one is open.
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::write_log(&message);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_reach_the_file() {
        let path = std::env::temp_dir().join(format!("match3-log-{}.log", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        init_log_file(&path_str).unwrap();
        assert!(is_verbose());
        crate::vlog!("swap {} -> {}", 1, 2);
        close_log();
        assert!(!is_verbose());
        crate::vlog!("dropped");

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(text.contains("swap 1 -> 2"));
        assert!(!text.contains("dropped"));
    }
}
