use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Opens the log file in append mode. Later calls are ignored once a file is open.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = open_log(path)
    {
        *logger = Some(file);
    }
}

pub fn info(message: &str) {
    write_line("INFO", message);
}

pub fn warn(message: &str) {
    write_line("WARN", message);
}

pub fn error(message: &str) {
    write_line("ERROR", message);
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn write_entry(out: &mut impl Write, level: &str, message: &str) -> io::Result<()> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(out, "[{}] {:<5} {}", timestamp, level, message)
}

fn write_line(level: &str, message: &str) {
    if let Ok(mut guard) = LOGGER.lock()
        && let Some(logger) = guard.as_mut()
    {
        let _ = write_entry(logger, level, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_before_init_is_silent() {
        warn("nobody is listening");
    }

    #[test]
    fn test_entries_carry_timestamp_and_padded_level() {
        let mut out = Vec::new();
        write_entry(&mut out, "INFO", "bank loaded").unwrap();
        write_entry(&mut out, "ERROR", "store unavailable").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert_eq!(lines[0].find(']'), Some(20));
        assert!(lines[0].ends_with("] INFO  bank loaded"));
        assert!(lines[1].ends_with("] ERROR store unavailable"));
    }

    #[test]
    fn test_log_file_is_created_and_appended() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("logs").join("quiz-bank.log");

        write_entry(&mut open_log(&path).unwrap(), "INFO", "first run").unwrap();
        write_entry(&mut open_log(&path).unwrap(), "WARN", "second run").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("INFO  first run"));
        assert!(content.contains("WARN  second run"));
        assert_eq!(content.lines().count(), 2);
    }
}
