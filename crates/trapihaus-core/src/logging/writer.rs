//! Append-only JSONL file writer.
//!
//! Each binary writes to its own file per day:
//! `<logs_dir>/2026-10-17_desktop.jsonl`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::entry::JsonLogEntry;

/// Writer that appends log entries to a JSONL file.
pub struct LogWriter {
    instance: String,
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl LogWriter {
    /// Open today's file for `instance`, creating `logs_dir` if needed.
    pub fn new(logs_dir: impl AsRef<Path>, instance: impl Into<String>) -> std::io::Result<Self> {
        let instance = instance.into();
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir)?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = logs_dir.join(format!("{}_{}.jsonl", date, instance));

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            instance,
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one entry as a single line and flush.
    pub fn write(&self, entry: &JsonLogEntry) -> std::io::Result<()> {
        let json = entry
            .to_json_line()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        writer.flush()
    }

    pub fn flush(&self) -> std::io::Result<()> {
        self.writer.lock().flush()
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Read back every entry in `logs_dir`, sorted by timestamp. Unparseable
/// lines are skipped.
pub fn read_entries(logs_dir: impl AsRef<Path>) -> std::io::Result<Vec<JsonLogEntry>> {
    let logs_dir = logs_dir.as_ref();
    if !logs_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(logs_dir)? {
        let path = dir_entry?.path();
        if path.extension().map_or(false, |e| e == "jsonl") {
            let content = fs::read_to_string(&path)?;
            entries.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .filter_map(|line| JsonLogEntry::from_json_line(line).ok()),
            );
        }
    }

    entries.sort_by(|a, b| a.ts.cmp(&b.ts));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writer_creates_file() {
        let temp = TempDir::new().unwrap();
        let logs_dir = temp.path().join("logs");

        let writer = LogWriter::new(&logs_dir, "cli").unwrap();

        assert!(writer.path().exists());
        assert!(writer.path().to_string_lossy().ends_with("_cli.jsonl"));
        assert_eq!(writer.instance(), "cli");
    }

    #[test]
    fn test_read_entries_skips_garbage() {
        let temp = TempDir::new().unwrap();
        let logs_dir = temp.path().join("logs");

        let cli = LogWriter::new(&logs_dir, "cli").unwrap();
        let desktop = LogWriter::new(&logs_dir, "desktop").unwrap();
        cli.write(&JsonLogEntry::new("info", "cli", "t", "Signed in")).unwrap();
        desktop
            .write(&JsonLogEntry::new("info", "desktop", "t", "Session loaded"))
            .unwrap();
        let cli_path = cli.path().to_path_buf();
        drop(cli);
        drop(desktop);

        let mut raw = fs::OpenOptions::new().append(true).open(&cli_path).unwrap();
        writeln!(raw, "not json").unwrap();
        writeln!(raw).unwrap();

        let entries = read_entries(&logs_dir).unwrap();
        assert_eq!(entries.len(), 2);
        let msgs: Vec<_> = entries.iter().map(|e| e.msg.as_str()).collect();
        assert!(msgs.contains(&"Signed in"));
        assert!(msgs.contains(&"Session loaded"));
    }

    #[test]
    fn test_read_entries_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert!(read_entries(temp.path().join("nope")).unwrap().is_empty());
    }
}
