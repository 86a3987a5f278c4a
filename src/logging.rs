//! Log output for the command line tool: every line goes to standard output and
//! is appended to a log file.

use chrono::Local;
use env_logger::{Builder, Target};
use log::{warn, LevelFilter};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub const DEFAULT_LOG_FILE: &str = "nasa_power_fetch.log";

/// Writes everything to standard output and, when present, to a file.
struct Tee {
    stdout: io::Stdout,
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Formats one log line as `2024-05-01 12:00:00 - INFO - message`.
fn format_line(buf: &mut impl Write, level: log::Level, args: &std::fmt::Arguments) -> io::Result<()> {
    writeln!(
        buf,
        "{} - {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        level,
        args
    )
}

/// Installs the global logger.
///
/// `level` is the default; `RUST_LOG` directives take precedence. If the log
/// file cannot be opened, logging continues on standard output only and a
/// warning is emitted. Calling this more than once leaves the first logger in place.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) {
    let (file, open_error) = match log_file.map(open_log_file).transpose() {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };

    let installed = Builder::new()
        .filter_level(level)
        .filter_module("hyper", LevelFilter::Warn)
        .filter_module("hyper_util", LevelFilter::Warn)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("polars", LevelFilter::Warn)
        .parse_default_env()
        .format(|buf, record| format_line(buf, record.level(), record.args()))
        .target(Target::Pipe(Box::new(Tee {
            stdout: io::stdout(),
            file,
        })))
        .try_init()
        .is_ok();

    if let (true, Some(e), Some(path)) = (installed, open_error, log_file) {
        warn!(
            "Could not open log file {}: {}, logging to standard output only",
            path.display(),
            e
        );
    }
}
