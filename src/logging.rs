/// Diagnostic logging setup
///
/// The library only emits through the `log` facade. The binary calls
/// `init` once at start-up to route records to stderr and a log file.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the diagnostic log inside the log directory
pub const LOG_FILE_NAME: &str = "processor.log";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to open log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Copies every formatted line to stderr and the log file
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Create `log_dir` and install the global logger
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
/// Returns the path of the log file.
pub fn init(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    let path = log_dir.join(LOG_FILE_NAME);
    let file = open_log_file(log_dir, &path).map_err(|source| LoggingError::Io {
        path: path.clone(),
        source,
    })?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(Tee { file })))
        .try_init()?;

    Ok(path)
}

fn open_log_file(log_dir: &Path, path: &Path) -> io::Result<File> {
    fs::create_dir_all(log_dir)?;
    OpenOptions::new().create(true).append(true).open(path)
}
