use std::{
    fs::File,
    io::{self, BufWriter, Seek, SeekFrom, Write},
    path::Path,
    process,
    sync::{
        Mutex,
        atomic::{AtomicU8, Ordering},
    },
};

use chrono::Local;

use crate::{Error, Level};

/// Fixed template for line timestamps. The trailing `Z` is a literal part of
/// the template, applied to system time as retrieved.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Tag used by the wrapper methods, which cannot observe their caller.
const UNKNOWN_TAG: &str = "???";

/// Output destination for log lines.
enum Sink {
    File(BufWriter<File>),
    Stdout(BufWriter<io::Stdout>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(writer) => writer.write(buf),
            Sink::Stdout(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(writer) => writer.flush(),
            Sink::Stdout(writer) => writer.flush(),
        }
    }
}

/// Thread-safe logger with level filtering and a buffered, mutex-guarded
/// sink.
///
/// All logging methods take `&self`; share one instance across threads with
/// an `Arc` (or a `'static` borrow). Lines are fully assembled before the
/// sink lock is taken, written with a single write call, and flushed before
/// the call returns, so concurrent callers never interleave partial lines
/// and every emitted line is immediately visible to readers of the sink.
pub struct Logger {
    level: AtomicU8,
    sink: Mutex<Sink>,
}

impl Logger {
    /// Creates a logger writing to `file`, or to standard output if no file
    /// is given. The minimum level defaults to [`Level::Debug`].
    ///
    /// The file handle is owned by the logger from this point and released
    /// by [`close`](Self::close).
    pub fn new(file: Option<File>) -> Self {
        let sink = match file {
            Some(file) => Sink::File(BufWriter::new(file)),
            None => Sink::Stdout(BufWriter::new(io::stdout())),
        };
        Self {
            level: AtomicU8::new(Level::Debug as u8),
            sink: Mutex::new(sink),
        }
    }

    /// Opens the log file at `path` (created if missing, appended to if not)
    /// and creates a logger over it.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let mut file = File::options()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.seek(SeekFrom::End(0))?;
        Ok(Self::new(Some(file)))
    }

    /// Current minimum severity level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Sets the minimum severity level. Takes effect for subsequent calls;
    /// may be called while other threads are logging.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Writes one log line at `level`, tagged with `log_type`, with
    /// `parts` joined by ` : `.
    ///
    /// Calls below the configured minimum level return without taking the
    /// lock or touching the sink.
    ///
    /// # Panics
    /// Panics if the sink cannot be written to or flushed. A broken log sink
    /// is not a recoverable condition during normal logging; the panic also
    /// poisons the sink lock, so no other thread keeps logging past it.
    pub fn log(&self, level: Level, log_type: &str, parts: &[&str]) {
        if level < self.level() {
            return;
        }
        let line = format_line(level, log_type, parts);
        let mut sink = self.sink.lock().expect("log sink lock poisoned");
        sink.write_all(line.as_bytes())
            .expect("Unable to write log line");
        sink.flush().expect("Unable to flush log sink");
    }

    /// Logs a debug-level message.
    ///
    /// A plain method call cannot observe its caller, so the line is tagged
    /// `"???"`; use [`debug!`](crate::debug) to tag with the calling module
    /// path instead.
    pub fn debug(&self, parts: &[&str]) {
        self.log(Level::Debug, UNKNOWN_TAG, parts)
    }

    /// Logs an info-level message. Tagged `"???"`, see [`debug`](Self::debug).
    pub fn info(&self, parts: &[&str]) {
        self.log(Level::Info, UNKNOWN_TAG, parts)
    }

    /// Logs an error-level message. Tagged `"???"`, see [`debug`](Self::debug).
    pub fn error(&self, parts: &[&str]) {
        self.log(Level::Error, UNKNOWN_TAG, parts)
    }

    /// Logs a fatal-level message, then exits the process with status 1.
    ///
    /// The exit is unconditional: it happens even when the message itself
    /// was suppressed by the level threshold.
    pub fn fatal(&self, parts: &[&str]) -> ! {
        self.log(Level::Fatal, UNKNOWN_TAG, parts);
        process::exit(1)
    }

    /// Flushes buffered output and releases the sink.
    ///
    /// Consumes the logger, so a closed logger cannot be logged to or closed
    /// twice. Flush and close failures are reported as distinct
    /// [`Error`] variants: a failed flush means buffered lines were lost, a
    /// failed close means the file handle was not released cleanly. Dropping
    /// a [`File`] cannot report failure, so the file is synced to the OS
    /// before being dropped and sync failures are reported as the close
    /// kind. For a stdout logger only the flush step applies.
    pub fn close(self) -> Result<(), Error> {
        let sink = self
            .sink
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match sink {
            Sink::File(writer) => {
                let file = writer
                    .into_inner()
                    .map_err(|e| Error::Flush(e.into_error()))?;
                file.sync_all().map_err(Error::Close)?;
            }
            Sink::Stdout(mut writer) => writer.flush().map_err(Error::Flush)?,
        }
        Ok(())
    }
}

fn format_line(level: Level, log_type: &str, parts: &[&str]) -> String {
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let mut line = format!("[{timestamp}]-[{}]-[{log_type}] ", level.display_name());
    for (i, part) in parts.iter().enumerate() {
        line.push_str(part);
        if i != parts.len() - 1 {
            line.push_str(" : ");
        }
    }
    line.push('\n');
    line
}

/// Logs a debug-level message tagged with the calling module path.
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.log($crate::Level::Debug, module_path!(), &[$($part),*])
    };
}

/// Logs an info-level message tagged with the calling module path.
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.log($crate::Level::Info, module_path!(), &[$($part),*])
    };
}

/// Logs an error-level message tagged with the calling module path.
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $part:expr)* $(,)?) => {
        $logger.log($crate::Level::Error, module_path!(), &[$($part),*])
    };
}

/// Logs a fatal-level message tagged with the calling module path, then
/// exits the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr $(, $part:expr)* $(,)?) => {{
        $logger.log($crate::Level::Fatal, module_path!(), &[$($part),*]);
        ::std::process::exit(1)
    }};
}

#[test]
fn test_line_shape() {
    let line = format_line(Level::Info, "main", &["server started"]);
    let re = regex::Regex::new(
        r"^\[\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z\]-\[info\]-\[main\] server started\n$",
    )
    .unwrap();
    assert!(re.is_match(&line), "unexpected line: {line:?}");
}

#[test]
fn test_fragment_joining() {
    let line = format_line(Level::Debug, "t", &[]);
    assert!(line.ends_with("]-[debug]-[t] \n"));
    let line = format_line(Level::Debug, "t", &["a"]);
    assert!(line.ends_with("]-[debug]-[t] a\n"));
    let line = format_line(Level::Debug, "t", &["a", "b", "c"]);
    assert!(line.ends_with("]-[debug]-[t] a : b : c\n"));
}

#[test]
fn test_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.log");
    let logger = Logger::create(&path).unwrap();
    logger.log(Level::Info, "main", &["server started"]);
    // flushed after every line, visible before close
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.ends_with("]-[main] server started\n"));
    logger.log(Level::Error, "main", &["bind failed", "retrying"]);
    logger.close().unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.ends_with("]-[error]-[main] bind failed : retrying\n"));
}

#[test]
fn test_level_filtering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filtered.log");
    let logger = Logger::create(&path).unwrap();
    logger.set_level(Level::Error);
    logger.log(Level::Debug, "main", &["dropped"]);
    logger.log(Level::Info, "main", &["dropped"]);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    logger.log(Level::Error, "main", &["kept"]);
    assert!(std::fs::read_to_string(&path).unwrap().ends_with(" kept\n"));
    logger.close().unwrap();
}

#[test]
fn test_create_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("append.log");
    let logger = Logger::create(&path).unwrap();
    logger.log(Level::Info, "first", &["one"]);
    logger.close().unwrap();
    let logger = Logger::create(&path).unwrap();
    logger.log(Level::Info, "second", &["two"]);
    logger.close().unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("]-[first] one"));
    assert!(lines[1].ends_with("]-[second] two"));
}

#[test]
fn test_wrapper_methods_tag_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wrappers.log");
    let logger = Logger::create(&path).unwrap();
    logger.debug(&["d"]);
    logger.info(&["i"]);
    logger.error(&["e"]);
    logger.close().unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("]-[debug]-[???] d\n"));
    assert!(contents.contains("]-[info]-[???] i\n"));
    assert!(contents.contains("]-[error]-[???] e\n"));
}

#[test]
fn test_macros_tag_module_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macros.log");
    let logger = Logger::create(&path).unwrap();
    crate::info!(logger, "hello", "world");
    crate::error!(logger);
    logger.close().unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("]-[info]-[linelog::logger] hello : world\n"));
    assert!(contents.contains("]-[error]-[linelog::logger] \n"));
}
