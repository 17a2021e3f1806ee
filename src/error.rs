use std::io;

use thiserror::Error;

/// Failure reported by [`Logger::close`](crate::Logger::close).
///
/// Flush and close failures stay distinct: a flush failure means buffered
/// lines were lost, a close failure means the file handle could not be
/// released cleanly.
#[derive(Debug, Error)]
pub enum Error {
    /// Buffered log output could not be flushed to the sink.
    #[error("log writer flush failed: {0}")]
    Flush(#[source] io::Error),
    /// The underlying log file could not be closed.
    #[error("log file close failed: {0}")]
    Close(#[source] io::Error),
}

#[test]
fn test_error_display() {
    let err = Error::Flush(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
    assert_eq!(err.to_string(), "log writer flush failed: disk full");
    let err = Error::Close(io::Error::other("bad descriptor"));
    assert_eq!(err.to_string(), "log file close failed: bad descriptor");
}
