use std::fmt;

/// Severity of a log message.
///
/// Levels are ordered: a message is emitted only if its level is at or above
/// the logger's configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Debug messages.
    Debug = 0,
    /// Informational messages.
    Info,
    /// Errors.
    Error,
    /// Fatal errors.
    Fatal,
}

/// Display name for each level, indexed by discriminant.
const LEVEL_DISPLAY_NAMES: [&str; 4] = ["debug", "info", "error", "fatal"];

impl Level {
    /// Lowercase display name used in formatted log lines.
    pub fn display_name(self) -> &'static str {
        LEVEL_DISPLAY_NAMES[self as usize]
    }

    /// Reloads a level from its `u8` storage. Out-of-range values fall back
    /// to `Debug`, the default minimum.
    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Info,
            2 => Self::Error,
            3 => Self::Fatal,
            _ => Self::Debug,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[test]
fn test_level_ordering() {
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Error);
    assert!(Level::Error < Level::Fatal);
}

#[test]
fn test_display_names() {
    assert_eq!(Level::Debug.to_string(), "debug");
    assert_eq!(Level::Info.to_string(), "info");
    assert_eq!(Level::Error.to_string(), "error");
    assert_eq!(Level::Fatal.to_string(), "fatal");
}

#[test]
fn test_from_u8_round_trip() {
    for level in [Level::Debug, Level::Info, Level::Error, Level::Fatal] {
        assert_eq!(Level::from_u8(level as u8), level);
    }
    assert_eq!(Level::from_u8(42), Level::Debug);
}
