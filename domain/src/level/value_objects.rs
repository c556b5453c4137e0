//! Level value object representing a point on the severity scale

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity of a log record (Value Object)
///
/// Levels are totally ordered by [`Level::rank`]: a lower rank is more
/// severe. The derived `Ord` follows declaration order, so
/// `Level::Error < Level::Trace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Http,
    Verbose,
    Debug,
    Trace,
}

/// Result of comparing two levels by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityOrdering {
    MoreSevere,
    LessSevere,
    Equal,
}

impl Level {
    /// Every level, most severe first.
    pub const ALL: [Level; 7] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Http,
        Level::Verbose,
        Level::Debug,
        Level::Trace,
    ];

    /// Integer severity rank; 0 is the most severe.
    pub fn rank(self) -> u8 {
        match self {
            Level::Error => 0,
            Level::Warn => 1,
            Level::Info => 2,
            Level::Http => 3,
            Level::Verbose => 4,
            Level::Debug => 5,
            Level::Trace => 6,
        }
    }

    /// Canonical lowercase name, as written into serialized records
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Http => "http",
            Level::Verbose => "verbose",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    /// Compare `self` against `other` by severity.
    pub fn compare(self, other: Level) -> SeverityOrdering {
        match self.rank().cmp(&other.rank()) {
            std::cmp::Ordering::Less => SeverityOrdering::MoreSevere,
            std::cmp::Ordering::Greater => SeverityOrdering::LessSevere,
            std::cmp::Ordering::Equal => SeverityOrdering::Equal,
        }
    }

    /// Whether a threshold of `self` lets a record at `candidate` through.
    ///
    /// A record passes when it is at least as severe as the threshold.
    pub fn accepts(self, candidate: Level) -> bool {
        candidate.rank() <= self.rank()
    }
}

impl Default for Level {
    /// Returns the default threshold (info)
    fn default() -> Self {
        Level::Info
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "http" => Ok(Level::Http),
            "verbose" => Ok(Level::Verbose),
            "debug" => Ok(Level::Debug),
            "trace" | "silly" => Ok(Level::Trace),
            _ => Err(DomainError::InvalidLevel(s.to_string())),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
