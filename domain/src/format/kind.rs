//! Formatter selection value object

use super::json::JsonFormatter;
use super::simple::SimpleFormatter;
use super::traits::RecordFormatter;
use serde::{Deserialize, Serialize};

/// Named record format, as chosen in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// One JSON object per line (default)
    Json,
    /// `level: message {meta}`
    Simple,
}

impl FormatKind {
    pub fn formatter(self) -> Box<dyn RecordFormatter> {
        match self {
            FormatKind::Json => Box::new(JsonFormatter),
            FormatKind::Simple => Box::new(SimpleFormatter),
        }
    }
}

impl Default for FormatKind {
    fn default() -> Self {
        Self::Json
    }
}
