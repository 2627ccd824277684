//! Line ending used for inserted line breaks

use serde::{Deserialize, Serialize};

/// Line ending style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,
    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Parse a config value, e.g. "lf", "crlf", "\n" or "\r\n"
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lf" | "\n" | "\\n" => Some(LineEnding::Lf),
            "crlf" | "\r\n" | "\\r\\n" => Some(LineEnding::CrLf),
            _ => None,
        }
    }

    /// Pick the line ending a source file already uses
    pub fn detect(source: &str) -> Self {
        if source.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}
