use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which family of backend governs persistence for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Browser-style local login: models are written as files.
    Local,
    /// Desktop shell: saves go to the file the shell opened.
    Desktop,
    /// Git-hosting repository reached over HTTP.
    Remote,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Desktop => "desktop",
            Self::Remote => "remote",
        }
    }

    /// Local and desktop sessions treat the stash as authoritative.
    pub fn is_file_based(self) -> bool {
        matches!(self, Self::Local | Self::Desktop)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "desktop" => Ok(Self::Desktop),
            "remote" | "git" | "github" => Ok(Self::Remote),
            other => Err(format!("unknown provider kind: {other}")),
        }
    }
}
