use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// Log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// Also log to a file under `directory` (or the OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "tmstore_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// `[provider]` table, selected by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    Local(LocalProviderConfig),
    Desktop(DesktopProviderConfig),
    Remote(RemoteProviderConfig),
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::Local(_) => ProviderKind::Local,
            ProviderConfig::Desktop(_) => ProviderKind::Desktop,
            ProviderConfig::Remote(_) => ProviderKind::Remote,
        }
    }

    /// Default settings for a provider kind.
    pub fn for_kind(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Local => ProviderConfig::Local(LocalProviderConfig::default()),
            ProviderKind::Desktop => ProviderConfig::Desktop(DesktopProviderConfig::default()),
            ProviderKind::Remote => ProviderConfig::Remote(RemoteProviderConfig::default()),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Local(LocalProviderConfig::default())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    #[default]
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalProviderConfig {
    /// Where `<title>.json` files are written and read.
    #[serde(default = "default_local_directory")]
    pub directory: String,

    #[serde(default)]
    pub format: SaveFormat,
}

fn default_local_directory() -> String {
    ".".to_string()
}

impl Default for LocalProviderConfig {
    fn default() -> Self {
        Self {
            directory: default_local_directory(),
            format: SaveFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesktopProviderConfig {
    /// Emit modified/closed messages for the shell.
    #[serde(default = "default_host_bridge")]
    pub host_bridge: bool,

    /// File (or fifo) the shell reads host messages from. Stderr when unset;
    /// stdout is reserved for command output.
    #[serde(default)]
    pub host_output: Option<String>,

    #[serde(default)]
    pub format: SaveFormat,
}

fn default_host_bridge() -> bool {
    true
}

impl Default for DesktopProviderConfig {
    fn default() -> Self {
        Self {
            host_bridge: default_host_bridge(),
            host_output: None,
            format: SaveFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteProviderConfig {
    #[serde(default = "default_remote_url")]
    pub base_url: String,

    /// Bearer token; empty means unauthenticated.
    #[serde(default)]
    pub token: String,

    /// `owner/repository`
    #[serde(default)]
    pub repo: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_remote_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for RemoteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_remote_url(),
            token: String::new(),
            repo: String::new(),
            branch: default_branch(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}
