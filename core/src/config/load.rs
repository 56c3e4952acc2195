use std::path::{Path, PathBuf};

use super::types::{AppConfig, ProviderConfig};
use crate::provider::ProviderKind;

/// Default data directory: ~/.tmstore
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".tmstore"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {}: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse {}: {e}", path.display()))?;
    Ok(cfg)
}

/// Loads configuration from, in priority order, `explicit`,
/// `~/.tmstore/config.toml` and `./config.toml`, then applies overrides.
/// `provider` comes from the command line and beats `TMSTORE_PROVIDER`.
pub fn load_default(
    explicit: Option<&Path>,
    provider: Option<ProviderKind>,
) -> anyhow::Result<AppConfig> {
    let mut cfg = match explicit {
        Some(path) => load_from_path(path)?,
        None => {
            let home_config = get_data_dir().ok().map(|d| d.join("config.toml"));
            let local_config = Path::new("config.toml");
            match home_config.filter(|p| p.exists()) {
                Some(path) => load_from_path(&path)?,
                None if local_config.exists() => load_from_path(local_config)?,
                None => AppConfig::default(),
            }
        }
    };

    apply_overrides(&mut cfg, provider, |key| std::env::var(key).ok());
    Ok(cfg)
}

/// Command-line and environment overrides. The provider kind is settled
/// first so the `TMSTORE_REMOTE_*` values land on the final provider table.
/// `lookup` abstracts the process environment.
pub fn apply_overrides<F>(cfg: &mut AppConfig, provider: Option<ProviderKind>, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let from_env = get("TMSTORE_PROVIDER").and_then(|v| match v.parse::<ProviderKind>() {
        Ok(kind) => Some(kind),
        Err(e) => {
            tracing::warn!(target: "tmstore.config", "ignoring TMSTORE_PROVIDER: {e}");
            None
        }
    });
    if let Some(kind) = provider.or(from_env) {
        if kind != cfg.provider.kind() {
            cfg.provider = ProviderConfig::for_kind(kind);
        }
    }

    if let ProviderConfig::Remote(ref mut remote) = cfg.provider {
        if let Some(v) = get("TMSTORE_REMOTE_URL") {
            remote.base_url = v;
        }
        if let Some(v) = get("TMSTORE_REMOTE_TOKEN") {
            remote.token = v;
        }
        if let Some(v) = get("TMSTORE_REMOTE_REPO") {
            remote.repo = v;
        }
        if let Some(v) = get("TMSTORE_REMOTE_BRANCH") {
            remote.branch = v;
        }
    }

    if let Some(v) = get("TMSTORE_LOCALE") {
        cfg.ui.locale = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_provider_override_switches_kind() {
        let mut cfg = AppConfig::default();
        apply_overrides(
            &mut cfg,
            None,
            env(&[
                ("TMSTORE_PROVIDER", "remote"),
                ("TMSTORE_REMOTE_URL", "https://td.example.com"),
                ("TMSTORE_REMOTE_TOKEN", "t0k"),
            ]),
        );
        let ProviderConfig::Remote(remote) = &cfg.provider else {
            panic!("expected remote provider");
        };
        assert_eq!(remote.base_url, "https://td.example.com");
        assert_eq!(remote.token, "t0k");
    }

    #[test]
    fn test_remote_overrides_ignored_for_local() {
        let mut cfg = AppConfig::default();
        apply_overrides(&mut cfg, None, env(&[("TMSTORE_REMOTE_URL", "https://x")]));
        assert_eq!(cfg.provider.kind(), ProviderKind::Local);
    }

    #[test]
    fn test_blank_and_invalid_values_ignored() {
        let mut cfg = AppConfig::default();
        apply_overrides(
            &mut cfg,
            None,
            env(&[("TMSTORE_PROVIDER", "carrier-pigeon"), ("TMSTORE_LOCALE", "  ")]),
        );
        assert_eq!(cfg.provider.kind(), ProviderKind::Local);
        assert_eq!(cfg.ui.locale, "en");
    }

    #[test]
    fn test_cli_provider_keeps_remote_env_values() {
        let mut cfg = AppConfig::default();
        apply_overrides(
            &mut cfg,
            Some(ProviderKind::Remote),
            env(&[
                ("TMSTORE_PROVIDER", "local"),
                ("TMSTORE_REMOTE_URL", "https://td.example.com"),
                ("TMSTORE_REMOTE_REPO", "acme/models"),
                ("TMSTORE_REMOTE_BRANCH", "review"),
            ]),
        );
        let ProviderConfig::Remote(remote) = &cfg.provider else {
            panic!("expected remote provider");
        };
        assert_eq!(remote.base_url, "https://td.example.com");
        assert_eq!(remote.repo, "acme/models");
        assert_eq!(remote.branch, "review");
    }

    #[test]
    fn test_cli_provider_matching_config_keeps_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[provider]\nkind = \"remote\"\nrepo = \"acme/models\"\ntimeout_ms = 900"
        )
        .unwrap();
        let mut cfg = load_from_path(file.path()).unwrap();
        apply_overrides(&mut cfg, Some(ProviderKind::Remote), env(&[]));
        let ProviderConfig::Remote(remote) = &cfg.provider else {
            panic!("expected remote provider");
        };
        assert_eq!(remote.repo, "acme/models");
        assert_eq!(remote.timeout_ms, 900);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\nlocale = \"de\"\n[provider]\nkind = \"desktop\"").unwrap();
        let cfg = load_from_path(file.path()).unwrap();
        assert_eq!(cfg.ui.locale, "de");
        assert_eq!(cfg.provider.kind(), ProviderKind::Desktop);
    }
}
