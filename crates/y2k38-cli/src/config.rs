//! Settings resolution: CLI flag > environment > TOML config file > default.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use y2k38_page::Variant;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

pub const ENV_ADDR: &str = "Y2K38_ADDR";
pub const ENV_VARIANT: &str = "Y2K38_VARIANT";
pub const ENV_CONFIG: &str = "Y2K38_CONFIG";

/// Contents of an optional `y2k38.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub addr: Option<String>,
    pub variant: Option<Variant>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub addr: Option<String>,
    pub variant: Option<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub addr: SocketAddr,
    pub variant: Variant,
}

impl Settings {
    pub fn from_env(overrides: Overrides) -> Result<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    pub fn resolve(overrides: Overrides, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config_path = overrides
            .config
            .or_else(|| env(ENV_CONFIG).map(PathBuf::from));
        let file = match &config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let env_variant = env(ENV_VARIANT)
            .map(|v| v.parse::<Variant>())
            .transpose()
            .with_context(|| format!("invalid {ENV_VARIANT}"))?;
        let variant = overrides
            .variant
            .or(env_variant)
            .or(file.variant)
            .unwrap_or_default();

        let addr = overrides
            .addr
            .or_else(|| env(ENV_ADDR))
            .or(file.addr)
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .with_context(|| format!("invalid listen address '{addr}' (expected IP:PORT)"))?;

        tracing::debug!(%addr, %variant, config = ?config_path, "resolved settings");
        Ok(Self { addr, variant })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("y2k38.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let s = Settings::resolve(Overrides::default(), env_of(&[])).unwrap();
        assert_eq!(s.addr, DEFAULT_ADDR.parse().unwrap());
        assert_eq!(s.variant, Variant::Card);
    }

    #[test]
    fn test_file_then_env_then_flag() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "addr = \"0.0.0.0:9000\"\nvariant = \"terminal\"\n");

        let from_file = Settings::resolve(
            Overrides {
                config: Some(path.clone()),
                ..Default::default()
            },
            env_of(&[]),
        )
        .unwrap();
        assert_eq!(from_file.addr.port(), 9000);
        assert_eq!(from_file.variant, Variant::Terminal);

        let from_env = Settings::resolve(
            Overrides {
                config: Some(path.clone()),
                ..Default::default()
            },
            env_of(&[(ENV_ADDR, "127.0.0.1:9100"), (ENV_VARIANT, "card")]),
        )
        .unwrap();
        assert_eq!(from_env.addr.port(), 9100);
        assert_eq!(from_env.variant, Variant::Card);

        let from_flag = Settings::resolve(
            Overrides {
                config: Some(path),
                addr: Some("127.0.0.1:9200".to_string()),
                variant: Some(Variant::Terminal),
            },
            env_of(&[(ENV_ADDR, "127.0.0.1:9100"), (ENV_VARIANT, "card")]),
        )
        .unwrap();
        assert_eq!(from_flag.addr.port(), 9200);
        assert_eq!(from_flag.variant, Variant::Terminal);
    }

    #[test]
    fn test_config_path_from_env() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "variant = \"terminal\"\n");
        let s = Settings::resolve(
            Overrides::default(),
            env_of(&[(ENV_CONFIG, path.to_str().unwrap())]),
        )
        .unwrap();
        assert_eq!(s.variant, Variant::Terminal);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::resolve(Overrides::default(), env_of(&[(ENV_VARIANT, "neon")]))
            .unwrap_err();
        assert!(format!("{err:#}").contains("unknown variant 'neon'"));

        let err = Settings::resolve(
            Overrides {
                addr: Some("localhost".to_string()),
                ..Default::default()
            },
            env_of(&[]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid listen address"));
    }

    #[test]
    fn test_unknown_config_key_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(&dir, "port = 80\n");
        let err = Settings::resolve(
            Overrides {
                config: Some(path),
                ..Default::default()
            },
            env_of(&[]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = FileConfig::load(Path::new("/nonexistent/y2k38.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
