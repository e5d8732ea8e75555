use anyhow::Context;
use serde::Deserialize;
use std::{path::Path, path::PathBuf, time::Duration};

use crate::onboard::submission::DEFAULT_DELAY;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub catalog: CatalogSource,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub onboarding: Onboarding,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            catalog: CatalogSource::default(),
            http: HttpConfig::default(),
            onboarding: Onboarding::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// falls back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.to_string_lossy());
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Where the artist fixture comes from. Without a path the bundled one is used.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CatalogSource {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Onboarding {
    pub submit_delay_ms: u64,
    /// how long the server keeps a settled or cancelled registration around
    #[serde(default = "default_retain_settled_ms")]
    pub retain_settled_ms: u64,
}

fn default_retain_settled_ms() -> u64 {
    10 * 60 * 1000
}

impl Onboarding {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn retain_settled(&self) -> Duration {
        Duration::from_millis(self.retain_settled_ms)
    }
}

impl Default for Onboarding {
    fn default() -> Self {
        Self {
            submit_delay_ms: u64::try_from(DEFAULT_DELAY.as_millis()).unwrap_or(2000),
            retain_settled_ms: default_retain_settled_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[catalog]
path = "/srv/artistly/artists.json"

[http]
bind_addr = "0.0.0.0"
port = 3000

[onboarding]
submit_delay_ms = 500
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.version, 1);
        assert_eq!(
            cfg.catalog.path,
            Some(PathBuf::from("/srv/artistly/artists.json"))
        );
        assert_eq!(cfg.http.bind_addr, "0.0.0.0");
        assert_eq!(cfg.http.port, 3000);
        assert_eq!(cfg.onboarding.submit_delay(), Duration::from_millis(500));
        assert_eq!(cfg.onboarding.retain_settled(), Duration::from_secs(600));

        Ok(())
    }

    #[test]
    fn test_missing_sections_use_defaults() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("")?;

        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.catalog.path, None);
        assert_eq!(cfg.http.port, 8080);
        assert_eq!(cfg.onboarding.submit_delay(), DEFAULT_DELAY);

        Ok(())
    }

    #[test]
    fn test_load_or_default_without_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let cfg = Config::load_or_default(&dir.path().join("artistly.toml"))?;
        assert_eq!(cfg.http.bind_addr, "127.0.0.1");
        Ok(())
    }

    #[test]
    fn test_load_from_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("artistly.toml");
        fs::write(&path, "[http]\nbind_addr = \"0.0.0.0\"\nport = 9000\n")?;

        let cfg = Config::load_or_default(&path)?;
        assert_eq!(cfg.http.port, 9000);

        Ok(())
    }

    #[test]
    fn test_load_rejects_bad_toml() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("artistly.toml");
        fs::write(&path, "[http\nport = nope")?;

        assert!(Config::load(&path).is_err());

        Ok(())
    }
}
