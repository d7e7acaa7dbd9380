//! File-based configuration provider (YAML)
//!
//! Supports user-level (~/.config/coffee/config.yaml) and workspace-level
//! (.config/coffee/config.yaml) files. Keys missing from the file take their
//! default values.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{CoffeeConfig, ConfigProvider, ConfigResult};

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    User,
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// Reads and writes [`CoffeeConfig`] as YAML, caching the parsed file
///
/// # Example
///
/// ```no_run
/// use coffee_core::config::FileConfigProvider;
///
/// let user = FileConfigProvider::user();
/// let workspace = FileConfigProvider::workspace("/path/to/project");
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
    level: ConfigLevel,
    cache: RwLock<Option<CoffeeConfig>>,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
            cache: RwLock::new(None),
        }
    }

    /// `<config dir>/coffee/config.yaml`
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("coffee").join("config.yaml"), ConfigLevel::User)
    }

    /// `<workspace>/.config/coffee/config.yaml`
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("coffee").join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_file(&self) -> ConfigResult<CoffeeConfig> {
        if !self.path.exists() {
            return Ok(CoffeeConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(CoffeeConfig::default());
        }
        let config: CoffeeConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Cached config, reading the file on first use
    pub fn get_config(&self) -> ConfigResult<CoffeeConfig> {
        if let Some(config) = self.cache.read().as_ref() {
            return Ok(config.clone());
        }
        self.reload()
    }

    /// Re-read the file, replacing the cache
    pub fn reload(&self) -> ConfigResult<CoffeeConfig> {
        let config = self.read_file()?;
        *self.cache.write() = Some(config.clone());
        Ok(config)
    }

    fn write_file(&self, config: &CoffeeConfig) -> ConfigResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(config)?)?;
        *self.cache.write() = Some(config.clone());
        Ok(())
    }

    /// Copy the current file next to itself as `config.yaml.backup`
    pub fn backup(&self) -> ConfigResult<Option<PathBuf>> {
        if !self.exists() {
            return Ok(None);
        }
        let backup_path = self.path.with_extension("yaml.backup");
        fs::copy(&self.path, &backup_path)?;
        Ok(Some(backup_path))
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

#[async_trait]
impl ConfigProvider for FileConfigProvider {
    async fn load(&self) -> ConfigResult<CoffeeConfig> {
        self.get_config()
    }

    async fn save(&self, config: &CoffeeConfig) -> ConfigResult<()> {
        self.write_file(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, ModeConfig};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("config.yaml"), ConfigLevel::User);

        assert!(!provider.exists());
        assert_eq!(provider.load().await.unwrap(), CoffeeConfig::default());
    }

    #[tokio::test]
    async fn test_partial_yaml_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "base_url: http://localhost:9000\nmode: agent\n").unwrap();

        let config = FileConfigProvider::new(&path, ConfigLevel::User).load().await.unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.mode, ModeConfig::Agent);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.verbose_tokens, 350);
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::workspace(dir.path());

        let config = CoffeeConfig::default().with_top_k(8).without_greeting();
        provider.save(&config).await.unwrap();
        assert!(provider.exists());
        assert!(provider.path().ends_with(".config/coffee/config.yaml"));

        let content = fs::read_to_string(provider.path()).unwrap();
        assert!(content.contains("top_k: 8"));

        let reloaded = provider.reload().unwrap();
        assert_eq!(reloaded.top_k, 8);
        assert!(reloaded.greeting.is_none());
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "top_k: 0\n").unwrap();
        let provider = FileConfigProvider::new(&path, ConfigLevel::User);
        assert!(matches!(provider.load().await, Err(ConfigError::Invalid(_))));

        fs::write(&path, "top_k: [not, a, number]\n").unwrap();
        assert!(matches!(provider.reload(), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let provider = FileConfigProvider::new(&path, ConfigLevel::User);

        assert!(provider.backup().unwrap().is_none());

        fs::write(&path, "top_k: 3\n").unwrap();
        let backup_path = provider.backup().unwrap().unwrap();
        assert!(backup_path.exists());
        assert!(backup_path.to_string_lossy().ends_with("config.yaml.backup"));
    }
}
