//! In-memory configuration provider

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{CoffeeConfig, ConfigProvider, ConfigResult};

/// Holds a configuration in memory; used by tests and embedders
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    config: RwLock<CoffeeConfig>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CoffeeConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }
}

#[async_trait]
impl ConfigProvider for MemoryConfigProvider {
    async fn load(&self) -> ConfigResult<CoffeeConfig> {
        Ok(self.config.read().clone())
    }

    async fn save(&self, config: &CoffeeConfig) -> ConfigResult<()> {
        config.validate()?;
        *self.config.write() = config.clone();
        Ok(())
    }
}
