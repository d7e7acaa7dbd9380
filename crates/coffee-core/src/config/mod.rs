//! Configuration for the COFFEE client
//!
//! - `MemoryConfigProvider`: in-memory for tests
//! - `FileConfigProvider`: YAML file-based (user/workspace level)
//!
//! Environment overrides (`COFFEE_BASE_URL`, `COFFEE_MODE`, `COFFEE_TOP_K`) are
//! applied on top of whatever a provider returns via
//! [`CoffeeConfig::apply_env_overrides`].

mod file;
mod memory;
mod traits;

pub use file::{ConfigLevel, FileConfigProvider};
pub use memory::MemoryConfigProvider;
pub use traits::{
    CoffeeConfig, ConfigError, ConfigProvider, ConfigResult, ModeConfig, DEFAULT_BASE_URL,
    DEFAULT_GREETING,
};
