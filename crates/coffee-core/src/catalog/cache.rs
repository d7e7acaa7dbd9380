//! Tool catalog cache
//!
//! Filled once at session start from `GET /all-tools` and read-only
//! afterwards. Only the agent mode uses it, to size the "without offload"
//! baseline from real description lengths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::Logger;
use crate::service::{CatalogLoadError, RetrievalService};
use crate::types::{ToolCatalogEntry, ToolId};

/// Result of a load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLoad {
    /// Catalog fetched; holds the entry count
    Loaded(usize),
    /// Fetch failed; the cache stays empty
    Failed,
    /// A load was already attempted this session
    AlreadyAttempted,
    /// The session's mode does not use the catalog
    Skipped,
}

/// Write-once cache of the full tool catalog
pub struct ToolCatalog {
    entries: RwLock<Vec<ToolCatalogEntry>>,
    attempted: AtomicBool,
    loaded: AtomicBool,
    logger: Arc<dyn Logger>,
}

impl ToolCatalog {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            attempted: AtomicBool::new(false),
            loaded: AtomicBool::new(false),
            logger,
        }
    }

    /// Fetch the catalog once, best effort
    ///
    /// Failures are logged and leave the cache empty; they never reach the
    /// conversation. Calls after the first do nothing.
    pub async fn load(&self, service: &dyn RetrievalService) -> CatalogLoad {
        if self.attempted.swap(true, Ordering::SeqCst) {
            self.logger.debug("[ToolCatalog] Load already attempted, skipping");
            return CatalogLoad::AlreadyAttempted;
        }

        match self.fetch(service).await {
            Ok(entries) => {
                let count = entries.len();
                self.logger.info(&format!(
                    "[ToolCatalog] Loaded {} tools from {} service",
                    count,
                    service.name()
                ));
                *self.entries.write() = entries;
                self.loaded.store(true, Ordering::SeqCst);
                CatalogLoad::Loaded(count)
            }
            Err(e) => {
                self.logger.warn(&format!("[ToolCatalog] {} (savings will report 0%)", e));
                CatalogLoad::Failed
            }
        }
    }

    async fn fetch(&self, service: &dyn RetrievalService) -> Result<Vec<ToolCatalogEntry>, CatalogLoadError> {
        Ok(service.all_tools().await?)
    }

    /// Copy of the cached entries
    pub fn entries(&self) -> Vec<ToolCatalogEntry> {
        self.entries.read().clone()
    }

    /// Run `f` against the cached entries without copying them
    pub fn with_entries<R>(&self, f: impl FnOnce(&[ToolCatalogEntry]) -> R) -> R {
        f(&self.entries.read())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// True once a load attempt has started, whatever its outcome
    pub fn is_attempted(&self) -> bool {
        self.attempted.load(Ordering::SeqCst)
    }

    /// True once a fetch succeeded, even if the router's catalog was empty
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    pub fn description_for(&self, id: &ToolId) -> Option<String> {
        self.entries
            .read()
            .iter()
            .find(|e| e.id.as_ref() == Some(id))
            .map(|e| e.description.clone())
    }
}

impl std::fmt::Debug for ToolCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCatalog")
            .field("len", &self.len())
            .field("attempted", &self.is_attempted())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
