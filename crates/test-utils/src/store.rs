//! # In-Memory Transient Store

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow};
use dashmap::DashMap;

/// An in-memory byte store, with a switch to simulate a failing backend.
#[derive(Clone, Debug, Default)]
pub struct Mockstore {
    store: Arc<DashMap<String, Vec<u8>>>,
    broken: Arc<AtomicBool>,
}

impl Mockstore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every subsequent operation.
    pub fn break_store(&self) {
        self.broken.store(true, Ordering::Relaxed);
    }

    pub fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        if self.broken.load(Ordering::Relaxed) {
            return Err(anyhow!("store unavailable"));
        }
        self.store.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.broken.load(Ordering::Relaxed) {
            return Err(anyhow!("store unavailable"));
        }
        Ok(self.store.get(key).map(|bytes| bytes.to_vec()))
    }
}
