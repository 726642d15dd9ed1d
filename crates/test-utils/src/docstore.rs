//! # Document Store

use std::sync::Arc;

use anyhow::{Result, anyhow};
use credibil_ssi::DocumentFetcher;
use dashmap::DashMap;
use serde_json::Value;
use url::Url;

/// In-memory [`DocumentFetcher`] keyed by URL.
///
/// Clones share the same underlying store.
#[derive(Clone, Debug, Default)]
pub struct DocStore {
    docs: Arc<DashMap<String, Vec<u8>>>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `doc` as the response for `url`.
    pub fn insert(&self, url: &str, doc: &Value) {
        self.insert_raw(url, doc.to_string().into_bytes());
    }

    /// Serve raw bytes as the response for `url`.
    pub fn insert_raw(&self, url: &str, bytes: Vec<u8>) {
        self.docs.insert(url.to_string(), bytes);
    }

    /// Stop serving `url`.
    pub fn remove(&self, url: &str) {
        self.docs.remove(url);
    }
}

impl DocumentFetcher for DocStore {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let Some(bytes) = self.docs.get(url.as_str()) else {
            return Err(anyhow!("404 Not Found: {url}"));
        };
        Ok(bytes.to_vec())
    }
}
