//! Memoized portfolios.
//!
//! A generated portfolio is a pure function of (n_clients, seed, region),
//! so it is computed once and shared for the lifetime of the process.
//! There is no eviction: parameters are effectively constant per run.

use crate::{
    config::GeneratorConfig,
    error::PortfolioResult,
    generator::generate_with,
    portfolio::{ClientRecord, Region},
    types::Seed,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
};

pub type Portfolio = Arc<Vec<ClientRecord>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    pub n_clients: i64,
    pub seed: Seed,
    pub region: Region,
}

pub struct DatasetCache {
    config: GeneratorConfig,
    entries: HashMap<DatasetKey, Portfolio>,
}

impl DatasetCache {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// Return the cached portfolio for the key, generating it on first use.
    /// Generation errors are returned and nothing is stored.
    pub fn get_or_generate(
        &mut self,
        n_clients: i64,
        seed: Seed,
        region: Region,
    ) -> PortfolioResult<Portfolio> {
        let key = DatasetKey { n_clients, seed, region };
        if let Some(hit) = self.entries.get(&key) {
            log::trace!("cache hit n_clients={n_clients} seed={seed} region={region}");
            return Ok(Arc::clone(hit));
        }
        let records = Arc::new(generate_with(&self.config, n_clients, seed, region)?);
        self.entries.insert(key, Arc::clone(&records));
        log::debug!("cache: stored portfolio n_clients={n_clients} seed={seed} region={region}");
        Ok(records)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

fn shared_cache() -> &'static Mutex<DatasetCache> {
    static CACHE: OnceLock<Mutex<DatasetCache>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(DatasetCache::default()))
}

/// Process-wide memoized portfolio with the built-in generator parameters.
pub fn shared_portfolio(n_clients: i64, seed: Seed, region: Region) -> PortfolioResult<Portfolio> {
    // A panic while holding the lock cannot leave a half-written entry.
    let mut cache = shared_cache()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    cache.get_or_generate(n_clients, seed, region)
}
