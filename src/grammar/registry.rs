//! Process-wide grammar registry
//!
//! The registry owns an ordered list of [`GrammarSource`]s and a cache of
//! resolution results. Each tool name is resolved against the sources at
//! most once per process; both hits and misses are cached, so repeated
//! lookups of an unknown tool never touch the filesystem again.
//!
//! Lookup never fails: source errors are logged and treated as "not
//! found", keeping the completion path total.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::config::GrammarConfig;
use crate::grammar::{DirGrammars, EmbeddedGrammars, Grammar, GrammarSource};
use crate::utils;

enum CacheSlot {
    Loaded(Arc<Grammar>),
    Absent,
}

/// Shared, thread-safe store of resolved grammars.
pub struct GrammarRegistry {
    sources: Vec<Box<dyn GrammarSource>>,
    cache: RwLock<HashMap<String, CacheSlot>>,
}

impl GrammarRegistry {
    /// Registry over an explicit list of sources, consulted in order.
    pub fn with_sources(sources: Vec<Box<dyn GrammarSource>>) -> Self {
        Self {
            sources,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Registry serving only the compiled-in grammars.
    pub fn bundled() -> Self {
        Self::with_sources(vec![Box::new(EmbeddedGrammars)])
    }

    /// Registry configured from the `[grammars]` config section.
    ///
    /// The user grammar directory is consulted before the compiled-in
    /// definitions, so a user file can shadow a bundled grammar.
    pub fn from_config(config: &GrammarConfig) -> Self {
        let mut sources: Vec<Box<dyn GrammarSource>> = Vec::new();
        if !config.directory.as_os_str().is_empty() {
            let dir = utils::fs::expand_home(&config.directory);
            sources.push(Box::new(DirGrammars::new(dir)));
        }
        if config.builtin {
            sources.push(Box::new(EmbeddedGrammars));
        }
        Self::with_sources(sources)
    }

    /// Resolve a tool name (case-insensitive) to its grammar.
    ///
    /// # Returns
    /// * `Some(grammar)` if any source knows the tool
    /// * `None` if no source does, or every source that tried failed
    pub fn resolve(&self, tool: &str) -> Option<Arc<Grammar>> {
        let normalized = tool.to_lowercase();

        {
            let cache = self.cache.read().unwrap();
            match cache.get(&normalized) {
                Some(CacheSlot::Loaded(grammar)) => return Some(grammar.clone()),
                Some(CacheSlot::Absent) => return None,
                None => {}
            }
        }

        // Load outside the lock; slow sources must not block readers.
        let loaded = self.load_from_sources(&normalized);

        let mut cache = self.cache.write().unwrap();
        let slot = match cache.entry(normalized) {
            // Another thread finished first; its result wins so every
            // caller sees the same Arc.
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(match loaded {
                Some(grammar) => CacheSlot::Loaded(Arc::new(grammar)),
                None => CacheSlot::Absent,
            }),
        };
        match slot {
            CacheSlot::Loaded(grammar) => Some(grammar.clone()),
            CacheSlot::Absent => None,
        }
    }

    fn load_from_sources(&self, normalized: &str) -> Option<Grammar> {
        for source in &self.sources {
            match source.load(normalized) {
                Ok(Some(grammar)) => return Some(grammar),
                Ok(None) => {}
                Err(e) => {
                    warn!("grammar source failed for '{}': {}", normalized, e);
                }
            }
        }
        debug!("no grammar found for '{}'", normalized);
        None
    }

    /// All grammars known to the registry, sorted by canonical name.
    ///
    /// Names that fail to resolve (for example a malformed user file)
    /// are skipped.
    pub fn tools(&self) -> Vec<Arc<Grammar>> {
        let mut names: Vec<String> = self
            .sources
            .iter()
            .flat_map(|source| source.names())
            .collect();
        names.sort();
        names.dedup();

        names
            .iter()
            .filter_map(|name| self.resolve(name))
            .collect()
    }
}
