//! Memoised analysis keyed by cost-model fingerprint.
//!
//! Interactive callers re-analyse the same model on every keystroke
//! that does not change a field. [`AnalysisCache`] wraps an
//! [`Analyzer`] and answers repeated lookups for value-identical
//! models from a `HashMap` keyed by [`CostModel::fingerprint`].
//!
//! Entries never expire on their own. Callers that persist models
//! should [`invalidate`](AnalysisCache::invalidate) after an edit or
//! [`clear`](AnalysisCache::clear) between tenants.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use precio_core::model::CostModel;

use crate::analysis::{AnalysisError, AnalysisResult, Analyzer};

/// Counters describing cache effectiveness.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a stored result.
    pub hits: u64,
    /// Lookups that ran a fresh analysis.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    ///
    /// Returns 0.0 before any lookup has occurred.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Resets both counters to zero.
    pub fn reset(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }
}

/// Memoising wrapper around [`Analyzer`].
///
/// Two models with equal field values share one entry; any field
/// change produces a new fingerprint and therefore a fresh analysis.
/// Failed analyses are never stored, so an invalid model keeps
/// returning its error until corrected.
///
/// # Examples
///
/// ```
/// use precio_core::model::CostModel;
/// use precio_engine::cache::AnalysisCache;
///
/// let mut cache = AnalysisCache::new();
/// let model = CostModel::starter();
///
/// cache.get_or_compute(&model).unwrap();
/// cache.get_or_compute(&model).unwrap();
///
/// assert_eq!(cache.stats().misses, 1);
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnalysisCache {
    analyzer: Analyzer,
    entries: HashMap<u64, AnalysisResult>,
    stats: CacheStats,
}

impl AnalysisCache {
    /// Creates an empty cache with a default analyzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored result for `model`, analysing on first sight.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidModel`] when the model fails
    /// validation; nothing is cached in that case.
    pub fn get_or_compute(&mut self, model: &CostModel) -> Result<&AnalysisResult, AnalysisError> {
        match self.entries.entry(model.fingerprint()) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(&*entry.into_mut())
            }
            Entry::Vacant(slot) => {
                let result = self.analyzer.analyze(model)?;
                self.stats.misses += 1;
                Ok(&*slot.insert(result))
            }
        }
    }

    /// Drops the stored result for `model`, if any.
    ///
    /// Returns `true` when an entry was removed.
    pub fn invalidate(&mut self, model: &CostModel) -> bool {
        self.entries.remove(&model.fingerprint()).is_some()
    }

    /// Drops every stored result and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.reset();
    }

    /// Number of distinct models with a stored result.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no results are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit and miss counters since creation or the last clear.
    #[inline]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
