//! Input lookup caches for recipe types.
//!
//! Every recipe type owns one cache. A cache memoizes the outcome of each
//! distinct query against the recipe list it was given, stamped with that
//! list's version. When a query arrives with a newer version the whole memo
//! is dropped before use, so a reload can add, remove or reorder recipes
//! freely without ever serving a stale answer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  query + list  ┌──────────────────┐  miss   ┌────────────┐
//! │ lookup trait │───────────────▶│ DoubleInputCache │────────▶│ linear scan│
//! └──────────────┘                │  (MemoTables)    │◀────────│ list order │
//!                                 └──────────────────┘  store  └────────────┘
//! ```

use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::recipe::{DoubleInputRecipe, SingleInputRecipe};
use crate::recipe_type::RecipeList;

/// Default cap on memo entries per query shape.
pub const DEFAULT_MAX_ENTRIES: usize = 4096;

/// Cache tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Memoize query results at all.
    pub enabled: bool,
    /// Entries kept per query shape; further results are answered but not stored.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Cache that answers every query by scanning.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            max_entries: 0,
        }
    }

    /// Number of entries a memo table may hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        if self.enabled {
            self.max_entries
        } else {
            0
        }
    }
}

/// Counters describing cache behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Queries answered from the memo.
    pub hits: u64,
    /// Queries that had to scan the recipe list.
    pub misses: u64,
    /// Times the memo was dropped because the recipe list changed.
    pub invalidations: u64,
    /// Results not stored because the memo was full.
    pub rejected: u64,
}

impl std::ops::AddAssign for CacheStats {
    fn add_assign(&mut self, other: Self) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.invalidations += other.invalidations;
        self.rejected += other.rejected;
    }
}

/// Version-stamped memo of query results.
///
/// Entries are only ever read back under the version they were written for.
#[derive(Debug)]
pub struct MemoTable<K, V> {
    version: u64,
    entries: AHashMap<K, V>,
    capacity: usize,
    stats: CacheStats,
}

impl<K: Eq + Hash, V: Clone> MemoTable<K, V> {
    /// Creates an empty table holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            version: 0,
            entries: AHashMap::new(),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Returns the memoized value for `key`, computing and storing it on a miss.
    pub fn get_or_compute(&mut self, version: u64, key: K, compute: impl FnOnce() -> V) -> V {
        self.sync_version(version);

        if let Some(value) = self.entries.get(&key) {
            self.stats.hits += 1;
            return value.clone();
        }

        self.stats.misses += 1;
        let value = compute();
        if self.entries.len() < self.capacity {
            trace!(version, stored = self.entries.len() + 1, "Memo miss");
            self.entries.insert(key, value.clone());
        } else {
            self.stats.rejected += 1;
        }
        value
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Version the stored entries belong to.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Counters for this table.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn sync_version(&mut self, version: u64) {
        if self.version == version {
            return;
        }
        if !self.entries.is_empty() {
            debug!(
                from = self.version,
                to = version,
                dropped = self.entries.len(),
                "Recipe list changed, dropping memo"
            );
            self.entries.clear();
            self.stats.invalidations += 1;
        }
        self.version = version;
    }
}

// ============================================================================
// Single input
// ============================================================================

#[derive(Debug)]
struct SingleMemo<I> {
    first: MemoTable<I, Option<usize>>,
}

/// Lookup cache for recipes with one input.
#[derive(Debug)]
pub struct SingleInputRecipeCache<I, R> {
    memo: Mutex<SingleMemo<I>>,
    _recipe: PhantomData<fn() -> R>,
}

impl<I, R> SingleInputRecipeCache<I, R>
where
    I: Eq + Hash + Clone,
    R: SingleInputRecipe<I>,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            memo: Mutex::new(SingleMemo {
                first: MemoTable::new(config.capacity()),
            }),
            _recipe: PhantomData,
        }
    }

    /// Check if any recipe accepts the input.
    pub fn contains_input(&self, recipes: &RecipeList<R>, input: &I) -> bool {
        self.first_index(recipes, input).is_some()
    }

    /// First recipe, in list order, that accepts the input.
    pub fn find_first_recipe(&self, recipes: &RecipeList<R>, input: &I) -> Option<Arc<R>> {
        self.first_index(recipes, input)
            .and_then(|index| recipes.get(index).cloned())
    }

    /// Counters for this cache.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.memo.lock().first.stats()
    }

    /// Drops every memoized result.
    pub fn clear(&self) {
        self.memo.lock().first.clear();
    }

    fn first_index(&self, recipes: &RecipeList<R>, input: &I) -> Option<usize> {
        if has_no_recipes(recipes) {
            return None;
        }
        let mut memo = self.memo.lock();
        memo.first
            .get_or_compute(recipes.version(), input.clone(), || {
                recipes.iter().position(|recipe| recipe.matches(input))
            })
    }
}

// ============================================================================
// Double input
// ============================================================================

#[derive(Debug)]
struct DoubleMemo<A, B> {
    first_ab: MemoTable<(A, B), Option<usize>>,
    contains_ab: MemoTable<(A, B), bool>,
    contains_ba: MemoTable<(B, A), bool>,
    contains_a: MemoTable<A, bool>,
    contains_b: MemoTable<B, bool>,
}

/// Lookup cache for recipes with two inputs.
///
/// The A-then-B and B-then-A query shapes are memoized separately and answered
/// by separate scans; neither is derived from the other.
#[derive(Debug)]
pub struct DoubleInputRecipeCache<A, B, R> {
    memo: Mutex<DoubleMemo<A, B>>,
    _recipe: PhantomData<fn() -> R>,
}

impl<A, B, R> DoubleInputRecipeCache<A, B, R>
where
    A: Eq + Hash + Clone,
    B: Eq + Hash + Clone,
    R: DoubleInputRecipe<A, B>,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = config.capacity();
        Self {
            memo: Mutex::new(DoubleMemo {
                first_ab: MemoTable::new(capacity),
                contains_ab: MemoTable::new(capacity),
                contains_ba: MemoTable::new(capacity),
                contains_a: MemoTable::new(capacity),
                contains_b: MemoTable::new(capacity),
            }),
            _recipe: PhantomData,
        }
    }

    /// Check if any recipe accepts the types of `(input_a, input_b)`.
    ///
    /// Amounts are ignored, see [`DoubleInputRecipe::accepts`]. Use this when
    /// the caller naturally holds input A first, for example when validating
    /// the item slot of a machine whose chemical tank is already filled.
    pub fn contains_input_ab(&self, recipes: &RecipeList<R>, input_a: &A, input_b: &B) -> bool {
        if has_no_recipes(recipes) {
            return false;
        }
        let mut memo = self.memo.lock();
        memo.contains_ab.get_or_compute(
            recipes.version(),
            (input_a.clone(), input_b.clone()),
            || recipes.iter().any(|recipe| recipe.accepts(input_a, input_b)),
        )
    }

    /// Same question as [`Self::contains_input_ab`], arguments given B first.
    ///
    /// Takes `(input_b, input_a)` and is memoized under a `(B, A)` key of its
    /// own. When `A` and `B` are the same type the first argument is the B-slot
    /// value, so for asymmetric recipes `contains_input_ba(x, y)` and
    /// `contains_input_ab(x, y)` can disagree.
    pub fn contains_input_ba(&self, recipes: &RecipeList<R>, input_b: &B, input_a: &A) -> bool {
        if has_no_recipes(recipes) {
            return false;
        }
        let mut memo = self.memo.lock();
        memo.contains_ba.get_or_compute(
            recipes.version(),
            (input_b.clone(), input_a.clone()),
            || {
                recipes
                    .iter()
                    .any(|recipe| recipe.accepts(input_a, input_b))
            },
        )
    }

    /// Check if some recipe can take this input in slot A, for some B.
    pub fn contains_input_a(&self, recipes: &RecipeList<R>, input_a: &A) -> bool {
        if has_no_recipes(recipes) {
            return false;
        }
        let mut memo = self.memo.lock();
        memo.contains_a
            .get_or_compute(recipes.version(), input_a.clone(), || {
                recipes.iter().any(|recipe| recipe.accepts_a(input_a))
            })
    }

    /// Check if some recipe can take this input in slot B, for some A.
    pub fn contains_input_b(&self, recipes: &RecipeList<R>, input_b: &B) -> bool {
        if has_no_recipes(recipes) {
            return false;
        }
        let mut memo = self.memo.lock();
        memo.contains_b
            .get_or_compute(recipes.version(), input_b.clone(), || {
                recipes.iter().any(|recipe| recipe.accepts_b(input_b))
            })
    }

    /// First recipe, in list order, matching `(input_a, input_b)`.
    pub fn find_first_recipe(
        &self,
        recipes: &RecipeList<R>,
        input_a: &A,
        input_b: &B,
    ) -> Option<Arc<R>> {
        self.first_index(recipes, input_a, input_b)
            .and_then(|index| recipes.get(index).cloned())
    }

    /// Counters summed across every query shape.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let memo = self.memo.lock();
        let mut stats = memo.first_ab.stats();
        stats += memo.contains_ab.stats();
        stats += memo.contains_ba.stats();
        stats += memo.contains_a.stats();
        stats += memo.contains_b.stats();
        stats
    }

    /// Drops every memoized result.
    pub fn clear(&self) {
        let mut memo = self.memo.lock();
        memo.first_ab.clear();
        memo.contains_ab.clear();
        memo.contains_ba.clear();
        memo.contains_a.clear();
        memo.contains_b.clear();
        debug!("Cleared double input recipe cache");
    }

    fn first_index(&self, recipes: &RecipeList<R>, input_a: &A, input_b: &B) -> Option<usize> {
        if has_no_recipes(recipes) {
            return None;
        }
        let mut memo = self.memo.lock();
        memo.first_ab.get_or_compute(
            recipes.version(),
            (input_a.clone(), input_b.clone()),
            || {
                recipes
                    .iter()
                    .position(|recipe| recipe.matches(input_a, input_b))
            },
        )
    }
}

/// Nothing can match an empty list; such queries bypass the memo.
fn has_no_recipes<R>(recipes: &RecipeList<R>) -> bool {
    recipes.is_empty()
}
