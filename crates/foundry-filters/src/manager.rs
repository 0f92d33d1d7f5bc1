//! Filter collection manager.
//!
//! A [`FilterManager`] owns an ordered, duplicate-free list of filters and a
//! lazily built view of the enabled ones. Every mutation that a player makes
//! reports through the save callback; restoring from a tree does not.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{FilterError, FilterResult};
use crate::filter::{BaseFilter, FilterVariant};

/// Tree field holding the persisted filter list.
pub const FILTERS_KEY: &str = "filters";

/// Callback run whenever the filter list changes and should be persisted.
pub type MarkForSave = Box<dyn FnMut() + Send>;

/// Ordered collection of filters of one kind.
pub struct FilterManager<F> {
    filters: Vec<F>,
    /// Enabled filters in list order. `None` when it must be rebuilt.
    enabled: Option<Vec<F>>,
    mark_for_save: MarkForSave,
}

impl<F> std::fmt::Debug for FilterManager<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterManager")
            .field("filters", &self.filters.len())
            .field("enabled_cached", &self.enabled.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl<F: FilterVariant> FilterManager<F> {
    /// Creates an empty manager reporting changes through `mark_for_save`.
    pub fn new(mark_for_save: impl FnMut() + Send + 'static) -> Self {
        Self {
            filters: Vec::new(),
            enabled: None,
            mark_for_save: Box::new(mark_for_save),
        }
    }

    /// All filters, in order.
    #[must_use]
    pub fn filters(&self) -> &[F] {
        &self.filters
    }

    /// Enabled filters, in order.
    pub fn enabled_filters(&mut self) -> &[F] {
        let filters = &self.filters;
        self.enabled.get_or_insert_with(|| {
            filters
                .iter()
                .filter(|filter| filter.is_enabled())
                .cloned()
                .collect()
        })
    }

    /// Number of filters.
    #[must_use]
    pub fn count(&self) -> usize {
        self.filters.len()
    }

    /// Check if any enabled filter satisfies the predicate.
    pub fn any_enabled_match(&mut self, predicate: impl FnMut(&F) -> bool) -> bool {
        self.enabled_filters().iter().any(predicate)
    }

    /// Check if at least one filter is enabled.
    pub fn has_enabled_filters(&mut self) -> bool {
        !self.enabled_filters().is_empty()
    }

    /// Flips the enabled flag of the filter at `index`. Out of range is a no-op.
    pub fn toggle_state(&mut self, index: usize) {
        let Some(filter) = self.filters.get_mut(index) else {
            return;
        };
        let enabled = filter.is_enabled();
        filter.set_enabled(!enabled);
        (self.mark_for_save)();
        self.enabled = None;
    }

    /// Appends a filter unless an equal one is already present.
    pub fn add_filter(&mut self, filter: F) -> bool {
        self.insert(filter, true)
    }

    /// Removes a filter equal to `filter`.
    pub fn remove_filter(&mut self, filter: &F) -> bool {
        let removed = match self.filters.iter().position(|f| f == filter) {
            Some(index) => {
                self.filters.remove(index);
                true
            }
            None => false,
        };
        (self.mark_for_save)();
        if filter.is_enabled() {
            self.enabled = None;
        }
        removed
    }

    /// Adds a base filter if it is of this manager's kind.
    pub fn try_add_filter(&mut self, filter: &BaseFilter) -> bool {
        match F::from_base(filter) {
            Some(filter) => self.add_filter(filter),
            None => false,
        }
    }

    /// Replaces `current` with `new` in place, or removes it when `new` is `None`.
    ///
    /// Nothing happens when either filter is of another kind, when `current`
    /// is not present, or when `new` already exists elsewhere in the list.
    pub fn try_edit_filter(&mut self, current: &BaseFilter, new: Option<&BaseFilter>) -> bool {
        let Some(current) = F::from_base(current) else {
            return false;
        };
        let Some(new) = new else {
            return self.remove_filter(&current);
        };
        let Some(new) = F::from_base(new) else {
            return false;
        };
        self.replace(&current, new)
    }

    /// Swaps in a whole new list, such as one received from a remote copy.
    pub fn replace_filters(&mut self, filters: Vec<F>) {
        self.filters.clear();
        for filter in filters {
            if !self.filters.contains(&filter) {
                self.filters.push(filter);
            }
        }
        self.enabled = None;
    }

    /// Writes the filters under [`FILTERS_KEY`]. An empty list writes nothing.
    pub fn write_to_tree(&self, tree: &mut Map<String, Value>) -> FilterResult<()> {
        if self.filters.is_empty() {
            return Ok(());
        }
        let entries = self
            .filters
            .iter()
            .map(|filter| serde_json::to_value(filter.to_base()).map_err(FilterError::Encode))
            .collect::<FilterResult<Vec<_>>>()?;
        tree.insert(FILTERS_KEY.to_string(), Value::Array(entries));
        Ok(())
    }

    /// Replaces the filters with those stored in `tree`.
    ///
    /// Entries that do not decode, or decode to another filter kind, are
    /// skipped. The save callback is not run.
    pub fn read_from_tree(&mut self, tree: &Map<String, Value>) {
        self.filters.clear();
        self.enabled = Some(Vec::new());

        let Some(stored) = tree.get(FILTERS_KEY) else {
            return;
        };
        let Value::Array(entries) = stored else {
            warn!(field = FILTERS_KEY, "Stored filters are not a list, ignoring");
            return;
        };

        for (index, entry) in entries.iter().enumerate() {
            match decode_entry::<F>(index, entry) {
                Ok(filter) => {
                    self.insert(filter, false);
                }
                Err(e) => warn!(error = %e, "Skipping stored filter"),
            }
        }
        debug!(
            read = entries.len(),
            kept = self.filters.len(),
            "Loaded filters"
        );
    }

    fn insert(&mut self, filter: F, save: bool) -> bool {
        if save {
            (self.mark_for_save)();
        }
        if self.filters.contains(&filter) {
            return false;
        }
        if filter.is_enabled() {
            if let Some(enabled) = self.enabled.as_mut() {
                enabled.push(filter.clone());
            }
        }
        self.filters.push(filter);
        true
    }

    fn replace(&mut self, current: &F, new: F) -> bool {
        let Some(index) = self.filters.iter().position(|f| f == current) else {
            return false;
        };
        if self
            .filters
            .iter()
            .enumerate()
            .any(|(i, f)| i != index && *f == new)
        {
            return false;
        }

        let invalidate = current.is_enabled() || new.is_enabled();
        self.filters[index] = new;
        (self.mark_for_save)();
        if invalidate {
            self.enabled = None;
        }
        true
    }
}

fn decode_entry<F: FilterVariant>(index: usize, entry: &Value) -> FilterResult<F> {
    let base =
        BaseFilter::deserialize(entry).map_err(|source| FilterError::Decode { index, source })?;
    F::from_base(&base).ok_or(FilterError::WrongVariant {
        index,
        kind: base.kind(),
    })
}
