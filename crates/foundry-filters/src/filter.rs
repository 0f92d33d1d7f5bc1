//! Item filters.
//!
//! This module provides:
//! - The [`Filter`] contract every filter kind satisfies
//! - Concrete filters matching by item, by namespace and by item name
//! - [`BaseFilter`], the closed enum used for persistence and type-gated adds
//!
//! Filters compare by value, enabled flag included.

use foundry_common::{ItemId, ItemStack};
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};

/// A user-configurable matching rule that can be switched on and off.
pub trait Filter {
    /// Check if the filter is active.
    fn is_enabled(&self) -> bool;

    /// Switches the filter on or off.
    fn set_enabled(&mut self, enabled: bool);

    /// Check if the stack passes this filter, regardless of the enabled flag.
    fn matches(&self, stack: &ItemStack) -> bool;
}

/// A filter kind that can be stored in a [`crate::FilterManager`].
///
/// Conversions go through [`BaseFilter`], so a collection only ever accepts
/// the kinds it was declared with.
pub trait FilterVariant: Filter + Clone + PartialEq {
    /// Narrows a base filter to this kind, if it is one.
    fn from_base(base: &BaseFilter) -> Option<Self>;

    /// Widens this filter to a base filter.
    fn to_base(&self) -> BaseFilter;
}

const fn enabled_by_default() -> bool {
    true
}

// ============================================================================
// Item filter
// ============================================================================

/// Matches one exact item type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemFilter {
    item: ItemId,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
}

impl ItemFilter {
    /// Creates an enabled filter for an item type.
    #[must_use]
    pub fn new(item: ItemId) -> Self {
        Self {
            item,
            enabled: true,
        }
    }

    /// Item type matched.
    #[must_use]
    pub fn item(&self) -> &ItemId {
        &self.item
    }
}

impl Filter for ItemFilter {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn matches(&self, stack: &ItemStack) -> bool {
        !stack.is_empty() && stack.item() == &self.item
    }
}

impl FilterVariant for ItemFilter {
    fn from_base(base: &BaseFilter) -> Option<Self> {
        match base {
            BaseFilter::Item(filter) => Some(filter.clone()),
            _ => None,
        }
    }

    fn to_base(&self) -> BaseFilter {
        BaseFilter::Item(self.clone())
    }
}

// ============================================================================
// Namespace filter
// ============================================================================

/// Matches every item whose namespace fits a wildcard pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ModIdFilterRepr")]
pub struct ModIdFilter {
    mod_id: String,
    enabled: bool,
}

/// Decoded form of [`ModIdFilter`], validated through [`ModIdFilter::new`].
#[derive(Deserialize)]
struct ModIdFilterRepr {
    mod_id: String,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
}

impl TryFrom<ModIdFilterRepr> for ModIdFilter {
    type Error = FilterError;

    fn try_from(repr: ModIdFilterRepr) -> FilterResult<Self> {
        let mut filter = Self::new(repr.mod_id)?;
        filter.enabled = repr.enabled;
        Ok(filter)
    }
}

impl ModIdFilter {
    /// Creates an enabled filter for a namespace pattern.
    pub fn new(mod_id: impl Into<String>) -> FilterResult<Self> {
        let mod_id = mod_id.into();
        if mod_id.trim().is_empty() {
            return Err(FilterError::EmptyPattern);
        }
        Ok(Self {
            mod_id,
            enabled: true,
        })
    }

    /// Namespace pattern.
    #[must_use]
    pub fn mod_id(&self) -> &str {
        &self.mod_id
    }
}

impl Filter for ModIdFilter {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn matches(&self, stack: &ItemStack) -> bool {
        !stack.is_empty() && wildcard_match(&self.mod_id, stack.item().namespace())
    }
}

impl FilterVariant for ModIdFilter {
    fn from_base(base: &BaseFilter) -> Option<Self> {
        match base {
            BaseFilter::ModId(filter) => Some(filter.clone()),
            _ => None,
        }
    }

    fn to_base(&self) -> BaseFilter {
        BaseFilter::ModId(self.clone())
    }
}

// ============================================================================
// Name filter
// ============================================================================

/// Matches every item whose path fits a wildcard pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NameFilterRepr")]
pub struct NameFilter {
    pattern: String,
    enabled: bool,
}

/// Decoded form of [`NameFilter`], validated through [`NameFilter::new`].
#[derive(Deserialize)]
struct NameFilterRepr {
    pattern: String,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
}

impl TryFrom<NameFilterRepr> for NameFilter {
    type Error = FilterError;

    fn try_from(repr: NameFilterRepr) -> FilterResult<Self> {
        let mut filter = Self::new(repr.pattern)?;
        filter.enabled = repr.enabled;
        Ok(filter)
    }
}

impl NameFilter {
    /// Creates an enabled filter for a name pattern such as `*_ore`.
    pub fn new(pattern: impl Into<String>) -> FilterResult<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(FilterError::EmptyPattern);
        }
        Ok(Self {
            pattern,
            enabled: true,
        })
    }

    /// Name pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Filter for NameFilter {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn matches(&self, stack: &ItemStack) -> bool {
        !stack.is_empty() && wildcard_match(&self.pattern, stack.item().path())
    }
}

impl FilterVariant for NameFilter {
    fn from_base(base: &BaseFilter) -> Option<Self> {
        match base {
            BaseFilter::Name(filter) => Some(filter.clone()),
            _ => None,
        }
    }

    fn to_base(&self) -> BaseFilter {
        BaseFilter::Name(self.clone())
    }
}

// ============================================================================
// Base filter
// ============================================================================

/// Any filter kind, tagged by `"type"` when persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BaseFilter {
    /// Exact item.
    Item(ItemFilter),
    /// Namespace pattern.
    #[serde(rename = "modid")]
    ModId(ModIdFilter),
    /// Name pattern.
    Name(NameFilter),
}

impl BaseFilter {
    /// Persisted tag of this filter kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::ModId(_) => "modid",
            Self::Name(_) => "name",
        }
    }

    fn inner(&self) -> &dyn Filter {
        match self {
            Self::Item(f) => f,
            Self::ModId(f) => f,
            Self::Name(f) => f,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Filter {
        match self {
            Self::Item(f) => f,
            Self::ModId(f) => f,
            Self::Name(f) => f,
        }
    }
}

impl Filter for BaseFilter {
    fn is_enabled(&self) -> bool {
        self.inner().is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.inner_mut().set_enabled(enabled);
    }

    fn matches(&self, stack: &ItemStack) -> bool {
        self.inner().matches(stack)
    }
}

impl FilterVariant for BaseFilter {
    fn from_base(base: &BaseFilter) -> Option<Self> {
        Some(base.clone())
    }

    fn to_base(&self) -> BaseFilter {
        self.clone()
    }
}

impl From<ItemFilter> for BaseFilter {
    fn from(filter: ItemFilter) -> Self {
        Self::Item(filter)
    }
}

impl From<ModIdFilter> for BaseFilter {
    fn from(filter: ModIdFilter) -> Self {
        Self::ModId(filter)
    }
}

impl From<NameFilter> for BaseFilter {
    fn from(filter: NameFilter) -> Self {
        Self::Name(filter)
    }
}

// ============================================================================
// Wildcards
// ============================================================================

/// ASCII case-insensitive glob match: `*` is any run, `?` is one character.
#[must_use]
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let text: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (mut p, mut t) = (0, 0);
    // Last star seen and the text position it is currently standing in for.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, consumed)) => {
                    p = star + 1;
                    t = consumed + 1;
                    backtrack = Some((star, consumed + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_common::ResourceLocation;

    fn stack(id: &str) -> ItemStack {
        ItemStack::one(id.parse().expect("valid id"))
    }

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("*_ore", "iron_ore"));
        assert!(wildcard_match("deepslate_*_ore", "deepslate_iron_ore"));
        assert!(!wildcard_match("*_ore", "iron_ingot"));
        assert!(wildcard_match("b?ne", "bone"));
        assert!(!wildcard_match("b?ne", "bne"));
        assert!(wildcard_match("MineCraft", "minecraft"));
        assert!(wildcard_match("*a*b*", "xxaxxbxx"));
        assert!(!wildcard_match("", "a"));
    }

    #[test]
    fn test_item_filter() {
        let filter = ItemFilter::new(ResourceLocation::minecraft("cobblestone"));
        assert!(filter.matches(&stack("cobblestone")));
        assert!(!filter.matches(&stack("stone")));
        assert!(!filter.matches(&ItemStack::empty()));
    }

    #[test]
    fn test_mod_id_filter() {
        let filter = ModIdFilter::new("found*").expect("valid");
        assert!(filter.matches(&stack("foundry:obsidian_dust")));
        assert!(!filter.matches(&stack("minecraft:obsidian")));
        assert!(matches!(ModIdFilter::new("  "), Err(FilterError::EmptyPattern)));
    }

    #[test]
    fn test_name_filter() {
        let filter = NameFilter::new("*_wool").expect("valid");
        assert!(filter.matches(&stack("minecraft:lime_wool")));
        assert!(!filter.matches(&stack("minecraft:string")));
    }

    #[test]
    fn test_equality_includes_enabled() {
        let mut a = ItemFilter::new(ResourceLocation::minecraft("bone"));
        let b = a.clone();
        assert_eq!(a, b);
        a.set_enabled(false);
        assert_ne!(a, b);
    }

    #[test]
    fn test_base_filter_tags() {
        let base: BaseFilter = ModIdFilter::new("minecraft").expect("valid").into();
        let json = serde_json::to_value(&base).expect("encode");
        assert_eq!(json["type"], "modid");
        assert_eq!(json["mod_id"], "minecraft");

        let decoded: BaseFilter = serde_json::from_value(json).expect("decode");
        assert_eq!(decoded, base);
    }

    #[test]
    fn test_enabled_defaults_on_decode() {
        let decoded: BaseFilter =
            serde_json::from_str(r#"{"type":"item","item":"minecraft:bone"}"#).expect("decode");
        assert!(decoded.is_enabled());
    }

    #[test]
    fn test_empty_pattern_rejected_on_decode() {
        for json in [
            r#"{"type":"name","pattern":""}"#,
            r#"{"type":"modid","mod_id":"  ","enabled":false}"#,
        ] {
            let err = serde_json::from_str::<BaseFilter>(json).expect_err(json);
            assert!(err.to_string().contains("must not be empty"), "{err}");
        }

        let decoded: NameFilter =
            serde_json::from_str(r#"{"pattern":"*_ore","enabled":false}"#).expect("decode");
        assert_eq!(decoded.pattern(), "*_ore");
        assert!(!decoded.is_enabled());
    }

    #[test]
    fn test_variant_gating() {
        let base: BaseFilter = NameFilter::new("*").expect("valid").into();
        assert!(ItemFilter::from_base(&base).is_none());
        assert!(NameFilter::from_base(&base).is_some());
        assert!(BaseFilter::from_base(&base).is_some());
    }
}
