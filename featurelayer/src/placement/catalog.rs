//! Genus to visual asset lookup.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Identifier of a visual asset on the scene side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AssetKey(String);

impl AssetKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to do with a genus that has no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingAssetPolicy {
    /// Place the feature with this asset
    UseDefault(AssetKey),
    /// Place the feature with no asset; the scene side decides
    LeaveUnassigned,
}

/// Outcome of an asset lookup, kept on the directive so callers can see
/// which features fell back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "key", rename_all = "snake_case")]
pub enum AssetChoice {
    /// The genus had a catalog entry
    Catalog(AssetKey),
    /// The genus was unmapped and the default asset was applied
    Fallback(AssetKey),
    /// The genus was unmapped and no default is configured
    Unassigned,
}

impl AssetChoice {
    /// The selected asset, if any.
    pub fn key(&self) -> Option<&AssetKey> {
        match self {
            AssetChoice::Catalog(key) | AssetChoice::Fallback(key) => Some(key),
            AssetChoice::Unassigned => None,
        }
    }

    /// True when the default asset stood in for a missing entry.
    pub fn is_fallback(&self) -> bool {
        matches!(self, AssetChoice::Fallback(_))
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, AssetChoice::Unassigned)
    }
}

/// Static mapping from genus to asset, with an explicit miss policy.
///
/// Genus lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalog {
    entries: BTreeMap<String, AssetKey>,
    on_missing: MissingAssetPolicy,
}

impl AssetCatalog {
    pub fn new(on_missing: MissingAssetPolicy) -> Self {
        Self {
            entries: BTreeMap::new(),
            on_missing,
        }
    }

    /// Adds or replaces the asset for a genus.
    pub fn insert(&mut self, genus: &str, asset: AssetKey) -> Option<AssetKey> {
        self.entries.insert(normalize_genus(genus), asset)
    }

    pub fn with_entry(mut self, genus: &str, asset: impl Into<String>) -> Self {
        self.insert(genus, AssetKey::new(asset));
        self
    }

    pub fn missing_policy(&self) -> &MissingAssetPolicy {
        &self.on_missing
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries as (normalized genus, asset).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &AssetKey)> {
        self.entries.iter().map(|(genus, key)| (genus.as_str(), key))
    }

    /// Resolves the asset for a genus, applying the miss policy.
    pub fn lookup(&self, genus: &str) -> AssetChoice {
        match self.entries.get(&normalize_genus(genus)) {
            Some(key) => AssetChoice::Catalog(key.clone()),
            None => match &self.on_missing {
                MissingAssetPolicy::UseDefault(key) => AssetChoice::Fallback(key.clone()),
                MissingAssetPolicy::LeaveUnassigned => AssetChoice::Unassigned,
            },
        }
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new(MissingAssetPolicy::UseDefault(AssetKey::new(
            super::DEFAULT_ASSET_KEY,
        )))
    }
}

fn normalize_genus(genus: &str) -> String {
    genus.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AssetCatalog {
        AssetCatalog::new(MissingAssetPolicy::UseDefault(AssetKey::new("generic_tree")))
            .with_entry("ACER", "maple")
            .with_entry("Tilia", "linden")
    }

    #[test]
    fn test_lookup_hit() {
        assert_eq!(
            catalog().lookup("ACER"),
            AssetChoice::Catalog(AssetKey::new("maple"))
        );
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        assert_eq!(
            catalog().lookup(" tilia "),
            AssetChoice::Catalog(AssetKey::new("linden"))
        );
    }

    #[test]
    fn test_lookup_miss_uses_default() {
        let choice = catalog().lookup("QUERCUS");
        assert_eq!(choice, AssetChoice::Fallback(AssetKey::new("generic_tree")));
        assert!(choice.is_fallback());
        assert!(!choice.is_unassigned());
        assert_eq!(choice.key().map(AssetKey::as_str), Some("generic_tree"));
    }

    #[test]
    fn test_lookup_miss_left_unassigned() {
        let catalog =
            AssetCatalog::new(MissingAssetPolicy::LeaveUnassigned).with_entry("ACER", "maple");
        let choice = catalog.lookup("QUERCUS");
        assert_eq!(choice, AssetChoice::Unassigned);
        assert!(choice.key().is_none());
        assert!(choice.is_unassigned());
        assert!(!choice.is_fallback());
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = catalog();
        let previous = catalog.insert("acer", AssetKey::new("sycamore"));
        assert_eq!(previous, Some(AssetKey::new("maple")));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_default_catalog_falls_back() {
        let catalog = AssetCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.lookup("ACER"),
            AssetChoice::Fallback(AssetKey::new(crate::placement::DEFAULT_ASSET_KEY))
        );
    }

    #[test]
    fn test_asset_choice_serializes_with_source() {
        let json = serde_json::to_string(&AssetChoice::Fallback(AssetKey::new("tree"))).unwrap();
        assert_eq!(json, r#"{"source":"fallback","key":"tree"}"#);
        let json = serde_json::to_string(&AssetChoice::Unassigned).unwrap();
        assert_eq!(json, r#"{"source":"unassigned"}"#);
    }
}
