//! Material tags and the resolver interface.
//!
//! A tag is a named group of base materials (all planks, all logs, ...).
//! Recipes name tags as text; the host resolves that text once at load time
//! into a [`TagHandle`], and matching only ever queries the handle.

use ironforge_common::{Material, VANILLA_NAMESPACE};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A named set of materials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialTag {
    key: String,
    members: HashSet<Material>,
}

impl MaterialTag {
    /// Creates a tag from its key and members.
    #[must_use]
    pub fn new(key: impl Into<String>, members: impl IntoIterator<Item = Material>) -> Self {
        Self {
            key: normalize_key(&key.into()),
            members: members.into_iter().collect(),
        }
    }

    /// Normalised tag key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Checks if a material belongs to this tag.
    #[must_use]
    pub fn contains(&self, material: Material) -> bool {
        self.members.contains(&material)
    }

    /// Number of member materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Checks if the tag has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Shared, immutable handle to a resolved tag.
pub type TagHandle = Arc<MaterialTag>;

/// Resolves textual tag keys to tag handles.
///
/// Returning `None` means the tag is unknown to the host. Requirements using
/// such a tag never match.
pub trait TagResolver {
    /// Resolves a tag key.
    fn resolve(&self, key: &str) -> Option<TagHandle>;
}

impl<F> TagResolver for F
where
    F: Fn(&str) -> Option<TagHandle>,
{
    fn resolve(&self, key: &str) -> Option<TagHandle> {
        self(key)
    }
}

/// Strips the vanilla namespace and lowercases a tag key.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    let lower = key.trim().to_ascii_lowercase();
    lower
        .strip_prefix(VANILLA_NAMESPACE)
        .map_or_else(|| lower.clone(), str::to_string)
}

/// In-memory tag resolver.
#[derive(Debug, Clone, Default)]
pub struct StaticTagResolver {
    tags: HashMap<String, TagHandle>,
}

impl StaticTagResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver pre-populated with the common vanilla tags.
    #[must_use]
    pub fn with_builtin_tags() -> Self {
        let mut resolver = Self::new();
        resolver.insert(MaterialTag::new(
            "planks",
            [
                Material::OakPlanks,
                Material::SprucePlanks,
                Material::BirchPlanks,
                Material::JunglePlanks,
                Material::AcaciaPlanks,
                Material::DarkOakPlanks,
            ],
        ));
        resolver.insert(MaterialTag::new(
            "logs",
            [
                Material::OakLog,
                Material::SpruceLog,
                Material::BirchLog,
                Material::JungleLog,
                Material::AcaciaLog,
                Material::DarkOakLog,
            ],
        ));
        resolver.insert(MaterialTag::new(
            "coals",
            [Material::Coal, Material::Charcoal],
        ));
        resolver.insert(MaterialTag::new(
            "wool",
            [Material::WhiteWool, Material::RedWool, Material::BlackWool],
        ));
        resolver.insert(MaterialTag::new(
            "stone_crafting_materials",
            [Material::Cobblestone, Material::Stone],
        ));
        resolver.insert(MaterialTag::new(
            "swords",
            [Material::WoodenSword, Material::IronSword, Material::DiamondSword],
        ));
        resolver
    }

    /// Adds or replaces a tag.
    pub fn insert(&mut self, tag: MaterialTag) {
        self.tags.insert(normalize_key(tag.key()), Arc::new(tag));
    }

    /// Number of known tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Checks if no tags are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl TagResolver for StaticTagResolver {
    fn resolve(&self, key: &str) -> Option<TagHandle> {
        self.tags.get(&normalize_key(key)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("minecraft:Planks"), "planks");
        assert_eq!(normalize_key("  logs "), "logs");
        assert_eq!(normalize_key("custom:runes"), "custom:runes");
    }

    #[test]
    fn test_builtin_tags_resolve() {
        let resolver = StaticTagResolver::with_builtin_tags();
        let planks = resolver.resolve("minecraft:planks").unwrap();
        assert!(planks.contains(Material::BirchPlanks));
        assert!(!planks.contains(Material::BirchLog));
        assert!(resolver.resolve("unknown_tag").is_none());
    }

    #[test]
    fn test_resolved_handles_are_shared() {
        let resolver = StaticTagResolver::with_builtin_tags();
        let a = resolver.resolve("coals").unwrap();
        let b = resolver.resolve("COALS").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |key: &str| {
            (key == "gems").then(|| Arc::new(MaterialTag::new("gems", [Material::Diamond])))
        };
        assert!(resolver.resolve("gems").is_some());
        assert!(resolver.resolve("planks").is_none());
    }
}
