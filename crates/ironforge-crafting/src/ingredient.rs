//! Ingredient requirements.
//!
//! A requirement is one typed, quantified condition of a recipe: a base
//! material, membership in a material tag, or an instance of a custom item
//! template. Requirements are immutable once built and safe to share.

use ironforge_common::{ItemStack, Material, TemplateId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RecipeError, RecipeResult};
use crate::tags::{TagHandle, TagResolver};

/// Kind of ingredient a requirement accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Exact base material.
    Material,
    /// Any material in a named tag.
    Tag,
    /// Instance of a custom item template.
    #[serde(alias = "item", alias = "template")]
    ItemTemplate,
}

impl RequirementKind {
    /// Lowercase name used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Tag => "tag",
            Self::ItemTemplate => "item_template",
        }
    }
}

/// What a requirement matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingredient {
    /// Exact base material.
    Material(Material),
    /// Tag membership. `resolved` stays `None` until resolved, and forever if
    /// the host does not know the tag.
    Tag {
        /// Tag key as written in the recipe.
        key: String,
        /// Cached resolution.
        resolved: Option<TagHandle>,
    },
    /// Custom item template.
    Template(TemplateId),
}

/// A single quantified ingredient condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRequirement {
    ingredient: Ingredient,
    amount: u32,
}

impl IngredientRequirement {
    /// Creates a requirement from its configuration form.
    ///
    /// Fails if `amount` is 0, `value` is blank, or a material value does not
    /// name a known material.
    pub fn new(kind: RequirementKind, value: &str, amount: u32) -> RecipeResult<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(RecipeError::BlankIngredient);
        }
        if amount == 0 {
            return Err(RecipeError::ZeroIngredientAmount {
                value: value.to_string(),
            });
        }

        let ingredient = match kind {
            RequirementKind::Material => Ingredient::Material(value.parse()?),
            RequirementKind::Tag => Ingredient::Tag {
                key: value.to_string(),
                resolved: None,
            },
            RequirementKind::ItemTemplate => Ingredient::Template(TemplateId::new(value)),
        };

        Ok(Self { ingredient, amount })
    }

    /// Requires `amount` of a base material.
    pub fn material(material: Material, amount: u32) -> RecipeResult<Self> {
        Self::new(RequirementKind::Material, material.name(), amount)
    }

    /// Requires `amount` of any material in a tag.
    pub fn tag(key: &str, amount: u32) -> RecipeResult<Self> {
        Self::new(RequirementKind::Tag, key, amount)
    }

    /// Requires `amount` of a custom item template.
    pub fn template(template: &str, amount: u32) -> RecipeResult<Self> {
        Self::new(RequirementKind::ItemTemplate, template, amount)
    }

    /// Kind of this requirement.
    #[must_use]
    pub fn kind(&self) -> RequirementKind {
        match self.ingredient {
            Ingredient::Material(_) => RequirementKind::Material,
            Ingredient::Tag { .. } => RequirementKind::Tag,
            Ingredient::Template(_) => RequirementKind::ItemTemplate,
        }
    }

    /// Configuration value: material name, tag key, or template ID.
    #[must_use]
    pub fn value(&self) -> &str {
        match &self.ingredient {
            Ingredient::Material(material) => material.name(),
            Ingredient::Tag { key, .. } => key,
            Ingredient::Template(id) => id.as_str(),
        }
    }

    /// What this requirement matches against.
    #[must_use]
    pub fn ingredient(&self) -> &Ingredient {
        &self.ingredient
    }

    /// Minimum number of items a matching stack must hold.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// Tag key, if this is a tag requirement.
    #[must_use]
    pub fn tag_key(&self) -> Option<&str> {
        match &self.ingredient {
            Ingredient::Tag { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Checks if the requirement can ever match.
    ///
    /// Only tag requirements whose tag did not resolve return false.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match &self.ingredient {
            Ingredient::Tag { resolved, .. } => resolved.is_some(),
            Ingredient::Material(_) | Ingredient::Template(_) => true,
        }
    }

    /// Returns a copy with the tag handle looked up through `resolver`.
    ///
    /// Non-tag requirements are returned unchanged.
    #[must_use]
    pub fn resolve_tag(&self, resolver: &dyn TagResolver) -> Self {
        let mut resolved = self.clone();
        if let Ingredient::Tag { key, resolved: handle } = &mut resolved.ingredient {
            *handle = resolver.resolve(key);
            if handle.is_none() {
                debug!("Tag '{}' did not resolve", key);
            }
        }
        resolved
    }

    /// Checks if a stack is the right kind of item, ignoring amount.
    #[must_use]
    pub fn matches_type(&self, stack: &ItemStack) -> bool {
        if stack.is_empty() {
            return false;
        }

        match &self.ingredient {
            Ingredient::Material(material) => stack.material == *material,
            Ingredient::Tag { resolved, .. } => resolved
                .as_ref()
                .is_some_and(|tag| tag.contains(stack.material)),
            Ingredient::Template(id) => stack.is_template(id.as_str()),
        }
    }

    /// Checks if a stack is the right kind and holds at least `amount` items.
    #[must_use]
    pub fn matches_fully(&self, stack: &ItemStack) -> bool {
        self.matches_type(stack) && stack.amount >= self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::StaticTagResolver;
    use ironforge_common::ParseError;

    #[test]
    fn test_zero_amount_rejected() {
        assert_eq!(
            IngredientRequirement::material(Material::Stick, 0),
            Err(RecipeError::ZeroIngredientAmount {
                value: "STICK".to_string()
            })
        );
    }

    #[test]
    fn test_blank_value_rejected() {
        assert_eq!(
            IngredientRequirement::tag("  ", 1),
            Err(RecipeError::BlankIngredient)
        );
    }

    #[test]
    fn test_unknown_material_rejected() {
        assert_eq!(
            IngredientRequirement::new(RequirementKind::Material, "MITHRIL", 1),
            Err(RecipeError::Material(ParseError::UnknownMaterial(
                "MITHRIL".to_string()
            )))
        );
    }

    #[test]
    fn test_kind_and_value() {
        let req = IngredientRequirement::template("storm_blade", 1).unwrap();
        assert_eq!(req.kind(), RequirementKind::ItemTemplate);
        assert_eq!(req.value(), "storm_blade");
        assert_eq!(req.kind().as_str(), "item_template");
    }

    #[test]
    fn test_material_match() {
        let req = IngredientRequirement::material(Material::IronIngot, 2).unwrap();
        assert!(req.matches_type(&ItemStack::new(Material::IronIngot, 1)));
        assert!(!req.matches_fully(&ItemStack::new(Material::IronIngot, 1)));
        assert!(req.matches_fully(&ItemStack::new(Material::IronIngot, 5)));
        assert!(!req.matches_type(&ItemStack::new(Material::GoldIngot, 5)));
    }

    #[test]
    fn test_empty_stack_never_matches() {
        let req = IngredientRequirement::material(Material::Stick, 1).unwrap();
        assert!(!req.matches_type(&ItemStack::new(Material::Stick, 0)));
    }

    #[test]
    fn test_unresolved_tag_never_matches() {
        let req = IngredientRequirement::tag("planks", 1).unwrap();
        assert!(!req.is_resolved());
        assert!(!req.matches_type(&ItemStack::new(Material::OakPlanks, 64)));

        let unknown = IngredientRequirement::tag("runes", 1)
            .unwrap()
            .resolve_tag(&StaticTagResolver::with_builtin_tags());
        assert!(!unknown.is_resolved());
        assert!(!unknown.matches_type(&ItemStack::new(Material::OakPlanks, 64)));
    }

    #[test]
    fn test_resolved_tag_matches_members() {
        let req = IngredientRequirement::tag("minecraft:planks", 1)
            .unwrap()
            .resolve_tag(&StaticTagResolver::with_builtin_tags());
        assert!(req.is_resolved());
        assert!(req.matches_fully(&ItemStack::new(Material::SprucePlanks, 1)));
        assert!(!req.matches_fully(&ItemStack::new(Material::SpruceLog, 1)));
    }

    #[test]
    fn test_template_match() {
        let req = IngredientRequirement::template("storm_blade", 1).unwrap();
        let plain = ItemStack::new(Material::IronSword, 1);
        let custom = plain.clone().with_template("storm_blade");
        assert!(!req.matches_type(&plain));
        assert!(req.matches_type(&custom));
    }

    #[test]
    fn test_resolve_leaves_other_kinds_alone() {
        let req = IngredientRequirement::material(Material::Coal, 1).unwrap();
        let resolved = req.resolve_tag(&StaticTagResolver::new());
        assert_eq!(req, resolved);
        assert_eq!(resolved.tag_key(), None);
    }
}
