//! Recipe definitions.
//!
//! This module provides:
//! - The immutable recipe definition and its validating constructor
//! - A builder mirroring how recipes are assembled from configuration
//! - Grid evaluation with placement and consumption details
//! - Result resolution through an item template resolver

use std::collections::HashMap;

use ironforge_common::{ItemStack, Material, RecipeId};
use tracing::warn;

use crate::error::{RecipeError, RecipeResult};
use crate::grid::{Consumption, CraftingGrid};
use crate::ingredient::IngredientRequirement;
use crate::shaped::{Placement, ShapedPattern};
use crate::shapeless::{ShapelessList, ShapelessStrategy};
use crate::tags::TagResolver;
use crate::template::ItemTemplateResolver;

/// Result identifiers with this prefix name a plain base material.
pub const RAW_MATERIAL_PREFIX: &str = "raw:";

/// Shaped or shapeless matching rules of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeShape {
    /// Ingredients in a fixed arrangement.
    Shaped(ShapedPattern),
    /// Ingredients anywhere in the grid.
    Shapeless(ShapelessList),
}

/// A successful match of a recipe against a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeMatch {
    /// Recipe that matched.
    pub recipe: RecipeId,
    /// Where the pattern sits, for shaped recipes.
    pub placement: Option<Placement>,
    /// Amount to remove from each grid cell on a confirmed craft.
    pub consumption: Consumption,
}

/// A validated, immutable crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDefinition {
    id: RecipeId,
    result_template_id: String,
    result_amount: u32,
    shape: RecipeShape,
}

impl RecipeDefinition {
    /// Creates a recipe.
    ///
    /// Fails on a blank ID, blank result identifier, or zero result amount.
    /// Shape invariants are checked when the shape itself is built.
    pub fn new(
        id: impl Into<RecipeId>,
        result_template_id: impl Into<String>,
        result_amount: u32,
        shape: RecipeShape,
    ) -> RecipeResult<Self> {
        let id = id.into();
        let result_template_id = result_template_id.into().trim().to_string();

        if id.is_blank() {
            return Err(RecipeError::BlankRecipeId);
        }
        if result_template_id.is_empty() {
            return Err(RecipeError::BlankResult(id));
        }
        if result_amount == 0 {
            return Err(RecipeError::ZeroResultAmount(id));
        }

        Ok(Self {
            id,
            result_template_id,
            result_amount,
            shape,
        })
    }

    /// Creates a new recipe builder.
    #[must_use]
    pub fn builder(id: impl Into<RecipeId>) -> RecipeBuilder {
        RecipeBuilder::new(id)
    }

    /// Recipe ID.
    #[must_use]
    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    /// Result identifier: a template ID or `raw:<MATERIAL>`.
    #[must_use]
    pub fn result_template_id(&self) -> &str {
        &self.result_template_id
    }

    /// Number of items produced.
    #[must_use]
    pub fn result_amount(&self) -> u32 {
        self.result_amount
    }

    /// Matching rules.
    #[must_use]
    pub fn shape(&self) -> &RecipeShape {
        &self.shape
    }

    /// Check if this is a shaped recipe.
    #[must_use]
    pub fn is_shaped(&self) -> bool {
        matches!(self.shape, RecipeShape::Shaped(_))
    }

    /// Every requirement of the recipe, shaped key entries in symbol order.
    #[must_use]
    pub fn requirements(&self) -> Vec<&IngredientRequirement> {
        match &self.shape {
            RecipeShape::Shaped(pattern) => {
                let mut entries: Vec<_> = pattern.key().iter().collect();
                entries.sort_by_key(|(symbol, _)| **symbol);
                entries.into_iter().map(|(_, req)| req).collect()
            },
            RecipeShape::Shapeless(list) => list.requirements().iter().collect(),
        }
    }

    /// Returns a copy with every tag requirement resolved, plus the keys of
    /// tags the resolver did not know.
    #[must_use]
    pub fn with_resolved_tags(&self, resolver: &dyn TagResolver) -> (Self, Vec<String>) {
        let shape = match &self.shape {
            RecipeShape::Shaped(pattern) => RecipeShape::Shaped(pattern.resolve_tags(resolver)),
            RecipeShape::Shapeless(list) => RecipeShape::Shapeless(list.resolve_tags(resolver)),
        };
        let resolved = Self {
            shape,
            ..self.clone()
        };

        let mut unresolved: Vec<String> = resolved
            .requirements()
            .into_iter()
            .filter(|req| !req.is_resolved())
            .filter_map(|req| req.tag_key().map(str::to_string))
            .collect();
        unresolved.sort();
        unresolved.dedup();

        (resolved, unresolved)
    }

    /// Checks if the grid satisfies this recipe.
    ///
    /// Always false unless the grid has exactly 9 slots.
    #[must_use]
    pub fn matches(&self, grid: &CraftingGrid) -> bool {
        self.evaluate(grid).is_some()
    }

    /// Matches the grid and reports how the match was made.
    #[must_use]
    pub fn evaluate(&self, grid: &CraftingGrid) -> Option<RecipeMatch> {
        if !grid.is_full_size() {
            return None;
        }

        let (placement, consumption) = match &self.shape {
            RecipeShape::Shaped(pattern) => {
                let placement = pattern.find_placement(grid)?;
                (Some(placement), pattern.consumption(&placement))
            },
            RecipeShape::Shapeless(list) => (None, list.match_grid(grid)?),
        };

        Some(RecipeMatch {
            recipe: self.id.clone(),
            placement,
            consumption,
        })
    }

    /// Builds the result stack, reporting why it could not be built.
    pub fn try_resolve_result(
        &self,
        templates: &dyn ItemTemplateResolver,
    ) -> RecipeResult<ItemStack> {
        if let Some(name) = self.result_template_id.strip_prefix(RAW_MATERIAL_PREFIX) {
            let material: Material = name.parse()?;
            if material.is_air() {
                return Err(self.unresolved_result());
            }
            return Ok(ItemStack::new(material, self.result_amount));
        }

        templates
            .build(&self.result_template_id, self.result_amount)
            .ok_or_else(|| self.unresolved_result())
    }

    /// Builds the result stack.
    ///
    /// Never fails: an unknown material or template yields a placeholder
    /// stack the GUI layer refuses to hand out.
    #[must_use]
    pub fn resolve_result(&self, templates: &dyn ItemTemplateResolver) -> ItemStack {
        self.try_resolve_result(templates).unwrap_or_else(|e| {
            warn!("Recipe {} has an invalid result: {}", self.id, e);
            ItemStack::placeholder(self.result_amount)
        })
    }

    fn unresolved_result(&self) -> RecipeError {
        RecipeError::UnresolvedResult {
            recipe: self.id.clone(),
            result: self.result_template_id.clone(),
        }
    }
}

/// Builder for [`RecipeDefinition`].
#[derive(Debug)]
pub struct RecipeBuilder {
    id: RecipeId,
    result: Option<(String, u32)>,
    rows: Option<Vec<String>>,
    key: HashMap<char, IngredientRequirement>,
    ingredients: Vec<IngredientRequirement>,
    strict: bool,
    strategy: ShapelessStrategy,
}

impl RecipeBuilder {
    /// Create new builder.
    fn new(id: impl Into<RecipeId>) -> Self {
        Self {
            id: id.into(),
            result: None,
            rows: None,
            key: HashMap::new(),
            ingredients: Vec::new(),
            strict: false,
            strategy: ShapelessStrategy::default(),
        }
    }

    /// Set the result identifier and amount.
    #[must_use]
    pub fn result(mut self, template_id: impl Into<String>, amount: u32) -> Self {
        self.result = Some((template_id.into(), amount));
        self
    }

    /// Set the pattern rows, making this a shaped recipe.
    #[must_use]
    pub fn shape<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows = Some(rows.into_iter().map(Into::into).collect());
        self
    }

    /// Map a pattern symbol to a requirement.
    #[must_use]
    pub fn key(mut self, symbol: char, requirement: IngredientRequirement) -> Self {
        self.key.insert(symbol, requirement);
        self
    }

    /// Add a shapeless ingredient.
    #[must_use]
    pub fn ingredient(mut self, requirement: IngredientRequirement) -> Self {
        self.ingredients.push(requirement);
        self
    }

    /// Forbid extra grid contents (shapeless only).
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the shapeless assignment strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: ShapelessStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Build the recipe, validating every invariant.
    pub fn build(self) -> RecipeResult<RecipeDefinition> {
        let shape = match self.rows {
            Some(rows) => RecipeShape::Shaped(ShapedPattern::new(rows, self.key)?),
            None if self.ingredients.is_empty() => {
                return Err(RecipeError::MissingShape(self.id));
            },
            None => RecipeShape::Shapeless(
                ShapelessList::new(self.ingredients, self.strict)?.with_strategy(self.strategy),
            ),
        };
        let (result, amount) = self.result.unwrap_or_default();
        RecipeDefinition::new(self.id, result, amount, shape)
    }
}
