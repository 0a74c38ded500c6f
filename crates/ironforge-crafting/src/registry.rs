//! Recipe registry.

use std::collections::HashMap;

use ironforge_common::RecipeId;
use tracing::{debug, warn};

use crate::error::{RecipeError, RecipeResult};
use crate::grid::CraftingGrid;
use crate::recipe::{RecipeDefinition, RecipeMatch};
use crate::tags::TagResolver;

/// Registry for all custom recipes.
///
/// Recipes are kept in registration order; when several recipes match the
/// same grid, the one registered first wins.
#[derive(Debug, Default)]
pub struct RecipeRegistry {
    /// Recipes in registration order.
    recipes: Vec<RecipeDefinition>,
    /// Position of each recipe by ID.
    by_id: HashMap<RecipeId, usize>,
}

impl RecipeRegistry {
    /// Create new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recipe. Fails if the ID is already taken.
    pub fn register(&mut self, recipe: RecipeDefinition) -> RecipeResult<()> {
        if self.by_id.contains_key(recipe.id()) {
            return Err(RecipeError::DuplicateId(recipe.id().clone()));
        }

        debug!(
            "Registered recipe {} ({} requirements)",
            recipe.id(),
            recipe.requirements().len()
        );
        self.by_id.insert(recipe.id().clone(), self.recipes.len());
        self.recipes.push(recipe);
        Ok(())
    }

    /// Resolve a recipe's tags, then register it.
    ///
    /// Unknown tags do not prevent registration; they are logged once here
    /// and returned so callers can report them.
    pub fn register_resolved(
        &mut self,
        recipe: &RecipeDefinition,
        resolver: &dyn TagResolver,
    ) -> RecipeResult<Vec<String>> {
        let (resolved, unresolved) = recipe.with_resolved_tags(resolver);
        for key in &unresolved {
            warn!(
                "Recipe {} uses unknown tag '{}'; that ingredient will never match",
                recipe.id(),
                key
            );
        }
        self.register(resolved)?;
        Ok(unresolved)
    }

    /// Get recipe by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RecipeDefinition> {
        self.by_id.get(id).map(|&index| &self.recipes[index])
    }

    /// Check if a recipe is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Get all recipes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RecipeDefinition> {
        self.recipes.iter()
    }

    /// Find the first registered recipe the grid satisfies.
    #[must_use]
    pub fn find_match(&self, grid: &CraftingGrid) -> Option<(&RecipeDefinition, RecipeMatch)> {
        if !grid.is_full_size() {
            return None;
        }
        self.recipes
            .iter()
            .find_map(|recipe| recipe.evaluate(grid).map(|found| (recipe, found)))
    }

    /// Get recipe count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Remove every recipe.
    pub fn clear(&mut self) {
        self.recipes.clear();
        self.by_id.clear();
    }
}
