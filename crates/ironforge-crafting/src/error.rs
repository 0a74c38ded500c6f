//! Recipe error types.

use ironforge_common::{ParseError, RecipeId};
use thiserror::Error;

/// Errors raised while building or registering recipes.
///
/// Matching itself never fails; these only come from construction,
/// registration and result resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    /// Ingredient amount below 1
    #[error("Ingredient '{value}' must require at least 1 item")]
    ZeroIngredientAmount {
        /// Ingredient value
        value: String,
    },
    /// Ingredient value empty
    #[error("Ingredient value is blank")]
    BlankIngredient,
    /// Material name not recognised
    #[error("Invalid material: {0}")]
    Material(#[from] ParseError),
    /// Recipe ID empty
    #[error("Recipe ID is blank")]
    BlankRecipeId,
    /// Result identifier empty
    #[error("Recipe {0} has a blank result identifier")]
    BlankResult(RecipeId),
    /// Result amount below 1
    #[error("Recipe {0} must produce at least 1 item")]
    ZeroResultAmount(RecipeId),
    /// Shape taller than the grid
    #[error("Shape has {rows} rows, at most 3 allowed")]
    TooManyRows {
        /// Number of rows given
        rows: usize,
    },
    /// Shape row wider than the grid
    #[error("Shape row {row} is {width} wide, at most 3 allowed")]
    RowTooWide {
        /// Row index
        row: usize,
        /// Row width
        width: usize,
    },
    /// Shape without any ingredient cell
    #[error("Shape has no ingredient cells")]
    EmptyShape,
    /// Shape symbol without a key entry
    #[error("Shape symbol '{0}' has no ingredient in the key")]
    MissingKey(char),
    /// Shapeless recipe without ingredients
    #[error("Shapeless recipe has no ingredients")]
    EmptyIngredients,
    /// Builder finished without a shape
    #[error("Recipe {0} has neither a shape nor an ingredient list")]
    MissingShape(RecipeId),
    /// Recipe ID registered twice
    #[error("Duplicate recipe ID: {0}")]
    DuplicateId(RecipeId),
    /// Result could not be turned into a stack
    #[error("Recipe {recipe} result '{result}' could not be resolved")]
    UnresolvedResult {
        /// Recipe ID
        recipe: RecipeId,
        /// Result identifier
        result: String,
    },
}

/// Result type for recipe operations.
pub type RecipeResult<T> = Result<T, RecipeError>;
