//! # Ironforge Engine
//!
//! Loads everything the recipe matcher needs from disk:
//! - Engine configuration
//! - Custom recipe files, validated and tag-resolved into a registry
//! - Item template catalog
//! - Grid snapshots for offline evaluation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod grid_file;
pub mod recipe_loader;
pub mod template_loader;

pub use config::{EngineConfig, CONFIG_FILE};
pub use grid_file::{load_grid, GridFile, GridFileError, GridSlot};
pub use recipe_loader::{
    check_version, recipe_ids, RawIngredient, RawRecipe, RecipeFile, RecipeLoadError,
    RecipeLoadResult, RecipeLoader, RecipeLoaderStats,
};
pub use template_loader::{load_templates, parse_templates, TemplateFile};
