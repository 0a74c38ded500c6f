//! Recipe file loading and management.
//!
//! This module provides:
//! - Loading custom recipes from `<recipe dir>/*.toml`
//! - Schema version checks and per-recipe validation on load
//! - Tag resolution at registration time

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ironforge_common::{RecipeId, SchemaVersion};
use ironforge_crafting::{
    IngredientRequirement, RecipeDefinition, RecipeError, RecipeRegistry, RequirementKind,
    ShapelessStrategy, TagResolver,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during recipe loading.
#[derive(Debug, Error)]
pub enum RecipeLoadError {
    /// File not found.
    #[error("Recipe file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read recipe file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse recipe TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Malformed version string.
    #[error("Invalid file version: {0}")]
    InvalidVersion(#[from] ironforge_common::ParseError),

    /// File written for an incompatible schema.
    #[error("Unsupported file version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version declared by the file.
        found: SchemaVersion,
        /// Version this build reads.
        expected: SchemaVersion,
    },

    /// Validation error.
    #[error("Recipe validation error: {0}")]
    ValidationError(String),

    /// Recipe rejected by the crafting layer.
    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

/// Result type for recipe loading operations.
pub type RecipeLoadResult<T> = Result<T, RecipeLoadError>;

/// Checks a file's declared version against the version this build reads.
pub fn check_version(declared: &str, expected: SchemaVersion) -> RecipeLoadResult<()> {
    let found: SchemaVersion = declared.parse()?;
    if expected.can_read(&found) {
        Ok(())
    } else {
        Err(RecipeLoadError::UnsupportedVersion { found, expected })
    }
}

/// An ingredient requirement as written in a recipe file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIngredient {
    /// Requirement kind.
    #[serde(rename = "type")]
    pub kind: RequirementKind,
    /// Material name, tag key or template ID.
    pub value: String,
    /// Minimum amount per stack.
    #[serde(default = "default_amount")]
    pub amount: u32,
}

impl RawIngredient {
    /// Converts to a validated requirement.
    pub fn to_requirement(&self) -> RecipeLoadResult<IngredientRequirement> {
        Ok(IngredientRequirement::new(self.kind, &self.value, self.amount)?)
    }
}

/// A recipe as written in a recipe file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecipe {
    /// Unique recipe identifier.
    pub id: String,
    /// Result template ID or `raw:<MATERIAL>`.
    pub result: String,
    /// Number of result items.
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Pattern rows (shaped recipes only).
    #[serde(default)]
    pub shape: Option<Vec<String>>,
    /// Pattern symbol to requirement.
    #[serde(default)]
    pub key: HashMap<String, RawIngredient>,
    /// Ingredients (shapeless recipes only).
    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
    /// Forbid extra grid contents (shapeless only).
    #[serde(default)]
    pub strict: bool,
    /// Shapeless assignment strategy.
    #[serde(default)]
    pub strategy: Option<ShapelessStrategy>,
}

const fn default_amount() -> u32 {
    1
}

impl RawRecipe {
    /// Validates the raw recipe and builds the definition.
    ///
    /// A `strategy_override` replaces the recipe's own shapeless strategy.
    pub fn to_definition(
        &self,
        strategy_override: Option<ShapelessStrategy>,
    ) -> RecipeLoadResult<RecipeDefinition> {
        let mut builder =
            RecipeDefinition::builder(self.id.as_str()).result(&self.result, self.amount);

        match &self.shape {
            Some(rows) => {
                if !self.ingredients.is_empty() {
                    return Err(RecipeLoadError::ValidationError(format!(
                        "Recipe {} has both a shape and an ingredient list",
                        self.id
                    )));
                }
                if self.strict || self.strategy.is_some() {
                    debug!("Recipe {} is shaped; strict and strategy are ignored", self.id);
                }

                builder = builder.shape(rows.iter().map(String::as_str));
                for (symbol, raw) in &self.key {
                    let mut chars = symbol.chars();
                    let (Some(c), None) = (chars.next(), chars.next()) else {
                        return Err(RecipeLoadError::ValidationError(format!(
                            "Recipe {} key '{}' is not a single character",
                            self.id, symbol
                        )));
                    };
                    builder = builder.key(c, raw.to_requirement()?);
                }
            },
            None => {
                if !self.key.is_empty() {
                    return Err(RecipeLoadError::ValidationError(format!(
                        "Recipe {} has a key but no shape",
                        self.id
                    )));
                }
                for raw in &self.ingredients {
                    builder = builder.ingredient(raw.to_requirement()?);
                }
                let strategy = strategy_override.or(self.strategy).unwrap_or_default();
                builder = builder.strict(self.strict).strategy(strategy);
            },
        }

        Ok(builder.build()?)
    }
}

/// A collection of recipes from a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Recipes in this file.
    #[serde(default)]
    pub recipes: Vec<RawRecipe>,
}

fn default_version() -> String {
    SchemaVersion::CRAFTING_RECIPE.to_string()
}

/// Recipe loader.
pub struct RecipeLoader {
    /// Base path for recipe files.
    base_path: PathBuf,
    /// Recipe registry.
    registry: RecipeRegistry,
    /// Tag lookup applied to every loaded recipe.
    tags: Box<dyn TagResolver>,
    /// Strategy forced on every shapeless recipe.
    strategy_override: Option<ShapelessStrategy>,
    /// Whether unknown tags are warned about.
    log_unresolved_tags: bool,
    /// Statistics.
    stats: RecipeLoaderStats,
}

/// Statistics for the recipe loader.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecipeLoaderStats {
    /// Number of files loaded.
    pub files_loaded: u32,
    /// Number of recipes loaded.
    pub recipes_loaded: u32,
    /// Number of rejected recipes and files.
    pub validation_errors: u32,
    /// Number of tag references that did not resolve.
    pub unresolved_tags: u32,
}

impl RecipeLoader {
    /// Creates a new recipe loader.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>, tags: impl TagResolver + 'static) -> Self {
        let base_path = base_path.into();
        info!("Initializing recipe loader at: {:?}", base_path);

        Self {
            base_path,
            registry: RecipeRegistry::new(),
            tags: Box::new(tags),
            strategy_override: None,
            log_unresolved_tags: true,
            stats: RecipeLoaderStats::default(),
        }
    }

    /// Forces a strategy on every shapeless recipe.
    #[must_use]
    pub fn with_strategy_override(mut self, strategy: Option<ShapelessStrategy>) -> Self {
        self.strategy_override = strategy;
        self
    }

    /// Enables or disables warnings for unknown tags.
    #[must_use]
    pub fn with_unresolved_tag_logging(mut self, enabled: bool) -> Self {
        self.log_unresolved_tags = enabled;
        self
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the recipe registry.
    #[must_use]
    pub fn registry(&self) -> &RecipeRegistry {
        &self.registry
    }

    /// Returns loader statistics.
    #[must_use]
    pub fn stats(&self) -> &RecipeLoaderStats {
        &self.stats
    }

    /// Loads all recipes from the base path.
    ///
    /// Files are read in name order, which fixes registration order and so
    /// which recipe wins when several match.
    pub fn load_all(&mut self) -> RecipeLoadResult<()> {
        if !self.base_path.exists() {
            info!(
                "Recipe directory does not exist, creating: {:?}",
                self.base_path
            );
            fs::create_dir_all(&self.base_path)?;
            return Ok(());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.base_path)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        for path in paths {
            if let Err(e) = self.load_file(&path) {
                warn!("Failed to load recipe file {:?}: {}", path, e);
                self.stats.validation_errors += 1;
            }
        }

        info!(
            "Loaded {} recipes from {} files",
            self.stats.recipes_loaded, self.stats.files_loaded
        );

        Ok(())
    }

    /// Loads recipes from a single file.
    pub fn load_file(&mut self, path: &Path) -> RecipeLoadResult<()> {
        debug!("Loading recipe file: {:?}", path);

        if !path.exists() {
            return Err(RecipeLoadError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;

        let loaded_count = self.load_str(&content, &path.display().to_string())?;
        self.stats.files_loaded += 1;
        debug!("Loaded {} recipes from {:?}", loaded_count, path);

        Ok(())
    }

    /// Loads recipes from TOML text. `origin` names the source in logs.
    ///
    /// Invalid recipes are skipped; returns how many were registered.
    pub fn load_str(&mut self, content: &str, origin: &str) -> RecipeLoadResult<u32> {
        let recipe_file: RecipeFile = toml::from_str(content)?;
        check_version(&recipe_file.version, SchemaVersion::CRAFTING_RECIPE)?;

        let mut loaded_count = 0;
        for raw in &recipe_file.recipes {
            match self.register_raw(raw) {
                Ok(()) => loaded_count += 1,
                Err(e) => {
                    warn!("Invalid recipe {} in {}: {}", raw.id, origin, e);
                    self.stats.validation_errors += 1;
                },
            }
        }

        self.stats.recipes_loaded += loaded_count;
        Ok(loaded_count)
    }

    fn register_raw(&mut self, raw: &RawRecipe) -> RecipeLoadResult<()> {
        let recipe = raw.to_definition(self.strategy_override)?;

        let unresolved = if self.log_unresolved_tags {
            self.registry.register_resolved(&recipe, self.tags.as_ref())?
        } else {
            let (resolved, unresolved) = recipe.with_resolved_tags(self.tags.as_ref());
            self.registry.register(resolved)?;
            unresolved
        };

        self.stats.unresolved_tags += u32::try_from(unresolved.len()).unwrap_or(u32::MAX);
        Ok(())
    }

    /// Gets a recipe by ID.
    #[must_use]
    pub fn get_recipe(&self, id: &str) -> Option<&RecipeDefinition> {
        self.registry.get(id)
    }

    /// Consumes the loader, returning the registry.
    #[must_use]
    pub fn into_registry(self) -> RecipeRegistry {
        self.registry
    }
}

impl std::fmt::Debug for RecipeLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeLoader")
            .field("base_path", &self.base_path)
            .field("recipes", &self.registry.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Recipe IDs in registration order, for diagnostics.
#[must_use]
pub fn recipe_ids(registry: &RecipeRegistry) -> Vec<RecipeId> {
    registry.iter().map(|recipe| recipe.id().clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironforge_common::{ItemStack, Material};
    use ironforge_crafting::{CraftingGrid, RecipeShape, StaticTagResolver, TemplateCatalog};
    use tempfile::TempDir;

    const TORCH_FILE: &str = r#"
version = "1.0.0"

[[recipes]]
id = "sticks_to_torch"
result = "raw:TORCH"
amount = 4
shape = ["C", "S"]

[recipes.key.C]
type = "tag"
value = "coals"

[recipes.key.S]
type = "material"
value = "STICK"

[[recipes]]
id = "iron_kit"
result = "iron_kit"
ingredients = [
    { type = "material", value = "IRON_INGOT", amount = 2 },
    { type = "material", value = "minecraft:stick" },
]
strict = true
strategy = "greedy"
"#;

    fn loader(dir: &Path) -> RecipeLoader {
        RecipeLoader::new(dir, StaticTagResolver::with_builtin_tags())
    }

    #[test]
    fn test_parse_toml() {
        let recipe_file: RecipeFile = toml::from_str(TORCH_FILE).expect("parse");
        assert_eq!(recipe_file.version, "1.0.0");
        assert_eq!(recipe_file.recipes.len(), 2);

        let torch = &recipe_file.recipes[0];
        assert_eq!(torch.shape.as_deref().map(<[String]>::len), Some(2));
        assert_eq!(torch.key["C"].kind, RequirementKind::Tag);
        assert_eq!(torch.key["S"].amount, 1);

        let kit = &recipe_file.recipes[1];
        assert!(kit.strict);
        assert_eq!(kit.ingredients[0].amount, 2);
        assert_eq!(kit.strategy, Some(ShapelessStrategy::Greedy));
    }

    #[test]
    fn test_load_str_registers_recipes() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut loader = loader(temp_dir.path());

        let count = loader.load_str(TORCH_FILE, "inline").expect("load");
        assert_eq!(count, 2);
        assert!(loader.get_recipe("sticks_to_torch").expect("torch").is_shaped());

        let grid = CraftingGrid::with_stacks([
            (1, 1, ItemStack::new(Material::Charcoal, 1)),
            (2, 1, ItemStack::new(Material::Stick, 1)),
        ]);
        let (recipe, _) = loader.registry().find_match(&grid).expect("match");
        assert_eq!(
            recipe.resolve_result(&TemplateCatalog::new()),
            ItemStack::new(Material::Torch, 4)
        );
    }

    #[test]
    fn test_invalid_recipe_skipped() {
        let content = r#"
[[recipes]]
id = "zero"
result = "raw:STICK"
ingredients = [{ type = "material", value = "STICK", amount = 0 }]

[[recipes]]
id = "unknown_material"
result = "raw:STICK"
ingredients = [{ type = "material", value = "MITHRIL" }]

[[recipes]]
id = "bad_key"
result = "raw:STICK"
shape = ["XY"]
[recipes.key.X]
type = "material"
value = "STICK"

[[recipes]]
id = "fine"
result = "raw:STICK"
ingredients = [{ type = "material", value = "OAK_PLANKS" }]
"#;
        let temp_dir = TempDir::new().expect("temp dir");
        let mut loader = loader(temp_dir.path());

        assert_eq!(loader.load_str(content, "inline").expect("load"), 1);
        assert_eq!(loader.stats().validation_errors, 3);
        assert!(loader.get_recipe("fine").is_some());
        assert!(loader.get_recipe("zero").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut loader = loader(temp_dir.path());

        loader.load_str(TORCH_FILE, "first").expect("load");
        assert_eq!(loader.load_str(TORCH_FILE, "second").expect("load"), 0);
        assert_eq!(loader.registry().len(), 2);
        assert_eq!(loader.stats().validation_errors, 2);
    }

    #[test]
    fn test_shape_and_ingredients_conflict() {
        let raw = RawRecipe {
            id: "both".to_string(),
            result: "raw:STICK".to_string(),
            amount: 1,
            shape: Some(vec!["X".to_string()]),
            key: HashMap::from([(
                "X".to_string(),
                RawIngredient {
                    kind: RequirementKind::Material,
                    value: "STICK".to_string(),
                    amount: 1,
                },
            )]),
            ingredients: vec![RawIngredient {
                kind: RequirementKind::Material,
                value: "STICK".to_string(),
                amount: 1,
            }],
            strict: false,
            strategy: None,
        };
        assert!(matches!(
            raw.to_definition(None),
            Err(RecipeLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_multi_character_key_rejected() {
        let content = r#"
[[recipes]]
id = "wide_key"
result = "raw:STICK"
shape = ["X"]
[recipes.key.XX]
type = "material"
value = "STICK"
"#;
        let recipe_file: RecipeFile = toml::from_str(content).expect("parse");
        assert!(matches!(
            recipe_file.recipes[0].to_definition(None),
            Err(RecipeLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_strategy_override() {
        let recipe_file: RecipeFile = toml::from_str(TORCH_FILE).expect("parse");
        let kit = recipe_file.recipes[1]
            .to_definition(Some(ShapelessStrategy::Exhaustive))
            .expect("valid");
        match kit.shape() {
            RecipeShape::Shapeless(list) => {
                assert_eq!(list.strategy(), ShapelessStrategy::Exhaustive);
            },
            RecipeShape::Shaped(_) => panic!("expected shapeless"),
        }
    }

    #[test]
    fn test_version_check() {
        assert!(check_version("1.4.2", SchemaVersion::CRAFTING_RECIPE).is_ok());
        assert!(matches!(
            check_version("2.0.0", SchemaVersion::CRAFTING_RECIPE),
            Err(RecipeLoadError::UnsupportedVersion { .. })
        ));
        assert!(matches!(
            check_version("one", SchemaVersion::CRAFTING_RECIPE),
            Err(RecipeLoadError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_unresolved_tags_counted() {
        let content = r#"
[[recipes]]
id = "mystic"
result = "mystic_dust"
ingredients = [{ type = "tag", value = "runes" }]
"#;
        let temp_dir = TempDir::new().expect("temp dir");
        let mut loader = loader(temp_dir.path()).with_unresolved_tag_logging(false);

        assert_eq!(loader.load_str(content, "inline").expect("load"), 1);
        assert_eq!(loader.stats().unresolved_tags, 1);
    }

    #[test]
    fn test_load_all_in_name_order() {
        let temp_dir = TempDir::new().expect("temp dir");
        let single = |id: &str| {
            format!(
                "[[recipes]]\nid = \"{id}\"\nresult = \"raw:TORCH\"\n\
                 ingredients = [{{ type = \"material\", value = \"STICK\" }}]\n"
            )
        };
        fs::write(temp_dir.path().join("b.toml"), single("second")).expect("write");
        fs::write(temp_dir.path().join("a.toml"), single("first")).expect("write");
        fs::write(temp_dir.path().join("notes.txt"), "ignored").expect("write");

        let mut loader = loader(temp_dir.path());
        loader.load_all().expect("load");

        assert_eq!(loader.stats().files_loaded, 2);
        assert_eq!(
            recipe_ids(loader.registry()),
            vec![RecipeId::new("first"), RecipeId::new("second")]
        );
    }

    #[test]
    fn test_load_all_creates_missing_dir() {
        let temp_dir = TempDir::new().expect("temp dir");
        let recipe_dir = temp_dir.path().join("recipes");
        let mut loader = loader(&recipe_dir);

        loader.load_all().expect("load");
        assert!(recipe_dir.is_dir());
        assert!(loader.registry().is_empty());
    }

    #[test]
    fn test_bad_file_counted() {
        let temp_dir = TempDir::new().expect("temp dir");
        fs::write(temp_dir.path().join("broken.toml"), "[[recipes]\n").expect("write");
        fs::write(temp_dir.path().join("future.toml"), "version = \"9.0.0\"\n").expect("write");

        let mut loader = loader(temp_dir.path());
        loader.load_all().expect("load");
        assert_eq!(loader.stats().files_loaded, 0);
        assert_eq!(loader.stats().validation_errors, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut loader = loader(temp_dir.path());
        assert!(matches!(
            loader.load_file(&temp_dir.path().join("missing.toml")),
            Err(RecipeLoadError::NotFound(_))
        ));
    }
}
