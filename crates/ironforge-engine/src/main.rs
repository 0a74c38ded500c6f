//! # Ironforge
//!
//! Command-line front end for the recipe matcher.
//!
//! Usage: `ironforge [config path] [grid file...]`. Loads the configuration,
//! item templates and recipes, then reports the first matching recipe and its
//! result for each grid file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ironforge_crafting::{RecipeRegistry, StaticTagResolver, TemplateCatalog};
use ironforge_engine::{
    load_grid, load_templates, recipe_ids, EngineConfig, RecipeLoader, CONFIG_FILE,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate custom crafting recipes against grid files")]
struct Args {
    /// Engine configuration file
    #[arg(default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Grid snapshot files to evaluate
    grids: Vec<PathBuf>,
}

/// Main entry point.
fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("ironforge=info".parse()?))
        .init();

    info!("Ironforge {} starting...", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load_from(&args.config);
    let templates = load_templates(&config.templates_path())
        .with_context(|| format!("loading templates from {:?}", config.templates_path()))?;

    let tags = StaticTagResolver::with_builtin_tags();
    let mut loader = RecipeLoader::new(config.recipe_path(), tags)
        .with_strategy_override(config.shapeless_strategy)
        .with_unresolved_tag_logging(config.log_unresolved_tags);
    loader
        .load_all()
        .with_context(|| format!("loading recipes from {:?}", config.recipe_path()))?;

    let stats = loader.stats().clone();
    if stats.validation_errors > 0 {
        warn!("{} recipes or files were rejected", stats.validation_errors);
    }
    let registry = loader.into_registry();
    debug!("Registration order: {:?}", recipe_ids(&registry));

    for path in &args.grids {
        evaluate(path, &registry, &templates)?;
    }

    info!("Ironforge shutdown complete");
    Ok(())
}

/// Reports the recipe a grid file crafts, if any.
fn evaluate(path: &Path, registry: &RecipeRegistry, templates: &TemplateCatalog) -> Result<()> {
    let grid = load_grid(path).with_context(|| format!("loading grid {path:?}"))?;

    match registry.find_match(&grid) {
        Some((recipe, found)) => {
            let result = recipe.resolve_result(templates);
            info!(
                "{}: recipe {} crafts {} x {}{} (consumes {:?})",
                path.display(),
                recipe.id(),
                result.amount,
                result.material,
                result
                    .template
                    .as_ref()
                    .map(|id| format!(" [{id}]"))
                    .unwrap_or_default(),
                found.consumption
            );
        },
        None => info!("{}: no recipe matches", path.display()),
    }
    Ok(())
}
