//! Item template file loading.

use std::fs;
use std::path::Path;

use ironforge_common::SchemaVersion;
use ironforge_crafting::{ItemTemplate, TemplateCatalog};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::recipe_loader::{check_version, RecipeLoadResult};

/// Item templates from a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Templates in this file.
    #[serde(default)]
    pub templates: Vec<ItemTemplate>,
}

fn default_version() -> String {
    SchemaVersion::ITEM_TEMPLATE.to_string()
}

/// Parses a template file's contents into a catalog.
///
/// A template ID defined twice keeps its last definition.
pub fn parse_templates(content: &str) -> RecipeLoadResult<TemplateCatalog> {
    let file: TemplateFile = toml::from_str(content)?;
    check_version(&file.version, SchemaVersion::ITEM_TEMPLATE)?;

    let mut catalog = TemplateCatalog::new();
    for template in file.templates {
        let id = template.id.clone();
        if catalog.insert(template).is_some() {
            warn!("Template {} defined more than once; using the last definition", id);
        }
    }
    Ok(catalog)
}

/// Loads the template catalog. A missing file yields an empty catalog.
pub fn load_templates(path: &Path) -> RecipeLoadResult<TemplateCatalog> {
    if !path.exists() {
        info!("No template file at {:?}, starting with no templates", path);
        return Ok(TemplateCatalog::new());
    }

    let catalog = parse_templates(&fs::read_to_string(path)?)?;
    info!("Loaded {} item templates from {:?}", catalog.len(), path);
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_loader::RecipeLoadError;
    use ironforge_common::Material;
    use tempfile::TempDir;

    const TEMPLATES: &str = r#"
version = "1.0.0"

[[templates]]
id = "iron_kit"
material = "CHEST"
display_name = "Iron Kit"

[[templates]]
id = "storm_blade"
material = "minecraft:iron_sword"
"#;

    #[test]
    fn test_parse_templates() {
        let catalog = parse_templates(TEMPLATES).expect("parse");
        assert_eq!(catalog.len(), 2);

        let kit = catalog.get("iron_kit").expect("kit");
        assert_eq!(kit.material, Material::Chest);
        assert_eq!(kit.display_name, "Iron Kit");
        assert_eq!(catalog.get("storm_blade").map(|t| t.material), Some(Material::IronSword));
    }

    #[test]
    fn test_unknown_material_fails_file() {
        let content = "[[templates]]\nid = \"odd\"\nmaterial = \"MITHRIL\"\n";
        assert!(matches!(
            parse_templates(content),
            Err(RecipeLoadError::ParseError(_))
        ));
    }

    #[test]
    fn test_duplicate_keeps_last() {
        let content = r#"
[[templates]]
id = "kit"
material = "CHEST"

[[templates]]
id = "kit"
material = "BARRIER"
"#;
        let catalog = parse_templates(content).expect("parse");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("kit").map(|t| t.material), Some(Material::Barrier));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().expect("temp dir");
        let catalog = load_templates(&temp_dir.path().join("templates.toml")).expect("load");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("templates.toml");
        fs::write(&path, TEMPLATES).expect("write");

        assert_eq!(load_templates(&path).expect("load").len(), 2);
    }
}
