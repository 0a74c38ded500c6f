//! Crafting grid snapshots stored as TOML.
//!
//! Used by the command-line tool to evaluate recipes against a grid without a
//! running game server. Each of the nine `slots` entries is either an empty
//! table or `{ material, amount, template }`.

use std::fs;
use std::path::{Path, PathBuf};

use ironforge_common::{ItemStack, Material, TemplateId};
use ironforge_crafting::{CraftingGrid, GRID_SLOTS};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while reading a grid file.
#[derive(Debug, Error)]
pub enum GridFileError {
    /// File not found.
    #[error("Grid file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read grid file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse grid TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// One grid slot as written in a grid file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridSlot {
    /// Material in the slot (None = empty).
    #[serde(default)]
    pub material: Option<Material>,
    /// Stack size.
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Custom item template, if any.
    #[serde(default)]
    pub template: Option<TemplateId>,
}

const fn default_amount() -> u32 {
    1
}

impl GridSlot {
    /// Converts to the stack held in this slot, if any.
    #[must_use]
    pub fn to_stack(&self) -> Option<ItemStack> {
        let material = self.material?;
        let stack = ItemStack::new(material, self.amount);
        Some(match &self.template {
            Some(template) => stack.with_template(template.clone()),
            None => stack,
        })
    }
}

/// A grid snapshot file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridFile {
    /// Slots in row-major order.
    #[serde(default)]
    pub slots: Vec<GridSlot>,
}

impl GridFile {
    /// Builds the grid snapshot.
    #[must_use]
    pub fn to_grid(&self) -> CraftingGrid {
        if self.slots.len() != GRID_SLOTS {
            warn!(
                "Grid has {} slots instead of {}; no recipe will match",
                self.slots.len(),
                GRID_SLOTS
            );
        }
        CraftingGrid::from_slots(self.slots.iter().map(GridSlot::to_stack).collect())
    }
}

/// Reads a grid snapshot from disk.
pub fn load_grid(path: &Path) -> Result<CraftingGrid, GridFileError> {
    if !path.exists() {
        return Err(GridFileError::NotFound(path.to_path_buf()));
    }
    let file: GridFile = toml::from_str(&fs::read_to_string(path)?)?;
    Ok(file.to_grid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GRID: &str = r#"
slots = [
    {}, {}, {},
    {}, { material = "STICK" }, { material = "STICK", amount = 3 },
    { material = "CHEST", template = "iron_kit" }, {}, {},
]
"#;

    #[test]
    fn test_parse_grid() {
        let file: GridFile = toml::from_str(GRID).expect("parse");
        let grid = file.to_grid();

        assert!(grid.is_full_size());
        assert_eq!(grid.occupied_count(), 3);
        assert_eq!(grid.stack_at(1, 1).map(|s| s.amount), Some(1));
        assert_eq!(grid.stack_at(1, 2).map(|s| s.amount), Some(3));
        assert!(grid.stack_at(2, 0).is_some_and(|s| s.is_template("iron_kit")));
    }

    #[test]
    fn test_slot_to_stack() {
        assert!(GridSlot::default().to_stack().is_none());

        let slot = GridSlot {
            material: Some(Material::Chest),
            amount: 2,
            template: Some(TemplateId::from("iron_kit")),
        };
        let stack = slot.to_stack().expect("stack");
        assert_eq!(stack.material, Material::Chest);
        assert_eq!(stack.amount, 2);
        assert!(stack.is_template("iron_kit"));
    }

    #[test]
    fn test_short_grid_is_kept() {
        let file: GridFile = toml::from_str("slots = [{ material = \"STICK\" }]").expect("parse");
        assert_eq!(file.to_grid().len(), 1);
    }

    #[test]
    fn test_load_grid_from_disk() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("grid.toml");
        fs::write(&path, GRID).expect("write");

        assert_eq!(load_grid(&path).expect("load").occupied_count(), 3);
        assert!(matches!(
            load_grid(&temp_dir.path().join("missing.toml")),
            Err(GridFileError::NotFound(_))
        ));
    }
}
