//! Base materials known to the host game.
//!
//! Materials are the plain, non-custom item kinds of the voxel engine. They
//! are written in SCREAMING_SNAKE_CASE in configuration files and parsed
//! case-insensitively, with an optional `minecraft:` namespace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Namespace prefix the host game uses for its own identifiers.
pub const VANILLA_NAMESPACE: &str = "minecraft:";

macro_rules! materials {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A base material of the host game.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Material {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl Material {
            /// Every known material, in declaration order.
            pub const ALL: &'static [Material] = &[$(Material::$variant),+];

            /// Canonical configuration name of this material.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Material::$variant => $name,)+
                }
            }
        }
    };
}

materials! {
    Air => "AIR",
    Barrier => "BARRIER",
    Stick => "STICK",
    String => "STRING",
    Feather => "FEATHER",
    Flint => "FLINT",
    Leather => "LEATHER",
    Paper => "PAPER",
    Book => "BOOK",
    Bone => "BONE",
    Gunpowder => "GUNPOWDER",
    SlimeBall => "SLIME_BALL",
    BlazeRod => "BLAZE_ROD",
    EnderPearl => "ENDER_PEARL",
    Coal => "COAL",
    Charcoal => "CHARCOAL",
    CoalBlock => "COAL_BLOCK",
    IronNugget => "IRON_NUGGET",
    IronIngot => "IRON_INGOT",
    IronBlock => "IRON_BLOCK",
    GoldNugget => "GOLD_NUGGET",
    GoldIngot => "GOLD_INGOT",
    GoldBlock => "GOLD_BLOCK",
    CopperIngot => "COPPER_INGOT",
    NetheriteIngot => "NETHERITE_INGOT",
    Diamond => "DIAMOND",
    DiamondBlock => "DIAMOND_BLOCK",
    Emerald => "EMERALD",
    Redstone => "REDSTONE",
    LapisLazuli => "LAPIS_LAZULI",
    OakLog => "OAK_LOG",
    SpruceLog => "SPRUCE_LOG",
    BirchLog => "BIRCH_LOG",
    JungleLog => "JUNGLE_LOG",
    AcaciaLog => "ACACIA_LOG",
    DarkOakLog => "DARK_OAK_LOG",
    OakPlanks => "OAK_PLANKS",
    SprucePlanks => "SPRUCE_PLANKS",
    BirchPlanks => "BIRCH_PLANKS",
    JunglePlanks => "JUNGLE_PLANKS",
    AcaciaPlanks => "ACACIA_PLANKS",
    DarkOakPlanks => "DARK_OAK_PLANKS",
    Cobblestone => "COBBLESTONE",
    Stone => "STONE",
    Sand => "SAND",
    Glass => "GLASS",
    Obsidian => "OBSIDIAN",
    WhiteWool => "WHITE_WOOL",
    RedWool => "RED_WOOL",
    BlackWool => "BLACK_WOOL",
    Torch => "TORCH",
    CraftingTable => "CRAFTING_TABLE",
    Chest => "CHEST",
    Arrow => "ARROW",
    Bow => "BOW",
    Shield => "SHIELD",
    WoodenSword => "WOODEN_SWORD",
    IronSword => "IRON_SWORD",
    DiamondSword => "DIAMOND_SWORD",
    IronPickaxe => "IRON_PICKAXE",
}

impl Material {
    /// Checks if this material denotes an empty slot.
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .get(..VANILLA_NAMESPACE.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(VANILLA_NAMESPACE))
            .map_or(trimmed, |_| &trimmed[VANILLA_NAMESPACE.len()..]);
        let normalized = bare.to_ascii_uppercase().replace([' ', '-'], "_");

        Self::ALL
            .iter()
            .copied()
            .find(|material| material.name() == normalized)
            .ok_or_else(|| ParseError::UnknownMaterial(s.to_string()))
    }
}

impl TryFrom<String> for Material {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Material> for String {
    fn from(value: Material) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("IRON_BLOCK".parse::<Material>(), Ok(Material::IronBlock));
        assert_eq!("iron_block".parse::<Material>(), Ok(Material::IronBlock));
        assert_eq!(" Iron-Block ".parse::<Material>(), Ok(Material::IronBlock));
    }

    #[test]
    fn test_parse_strips_vanilla_namespace() {
        assert_eq!("minecraft:stick".parse::<Material>(), Ok(Material::Stick));
        assert_eq!("MINECRAFT:STICK".parse::<Material>(), Ok(Material::Stick));
    }

    #[test]
    fn test_parse_unknown_material() {
        assert_eq!(
            "UNOBTAINIUM".parse::<Material>(),
            Err(ParseError::UnknownMaterial("UNOBTAINIUM".to_string()))
        );
        assert!("".parse::<Material>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        #[derive(Serialize, Deserialize)]
        struct Holder {
            material: Material,
        }

        let holder: Holder = toml::from_str("material = \"oak_planks\"").unwrap();
        assert_eq!(holder.material, Material::OakPlanks);
        let text = toml::to_string(&holder).unwrap();
        assert!(text.contains("OAK_PLANKS"));
    }

    proptest! {
        #[test]
        fn prop_every_name_parses_back(index in 0..Material::ALL.len()) {
            let material = Material::ALL[index];
            prop_assert_eq!(material.name().parse::<Material>(), Ok(material));
            prop_assert_eq!(material.name().to_lowercase().parse::<Material>(), Ok(material));
        }
    }
}
