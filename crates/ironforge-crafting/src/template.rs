//! Custom item templates and the resolver interface.

use ironforge_common::{ItemStack, Material, TemplateId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Builds and recognises custom item stacks.
pub trait ItemTemplateResolver {
    /// Builds a stack of `amount` items from a template.
    ///
    /// Returns `None` if the template is unknown.
    fn build(&self, template: &str, amount: u32) -> Option<ItemStack>;

    /// Checks if a stack is an instance of a template.
    ///
    /// Requirement matching does not call this; it compares the stack's own
    /// template ID (`ItemStack::is_template`). Overrides only affect hosts
    /// that call it directly.
    fn is_instance_of(&self, stack: &ItemStack, template: &str) -> bool {
        !stack.is_empty() && stack.is_template(template)
    }
}

/// A custom item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Template identifier.
    pub id: TemplateId,
    /// Base material the custom item is made of.
    pub material: Material,
    /// Name shown to players.
    #[serde(default)]
    pub display_name: String,
}

impl ItemTemplate {
    /// Creates a new template.
    #[must_use]
    pub fn new(id: impl Into<TemplateId>, material: Material) -> Self {
        Self {
            id: id.into(),
            material,
            display_name: String::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Creates a stack of this template.
    #[must_use]
    pub fn stack(&self, amount: u32) -> ItemStack {
        ItemStack::new(self.material, amount).with_template(self.id.clone())
    }
}

/// In-memory template catalog.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<TemplateId, ItemTemplate>,
}

impl TemplateCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a template. Returns the previous definition.
    pub fn insert(&mut self, template: ItemTemplate) -> Option<ItemTemplate> {
        self.templates.insert(template.id.clone(), template)
    }

    /// Gets a template by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ItemTemplate> {
        self.templates.get(id)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Checks if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ItemTemplateResolver for TemplateCatalog {
    fn build(&self, template: &str, amount: u32) -> Option<ItemStack> {
        self.get(template).map(|t| t.stack(amount))
    }
}
