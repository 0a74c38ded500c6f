//! Item stacks as the plugin sees them.

use serde::{Deserialize, Serialize};

use crate::ids::TemplateId;
use crate::material::Material;

/// A stack of items taken from a host inventory slot.
///
/// `template` is the custom template identity stored in the stack's
/// persistent data, if the stack was produced from a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Base material of the stack.
    pub material: Material,
    /// Number of items in the stack.
    pub amount: u32,
    /// Custom template identity, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateId>,
}

impl ItemStack {
    /// Creates a plain stack of a base material.
    #[must_use]
    pub const fn new(material: Material, amount: u32) -> Self {
        Self {
            material,
            amount,
            template: None,
        }
    }

    /// Creates the visibly-invalid stack used when a result cannot be built.
    #[must_use]
    pub const fn placeholder(amount: u32) -> Self {
        Self::new(Material::Barrier, amount)
    }

    /// Tags this stack with a template identity.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<TemplateId>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Checks if this stack holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount == 0 || self.material.is_air()
    }

    /// Checks if this stack carries the given template identity.
    #[must_use]
    pub fn is_template(&self, template: &str) -> bool {
        self.template
            .as_ref()
            .is_some_and(|id| id.as_str() == template)
    }

    /// Checks if this is the invalid-result placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.material == Material::Barrier && self.template.is_none()
    }
}
