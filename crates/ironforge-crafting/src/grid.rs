//! Crafting grid snapshots.

use ironforge_common::ItemStack;

/// Width and height of the crafting grid.
pub const GRID_SIZE: usize = 3;

/// Number of slots in the crafting grid.
pub const GRID_SLOTS: usize = GRID_SIZE * GRID_SIZE;

/// Amount to remove from each grid cell when a craft is confirmed.
pub type Consumption = [u32; GRID_SLOTS];

/// A row-major snapshot of the crafting grid.
///
/// The snapshot owns copies of the host's stacks; matching only reads it.
/// Snapshots with a slot count other than [`GRID_SLOTS`] can be built, since
/// the host hands over whatever its inventory holds, but never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraftingGrid {
    slots: Vec<Option<ItemStack>>,
}

impl CraftingGrid {
    /// Creates an empty 3x3 grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![None; GRID_SLOTS],
        }
    }

    /// Creates a snapshot from raw host slots.
    #[must_use]
    pub fn from_slots(slots: Vec<Option<ItemStack>>) -> Self {
        Self { slots }
    }

    /// Creates a 3x3 grid from `(row, col, stack)` placements.
    #[must_use]
    pub fn with_stacks(stacks: impl IntoIterator<Item = (usize, usize, ItemStack)>) -> Self {
        let mut grid = Self::new();
        for (row, col, stack) in stacks {
            grid.set(row, col, Some(stack));
        }
        grid
    }

    /// Checks if the snapshot has exactly [`GRID_SLOTS`] slots.
    #[must_use]
    pub fn is_full_size(&self) -> bool {
        self.slots.len() == GRID_SLOTS
    }

    /// Number of slots in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Checks if the snapshot has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sets the slot at `(row, col)`. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, stack: Option<ItemStack>) {
        if row < GRID_SIZE && col < GRID_SIZE {
            if let Some(slot) = self.slots.get_mut(row * GRID_SIZE + col) {
                *slot = stack;
            }
        }
    }

    /// Non-empty stack at a cell index, if any.
    #[must_use]
    pub fn stack(&self, index: usize) -> Option<&ItemStack> {
        self.slots
            .get(index)
            .and_then(Option::as_ref)
            .filter(|stack| !stack.is_empty())
    }

    /// Non-empty stack at `(row, col)`, if any.
    #[must_use]
    pub fn stack_at(&self, row: usize, col: usize) -> Option<&ItemStack> {
        if row < GRID_SIZE && col < GRID_SIZE {
            self.stack(row * GRID_SIZE + col)
        } else {
            None
        }
    }

    /// Checks if the cell at `index` holds nothing.
    #[must_use]
    pub fn is_cell_empty(&self, index: usize) -> bool {
        self.stack(index).is_none()
    }

    /// Non-empty stacks with their cell index, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &ItemStack)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|stack| (index, stack)))
            .filter(|(_, stack)| !stack.is_empty())
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Raw slots of the snapshot.
    #[must_use]
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }
}

impl From<[Option<ItemStack>; GRID_SLOTS]> for CraftingGrid {
    fn from(slots: [Option<ItemStack>; GRID_SLOTS]) -> Self {
        Self::from_slots(slots.into())
    }
}
