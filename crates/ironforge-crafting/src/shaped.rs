//! Shaped recipe patterns.
//!
//! A pattern is up to three rows of up to three characters. A space means
//! "this cell must be empty"; any other character refers to an ingredient
//! requirement in the pattern's key. The pattern may sit anywhere inside the
//! crafting grid as long as every cell outside it is empty.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{RecipeError, RecipeResult};
use crate::grid::{Consumption, CraftingGrid, GRID_SIZE, GRID_SLOTS};
use crate::ingredient::IngredientRequirement;
use crate::tags::TagResolver;

/// Character marking a cell that must stay empty.
pub const EMPTY_CELL: char = ' ';

/// Where a pattern was found inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Grid row of the pattern's top edge.
    pub row_offset: usize,
    /// Grid column of the pattern's left edge.
    pub col_offset: usize,
    /// Pattern height.
    pub height: usize,
    /// Pattern width.
    pub width: usize,
}

impl Placement {
    /// Checks if a grid cell lies inside the placed pattern.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.pattern_cell(index).is_some()
    }

    /// Pattern `(row, col)` covering a grid cell, if any.
    #[must_use]
    pub fn pattern_cell(&self, index: usize) -> Option<(usize, usize)> {
        if index >= GRID_SLOTS {
            return None;
        }
        let (row, col) = (index / GRID_SIZE, index % GRID_SIZE);
        let in_rows = row >= self.row_offset && row < self.row_offset + self.height;
        let in_cols = col >= self.col_offset && col < self.col_offset + self.width;
        (in_rows && in_cols).then(|| (row - self.row_offset, col - self.col_offset))
    }
}

/// A validated shaped pattern with its ingredient key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedPattern {
    rows: Vec<String>,
    /// Padded cells, row-major, `height * width` long.
    cells: Vec<char>,
    width: usize,
    height: usize,
    key: HashMap<char, IngredientRequirement>,
}

impl ShapedPattern {
    /// Builds a pattern from its rows and key.
    ///
    /// Fails if there are more than 3 rows, a row is wider than 3, no cell
    /// holds an ingredient, or a symbol has no key entry.
    pub fn new<I, S>(rows: I, key: HashMap<char, IngredientRequirement>) -> RecipeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<String> = rows.into_iter().map(Into::into).collect();
        if rows.len() > GRID_SIZE {
            return Err(RecipeError::TooManyRows { rows: rows.len() });
        }

        let mut width = 0;
        for (row, text) in rows.iter().enumerate() {
            let row_width = text.chars().count();
            if row_width > GRID_SIZE {
                return Err(RecipeError::RowTooWide {
                    row,
                    width: row_width,
                });
            }
            width = width.max(row_width);
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(height * width);
        for text in &rows {
            let mut chars = text.chars();
            cells.extend((0..width).map(|_| chars.next().unwrap_or(EMPTY_CELL)));
        }

        if cells.iter().all(|&c| c == EMPTY_CELL) {
            return Err(RecipeError::EmptyShape);
        }
        if let Some(&missing) = cells
            .iter()
            .find(|&&c| c != EMPTY_CELL && !key.contains_key(&c))
        {
            return Err(RecipeError::MissingKey(missing));
        }
        for symbol in key.keys() {
            if !cells.contains(symbol) {
                debug!("Shape key '{}' is not used by the pattern", symbol);
            }
        }

        Ok(Self {
            rows,
            cells,
            width,
            height,
            key,
        })
    }

    /// Pattern rows as written.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Pattern width (longest row).
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pattern height (row count).
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Ingredient key.
    #[must_use]
    pub fn key(&self) -> &HashMap<char, IngredientRequirement> {
        &self.key
    }

    /// Symbol at pattern `(row, col)`; a space for padding.
    #[must_use]
    pub fn symbol(&self, row: usize, col: usize) -> char {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col]
        } else {
            EMPTY_CELL
        }
    }

    /// Returns a copy with every tag requirement in the key resolved.
    #[must_use]
    pub fn resolve_tags(&self, resolver: &dyn TagResolver) -> Self {
        let key = self
            .key
            .iter()
            .map(|(&symbol, req)| (symbol, req.resolve_tag(resolver)))
            .collect();
        Self { key, ..self.clone() }
    }

    /// Finds the first placement of this pattern in the grid.
    ///
    /// Offsets are tried in row-major order and the first one that fits wins.
    /// Grids that are not exactly 3x3 never match.
    #[must_use]
    pub fn find_placement(&self, grid: &CraftingGrid) -> Option<Placement> {
        if !grid.is_full_size() {
            return None;
        }

        for row_offset in 0..=GRID_SIZE - self.height {
            for col_offset in 0..=GRID_SIZE - self.width {
                let placement = Placement {
                    row_offset,
                    col_offset,
                    height: self.height,
                    width: self.width,
                };
                if self.fits(grid, &placement) {
                    return Some(placement);
                }
            }
        }
        None
    }

    /// Checks a single placement: pattern cells match, everything else empty.
    fn fits(&self, grid: &CraftingGrid, placement: &Placement) -> bool {
        (0..GRID_SLOTS).all(|index| match self.requirement_at(placement, index) {
            Some(req) => grid.stack(index).is_some_and(|stack| req.matches_fully(stack)),
            None => grid.is_cell_empty(index),
        })
    }

    /// Requirement governing a grid cell under a placement.
    ///
    /// `None` for cells outside the pattern and for pattern spaces.
    #[must_use]
    pub fn requirement_at(
        &self,
        placement: &Placement,
        index: usize,
    ) -> Option<&IngredientRequirement> {
        let (row, col) = placement.pattern_cell(index)?;
        match self.symbol(row, col) {
            EMPTY_CELL => None,
            symbol => self.key.get(&symbol),
        }
    }

    /// Amount each grid cell gives up when crafting at `placement`.
    #[must_use]
    pub fn consumption(&self, placement: &Placement) -> Consumption {
        let mut consumption = [0; GRID_SLOTS];
        for (index, amount) in consumption.iter_mut().enumerate() {
            if let Some(req) = self.requirement_at(placement, index) {
                *amount = req.amount();
            }
        }
        consumption
    }
}
