//! Shapeless recipe ingredient lists.
//!
//! The grid's non-empty stacks are treated as an unordered multiset. Each
//! requirement takes its amount out of one stack; a stack may feed several
//! requirements while it has items left. In strict mode the grid must hold
//! one stack per requirement and every item must be used up.

use std::collections::HashSet;

use ironforge_common::{ItemStack, Material, TemplateId};
use serde::{Deserialize, Serialize};

use crate::error::{RecipeError, RecipeResult};
use crate::grid::{Consumption, CraftingGrid, GRID_SLOTS};
use crate::ingredient::IngredientRequirement;
use crate::tags::TagResolver;

/// How requirements are assigned to grid stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapelessStrategy {
    /// Requirements in list order each take the first stack that fits.
    ///
    /// Can reject a grid that some other assignment would accept, e.g. a
    /// tag requirement listed first taking the only stack a later material
    /// requirement could use.
    #[default]
    Greedy,
    /// Tries every assignment; accepts any grid some assignment satisfies.
    Exhaustive,
}

/// A private copy of one grid stack, tracking what is left of it.
#[derive(Debug, Clone)]
struct WorkingStack<'a> {
    cell: usize,
    stack: &'a ItemStack,
    remaining: u32,
}

/// Everything a requirement can observe about a working stack. Stacks with
/// the same class are interchangeable during assignment.
type StackClass<'a> = (Material, Option<&'a str>, u32);

/// Next requirement index plus the sorted classes of every working stack.
type SearchState<'a> = (usize, Vec<StackClass<'a>>);

impl<'a> WorkingStack<'a> {
    fn class(&self) -> StackClass<'a> {
        (
            self.stack.material,
            self.stack.template.as_ref().map(TemplateId::as_str),
            self.remaining,
        )
    }
}

fn search_state<'a>(depth: usize, working: &[WorkingStack<'a>]) -> SearchState<'a> {
    let mut classes: Vec<StackClass<'a>> = working.iter().map(WorkingStack::class).collect();
    classes.sort_unstable();
    (depth, classes)
}

/// A validated shapeless ingredient list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapelessList {
    requirements: Vec<IngredientRequirement>,
    strict: bool,
    strategy: ShapelessStrategy,
}

impl ShapelessList {
    /// Builds a greedy ingredient list. Fails if `requirements` is empty.
    pub fn new(requirements: Vec<IngredientRequirement>, strict: bool) -> RecipeResult<Self> {
        if requirements.is_empty() {
            return Err(RecipeError::EmptyIngredients);
        }
        Ok(Self {
            requirements,
            strict,
            strategy: ShapelessStrategy::default(),
        })
    }

    /// Switches the assignment strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ShapelessStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Requirements in list order.
    #[must_use]
    pub fn requirements(&self) -> &[IngredientRequirement] {
        &self.requirements
    }

    /// Whether extra grid contents are forbidden.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Assignment strategy.
    #[must_use]
    pub fn strategy(&self) -> ShapelessStrategy {
        self.strategy
    }

    /// Returns a copy with every tag requirement resolved.
    #[must_use]
    pub fn resolve_tags(&self, resolver: &dyn TagResolver) -> Self {
        Self {
            requirements: self
                .requirements
                .iter()
                .map(|req| req.resolve_tag(resolver))
                .collect(),
            ..self.clone()
        }
    }

    /// Checks if the grid satisfies this list.
    #[must_use]
    pub fn matches(&self, grid: &CraftingGrid) -> bool {
        self.match_grid(grid).is_some()
    }

    /// Matches the grid and returns the per-cell amounts used.
    ///
    /// Grids that are not exactly 3x3 never match.
    #[must_use]
    pub fn match_grid(&self, grid: &CraftingGrid) -> Option<Consumption> {
        if !grid.is_full_size() {
            return None;
        }

        let mut working: Vec<WorkingStack<'_>> = grid
            .occupied()
            .map(|(cell, stack)| WorkingStack {
                cell,
                stack,
                remaining: stack.amount,
            })
            .collect();

        // One physical stack per requirement; amounts are not considered here.
        if self.strict && working.len() != self.requirements.len() {
            return None;
        }

        let mut consumption = [0; GRID_SLOTS];
        let matched = match self.strategy {
            ShapelessStrategy::Greedy => self.assign_greedy(&mut working, &mut consumption),
            ShapelessStrategy::Exhaustive => {
                let mut failed = HashSet::new();
                self.assign_exhaustive(0, &mut working, &mut consumption, &mut failed)
            },
        };
        matched.then_some(consumption)
    }

    fn assign_greedy(
        &self,
        working: &mut Vec<WorkingStack<'_>>,
        consumption: &mut Consumption,
    ) -> bool {
        for req in &self.requirements {
            let Some(position) = working
                .iter()
                .position(|w| w.remaining >= req.amount() && req.matches_type(w.stack))
            else {
                return false;
            };

            let entry = &mut working[position];
            entry.remaining -= req.amount();
            consumption[entry.cell] += req.amount();
            if entry.remaining == 0 {
                working.remove(position);
            }
        }

        !self.strict || working.is_empty()
    }

    /// Depth-first search over assignments.
    ///
    /// Each stack class is tried once per depth; `failed` remembers states
    /// with no completion.
    fn assign_exhaustive<'a>(
        &self,
        depth: usize,
        working: &mut [WorkingStack<'a>],
        consumption: &mut Consumption,
        failed: &mut HashSet<SearchState<'a>>,
    ) -> bool {
        let Some(req) = self.requirements.get(depth) else {
            return !self.strict || working.iter().all(|w| w.remaining == 0);
        };

        let state = search_state(depth, working);
        if failed.contains(&state) {
            return false;
        }

        let mut tried: Vec<StackClass<'a>> = Vec::new();
        for i in 0..working.len() {
            if working[i].remaining < req.amount() || !req.matches_type(working[i].stack) {
                continue;
            }
            let class = working[i].class();
            if tried.contains(&class) {
                continue;
            }
            tried.push(class);

            let cell = working[i].cell;
            working[i].remaining -= req.amount();
            consumption[cell] += req.amount();
            if self.assign_exhaustive(depth + 1, working, consumption, failed) {
                return true;
            }
            working[i].remaining += req.amount();
            consumption[cell] -= req.amount();
        }

        failed.insert(state);
        false
    }
}
