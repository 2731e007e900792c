//! Inventory and crafting.
//!
//! Quantities are strictly positive: removing the last of an item
//! deletes its entry. Crafting is all-or-nothing: requirements are
//! verified before anything is deducted, so a failed craft never
//! leaves the inventory partially modified.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use isla_common::ItemKind;

/// Inventory error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// Not enough items
    #[error("not enough {item:?}: need {needed}, have {have}")]
    NotEnough {
        /// Item in question
        item: ItemKind,
        /// Amount needed
        needed: u32,
        /// Amount available
        have: u32,
    },
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Crafting error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CraftError {
    /// No recipe produces this item
    #[error("no recipe for {0:?}")]
    NoRecipe(ItemKind),
    /// A requirement is unmet; the inventory was not modified
    #[error("missing ingredient {item:?}: need {needed}, have {have}")]
    MissingIngredient {
        /// Missing item
        item: ItemKind,
        /// Amount required
        needed: u32,
        /// Amount available
        have: u32,
    },
}

/// Result type for crafting operations.
pub type CraftResult<T> = Result<T, CraftError>;

/// A single-writer item container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: AHashMap<ItemKind, u32>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count of an item (0 if absent).
    #[must_use]
    pub fn count(&self, item: ItemKind) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Checks for at least `amount` of an item.
    #[must_use]
    pub fn has(&self, item: ItemKind, amount: u32) -> bool {
        self.count(item) >= amount
    }

    /// Adds items. Adding zero is a no-op so the positive-quantity
    /// invariant holds.
    pub fn add(&mut self, item: ItemKind, amount: u32) {
        if amount > 0 {
            *self.items.entry(item).or_insert(0) += amount;
        }
    }

    /// Removes items, deleting the entry when it reaches zero.
    pub fn remove(&mut self, item: ItemKind, amount: u32) -> InventoryResult<()> {
        let current = self.count(item);
        if current < amount {
            return Err(InventoryError::NotEnough {
                item,
                needed: amount,
                have: current,
            });
        }
        if current == amount {
            self.items.remove(&item);
        } else {
            self.items.insert(item, current - amount);
        }
        Ok(())
    }

    /// Number of distinct item kinds held.
    #[must_use]
    pub fn kinds(&self) -> usize {
        self.items.len()
    }

    /// Iterator over held items and quantities.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        self.items.iter().map(|(&k, &q)| (k, q))
    }
}

/// One ingredient of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Required item
    pub item: ItemKind,
    /// Required quantity
    pub quantity: u32,
}

/// A crafting recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Crafted item
    pub output: ItemKind,
    /// Quantity produced
    pub output_quantity: u32,
    /// Required ingredients
    pub ingredients: Vec<Ingredient>,
}

/// The fixed set of known recipes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self {
            recipes: vec![
                Recipe {
                    output: ItemKind::StoneAxe,
                    output_quantity: 1,
                    ingredients: vec![
                        Ingredient {
                            item: ItemKind::Wood,
                            quantity: 3,
                        },
                        Ingredient {
                            item: ItemKind::Stone,
                            quantity: 2,
                        },
                    ],
                },
                Recipe {
                    output: ItemKind::Spear,
                    output_quantity: 1,
                    ingredients: vec![
                        Ingredient {
                            item: ItemKind::Wood,
                            quantity: 2,
                        },
                        Ingredient {
                            item: ItemKind::Stone,
                            quantity: 1,
                        },
                    ],
                },
                Recipe {
                    output: ItemKind::Bandage,
                    output_quantity: 1,
                    ingredients: vec![Ingredient {
                        item: ItemKind::Hide,
                        quantity: 2,
                    }],
                },
            ],
        }
    }
}

impl RecipeBook {
    /// Creates the default recipe set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the recipe that produces an item.
    #[must_use]
    pub fn recipe_for(&self, output: ItemKind) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.output == output)
    }

    /// All recipes, with a craftability flag for UI display.
    pub fn craftable(&self, inventory: &Inventory) -> impl Iterator<Item = (&Recipe, bool)> + '_ {
        let snapshot: Vec<bool> = self
            .recipes
            .iter()
            .map(|r| {
                r.ingredients
                    .iter()
                    .all(|i| inventory.has(i.item, i.quantity))
            })
            .collect();
        self.recipes.iter().zip(snapshot)
    }

    /// Crafts an item: verifies every ingredient, then deducts them
    /// all and adds the output. On error the inventory is untouched.
    pub fn craft(&self, inventory: &mut Inventory, output: ItemKind) -> CraftResult<()> {
        let recipe = self
            .recipe_for(output)
            .ok_or(CraftError::NoRecipe(output))?;

        for ingredient in &recipe.ingredients {
            let have = inventory.count(ingredient.item);
            if have < ingredient.quantity {
                return Err(CraftError::MissingIngredient {
                    item: ingredient.item,
                    needed: ingredient.quantity,
                    have,
                });
            }
        }

        for ingredient in &recipe.ingredients {
            // Verified above; cannot fail.
            let _ = inventory.remove(ingredient.item, ingredient.quantity);
        }
        inventory.add(recipe.output, recipe.output_quantity);

        tracing::debug!(?output, "item crafted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut inv = Inventory::new();
        inv.add(ItemKind::Wood, 5);
        assert_eq!(inv.count(ItemKind::Wood), 5);
        assert!(inv.remove(ItemKind::Wood, 3).is_ok());
        assert_eq!(inv.count(ItemKind::Wood), 2);
    }

    #[test]
    fn test_zero_quantity_entries_removed() {
        let mut inv = Inventory::new();
        inv.add(ItemKind::Stone, 2);
        assert!(inv.remove(ItemKind::Stone, 2).is_ok());
        assert_eq!(inv.kinds(), 0);
        assert_eq!(inv.count(ItemKind::Stone), 0);
    }

    #[test]
    fn test_remove_more_than_held() {
        let mut inv = Inventory::new();
        inv.add(ItemKind::Wood, 1);
        let err = inv.remove(ItemKind::Wood, 2);
        assert_eq!(
            err,
            Err(InventoryError::NotEnough {
                item: ItemKind::Wood,
                needed: 2,
                have: 1,
            })
        );
        assert_eq!(inv.count(ItemKind::Wood), 1);
    }

    #[test]
    fn test_craft_success() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new();
        inv.add(ItemKind::Wood, 3);
        inv.add(ItemKind::Stone, 2);
        assert!(book.craft(&mut inv, ItemKind::StoneAxe).is_ok());
        assert_eq!(inv.count(ItemKind::StoneAxe), 1);
        assert_eq!(inv.count(ItemKind::Wood), 0);
        assert_eq!(inv.count(ItemKind::Stone), 0);
    }

    #[test]
    fn test_craft_insufficient_is_atomic() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new();
        inv.add(ItemKind::Wood, 2);
        // Spear needs 2 wood + 1 stone; stone is missing entirely.
        let err = book.craft(&mut inv, ItemKind::Spear);
        assert_eq!(
            err,
            Err(CraftError::MissingIngredient {
                item: ItemKind::Stone,
                needed: 1,
                have: 0,
            })
        );
        // No partial deduction.
        assert_eq!(inv.count(ItemKind::Wood), 2);
        assert_eq!(inv.count(ItemKind::Spear), 0);
    }

    #[test]
    fn test_craft_unknown_recipe() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new();
        assert_eq!(
            book.craft(&mut inv, ItemKind::Meat),
            Err(CraftError::NoRecipe(ItemKind::Meat))
        );
    }

    #[test]
    fn test_craftable_flags() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new();
        inv.add(ItemKind::Wood, 2);
        inv.add(ItemKind::Stone, 1);
        let flags: Vec<(ItemKind, bool)> = book
            .craftable(&inv)
            .map(|(r, ok)| (r.output, ok))
            .collect();
        assert!(flags.contains(&(ItemKind::Spear, true)));
        assert!(flags.contains(&(ItemKind::StoneAxe, false)));
    }
}
