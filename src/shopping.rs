//! Shopping list helpers shared by the list pages.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};

use crate::draft::parse_quantity;
use crate::error::FormError;
use crate::models::{
    AddRecipeToList, NewShoppingItem, Recipe, ShoppingItem, ShoppingItemUpdate, ShoppingList, Unit,
};

pub fn find_quick_list(lists: &[ShoppingList]) -> Option<&ShoppingList> {
    lists.iter().find(|l| l.is_quick_list)
}

/// The quick list cannot be deleted. Checked before any request is sent.
pub fn ensure_deletable(list: &ShoppingList) -> Result<(), FormError> {
    if list.is_quick_list {
        Err(FormError::QuickListNotDeletable)
    } else {
        Ok(())
    }
}

/// Splits items into (pending, bought), keeping list order within each.
pub fn partition_items(items: &[ShoppingItem]) -> (Vec<ShoppingItem>, Vec<ShoppingItem>) {
    items.iter().cloned().partition(|i| !i.bought)
}

/// Name proposed for a new list: the creation time as `dd/MM/yyyy HH:mm`.
pub fn default_list_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%d/%m/%Y %H:%M").to_string()
}

pub fn validate_list_name(name: &str) -> Result<String, FormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::MissingListName);
    }
    Ok(name.to_string())
}

/// Raw form state for a list item (new or being edited).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub name: String,
    pub quantity: String,
    pub unit: Unit,
}

impl Default for ItemEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: String::new(),
            unit: Unit::Gram,
        }
    }
}

impl ItemEntry {
    pub fn from_item(item: &ShoppingItem) -> Self {
        Self {
            name: item.ingredient_name.clone(),
            quantity: crate::draft::format_quantity(item.quantity),
            unit: item.unit.clone(),
        }
    }

    pub fn to_new_item(&self) -> Result<NewShoppingItem, FormError> {
        let name = self.name.trim();
        if name.is_empty() || self.quantity.trim().is_empty() {
            return Err(FormError::IncompleteItem);
        }
        Ok(NewShoppingItem {
            ingredient_name: name.to_string(),
            quantity: parse_quantity(&self.quantity)?,
            unit: self.unit.clone(),
        })
    }

    /// In-place update for an existing item. Only changed fields are sent, so
    /// the item keeps its id, bought flag and recipe provenance.
    pub fn to_update(&self, original: &ShoppingItem) -> Result<ShoppingItemUpdate, FormError> {
        let new = self.to_new_item()?;
        Ok(ShoppingItemUpdate {
            ingredient_name: (new.ingredient_name != original.ingredient_name)
                .then_some(new.ingredient_name),
            quantity: (new.quantity != original.quantity).then_some(new.quantity),
            unit: (new.unit != original.unit).then_some(new.unit),
            bought: None,
        })
    }
}

/// Whether `item`, as stored after an update, carries every field the update set.
pub fn update_applied(item: &ShoppingItem, update: &ShoppingItemUpdate) -> bool {
    update
        .ingredient_name
        .as_ref()
        .map_or(true, |name| *name == item.ingredient_name)
        && update.quantity.map_or(true, |quantity| quantity == item.quantity)
        && update.unit.as_ref().map_or(true, |unit| *unit == item.unit)
        && update.bought.map_or(true, |bought| bought == item.bought)
}

/// Local view of an item after toggling its bought flag.
pub fn toggled(item: &ShoppingItem) -> ShoppingItem {
    ShoppingItem {
        bought: !item.bought,
        ..item.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeChoice {
    pub selected: bool,
    pub portions: u32,
}

/// Which recipes to add to a list, each with its own portion count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeSelection {
    choices: BTreeMap<String, RecipeChoice>,
    order: Vec<String>,
}

impl RecipeSelection {
    /// Nothing selected; portions default to each recipe's own.
    pub fn for_recipes(recipes: &[Recipe]) -> Self {
        let mut selection = Self::default();
        for recipe in recipes {
            selection.order.push(recipe.id.clone());
            selection.choices.insert(
                recipe.id.clone(),
                RecipeChoice {
                    selected: false,
                    portions: recipe.portions.max(1),
                },
            );
        }
        selection
    }

    pub fn get(&self, recipe_id: &str) -> Option<RecipeChoice> {
        self.choices.get(recipe_id).copied()
    }

    pub fn toggle(&mut self, recipe_id: &str) {
        if let Some(choice) = self.choices.get_mut(recipe_id) {
            choice.selected = !choice.selected;
        }
    }

    /// Portions below one are raised to one.
    pub fn set_portions(&mut self, recipe_id: &str, portions: u32) {
        if let Some(choice) = self.choices.get_mut(recipe_id) {
            choice.portions = portions.max(1);
        }
    }

    pub fn selected_count(&self) -> usize {
        self.choices.values().filter(|c| c.selected).count()
    }

    /// Requests for the selected recipes, in the order they were listed.
    pub fn requests(&self) -> Result<Vec<AddRecipeToList>, FormError> {
        let requests: Vec<AddRecipeToList> = self
            .order
            .iter()
            .filter_map(|id| {
                let choice = self.choices.get(id)?;
                choice.selected.then(|| AddRecipeToList {
                    recipe_id: id.clone(),
                    portions: choice.portions,
                })
            })
            .collect();
        if requests.is_empty() {
            return Err(FormError::NoRecipesSelected);
        }
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;
    use crate::models::Ingredient;

    fn item(id: &str, name: &str, bought: bool) -> ShoppingItem {
        ShoppingItem {
            id: id.to_string(),
            ingredient_name: name.to_string(),
            quantity: 500.0,
            unit: Unit::Gram,
            bought,
            recipe_ids: vec!["r1".to_string()],
            recipe_names: vec!["Bolo".to_string()],
        }
    }

    fn list(id: &str, quick: bool) -> ShoppingList {
        ShoppingList {
            id: id.to_string(),
            name: id.to_string(),
            is_quick_list: quick,
            items: vec![],
            created_at: None,
        }
    }

    fn recipe(id: &str, portions: u32) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Receita {}", id),
            portions,
            link: String::new(),
            notes: String::new(),
            image_url: None,
            ingredients: vec![Ingredient {
                name: "Farinha".to_string(),
                quantity: 500.0,
                unit: Unit::Gram,
                mandatory: true,
            }],
            prep_time: None,
            calories_per_portion: None,
            estimated_cost: None,
            restrictions: vec![],
            created_at: None,
        }
    }

    #[test]
    fn test_toggle_twice_restores_item() {
        let original = item("a", "Farinha", false);
        let once = toggled(&original);
        assert!(once.bought);
        assert_eq!(once.quantity, original.quantity);
        assert_eq!(once.unit, original.unit);
        assert_eq!(once.ingredient_name, original.ingredient_name);
        assert_eq!(toggled(&once), original);
    }

    #[test]
    fn test_quick_list_is_not_deletable() {
        assert_eq!(
            ensure_deletable(&list("q", true)),
            Err(FormError::QuickListNotDeletable)
        );
        assert!(ensure_deletable(&list("x", false)).is_ok());
    }

    #[test]
    fn test_find_quick_list() {
        let lists = vec![list("a", false), list("q", true)];
        assert_eq!(find_quick_list(&lists).map(|l| l.id.as_str()), Some("q"));
        assert!(find_quick_list(&lists[..1]).is_none());
    }

    #[test]
    fn test_partition_keeps_order() {
        let items = vec![
            item("a", "Ovo", true),
            item("b", "Leite", false),
            item("c", "Sal", false),
        ];
        let (pending, bought) = partition_items(&items);
        assert_eq!(
            pending.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["b", "c"]
        );
        assert_eq!(bought.len(), 1);
    }

    #[test]
    fn test_default_list_name_format() {
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(default_list_name(&now), "07/03/2024 09:05");
    }

    #[test]
    fn test_item_entry_validation() {
        let entry = ItemEntry {
            name: "Café".to_string(),
            ..Default::default()
        };
        assert_eq!(entry.to_new_item(), Err(FormError::IncompleteItem));
        let entry = ItemEntry {
            quantity: "250".to_string(),
            ..entry
        };
        let new = entry.to_new_item().unwrap();
        assert_eq!(new.quantity, 250.0);
    }

    #[test]
    fn test_edit_sends_only_changed_fields() {
        let original = item("a", "Farinha", true);
        let mut entry = ItemEntry::from_item(&original);
        entry.quantity = "750".to_string();
        let update = entry.to_update(&original).unwrap();
        assert_eq!(update.quantity, Some(750.0));
        assert_eq!(update.ingredient_name, None);
        assert_eq!(update.unit, None);
        assert_eq!(update.bought, None);

        let unchanged = ItemEntry::from_item(&original).to_update(&original).unwrap();
        assert!(unchanged.is_empty());
    }

    #[test]
    fn test_update_applied_detects_ignored_fields() {
        let original = item("a", "Farinha", false);
        let mut entry = ItemEntry::from_item(&original);
        entry.name = "Farinha integral".to_string();
        entry.quantity = "750".to_string();
        let update = entry.to_update(&original).unwrap();

        // A backend that only honours `bought` returns the item untouched.
        assert!(!update_applied(&original, &update));

        let stored = ShoppingItem {
            ingredient_name: "Farinha integral".to_string(),
            quantity: 750.0,
            ..original.clone()
        };
        assert!(update_applied(&stored, &update));
        assert!(update_applied(&original, &ShoppingItemUpdate::default()));
    }

    #[test]
    fn test_selection_requests() {
        let recipes = vec![recipe("r1", 4), recipe("r2", 2), recipe("r3", 0)];
        let mut selection = RecipeSelection::for_recipes(&recipes);
        assert_eq!(selection.requests(), Err(FormError::NoRecipesSelected));

        selection.toggle("r2");
        selection.toggle("r1");
        selection.set_portions("r1", 8);
        selection.set_portions("r2", 0);
        let requests = selection.requests().unwrap();
        assert_eq!(
            requests,
            vec![
                AddRecipeToList {
                    recipe_id: "r1".to_string(),
                    portions: 8
                },
                AddRecipeToList {
                    recipe_id: "r2".to_string(),
                    portions: 1
                },
            ]
        );
        assert_eq!(selection.get("r3").unwrap().portions, 1);
        selection.toggle("r1");
        assert_eq!(selection.selected_count(), 1);
    }
}
