//! Recipe form state: the draft being edited and the ingredient being typed.

use crate::error::FormError;
use crate::models::{Ingredient, Recipe, RecipePayload, Unit};

/// Minimum characters typed before the autocomplete endpoint is queried.
pub const MIN_SUGGESTION_CHARS: usize = 2;

pub fn wants_suggestions(name: &str) -> bool {
    name.trim().chars().count() >= MIN_SUGGESTION_CHARS
}

/// Parses a user-typed quantity. Accepts a decimal comma.
pub fn parse_quantity(input: &str) -> Result<f64, FormError> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(FormError::IncompleteIngredient);
    }
    match normalized.parse::<f64>() {
        Ok(q) if q.is_finite() && q > 0.0 => Ok(q),
        _ => Err(FormError::InvalidQuantity),
    }
}

/// Whole number typed in a form field. Blank or invalid text reads as zero.
pub fn parse_count(input: &str) -> u32 {
    input.trim().parse().unwrap_or(0)
}

/// Decimal typed in a form field, decimal comma allowed. Blank, invalid or
/// negative text reads as zero.
pub fn parse_amount(input: &str) -> f64 {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

/// Text for an optional numeric field; zero shows as blank.
pub fn blank_if_zero(value: f64) -> String {
    if value > 0.0 {
        format_quantity(value)
    } else {
        String::new()
    }
}

/// Splits a comma-separated tag field.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Formats a quantity without a trailing `.0`.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        let s = format!("{:.2}", quantity);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// The ingredient row being typed, with raw text for the quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientEntry {
    pub name: String,
    pub quantity: String,
    pub unit: Unit,
    pub mandatory: bool,
}

impl Default for IngredientEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: String::new(),
            unit: Unit::Gram,
            mandatory: true,
        }
    }
}

impl IngredientEntry {
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            quantity: format_quantity(ingredient.quantity),
            unit: ingredient.unit.clone(),
            mandatory: ingredient.mandatory,
        }
    }

    pub fn to_ingredient(&self) -> Result<Ingredient, FormError> {
        let name = self.name.trim();
        if name.is_empty() || self.unit.as_str().is_empty() {
            return Err(FormError::IncompleteIngredient);
        }
        let quantity = parse_quantity(&self.quantity)?;
        Ok(Ingredient {
            name: name.to_string(),
            quantity,
            unit: self.unit.clone(),
            mandatory: self.mandatory,
        })
    }
}

/// A recipe being created or edited.
///
/// Zero in an estimated field means "let the backend estimate it".
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub portions: u32,
    pub link: String,
    pub notes: String,
    pub ingredients: Vec<Ingredient>,
    pub prep_time: u32,
    pub calories_per_portion: f64,
    pub estimated_cost: f64,
    pub restrictions: Vec<String>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            portions: 1,
            link: String::new(),
            notes: String::new(),
            ingredients: Vec::new(),
            prep_time: 0,
            calories_per_portion: 0.0,
            estimated_cost: 0.0,
            restrictions: Vec::new(),
        }
    }
}

impl RecipeDraft {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            portions: recipe.portions.max(1),
            link: recipe.link.clone(),
            notes: recipe.notes.clone(),
            ingredients: recipe.ingredients.clone(),
            prep_time: recipe.prep_minutes().unwrap_or(0),
            calories_per_portion: recipe.calories().unwrap_or(0.0),
            estimated_cost: recipe.cost().unwrap_or(0.0),
            restrictions: recipe.restrictions.clone(),
        }
    }

    pub fn add_ingredient(&mut self, entry: &IngredientEntry) -> Result<(), FormError> {
        let ingredient = entry.to_ingredient()?;
        self.ingredients.push(ingredient);
        Ok(())
    }

    /// Replaces the ingredient at `index` in place. Out-of-range indexes are
    /// ignored.
    pub fn replace_ingredient(&mut self, index: usize, entry: &IngredientEntry) -> Result<(), FormError> {
        let ingredient = entry.to_ingredient()?;
        if let Some(slot) = self.ingredients.get_mut(index) {
            *slot = ingredient;
        }
        Ok(())
    }

    pub fn remove_ingredient(&mut self, index: usize) {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
    }

    /// True when the backend will fill in at least one estimated field.
    pub fn needs_estimation(&self) -> bool {
        self.prep_time == 0
            || self.calories_per_portion <= 0.0
            || self.estimated_cost <= 0.0
            || self.restrictions.is_empty()
    }

    pub fn to_payload(&self) -> Result<RecipePayload, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingRecipeName);
        }
        if self.portions == 0 {
            return Err(FormError::InvalidPortions);
        }
        if self.ingredients.is_empty() {
            return Err(FormError::NoIngredients);
        }
        Ok(RecipePayload {
            name: name.to_string(),
            portions: self.portions,
            link: self.link.trim().to_string(),
            notes: self.notes.trim().to_string(),
            ingredients: self.ingredients.clone(),
            prep_time: self.prep_time,
            calories_per_portion: self.calories_per_portion.max(0.0),
            estimated_cost: self.estimated_cost.max(0.0),
            restrictions: self.restrictions.clone(),
        })
    }
}

/// Text to send to the recipe parser, or an error when nothing was pasted.
pub fn import_text(input: &str) -> Result<String, FormError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(FormError::EmptyImportText);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, quantity: &str) -> IngredientEntry {
        IngredientEntry {
            name: name.to_string(),
            quantity: quantity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_entry_requires_name_and_quantity() {
        assert_eq!(entry("", "100").to_ingredient(), Err(FormError::IncompleteIngredient));
        assert_eq!(entry("Sal", "").to_ingredient(), Err(FormError::IncompleteIngredient));
        assert_eq!(entry("Sal", "abc").to_ingredient(), Err(FormError::InvalidQuantity));
        assert_eq!(entry("Sal", "0").to_ingredient(), Err(FormError::InvalidQuantity));
        assert_eq!(entry("Sal", "-2").to_ingredient(), Err(FormError::InvalidQuantity));
    }

    #[test]
    fn test_entry_accepts_decimal_comma() {
        let ingredient = entry(" Farinha ", "1,5").to_ingredient().unwrap();
        assert_eq!(ingredient.name, "Farinha");
        assert_eq!(ingredient.quantity, 1.5);
        assert_eq!(ingredient.unit, Unit::Gram);
        assert!(ingredient.mandatory);
    }

    #[test]
    fn test_rejected_entry_leaves_draft_unchanged() {
        let mut draft = RecipeDraft::default();
        assert!(draft.add_ingredient(&entry("Ovo", "")).is_err());
        assert!(draft.ingredients.is_empty());
        draft.add_ingredient(&entry("Ovo", "3")).unwrap();
        assert_eq!(draft.ingredients.len(), 1);
    }

    #[test]
    fn test_replace_and_remove_by_index() {
        let mut draft = RecipeDraft::default();
        draft.add_ingredient(&entry("Ovo", "3")).unwrap();
        draft.add_ingredient(&entry("Leite", "200")).unwrap();
        draft.replace_ingredient(0, &entry("Ovos caipira", "4")).unwrap();
        assert_eq!(draft.ingredients[0].name, "Ovos caipira");
        draft.remove_ingredient(5);
        assert_eq!(draft.ingredients.len(), 2);
        draft.remove_ingredient(0);
        assert_eq!(draft.ingredients[0].name, "Leite");
    }

    #[test]
    fn test_submission_requires_an_ingredient() {
        let mut draft = RecipeDraft {
            name: "Bolo".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.to_payload(), Err(FormError::NoIngredients));
        draft.add_ingredient(&entry("Farinha", "500")).unwrap();
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.portions, 1);
        assert_eq!(payload.ingredients.len(), 1);
    }

    #[test]
    fn test_submission_requires_name_and_portions() {
        let mut draft = RecipeDraft::default();
        draft.add_ingredient(&entry("Farinha", "500")).unwrap();
        assert_eq!(draft.to_payload(), Err(FormError::MissingRecipeName));
        draft.name = "Pão".to_string();
        draft.portions = 0;
        assert_eq!(draft.to_payload(), Err(FormError::InvalidPortions));
    }

    #[test]
    fn test_needs_estimation() {
        let mut draft = RecipeDraft::default();
        assert!(draft.needs_estimation());
        draft.prep_time = 30;
        draft.calories_per_portion = 320.0;
        draft.estimated_cost = 18.0;
        assert!(draft.needs_estimation());
        draft.restrictions = vec!["vegetariano".to_string()];
        assert!(!draft.needs_estimation());
    }

    #[test]
    fn test_suggestion_threshold() {
        assert!(!wants_suggestions("a"));
        assert!(!wants_suggestions(" a "));
        assert!(wants_suggestions("aç"));
    }

    #[test]
    fn test_import_text_must_not_be_blank() {
        assert_eq!(import_text("   \n"), Err(FormError::EmptyImportText));
        assert_eq!(import_text(" Bolo de fubá ").unwrap(), "Bolo de fubá");
    }

    #[test]
    fn test_numeric_fields_read_blank_as_zero() {
        assert_eq!(parse_count(" 45 "), 45);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_amount("12,5"), 12.5);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-1"), 0.0);
        assert_eq!(blank_if_zero(0.0), "");
        assert_eq!(blank_if_zero(320.0), "320");
    }

    #[test]
    fn test_parse_tags_and_format_quantity() {
        assert_eq!(
            parse_tags("vegano, sem glúten,, "),
            vec!["vegano".to_string(), "sem glúten".to_string()]
        );
        assert_eq!(format_quantity(500.0), "500");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.333333), "0.33");
    }
}
