//! Wire types shared with the recipe backend.
//!
//! Field names follow the backend's JSON; Rust-side names are English and
//! mapped with `serde(rename)` where they differ.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Measurement unit of an ingredient or shopping item.
///
/// The backend stores units as free strings (the AI importer can produce
/// anything), so unknown values are kept in [`Unit::Other`] and written back
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    #[default]
    Gram,
    Kilogram,
    Milligram,
    Milliliter,
    Liter,
    Centiliter,
    Tablespoon,
    Teaspoon,
    Cup,
    Piece,
    Pinch,
    ToTaste,
    Other(String),
}

impl Unit {
    /// Units offered in the form selects, in display order.
    pub const CHOICES: [Unit; 12] = [
        Unit::Gram,
        Unit::Kilogram,
        Unit::Milligram,
        Unit::Milliliter,
        Unit::Liter,
        Unit::Centiliter,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::Cup,
        Unit::Piece,
        Unit::Pinch,
        Unit::ToTaste,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milligram => "mg",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Centiliter => "cl",
            Unit::Tablespoon => "colher (sopa)",
            Unit::Teaspoon => "colher (chá)",
            Unit::Cup => "xícara",
            Unit::Piece => "unidade",
            Unit::Pinch => "pitada",
            Unit::ToTaste => "a gosto",
            Unit::Other(s) => s,
        }
    }
}

impl From<String> for Unit {
    fn from(s: String) -> Self {
        match s.as_str() {
            "g" => Unit::Gram,
            "kg" => Unit::Kilogram,
            "mg" => Unit::Milligram,
            "ml" => Unit::Milliliter,
            "l" => Unit::Liter,
            "cl" => Unit::Centiliter,
            "colher (sopa)" => Unit::Tablespoon,
            "colher (chá)" => Unit::Teaspoon,
            "xícara" => Unit::Cup,
            "unidade" => Unit::Piece,
            "pitada" => Unit::Pinch,
            "a gosto" => Unit::ToTaste,
            _ => Unit::Other(s),
        }
    }
}

impl From<&str> for Unit {
    fn from(s: &str) -> Self {
        Unit::from(s.to_string())
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// Treats `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An ingredient line embedded in a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default = "default_true")]
    pub mandatory: bool,
}

/// A recipe as returned by the backend.
///
/// Estimated fields (prep time, calories, cost) use `None` or zero for
/// "not estimated yet"; use the accessor methods to get the normalized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub portions: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(rename = "imagem_url", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(rename = "tempo_preparo", default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    #[serde(rename = "calorias_por_porcao", default, skip_serializing_if = "Option::is_none")]
    pub calories_per_portion: Option<f64>,
    #[serde(rename = "custo_estimado", default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(rename = "restricoes", default, deserialize_with = "null_as_default")]
    pub restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Prep time in minutes, `None` when unset or zero.
    pub fn prep_minutes(&self) -> Option<u32> {
        self.prep_time.filter(|&m| m > 0)
    }

    pub fn calories(&self) -> Option<f64> {
        self.calories_per_portion.filter(|&c| c > 0.0)
    }

    pub fn cost(&self) -> Option<f64> {
        self.estimated_cost.filter(|&c| c > 0.0)
    }

    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Body for creating or updating a recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipePayload {
    pub name: String,
    pub portions: u32,
    pub link: String,
    pub notes: String,
    pub ingredients: Vec<Ingredient>,
    #[serde(rename = "tempo_preparo")]
    pub prep_time: u32,
    #[serde(rename = "calorias_por_porcao")]
    pub calories_per_portion: f64,
    #[serde(rename = "custo_estimado")]
    pub estimated_cost: f64,
    #[serde(rename = "restricoes")]
    pub restrictions: Vec<String>,
}

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub bought: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipe_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipe_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_quick_list: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ShoppingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ShoppingList {
    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|i| !i.bought).count()
    }

    pub fn bought_count(&self) -> usize {
        self.items.iter().filter(|i| i.bought).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewShoppingList {
    pub name: String,
}

/// Request to expand a recipe's ingredients into a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddRecipeToList {
    pub recipe_id: String,
    pub portions: u32,
}

/// A manually entered list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewShoppingItem {
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: Unit,
}

/// Partial update of a list item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bought: Option<bool>,
}

impl ShoppingItemUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Token response for both login and registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub name: String,
    #[serde(default)]
    pub has_completed_onboarding: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportRequest {
    pub clipboard_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_unit_round_trips() {
        let unit: Unit = serde_json::from_str("\"dente\"").unwrap();
        assert_eq!(unit, Unit::Other("dente".to_string()));
        assert_eq!(serde_json::to_string(&unit).unwrap(), "\"dente\"");
    }

    #[test]
    fn test_known_units_map_to_variants() {
        for unit in Unit::CHOICES.iter() {
            let json = serde_json::to_string(unit).unwrap();
            let back: Unit = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, unit);
        }
        assert_eq!(Unit::from("colher (chá)"), Unit::Teaspoon);
    }

    #[test]
    fn test_default_unit_is_gram() {
        assert_eq!(Unit::default(), Unit::Gram);
        assert_eq!(serde_json::to_string(&Unit::default()).unwrap(), "\"g\"");
    }

    #[test]
    fn test_recipe_with_minimal_fields() {
        let json = r#"{
            "id": "r1",
            "name": "Bolo",
            "portions": 4,
            "notes": null,
            "ingredients": [{"name": "Farinha", "quantity": 500, "unit": "g"}]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.notes, "");
        assert!(recipe.ingredients[0].mandatory);
        assert!(recipe.prep_minutes().is_none());
        assert!(recipe.calories().is_none());
        assert!(recipe.restrictions.is_empty());
        assert!(recipe.created_at.is_none());
    }

    #[test]
    fn test_recipe_estimates_use_backend_names() {
        let json = r#"{
            "id": "r2",
            "name": "Salada",
            "portions": 2,
            "ingredients": [],
            "tempo_preparo": 15,
            "calorias_por_porcao": 0,
            "custo_estimado": 12.5,
            "restricoes": ["vegano"],
            "created_at": "2024-05-01T10:00:00+00:00"
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.prep_minutes(), Some(15));
        // zero means "not estimated"
        assert_eq!(recipe.calories(), None);
        assert_eq!(recipe.cost(), Some(12.5));
        assert_eq!(recipe.restrictions, vec!["vegano".to_string()]);
        assert!(recipe.created_at.is_some());
    }

    #[test]
    fn test_register_response_defaults_onboarding_flag() {
        let auth: AuthResponse =
            serde_json::from_str(r#"{"token": "t", "name": "Ana", "username": "ana"}"#).unwrap();
        assert!(!auth.has_completed_onboarding);
    }

    #[test]
    fn test_item_update_skips_unset_fields() {
        let update = ShoppingItemUpdate {
            bought: Some(true),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"bought":true}"#);
    }

    #[test]
    fn test_list_counts() {
        let json = r#"{
            "id": "l1",
            "name": "Lista rápida",
            "is_quick_list": true,
            "items": [
                {"id": "a", "ingredient_name": "Ovo", "quantity": 6, "unit": "unidade", "bought": true},
                {"id": "b", "ingredient_name": "Leite", "quantity": 1, "unit": "l"}
            ]
        }"#;
        let list: ShoppingList = serde_json::from_str(json).unwrap();
        assert_eq!(list.pending_count(), 1);
        assert_eq!(list.bought_count(), 1);
        assert!(list.items[1].recipe_names.is_empty());
    }
}
