use std::path::PathBuf;

use receitas::filter::*;
use receitas::models::{Recipe, Unit};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_recipes() -> Vec<Recipe> {
    let raw = std::fs::read_to_string(fixture_path("recipes.json")).expect("Failed to read fixture");
    serde_json::from_str(&raw).expect("Failed to parse fixture")
}

fn ids(recipes: &[&Recipe]) -> Vec<String> {
    recipes.iter().map(|r| r.id.clone()).collect()
}

fn named(names: &[&str]) -> Vec<Recipe> {
    let mut recipes = load_recipes();
    recipes.truncate(names.len());
    for (recipe, name) in recipes.iter_mut().zip(names) {
        recipe.name = name.to_string();
    }
    recipes
}

#[test]
fn test_fixture_parses_sparse_recipes() {
    let recipes = load_recipes();
    assert_eq!(recipes.len(), 4);

    let salad = &recipes[3];
    assert!(salad.notes.is_empty());
    assert!(salad.restrictions.is_empty());
    assert_eq!(salad.prep_minutes(), None);
    assert_eq!(salad.created_at, None);
    assert_eq!(salad.ingredients[2].unit, Unit::Other("colher (café)".to_string()));
    assert!(salad.ingredients[2].mandatory);

    // Zero prep time counts as unset.
    assert_eq!(recipes[2].prep_minutes(), None);
}

#[test]
fn test_empty_query_keeps_everything() {
    let recipes = load_recipes();
    let out = RecipeQuery::default().apply(&recipes);
    assert_eq!(out.len(), recipes.len());
    // Default order is newest first; undated recipes sort last.
    assert_eq!(ids(&out), vec!["r3", "r1", "r2", "r4"]);
}

#[test]
fn test_result_is_subset_and_source_untouched() {
    let recipes = load_recipes();
    let before = recipes.clone();
    let query = RecipeQuery {
        ingredient: "farinha".to_string(),
        sort: SortKey::NameDesc,
        ..Default::default()
    };
    let out = query.apply(&recipes);
    assert_eq!(ids(&out), vec!["r3", "r1"]);
    assert!(out.iter().all(|r| recipes.iter().any(|s| s.id == r.id)));
    assert_eq!(recipes, before);
}

#[test]
fn test_keyword_matches_name_or_notes() {
    let recipes = load_recipes();
    let by_name = RecipeQuery {
        keyword: "BOLO".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&by_name.apply(&recipes)), vec!["r1"]);

    let by_notes = RecipeQuery {
        keyword: "couve".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&by_notes.apply(&recipes)), vec!["r3"]);
}

#[test]
fn test_buckets_exclude_unset_values() {
    let recipes = load_recipes();
    let low_cost = RecipeQuery {
        cost: Some(Bucket::Low),
        sort: SortKey::NameAsc,
        ..Default::default()
    };
    assert_eq!(ids(&low_cost.apply(&recipes)), vec!["r2", "r1"]);

    let high_calories = RecipeQuery {
        calories: Some(Bucket::High),
        ..Default::default()
    };
    assert_eq!(ids(&high_calories.apply(&recipes)), vec!["r3"]);

    let medium_calories = RecipeQuery {
        calories: Some(Bucket::Medium),
        ..Default::default()
    };
    assert_eq!(ids(&medium_calories.apply(&recipes)), vec!["r1"]);
}

#[test]
fn test_max_prep_time_excludes_unset() {
    let recipes = load_recipes();
    let query = RecipeQuery {
        max_prep_time: Some(60),
        sort: SortKey::PrepTimeAsc,
        ..Default::default()
    };
    assert_eq!(ids(&query.apply(&recipes)), vec!["r2", "r1"]);
}

#[test]
fn test_exact_portions() {
    let recipes = load_recipes();
    let query = RecipeQuery {
        portions: Some(4),
        ..Default::default()
    };
    assert_eq!(ids(&query.apply(&recipes)), vec!["r2"]);
}

#[test]
fn test_restrictions_require_every_tag() {
    let recipes = load_recipes();
    let mut query = RecipeQuery {
        sort: SortKey::NameAsc,
        ..Default::default()
    };
    query.toggle_restriction("sem glúten");
    assert_eq!(ids(&query.apply(&recipes)), vec!["r2", "r3"]);

    query.toggle_restriction("vegetariano");
    assert_eq!(ids(&query.apply(&recipes)), vec!["r2"]);
}

#[test]
fn test_name_sort_is_locale_aware() {
    let recipes = named(&["Bolo", "arroz", "Feijão"]);

    let asc = RecipeQuery {
        sort: SortKey::NameAsc,
        ..Default::default()
    };
    let names: Vec<&str> = asc.apply(&recipes).iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["arroz", "Bolo", "Feijão"]);

    let desc = RecipeQuery {
        sort: SortKey::NameDesc,
        ..Default::default()
    };
    let names: Vec<&str> = desc.apply(&recipes).iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Feijão", "Bolo", "arroz"]);
}

#[test]
fn test_unset_values_sort_last() {
    let recipes = load_recipes();
    let by_prep = RecipeQuery {
        sort: SortKey::PrepTimeAsc,
        ..Default::default()
    };
    assert_eq!(ids(&by_prep.apply(&recipes)), vec!["r2", "r1", "r3", "r4"]);

    let by_cost = RecipeQuery {
        sort: SortKey::CostAsc,
        ..Default::default()
    };
    assert_eq!(ids(&by_cost.apply(&recipes)), vec!["r2", "r1", "r3", "r4"]);
}

#[test]
fn test_created_ascending() {
    let recipes = load_recipes();
    let query = RecipeQuery {
        sort: SortKey::CreatedAsc,
        ..Default::default()
    };
    assert_eq!(ids(&query.apply(&recipes)), vec!["r4", "r2", "r1", "r3"]);
}

#[test]
fn test_available_restrictions_dedupes_case() {
    let recipes = load_recipes();
    assert_eq!(
        available_restrictions(&recipes),
        vec!["sem glúten".to_string(), "vegano".to_string(), "vegetariano".to_string()]
    );
}
