//! Client-side filtering and sorting of the recipe collection.
//!
//! [`RecipeQuery::apply`] never mutates or copies recipes: it returns
//! references into the input slice, in display order.

use std::cmp::Ordering;

use crate::models::Recipe;

/// Low/medium/high range over a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Low,
    Medium,
    High,
}

/// Bucket edges: `low` is below `low_below`, `high` is above `high_above`,
/// `medium` is everything in between, edges included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketBounds {
    pub low_below: f64,
    pub high_above: f64,
}

pub const CALORIE_BOUNDS: BucketBounds = BucketBounds {
    low_below: 250.0,
    high_above: 600.0,
};

pub const COST_BOUNDS: BucketBounds = BucketBounds {
    low_below: 20.0,
    high_above: 50.0,
};

impl Bucket {
    pub fn contains(self, value: f64, bounds: BucketBounds) -> bool {
        match self {
            Bucket::Low => value < bounds.low_below,
            Bucket::Medium => value >= bounds.low_below && value <= bounds.high_above,
            Bucket::High => value > bounds.high_above,
        }
    }

    /// Parses a `<select>` value. Anything else means "no bucket".
    pub fn parse(value: &str) -> Option<Bucket> {
        match value {
            "low" => Some(Bucket::Low),
            "medium" => Some(Bucket::Medium),
            "high" => Some(Bucket::High),
            _ => None,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Bucket::Low => "low",
            Bucket::Medium => "medium",
            Bucket::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    CreatedAsc,
    #[default]
    CreatedDesc,
    NameAsc,
    NameDesc,
    PrepTimeAsc,
    CostAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::CreatedDesc,
        SortKey::CreatedAsc,
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PrepTimeAsc,
        SortKey::CostAsc,
    ];

    pub fn value(self) -> &'static str {
        match self {
            SortKey::CreatedAsc => "created-asc",
            SortKey::CreatedDesc => "created-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::PrepTimeAsc => "prep-asc",
            SortKey::CostAsc => "cost-asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::CreatedAsc => "Mais antigas",
            SortKey::CreatedDesc => "Mais recentes",
            SortKey::NameAsc => "Nome (A-Z)",
            SortKey::NameDesc => "Nome (Z-A)",
            SortKey::PrepTimeAsc => "Menor tempo de preparo",
            SortKey::CostAsc => "Menor custo",
        }
    }

    pub fn parse(value: &str) -> SortKey {
        SortKey::ALL
            .iter()
            .copied()
            .find(|k| k.value() == value)
            .unwrap_or_default()
    }

    fn compare(self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            SortKey::CreatedAsc => a.created_at.cmp(&b.created_at),
            SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
            SortKey::NameAsc => compare_names(&a.name, &b.name),
            SortKey::NameDesc => compare_names(&b.name, &a.name),
            SortKey::PrepTimeAsc => a
                .prep_minutes()
                .unwrap_or(u32::MAX)
                .cmp(&b.prep_minutes().unwrap_or(u32::MAX)),
            SortKey::CostAsc => a
                .cost()
                .unwrap_or(f64::MAX)
                .total_cmp(&b.cost().unwrap_or(f64::MAX)),
        }
    }
}

/// Filter and sort settings for the recipe list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeQuery {
    /// Substring of the name or notes.
    pub keyword: String,
    /// Substring of any ingredient name.
    pub ingredient: String,
    pub portions: Option<u32>,
    pub max_prep_time: Option<u32>,
    pub calories: Option<Bucket>,
    pub cost: Option<Bucket>,
    /// Every tag listed here must be on the recipe.
    pub restrictions: Vec<String>,
    pub sort: SortKey,
}

impl RecipeQuery {
    pub fn is_active(&self) -> bool {
        !self.keyword.trim().is_empty()
            || !self.ingredient.trim().is_empty()
            || self.portions.is_some()
            || self.max_prep_time.is_some()
            || self.calories.is_some()
            || self.cost.is_some()
            || !self.restrictions.is_empty()
    }

    /// Drops every filter, keeps the sort order.
    pub fn clear(&mut self) {
        *self = RecipeQuery {
            sort: self.sort,
            ..Default::default()
        };
    }

    pub fn toggle_restriction(&mut self, tag: &str) {
        if let Some(pos) = self
            .restrictions
            .iter()
            .position(|t| t.eq_ignore_ascii_case(tag))
        {
            self.restrictions.remove(pos);
        } else {
            self.restrictions.push(tag.to_string());
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        if !keyword.is_empty()
            && !recipe.name.to_lowercase().contains(&keyword)
            && !recipe.notes.to_lowercase().contains(&keyword)
        {
            return false;
        }

        let ingredient = self.ingredient.trim().to_lowercase();
        if !ingredient.is_empty()
            && !recipe
                .ingredients
                .iter()
                .any(|i| i.name.to_lowercase().contains(&ingredient))
        {
            return false;
        }

        if let Some(portions) = self.portions {
            if recipe.portions != portions {
                return false;
            }
        }

        if let Some(max) = self.max_prep_time {
            match recipe.prep_minutes() {
                Some(minutes) if minutes <= max => {}
                _ => return false,
            }
        }

        if let Some(bucket) = self.calories {
            match recipe.calories() {
                Some(kcal) if bucket.contains(kcal, CALORIE_BOUNDS) => {}
                _ => return false,
            }
        }

        if let Some(bucket) = self.cost {
            match recipe.cost() {
                Some(cost) if bucket.contains(cost, COST_BOUNDS) => {}
                _ => return false,
            }
        }

        self.restrictions.iter().all(|wanted| {
            recipe
                .restrictions
                .iter()
                .any(|tag| tag.to_lowercase() == wanted.to_lowercase())
        })
    }

    /// Matching recipes in display order. Sorting is stable.
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        let mut out: Vec<&Recipe> = recipes.iter().filter(|r| self.matches(r)).collect();
        out.sort_by(|a, b| self.sort.compare(a, b));
        out
    }
}

/// Restriction tags present in the collection, deduplicated
/// case-insensitively and sorted for display.
pub fn available_restrictions(recipes: &[Recipe]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in recipes.iter().flat_map(|r| r.restrictions.iter()) {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if !tags.iter().any(|t| t.to_lowercase() == tag.to_lowercase()) {
            tags.push(tag.to_string());
        }
    }
    tags.sort_by(|a, b| compare_names(a, b));
    tags
}

/// Sort key that ignores case and Latin diacritics, so "Feijão" sorts with
/// the other "F" names instead of after "Z".
pub fn collation_key(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Locale-style comparison: base letters first, then accents, then case
/// with lowercase before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert!(Bucket::Low.contains(249.9, CALORIE_BOUNDS));
        assert!(!Bucket::Low.contains(250.0, CALORIE_BOUNDS));
        assert!(Bucket::Medium.contains(250.0, CALORIE_BOUNDS));
        assert!(Bucket::Medium.contains(600.0, CALORIE_BOUNDS));
        assert!(Bucket::High.contains(600.1, CALORIE_BOUNDS));
        assert!(Bucket::Medium.contains(20.0, COST_BOUNDS));
        assert!(Bucket::High.contains(50.01, COST_BOUNDS));
    }

    #[test]
    fn test_collation_folds_accents_and_case() {
        assert_eq!(collation_key("Feijão"), "feijao");
        assert_eq!(collation_key("AÇÚCAR"), "acucar");
        assert_eq!(compare_names("arroz", "Bolo"), Ordering::Less);
        assert_eq!(compare_names("Feijão", "Feijoada"), Ordering::Less);
        assert_eq!(compare_names("arroz", "Arroz"), Ordering::Less);
    }

    #[test]
    fn test_sort_key_parse_falls_back_to_default() {
        assert_eq!(SortKey::parse("name-desc"), SortKey::NameDesc);
        assert_eq!(SortKey::parse("bogus"), SortKey::CreatedDesc);
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.value()), key);
        }
    }

    #[test]
    fn test_clear_keeps_sort() {
        let mut query = RecipeQuery {
            keyword: "bolo".to_string(),
            cost: Some(Bucket::Low),
            sort: SortKey::NameAsc,
            ..Default::default()
        };
        assert!(query.is_active());
        query.clear();
        assert!(!query.is_active());
        assert_eq!(query.sort, SortKey::NameAsc);
    }

    #[test]
    fn test_toggle_restriction() {
        let mut query = RecipeQuery::default();
        query.toggle_restriction("vegano");
        query.toggle_restriction("sem glúten");
        assert_eq!(query.restrictions.len(), 2);
        query.toggle_restriction("Vegano");
        assert_eq!(query.restrictions, vec!["sem glúten".to_string()]);
    }
}
