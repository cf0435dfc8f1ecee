use leptos::prelude::*;

use crate::draft::format_quantity;
use crate::models::Recipe;

const PREVIEW_INGREDIENTS: usize = 3;

/// Short labels for the estimated fields that are set.
pub fn estimate_badges(recipe: &Recipe) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(minutes) = recipe.prep_minutes() {
        badges.push(format!("{} min", minutes));
    }
    if let Some(kcal) = recipe.calories() {
        badges.push(format!("{:.0} kcal", kcal));
    }
    if let Some(cost) = recipe.cost() {
        badges.push(format!("R$ {:.2}", cost));
    }
    badges
}

#[component]
pub fn RecipeCard(
    recipe: Recipe,
    #[prop(optional, into)] on_view: Option<Callback<Recipe>>,
    #[prop(optional, into)] on_add: Option<Callback<Recipe>>,
    #[prop(optional, into)] on_copy: Option<Callback<Recipe>>,
    #[prop(optional, into)] on_edit: Option<Callback<Recipe>>,
    #[prop(optional, into)] on_delete: Option<Callback<Recipe>>,
) -> impl IntoView {
    let summary = format!(
        "{} porções \u{2022} {} ingredientes",
        recipe.portions,
        recipe.ingredients.len()
    );
    let badges = estimate_badges(&recipe);
    let extra = recipe.ingredients.len().saturating_sub(PREVIEW_INGREDIENTS);
    let preview: Vec<_> = recipe
        .ingredients
        .iter()
        .take(PREVIEW_INGREDIENTS)
        .map(|i| {
            view! {
                <li class="ingredient-preview">
                    {format!("{} ({} {})", i.name, format_quantity(i.quantity), i.unit)}
                </li>
            }
        })
        .collect();
    let image = recipe.image().map(String::from);
    let notes = (!recipe.notes.is_empty()).then(|| recipe.notes.clone());
    let tags = recipe.restrictions.clone();

    let action = move |cb: Option<Callback<Recipe>>, label: &'static str, class: &'static str, recipe: Recipe| {
        cb.map(|cb| {
            view! {
                <button class=class on:click=move |_| cb.run(recipe.clone())>{label}</button>
            }
        })
    };

    view! {
        <div class="card recipe-card">
            {image.map(|src| view! { <img class="recipe-image" src=src alt="" /> })}
            <div class="card-header">
                <h3
                    class="recipe-title"
                    class:clickable=on_view.is_some()
                    on:click={
                        let recipe = recipe.clone();
                        move |_| {
                            if let Some(cb) = on_view {
                                cb.run(recipe.clone());
                            }
                        }
                    }
                >
                    {recipe.name.clone()}
                </h3>
                <p class="card-description">{summary}</p>
            </div>
            <div class="card-body">
                {(!badges.is_empty()).then(|| view! {
                    <div class="badge-row">
                        {badges.into_iter().map(|b| view! { <span class="badge">{b}</span> }).collect::<Vec<_>>()}
                    </div>
                })}
                {(!tags.is_empty()).then(|| view! {
                    <div class="tag-row">
                        {tags.into_iter().map(|t| view! { <span class="tag">{t}</span> }).collect::<Vec<_>>()}
                    </div>
                })}
                {notes.map(|n| view! { <p class="recipe-notes">{n}</p> })}
                <ul class="ingredient-preview-list">{preview}</ul>
                {(extra > 0).then(|| view! { <p class="ingredient-more">{format!("+ {} mais", extra)}</p> })}
            </div>
            <div class="card-footer">
                {action(on_add, "Adicionar à lista", "btn btn-success btn-small", recipe.clone())}
                {action(on_copy, "Copiar", "btn btn-primary btn-small", recipe.clone())}
                {action(on_edit, "Editar", "btn btn-outline btn-small", recipe.clone())}
                {action(on_delete, "Excluir", "btn btn-delete btn-small", recipe.clone())}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges_skip_unset_estimates() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": "r", "name": "Sopa", "portions": 2, "ingredients": [],
                "tempo_preparo": 40, "calorias_por_porcao": 0, "custo_estimado": 12.5}"#,
        )
        .unwrap();
        assert_eq!(estimate_badges(&recipe), vec!["40 min".to_string(), "R$ 12.50".to_string()]);
    }
}
