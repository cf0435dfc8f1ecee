use leptos::prelude::*;

use crate::components::recipe_card::estimate_badges;
use crate::draft::format_quantity;
use crate::models::Recipe;

/// Read-only view of a recipe, opened from the home feed and recipe list.
#[component]
pub fn RecipeViewDialog(
    recipe: Recipe,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional, into)] on_copy: Option<Callback<Recipe>>,
    #[prop(optional, into)] on_add: Option<Callback<Recipe>>,
    /// Shown for imported recipes that are not saved yet.
    #[prop(optional, into)]
    on_accept: Option<Callback<Recipe>>,
) -> impl IntoView {
    let badges = estimate_badges(&recipe);
    let rows: Vec<_> = recipe
        .ingredients
        .iter()
        .map(|i| {
            let optional = (!i.mandatory).then(|| view! { <span class="ingredient-optional">"(opcional)"</span> });
            view! {
                <li class="ingredient-row">
                    <span class="ingredient-name">{i.name.clone()}</span>
                    <span class="ingredient-amount">{format!("{} {}", format_quantity(i.quantity), i.unit)}</span>
                    {optional}
                </li>
            }
        })
        .collect();

    let copy_recipe = recipe.clone();
    let add_recipe = recipe.clone();
    let accept_recipe = recipe.clone();

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog-wide" on:click=|ev| ev.stop_propagation()>
                <div class="dialog-header">
                    <h3>{recipe.name.clone()}</h3>
                    <button class="dialog-close" on:click=move |_| on_close.run(())>"\u{2715}"</button>
                </div>
                {recipe.image().map(|src| view! { <img class="dialog-image" src=src.to_string() alt="" /> })}
                <div class="dialog-body">
                    <p><strong>"Porções: "</strong>{recipe.portions}</p>
                    {(!recipe.link.is_empty()).then(|| {
                        let link = recipe.link.clone();
                        let href = link.clone();
                        view! {
                            <p>
                                <strong>"Link: "</strong>
                                <a href=href target="_blank" rel="noopener">{link}</a>
                            </p>
                        }
                    })}
                    {(!badges.is_empty()).then(|| view! {
                        <div class="badge-row">
                            {badges.into_iter().map(|b| view! { <span class="badge">{b}</span> }).collect::<Vec<_>>()}
                        </div>
                    })}
                    {(!recipe.restrictions.is_empty()).then(|| view! {
                        <div class="tag-row">
                            {recipe.restrictions.iter().map(|t| view! { <span class="tag">{t.clone()}</span> }).collect::<Vec<_>>()}
                        </div>
                    })}
                    <h4>"Ingredientes"</h4>
                    <ul class="ingredient-list">{rows}</ul>
                    {(!recipe.notes.is_empty()).then(|| view! {
                        <div>
                            <h4>"Modo de preparo / observações"</h4>
                            <p class="recipe-notes-full">{recipe.notes.clone()}</p>
                        </div>
                    })}
                </div>
                <div class="dialog-footer">
                    {on_copy.map(|cb| view! {
                        <button class="btn btn-primary" on:click=move |_| cb.run(copy_recipe.clone())>
                            "Adicionar às minhas receitas"
                        </button>
                    })}
                    {on_add.map(|cb| view! {
                        <button class="btn btn-success" on:click=move |_| cb.run(add_recipe.clone())>
                            "Adicionar à lista rápida"
                        </button>
                    })}
                    {on_accept.map(|cb| view! {
                        <button class="btn btn-primary" on:click=move |_| cb.run(accept_recipe.clone())>
                            "Usar esta receita"
                        </button>
                    })}
                    <button class="btn btn-outline" on:click=move |_| on_close.run(())>
                        {if on_accept.is_some() { "Descartar" } else { "Fechar" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_builds_with_link_and_accept() {
        let owner = Owner::new();
        owner.set();
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": "r1", "name": "Bolo", "portions": 4, "link": "https://exemplo.com/bolo",
                "ingredients": [{"name": "Ovo", "quantity": 2, "unit": "unidade", "mandatory": false}]}"#,
        )
        .unwrap();
        let _dialog = view! {
            <RecipeViewDialog
                recipe=recipe
                on_close=|_: ()| {}
                on_accept=|_: Recipe| {}
            />
        };
    }
}
