use leptos::prelude::*;

use crate::models::Recipe;
use crate::shopping::RecipeSelection;

/// Checklist of recipes, each with its own portion count.
#[component]
pub fn RecipePicker(
    #[prop(into)] recipes: Signal<Vec<Recipe>>,
    selection: RwSignal<RecipeSelection>,
) -> impl IntoView {
    view! {
        <div class="recipe-picker">
            <Show
                when=move || !recipes.with(Vec::is_empty)
                fallback=|| view! { <p class="empty-hint">"Você ainda não tem receitas."</p> }
            >
                <For
                    each=move || recipes.get()
                    key=|r| r.id.clone()
                    children=move |recipe| {
                        let id = recipe.id.clone();
                        let id_checked = id.clone();
                        let id_portions = id.clone();
                        let id_toggle = id.clone();
                        let id_input = id.clone();
                        let checked = move || {
                            selection.with(|s| s.get(&id_checked).is_some_and(|c| c.selected))
                        };
                        let portions = move || {
                            selection.with(|s| s.get(&id_portions).map(|c| c.portions).unwrap_or(1))
                        };
                        let row_selected = checked.clone();
                        view! {
                            <label class="picker-row" class:selected=row_selected>
                                <input
                                    type="checkbox"
                                    prop:checked=checked
                                    on:change=move |_| selection.update(|s| s.toggle(&id_toggle))
                                />
                                <span class="picker-name">{recipe.name.clone()}</span>
                                <input
                                    type="number"
                                    min="1"
                                    class="input picker-portions"
                                    title="Porções"
                                    prop:value=move || portions().to_string()
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev).trim().parse::<u32>().unwrap_or(1);
                                        selection.update(|s| s.set_portions(&id_input, value));
                                    }
                                />
                                <span class="picker-unit">"porções"</span>
                            </label>
                        }
                    }
                />
            </Show>
            <p class="picker-count">
                {move || format!("{} receita(s) selecionada(s)", selection.with(RecipeSelection::selected_count))}
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picker_builds_with_recipes() {
        let owner = Owner::new();
        owner.set();
        let recipes: Vec<Recipe> = serde_json::from_str(
            r#"[{"id": "r1", "name": "Bolo", "portions": 4}, {"id": "r2", "name": "Pão", "portions": 2}]"#,
        )
        .unwrap();
        let selection = RwSignal::new(RecipeSelection::for_recipes(&recipes));
        let _picker = view! { <RecipePicker recipes=Signal::stored(recipes) selection=selection /> };
        assert_eq!(selection.with_untracked(RecipeSelection::selected_count), 0);
    }
}
