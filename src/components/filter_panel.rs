//! Filter and sort controls for the recipe list.

use leptos::prelude::*;

use crate::filter::{Bucket, RecipeQuery, SortKey};

fn parse_optional(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|&v| v > 0)
}

fn optional_text(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[component]
fn BucketSelect(
    id: &'static str,
    #[prop(into)] label: String,
    value: Signal<Option<Bucket>>,
    low: &'static str,
    medium: &'static str,
    high: &'static str,
    #[prop(into)] on_change: Callback<Option<Bucket>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=id
                class="input"
                prop:value=move || value.get().map(Bucket::value).unwrap_or("")
                on:change=move |ev| on_change.run(Bucket::parse(&event_target_value(&ev)))
            >
                <option value="">"Todas"</option>
                <option value="low">{low}</option>
                <option value="medium">{medium}</option>
                <option value="high">{high}</option>
            </select>
        </div>
    }
}

#[component]
pub fn FilterPanel(
    query: RwSignal<RecipeQuery>,
    /// Restriction tags found in the collection.
    #[prop(into)]
    restrictions: Signal<Vec<String>>,
) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);

    let calories = Signal::derive(move || query.with(|q| q.calories));
    let cost = Signal::derive(move || query.with(|q| q.cost));

    view! {
        <div class="filter-panel">
            <div class="filter-row">
                <input
                    type="search"
                    class="input filter-keyword"
                    placeholder="Buscar por nome ou observações..."
                    prop:value=move || query.with(|q| q.keyword.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.keyword = value);
                    }
                />
                <select
                    class="input filter-sort"
                    prop:value=move || query.with(|q| q.sort.value())
                    on:change=move |ev| {
                        let key = SortKey::parse(&event_target_value(&ev));
                        query.update(|q| q.sort = key);
                    }
                >
                    {SortKey::ALL
                        .iter()
                        .map(|k| view! { <option value=k.value()>{k.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
                <button
                    class="btn btn-outline btn-small"
                    on:click=move |_| set_expanded.update(|e| *e = !*e)
                >
                    {move || if expanded.get() { "Menos filtros" } else { "Mais filtros" }}
                </button>
                <Show when=move || query.with(RecipeQuery::is_active)>
                    <button
                        class="btn btn-outline btn-small"
                        on:click=move |_| query.update(RecipeQuery::clear)
                    >
                        "Limpar filtros"
                    </button>
                </Show>
            </div>

            <Show when=move || expanded.get()>
                <div class="filter-grid">
                    <div class="form-group">
                        <label for="filter-ingredient">"Ingrediente"</label>
                        <input
                            id="filter-ingredient"
                            class="input"
                            placeholder="ex.: frango"
                            prop:value=move || query.with(|q| q.ingredient.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                query.update(|q| q.ingredient = value);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="filter-portions">"Porções"</label>
                        <input
                            id="filter-portions"
                            type="number"
                            min="1"
                            class="input"
                            prop:value=move || query.with(|q| optional_text(q.portions))
                            on:input=move |ev| {
                                let value = parse_optional(&event_target_value(&ev));
                                query.update(|q| q.portions = value);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="filter-prep">"Tempo máximo (min)"</label>
                        <input
                            id="filter-prep"
                            type="number"
                            min="1"
                            class="input"
                            prop:value=move || query.with(|q| optional_text(q.max_prep_time))
                            on:input=move |ev| {
                                let value = parse_optional(&event_target_value(&ev));
                                query.update(|q| q.max_prep_time = value);
                            }
                        />
                    </div>
                    <BucketSelect
                        id="filter-calories"
                        label="Calorias por porção"
                        value=calories
                        low="Até 250 kcal"
                        medium="250 a 600 kcal"
                        high="Acima de 600 kcal"
                        on_change={move |b: Option<Bucket>| query.update(|q| q.calories = b)}
                    />
                    <BucketSelect
                        id="filter-cost"
                        label="Custo estimado"
                        value=cost
                        low="Até R$ 20"
                        medium="R$ 20 a R$ 50"
                        high="Acima de R$ 50"
                        on_change={move |b: Option<Bucket>| query.update(|q| q.cost = b)}
                    />
                </div>

                <Show when=move || !restrictions.with(Vec::is_empty)>
                    <div class="tag-row filter-tags">
                        <span class="filter-tags-label">"Restrições:"</span>
                        {move || {
                            restrictions
                                .get()
                                .into_iter()
                                .map(|tag| {
                                    let active_tag = tag.clone();
                                    let toggle_tag = tag.clone();
                                    view! {
                                        <button
                                            class="tag tag-toggle"
                                            class:active=move || query.with(|q| {
                                                q.restrictions.iter().any(|t| t.eq_ignore_ascii_case(&active_tag))
                                            })
                                            on:click=move |_| query.update(|q| q.toggle_restriction(&toggle_tag))
                                        >
                                            {tag}
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_ignores_blank_and_zero() {
        assert_eq!(parse_optional(""), None);
        assert_eq!(parse_optional("0"), None);
        assert_eq!(parse_optional(" 45 "), Some(45));
        assert_eq!(parse_optional("abc"), None);
    }

    #[test]
    fn test_panel_builds_bucket_selects() {
        let owner = Owner::new();
        owner.set();
        let query = RwSignal::new(RecipeQuery::default());
        let _panel = view! {
            <FilterPanel query=query restrictions=Signal::stored(vec!["vegano".to_string()]) />
        };
        assert!(!query.with_untracked(RecipeQuery::is_active));
    }
}
