use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::use_api;
use crate::browser;
use crate::components::filter_panel::FilterPanel;
use crate::components::portions_dialog::PortionsDialog;
use crate::components::recipe_card::RecipeCard;
use crate::components::recipe_view_dialog::RecipeViewDialog;
use crate::filter::{available_restrictions, RecipeQuery};
use crate::models::Recipe;
use crate::pages::add_to_quick_list;
use crate::toast::use_toasts;

#[component]
pub fn RecipesPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let toasts = use_toasts();
    let navigate = use_navigate();

    let recipes = RwSignal::new(Vec::<Recipe>::new());
    let (is_loading, set_is_loading) = signal(true);
    let query = RwSignal::new(RecipeQuery::default());
    let (viewing, set_viewing) = signal::<Option<Recipe>>(None);
    let (adding, set_adding) = signal::<Option<Recipe>>(None);

    let visible = Memo::new(move |_| {
        let query = query.get();
        recipes.with(|all| query.apply(all).into_iter().cloned().collect::<Vec<_>>())
    });
    let restrictions = Signal::derive(move || recipes.with(|all| available_restrictions(all)));

    Effect::new(move |_| {
        let api = api.get_value();
        spawn_local(async move {
            match api.list_recipes().await {
                Ok(list) => recipes.set(list),
                Err(e) => toasts.api_error(&e, "Erro ao carregar receitas"),
            }
            set_is_loading.set(false);
        });
    });

    let delete = Callback::new(move |recipe: Recipe| {
        if !browser::confirm(&format!("Deseja realmente excluir \"{}\"?", recipe.name)) {
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            match api.delete_recipe(&recipe.id).await {
                Ok(()) => {
                    recipes.update(|list| list.retain(|r| r.id != recipe.id));
                    toasts.success("Receita excluída");
                }
                Err(e) => toasts.api_error(&e, "Erro ao excluir receita"),
            }
        });
    });

    let edit = {
        let navigate = navigate.clone();
        Callback::new(move |recipe: Recipe| {
            navigate(&format!("/receitas/editar/{}", recipe.id), Default::default());
        })
    };
    let view_recipe = Callback::new(move |recipe: Recipe| set_viewing.set(Some(recipe)));
    let ask_portions = Callback::new(move |recipe: Recipe| {
        set_viewing.set(None);
        set_adding.set(Some(recipe));
    });

    view! {
        <div class="page recipes-page">
            <div class="page-header">
                <div>
                    <h2>"Minhas Receitas"</h2>
                    <p class="page-description">
                        {move || {
                            let total = recipes.with(Vec::len);
                            let shown = visible.with(Vec::len);
                            if shown == total {
                                format!("{} receita(s)", total)
                            } else {
                                format!("{} de {} receita(s)", shown, total)
                            }
                        }}
                    </p>
                </div>
                <button
                    class="btn btn-primary"
                    on:click=move |_| navigate("/receitas/nova", Default::default())
                >
                    "+ Nova receita"
                </button>
            </div>

            <FilterPanel query=query restrictions=restrictions />

            {move || {
                if is_loading.get() {
                    view! { <div class="loading-bar">"Carregando receitas..."</div> }.into_any()
                } else if recipes.with(Vec::is_empty) {
                    view! {
                        <div class="empty-state">
                            <p>"Você ainda não cadastrou nenhuma receita."</p>
                        </div>
                    }
                    .into_any()
                } else if visible.with(Vec::is_empty) {
                    view! {
                        <div class="empty-state">
                            <p>"Nenhuma receita corresponde aos filtros."</p>
                            <button
                                class="btn btn-outline btn-small"
                                on:click=move |_| query.update(RecipeQuery::clear)
                            >
                                "Limpar filtros"
                            </button>
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="card-grid">
                            <For
                                each=move || visible.get()
                                key=|r| (r.id.clone(), r.name.clone())
                                children=move |recipe| view! {
                                    <RecipeCard
                                        recipe=recipe
                                        on_view=view_recipe
                                        on_add=ask_portions
                                        on_edit=edit
                                        on_delete=delete
                                    />
                                }
                            />
                        </div>
                    }
                    .into_any()
                }
            }}

            {move || viewing.get().map(|recipe| view! {
                <RecipeViewDialog
                    recipe=recipe
                    on_close=move |_: ()| set_viewing.set(None)
                    on_add=ask_portions
                />
            })}

            {move || adding.get().map(|recipe| {
                let id = recipe.id.clone();
                view! {
                    <PortionsDialog
                        recipe_name=recipe.name.clone()
                        initial_portions=recipe.portions
                        on_cancel=move |_: ()| set_adding.set(None)
                        on_confirm=move |portions: u32| {
                            set_adding.set(None);
                            add_to_quick_list(api.get_value(), toasts, id.clone(), portions);
                        }
                    />
                }
            })}
        </div>
    }
}
