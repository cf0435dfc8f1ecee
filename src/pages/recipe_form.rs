//! Create and edit recipes.
//!
//! `/receitas/nova` starts from an empty draft; `/receitas/editar/:id` loads
//! the recipe first. Ingredients are edited locally and only sent with the
//! whole recipe on save. The import dialog turns free text (usually read from
//! the clipboard) into a draft through the backend parser.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use wasm_bindgen_futures::spawn_local;

use crate::api::use_api;
use crate::browser;
use crate::components::ingredient_autocomplete::IngredientAutocomplete;
use crate::components::recipe_view_dialog::RecipeViewDialog;
use crate::components::unit_select::UnitSelect;
use crate::draft::{
    blank_if_zero, format_quantity, parse_amount, parse_count, parse_tags, IngredientEntry,
    RecipeDraft,
};
use crate::models::{Recipe, Unit};
use crate::pages::page_navigator;
use crate::toast::use_toasts;

#[component]
pub fn RecipeFormPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let toasts = use_toasts();
    let go = page_navigator(use_navigate());

    let params = use_params_map();
    let recipe_id = Memo::new(move |_| params.with(|p| p.get("id")));
    let is_edit = move || recipe_id.with(Option::is_some);

    let draft = RwSignal::new(RecipeDraft::default());
    // Numeric and tag fields keep the raw text so typing is not reformatted.
    let portions_text = RwSignal::new("1".to_string());
    let prep_text = RwSignal::new(String::new());
    let calories_text = RwSignal::new(String::new());
    let cost_text = RwSignal::new(String::new());
    let restrictions_text = RwSignal::new(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (is_saving, set_is_saving) = signal(false);

    let entry_name = RwSignal::new(String::new());
    let entry_quantity = RwSignal::new(String::new());
    let entry_unit = RwSignal::new(Unit::Gram);
    let entry_mandatory = RwSignal::new(true);
    let editing = RwSignal::new(None::<usize>);

    let (show_import, set_show_import) = signal(false);
    let import_text = RwSignal::new(String::new());
    let (imported, set_imported) = signal::<Option<Recipe>>(None);
    let (is_importing, set_is_importing) = signal(false);

    let fill_form = move |loaded: RecipeDraft| {
        portions_text.set(loaded.portions.to_string());
        prep_text.set(if loaded.prep_time > 0 {
            loaded.prep_time.to_string()
        } else {
            String::new()
        });
        calories_text.set(blank_if_zero(loaded.calories_per_portion));
        cost_text.set(blank_if_zero(loaded.estimated_cost));
        restrictions_text.set(loaded.restrictions.join(", "));
        draft.set(loaded);
    };

    Effect::new(move |_| {
        let Some(id) = recipe_id.get() else {
            return;
        };
        set_is_loading.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match api.find_recipe(&id).await {
                Ok(Some(recipe)) => fill_form(RecipeDraft::from_recipe(&recipe)),
                Ok(None) => {
                    tracing::warn!("recipe {} not found", id);
                    toasts.error("Receita não encontrada");
                    go("/receitas");
                }
                Err(e) => {
                    toasts.api_error(&e, "Erro ao carregar receita");
                    go("/receitas");
                }
            }
            set_is_loading.set(false);
        });
    });

    // -- Ingredient editor --

    let reset_entry = move || {
        entry_name.set(String::new());
        entry_quantity.set(String::new());
        entry_unit.set(Unit::Gram);
        entry_mandatory.set(true);
        editing.set(None);
    };

    let save_entry = move || {
        let entry = IngredientEntry {
            name: entry_name.get_untracked(),
            quantity: entry_quantity.get_untracked(),
            unit: entry_unit.get_untracked(),
            mandatory: entry_mandatory.get_untracked(),
        };
        let result = match editing.get_untracked() {
            Some(index) => draft.try_update(|d| d.replace_ingredient(index, &entry)),
            None => draft.try_update(|d| d.add_ingredient(&entry)),
        };
        match result {
            Some(Err(e)) => toasts.form_error(&e),
            _ => reset_entry(),
        }
    };

    let start_edit = move |index: usize| {
        let Some(ingredient) = draft.with_untracked(|d| d.ingredients.get(index).cloned()) else {
            return;
        };
        let entry = IngredientEntry::from_ingredient(&ingredient);
        entry_name.set(entry.name);
        entry_quantity.set(entry.quantity);
        entry_unit.set(entry.unit);
        entry_mandatory.set(entry.mandatory);
        editing.set(Some(index));
    };

    let remove = move |index: usize| {
        draft.update(|d| d.remove_ingredient(index));
        if editing.get_untracked().is_some() {
            reset_entry();
        }
    };

    let ingredient_rows = move || {
        draft.with(|d| {
            d.ingredients
                .iter()
                .enumerate()
                .map(|(index, ingredient)| {
                    let amount = format!("{} {}", format_quantity(ingredient.quantity), ingredient.unit);
                    let optional = (!ingredient.mandatory)
                        .then(|| view! { <span class="ingredient-optional">"(opcional)"</span> });
                    view! {
                        <li class="ingredient-row" class:editing=move || editing.get() == Some(index)>
                            <span class="ingredient-name">{ingredient.name.clone()}</span>
                            <span class="ingredient-amount">{amount}</span>
                            {optional}
                            <span class="ingredient-actions">
                                <button type="button" class="btn btn-outline btn-small" on:click=move |_| start_edit(index)>
                                    "Editar"
                                </button>
                                <button type="button" class="btn btn-delete btn-small" on:click=move |_| remove(index)>
                                    "Remover"
                                </button>
                            </span>
                        </li>
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    // -- Import --

    let open_import = move |_: leptos::ev::MouseEvent| {
        import_text.set(String::new());
        set_imported.set(None);
        set_show_import.set(true);
        spawn_local(async move {
            match browser::read_clipboard().await {
                Ok(text) if !text.trim().is_empty() => import_text.set(text),
                Ok(_) => {}
                Err(e) => tracing::debug!("clipboard read failed: {}", e),
            }
        });
    };

    let close_import = move || {
        set_show_import.set(false);
        set_imported.set(None);
    };

    let run_import = move |_: leptos::ev::MouseEvent| {
        let text = match crate::draft::import_text(&import_text.get_untracked()) {
            Ok(text) => text,
            Err(e) => {
                toasts.form_error(&e);
                return;
            }
        };
        set_is_importing.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match api.import_recipe(&text).await {
                Ok(recipe) => set_imported.set(Some(recipe)),
                Err(e) => toasts.api_error(&e, "Erro ao importar receita"),
            }
            set_is_importing.set(false);
        });
    };

    let accept_import = move || {
        if let Some(recipe) = imported.get_untracked() {
            fill_form(RecipeDraft::from_recipe(&recipe));
            reset_entry();
            toasts.success("Receita importada! Revise os dados e salve.");
        }
        close_import();
    };

    // -- Save --

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_saving.get_untracked() {
            return;
        }
        draft.update(|d| {
            d.portions = parse_count(&portions_text.get_untracked());
            d.prep_time = parse_count(&prep_text.get_untracked());
            d.calories_per_portion = parse_amount(&calories_text.get_untracked());
            d.estimated_cost = parse_amount(&cost_text.get_untracked());
            d.restrictions = parse_tags(&restrictions_text.get_untracked());
        });
        let current = draft.get_untracked();
        let payload = match current.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                toasts.form_error(&e);
                return;
            }
        };
        if current.needs_estimation() {
            toasts.info("Estimando tempo, calorias, custo e restrições com IA...");
        }

        set_is_saving.set(true);
        let api = api.get_value();
        let id = recipe_id.get_untracked();
        spawn_local(async move {
            let result = match &id {
                Some(id) => api.update_recipe(id, &payload).await,
                None => api.create_recipe(&payload).await,
            };
            match result {
                Ok(saved) => {
                    tracing::info!("saved recipe {}", saved.id);
                    toasts.success(if id.is_some() { "Receita atualizada!" } else { "Receita criada!" });
                    go("/receitas");
                }
                Err(e) => {
                    toasts.api_error(&e, "Erro ao salvar receita");
                    set_is_saving.set(false);
                }
            }
        });
    };

    let text_input = move |id: &'static str, label: &'static str, field: RwSignal<String>, kind: &'static str| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    id=id
                    type=kind
                    class="input"
                    prop:value=move || field.get()
                    on:input=move |ev| field.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="page recipe-form-page">
            <div class="page-header">
                <h2>{move || if is_edit() { "Editar receita" } else { "Nova receita" }}</h2>
                <div class="header-actions">
                    <button type="button" class="btn btn-outline" on:click=open_import>
                        "Importar texto"
                    </button>
                    <button type="button" class="btn btn-outline" on:click=move |_| go("/receitas")>
                        "Cancelar"
                    </button>
                </div>
            </div>

            <Show when=move || is_loading.get()>
                <div class="loading-bar">"Carregando receita..."</div>
            </Show>

            <form class="recipe-form card" on:submit=submit>
                <div class="form-group">
                    <label for="recipe-name">"Nome"</label>
                    <input
                        id="recipe-name"
                        class="input"
                        prop:value=move || draft.with(|d| d.name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.name = value);
                        }
                    />
                </div>
                <div class="form-row">
                    {text_input("recipe-portions", "Porções", portions_text, "number")}
                    {text_input("recipe-prep", "Tempo de preparo (min)", prep_text, "number")}
                    {text_input("recipe-calories", "Calorias por porção", calories_text, "text")}
                    {text_input("recipe-cost", "Custo estimado (R$)", cost_text, "text")}
                </div>
                <p class="form-hint">"Campos vazios são estimados automaticamente ao salvar."</p>
                <div class="form-group">
                    <label for="recipe-link">"Link"</label>
                    <input
                        id="recipe-link"
                        type="url"
                        class="input"
                        prop:value=move || draft.with(|d| d.link.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.link = value);
                        }
                    />
                </div>
                {text_input("recipe-restrictions", "Restrições (separadas por vírgula)", restrictions_text, "text")}
                <div class="form-group">
                    <label for="recipe-notes">"Observações"</label>
                    <textarea
                        id="recipe-notes"
                        class="input"
                        rows="4"
                        prop:value=move || draft.with(|d| d.notes.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.notes = value);
                        }
                    ></textarea>
                </div>

                <fieldset class="ingredient-editor">
                    <legend>"Ingredientes"</legend>
                    <ul class="ingredient-list">{ingredient_rows}</ul>
                    <Show when=move || draft.with(|d| d.ingredients.is_empty())>
                        <p class="empty-hint">"Nenhum ingrediente adicionado."</p>
                    </Show>
                    <div class="ingredient-entry">
                        <IngredientAutocomplete value=entry_name id="entry-name" />
                        <input
                            class="input entry-quantity"
                            placeholder="Quantidade"
                            prop:value=move || entry_quantity.get()
                            on:input=move |ev| entry_quantity.set(event_target_value(&ev))
                        />
                        <UnitSelect value=entry_unit />
                        <label class="checkbox-label">
                            <input
                                type="checkbox"
                                prop:checked=move || entry_mandatory.get()
                                on:change=move |ev| entry_mandatory.set(event_target_checked(&ev))
                            />
                            "Obrigatório"
                        </label>
                        <button type="button" class="btn btn-success btn-small" on:click=move |_| save_entry()>
                            {move || if editing.get().is_some() { "Salvar ingrediente" } else { "Adicionar" }}
                        </button>
                        <Show when=move || editing.get().is_some()>
                            <button type="button" class="btn btn-outline btn-small" on:click=move |_| reset_entry()>
                                "Cancelar edição"
                            </button>
                        </Show>
                    </div>
                </fieldset>

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled=move || is_saving.get() || is_loading.get()>
                        {move || if is_saving.get() { "Salvando..." } else { "Salvar receita" }}
                    </button>
                </div>
            </form>

            <Show when=move || show_import.get()>
                {move || match imported.get() {
                    Some(recipe) => view! {
                        <RecipeViewDialog
                            recipe=recipe
                            on_close=move |_: ()| close_import()
                            on_accept=move |_: Recipe| accept_import()
                        />
                    }
                    .into_any(),
                    None => view! {
                        <div class="dialog-backdrop" on:click=move |_| close_import()>
                            <div class="dialog dialog-wide" on:click=|ev| ev.stop_propagation()>
                                <div class="dialog-header">
                                    <h3>"Importar receita"</h3>
                                </div>
                                <div class="dialog-body">
                                    <p class="dialog-description">
                                        "Cole o texto da receita. O conteúdo da área de transferência é usado quando disponível."
                                    </p>
                                    <textarea
                                        class="input"
                                        rows="10"
                                        prop:value=move || import_text.get()
                                        on:input=move |ev| import_text.set(event_target_value(&ev))
                                    ></textarea>
                                </div>
                                <div class="dialog-actions">
                                    <button class="btn btn-outline" on:click=move |_| close_import()>"Cancelar"</button>
                                    <button class="btn btn-primary" disabled=move || is_importing.get() on:click=run_import>
                                        {move || if is_importing.get() { "Interpretando..." } else { "Importar" }}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                    .into_any(),
                }}
            </Show>
        </div>
    }
}
