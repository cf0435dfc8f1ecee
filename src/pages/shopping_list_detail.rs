//! One shopping list: pending and bought items, manual items, bulk recipe
//! add and clean-up of bought items.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use wasm_bindgen_futures::spawn_local;

use crate::api::use_api;
use crate::browser;
use crate::components::recipe_picker::RecipePicker;
use crate::components::unit_select::UnitSelect;
use crate::draft::format_quantity;
use crate::models::{Recipe, ShoppingItem, ShoppingList, Unit};
use crate::pages::page_navigator;
use crate::shopping::{partition_items, toggled, update_applied, ItemEntry, RecipeSelection};
use crate::toast::use_toasts;

#[component]
pub fn ShoppingListDetailPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let toasts = use_toasts();
    let go = page_navigator(use_navigate());

    let params = use_params_map();
    let list_id = Memo::new(move |_| params.with(|p| p.get("id")).unwrap_or_default());

    let list = RwSignal::new(None::<ShoppingList>);
    let (is_loading, set_is_loading) = signal(true);

    // Inline edit of one item.
    let editing = RwSignal::new(None::<String>);
    let edit_name = RwSignal::new(String::new());
    let edit_quantity = RwSignal::new(String::new());
    let edit_unit = RwSignal::new(Unit::Gram);

    let (show_add_item, set_show_add_item) = signal(false);
    let new_name = RwSignal::new(String::new());
    let new_quantity = RwSignal::new(String::new());
    let new_unit = RwSignal::new(Unit::Gram);

    let (show_add_recipes, set_show_add_recipes) = signal(false);
    let recipes = RwSignal::new(Vec::<Recipe>::new());
    let selection = RwSignal::new(RecipeSelection::default());
    let (is_busy, set_is_busy) = signal(false);

    let reload = move || {
        let (Some(id), Some(api)) = (list_id.try_get_untracked(), api.try_get_value()) else {
            return;
        };
        spawn_local(async move {
            match api.find_shopping_list(&id).await {
                Ok(Some(found)) => list.set(Some(found)),
                Ok(None) => {
                    toasts.error("Lista não encontrada");
                    go("/listas");
                }
                Err(e) => toasts.api_error(&e, "Erro ao carregar lista"),
            }
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        list_id.track();
        set_is_loading.set(true);
        reload();
    });

    let toggle = move |item: ShoppingItem| {
        let id = list_id.get_untracked();
        let api = api.get_value();
        spawn_local(async move {
            match api.set_item_bought(&id, &item.id, !item.bought).await {
                Ok(()) => list.update(|l| {
                    if let Some(slot) = l.as_mut().and_then(|l| l.items.iter_mut().find(|i| i.id == item.id)) {
                        *slot = toggled(slot);
                    }
                }),
                Err(e) => toasts.api_error(&e, "Erro ao atualizar item"),
            }
        });
    };

    let remove = move |item: ShoppingItem| {
        let id = list_id.get_untracked();
        let api = api.get_value();
        spawn_local(async move {
            match api.delete_item(&id, &item.id).await {
                Ok(()) => {
                    list.update(|l| {
                        if let Some(l) = l {
                            l.items.retain(|i| i.id != item.id);
                        }
                    });
                    toasts.success("Item removido");
                }
                Err(e) => toasts.api_error(&e, "Erro ao remover item"),
            }
        });
    };

    let start_edit = move |item: &ShoppingItem| {
        let entry = ItemEntry::from_item(item);
        edit_name.set(entry.name);
        edit_quantity.set(entry.quantity);
        edit_unit.set(entry.unit);
        editing.set(Some(item.id.clone()));
    };

    let save_edit = move |original: ShoppingItem| {
        let entry = ItemEntry {
            name: edit_name.get_untracked(),
            quantity: edit_quantity.get_untracked(),
            unit: edit_unit.get_untracked(),
        };
        let update = match entry.to_update(&original) {
            Ok(update) => update,
            Err(e) => {
                toasts.form_error(&e);
                return;
            }
        };
        if update.is_empty() {
            editing.set(None);
            return;
        }
        let id = list_id.get_untracked();
        let api = api.get_value();
        spawn_local(async move {
            if let Err(e) = api.update_item(&id, &original.id, &update).await {
                toasts.api_error(&e, "Erro ao atualizar item");
                return;
            }
            editing.set(None);
            match api.find_shopping_list(&id).await {
                Ok(Some(found)) => {
                    let stored = found.items.iter().find(|item| item.id == original.id);
                    if stored.is_some_and(|item| update_applied(item, &update)) {
                        toasts.success("Item atualizado");
                    } else {
                        tracing::warn!(item = %original.id, "item update not applied by backend");
                        toasts.error("O servidor não aplicou a alteração do item");
                    }
                    list.set(Some(found));
                }
                Ok(None) => toasts.error("Lista não encontrada"),
                Err(e) => toasts.api_error(&e, "Erro ao carregar lista"),
            }
        });
    };

    let add_item = move |_: leptos::ev::MouseEvent| {
        let entry = ItemEntry {
            name: new_name.get_untracked(),
            quantity: new_quantity.get_untracked(),
            unit: new_unit.get_untracked(),
        };
        let item = match entry.to_new_item() {
            Ok(item) => item,
            Err(e) => {
                toasts.form_error(&e);
                return;
            }
        };
        let id = list_id.get_untracked();
        let api = api.get_value();
        spawn_local(async move {
            match api.add_item(&id, &item).await {
                Ok(()) => {
                    new_name.set(String::new());
                    new_quantity.set(String::new());
                    new_unit.set(Unit::Gram);
                    set_show_add_item.set(false);
                    toasts.success("Item adicionado");
                    reload();
                }
                Err(e) => toasts.api_error(&e, "Erro ao adicionar item"),
            }
        });
    };

    let open_add_recipes = move |_: leptos::ev::MouseEvent| {
        selection.set(RecipeSelection::default());
        set_show_add_recipes.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match api.list_recipes().await {
                Ok(found) => {
                    selection.set(RecipeSelection::for_recipes(&found));
                    recipes.set(found);
                }
                Err(e) => toasts.api_error(&e, "Erro ao carregar receitas"),
            }
        });
    };

    let add_recipes = move |_: leptos::ev::MouseEvent| {
        if is_busy.get_untracked() {
            return;
        }
        let requests = match selection.with_untracked(RecipeSelection::requests) {
            Ok(requests) => requests,
            Err(e) => {
                toasts.form_error(&e);
                return;
            }
        };
        set_is_busy.set(true);
        let id = list_id.get_untracked();
        let api = api.get_value();
        spawn_local(async move {
            match api.add_recipes_to_list(&id, &requests).await {
                Ok(()) => {
                    toasts.success(format!("{} receita(s) adicionada(s) à lista!", requests.len()));
                    set_show_add_recipes.set(false);
                }
                Err(e) => toasts.api_error(&e, "Erro ao adicionar receitas"),
            }
            set_is_busy.set(false);
            reload();
        });
    };

    let clear_bought = move |_: leptos::ev::MouseEvent| {
        if !browser::confirm("Tem certeza que deseja remover todos os itens comprados?") {
            return;
        }
        let id = list_id.get_untracked();
        let api = api.get_value();
        spawn_local(async move {
            match api.clear_bought(&id).await {
                Ok(()) => {
                    list.update(|l| {
                        if let Some(l) = l {
                            l.items.retain(|i| !i.bought);
                        }
                    });
                    toasts.success("Itens comprados removidos");
                }
                Err(e) => toasts.api_error(&e, "Erro ao limpar itens"),
            }
        });
    };

    let item_row = move |item: ShoppingItem| {
        let item_id = item.id.clone();
        let is_editing = move || editing.with(|e| e.as_deref() == Some(item_id.as_str()));
        let amount = format!("{} {}", format_quantity(item.quantity), item.unit);
        let origin = (!item.recipe_names.is_empty()).then(|| item.recipe_names.join(", "));
        let bought = item.bought;
        let name = item.ingredient_name.clone();
        let for_toggle = item.clone();
        let for_remove = item.clone();
        let for_edit = item.clone();
        let for_save = StoredValue::new(item);

        view! {
            <li class="list-item" class:bought=bought>
                {move || {
                    if is_editing() {
                        view! {
                            <div class="item-edit">
                                <input
                                    class="input"
                                    prop:value=move || edit_name.get()
                                    on:input=move |ev| edit_name.set(event_target_value(&ev))
                                />
                                <input
                                    class="input entry-quantity"
                                    prop:value=move || edit_quantity.get()
                                    on:input=move |ev| edit_quantity.set(event_target_value(&ev))
                                />
                                <UnitSelect value=edit_unit />
                                <button class="btn btn-success btn-small" on:click=move |_| save_edit(for_save.get_value())>
                                    "Salvar"
                                </button>
                                <button class="btn btn-outline btn-small" on:click=move |_| editing.set(None)>
                                    "Cancelar"
                                </button>
                            </div>
                        }
                        .into_any()
                    } else {
                        let for_toggle = for_toggle.clone();
                        let for_remove = for_remove.clone();
                        let for_edit = for_edit.clone();
                        view! {
                            <label class="item-check">
                                <input
                                    type="checkbox"
                                    prop:checked=bought
                                    on:change=move |_| toggle(for_toggle.clone())
                                />
                                <span class="item-name">{name.clone()}</span>
                                <span class="item-amount">{amount.clone()}</span>
                            </label>
                            {origin.clone().map(|o| view! { <span class="item-origin">{o}</span> })}
                            <span class="item-actions">
                                <button class="btn btn-outline btn-small" on:click=move |_| start_edit(&for_edit)>
                                    "Editar"
                                </button>
                                <button class="btn btn-delete btn-small" on:click=move |_| remove(for_remove.clone())>
                                    "Remover"
                                </button>
                            </span>
                        }
                        .into_any()
                    }
                }}
            </li>
        }
    };

    let sections = move || list.with(|l| l.as_ref().map(|l| partition_items(&l.items)));

    view! {
        <div class="page list-detail-page">
            <div class="page-header">
                <div>
                    <a href="/listas" class="back-link">"\u{2190} Listas"</a>
                    <h2>{move || list.with(|l| l.as_ref().map(|l| l.name.clone()).unwrap_or_default())}</h2>
                    <p class="page-description">
                        {move || list.with(|l| l.as_ref().map(|l| format!(
                            "{} pendente(s) \u{2022} {} comprado(s)",
                            l.pending_count(),
                            l.bought_count()
                        )).unwrap_or_default())}
                    </p>
                </div>
                <div class="header-actions">
                    <button class="btn btn-outline" on:click=move |_| set_show_add_item.set(true)>
                        "+ Item"
                    </button>
                    <button class="btn btn-primary" on:click=open_add_recipes>"+ Receitas"</button>
                </div>
            </div>

            {move || {
                if is_loading.get() {
                    return view! { <div class="loading-bar">"Carregando lista..."</div> }.into_any();
                }
                let Some((pending, bought)) = sections() else {
                    return view! { <div class="empty-state"><p>"Lista não encontrada."</p></div> }.into_any();
                };
                let has_bought = !bought.is_empty();
                view! {
                    <section class="list-section">
                        <h3>{format!("Pendentes ({})", pending.len())}</h3>
                        {if pending.is_empty() {
                            view! { <p class="empty-hint">"Nenhum item pendente."</p> }.into_any()
                        } else {
                            view! {
                                <ul class="item-list">{pending.into_iter().map(item_row).collect::<Vec<_>>()}</ul>
                            }
                            .into_any()
                        }}
                    </section>
                    <section class="list-section bought-section">
                        <div class="section-header">
                            <h3>{format!("Comprados ({})", bought.len())}</h3>
                            {has_bought.then(|| view! {
                                <button class="btn btn-outline btn-small" on:click=clear_bought>
                                    "Limpar comprados"
                                </button>
                            })}
                        </div>
                        <ul class="item-list">{bought.into_iter().map(item_row).collect::<Vec<_>>()}</ul>
                    </section>
                }
                .into_any()
            }}

            <Show when=move || show_add_item.get()>
                <div class="dialog-backdrop" on:click=move |_| set_show_add_item.set(false)>
                    <div class="dialog" on:click=|ev| ev.stop_propagation()>
                        <div class="dialog-header">
                            <h3>"Adicionar item"</h3>
                        </div>
                        <div class="dialog-body">
                            <div class="form-group">
                                <label for="item-name">"Ingrediente"</label>
                                <input
                                    id="item-name"
                                    class="input"
                                    prop:value=move || new_name.get()
                                    on:input=move |ev| new_name.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="form-row">
                                <div class="form-group">
                                    <label for="item-quantity">"Quantidade"</label>
                                    <input
                                        id="item-quantity"
                                        class="input"
                                        prop:value=move || new_quantity.get()
                                        on:input=move |ev| new_quantity.set(event_target_value(&ev))
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="item-unit">"Unidade"</label>
                                    <UnitSelect value=new_unit id="item-unit" />
                                </div>
                            </div>
                        </div>
                        <div class="dialog-actions">
                            <button class="btn btn-outline" on:click=move |_| set_show_add_item.set(false)>
                                "Cancelar"
                            </button>
                            <button class="btn btn-primary" on:click=add_item>"Adicionar"</button>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || show_add_recipes.get()>
                <div class="dialog-backdrop" on:click=move |_| set_show_add_recipes.set(false)>
                    <div class="dialog dialog-wide" on:click=|ev| ev.stop_propagation()>
                        <div class="dialog-header">
                            <h3>"Adicionar receitas à lista"</h3>
                        </div>
                        <div class="dialog-body">
                            <RecipePicker recipes=recipes selection=selection />
                        </div>
                        <div class="dialog-actions">
                            <button class="btn btn-outline" on:click=move |_| set_show_add_recipes.set(false)>
                                "Cancelar"
                            </button>
                            <button class="btn btn-primary" disabled=move || is_busy.get() on:click=add_recipes>
                                {move || if is_busy.get() { "Adicionando..." } else { "Adicionar" }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
