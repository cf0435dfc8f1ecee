use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::use_api;
use crate::browser;
use crate::components::recipe_picker::RecipePicker;
use crate::models::{Recipe, ShoppingList};
use crate::pages::page_navigator;
use crate::shopping::{default_list_name, ensure_deletable, validate_list_name, RecipeSelection};
use crate::toast::use_toasts;

#[component]
pub fn ShoppingListsPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let toasts = use_toasts();
    let go = page_navigator(use_navigate());

    let lists = RwSignal::new(Vec::<ShoppingList>::new());
    let (is_loading, set_is_loading) = signal(true);

    let (show_create, set_show_create) = signal(false);
    let new_name = RwSignal::new(String::new());
    let recipes = RwSignal::new(Vec::<Recipe>::new());
    let selection = RwSignal::new(RecipeSelection::default());
    let (is_creating, set_is_creating) = signal(false);

    let load_lists = move || {
        let Some(api) = api.try_get_value() else {
            return;
        };
        spawn_local(async move {
            match api.list_shopping_lists().await {
                Ok(found) => lists.set(found),
                Err(e) => toasts.api_error(&e, "Erro ao carregar listas"),
            }
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_lists();
    });

    let open_create = move |_: leptos::ev::MouseEvent| {
        new_name.set(default_list_name(&chrono::Local::now()));
        selection.set(RecipeSelection::default());
        set_show_create.set(true);
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

    let create = move |_: leptos::ev::MouseEvent| {
        if is_creating.get_untracked() {
            return;
        }
        let name = match validate_list_name(&new_name.get_untracked()) {
            Ok(name) => name,
            Err(e) => {
                toasts.form_error(&e);
                return;
            }
        };
        let requests = match selection.with_untracked(RecipeSelection::requests) {
            Ok(requests) => requests,
            Err(e) => {
                toasts.form_error(&e);
                return;
            }
        };

        set_is_creating.set(true);
        let api = api.get_value();
        spawn_local(async move {
            let created = match api.create_shopping_list(&name).await {
                Ok(list) => list,
                Err(e) => {
                    toasts.api_error(&e, "Erro ao criar lista");
                    set_is_creating.set(false);
                    return;
                }
            };
            match api.add_recipes_to_list(&created.id, &requests).await {
                Ok(()) => {
                    toasts.success("Lista criada com sucesso!");
                    set_show_create.set(false);
                    go(&format!("/listas/{}", created.id));
                }
                Err(e) => {
                    // The list exists but is incomplete; show it so the user can retry.
                    toasts.api_error(&e, "Erro ao adicionar receitas à lista");
                    set_show_create.set(false);
                    load_lists();
                }
            }
            set_is_creating.set(false);
        });
    };

    let delete = move |list: ShoppingList| {
        if let Err(e) = ensure_deletable(&list) {
            toasts.form_error(&e);
            return;
        }
        if !browser::confirm(&format!("Tem certeza que deseja deletar a lista \"{}\"?", list.name)) {
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            match api.delete_shopping_list(&list.id).await {
                Ok(()) => {
                    lists.update(|all| all.retain(|l| l.id != list.id));
                    toasts.success("Lista deletada com sucesso");
                }
                Err(e) => toasts.api_error(&e, "Erro ao deletar lista"),
            }
        });
    };

    view! {
        <div class="page lists-page">
            <div class="page-header">
                <div>
                    <h2>"Listas de Compras"</h2>
                    <p class="page-description">"Monte listas a partir das suas receitas."</p>
                </div>
                <button class="btn btn-primary" on:click=open_create>"+ Nova lista"</button>
            </div>

            {move || {
                if is_loading.get() {
                    view! { <div class="loading-bar">"Carregando listas..."</div> }.into_any()
                } else if lists.with(Vec::is_empty) {
                    view! {
                        <div class="empty-state"><p>"Nenhuma lista criada ainda."</p></div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="card-grid">
                            <For
                                each=move || lists.get()
                                key=|l| (l.id.clone(), l.items.len(), l.bought_count())
                                children=move |list| {
                                    let href = format!("/listas/{}", list.id);
                                    let created = list
                                        .created_at
                                        .map(|at| at.with_timezone(&chrono::Local).format("%d/%m/%Y").to_string());
                                    let counts = format!(
                                        "{} pendente(s) \u{2022} {} comprado(s)",
                                        list.pending_count(),
                                        list.bought_count()
                                    );
                                    let quick = list.is_quick_list;
                                    let name = list.name.clone();
                                    view! {
                                        <div class="card list-card" class:quick-list=quick>
                                            <div class="card-header">
                                                <h3>
                                                    <a href=href>{name}</a>
                                                </h3>
                                                {quick.then(|| view! { <span class="badge badge-quick">"Lista Rápida"</span> })}
                                            </div>
                                            <div class="card-body">
                                                <p class="card-description">{counts}</p>
                                                {created.map(|c| view! { <p class="card-meta">{format!("Criada em {}", c)}</p> })}
                                            </div>
                                            <div class="card-footer">
                                                <button
                                                    class="btn btn-delete btn-small"
                                                    on:click=move |_| delete(list.clone())
                                                >
                                                    "Deletar"
                                                </button>
                                            </div>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    }
                    .into_any()
                }
            }}

            <Show when=move || show_create.get()>
                <div class="dialog-backdrop" on:click=move |_| set_show_create.set(false)>
                    <div class="dialog dialog-wide" on:click=|ev| ev.stop_propagation()>
                        <div class="dialog-header">
                            <h3>"Nova lista de compras"</h3>
                        </div>
                        <div class="dialog-body">
                            <div class="form-group">
                                <label for="list-name">"Nome da lista"</label>
                                <input
                                    id="list-name"
                                    class="input"
                                    prop:value=move || new_name.get()
                                    on:input=move |ev| new_name.set(event_target_value(&ev))
                                />
                            </div>
                            <h4>"Receitas"</h4>
                            <RecipePicker recipes=recipes selection=selection />
                        </div>
                        <div class="dialog-actions">
                            <button class="btn btn-outline" on:click=move |_| set_show_create.set(false)>
                                "Cancelar"
                            </button>
                            <button class="btn btn-primary" disabled=move || is_creating.get() on:click=create>
                                {move || if is_creating.get() { "Criando..." } else { "Criar lista" }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
