use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{use_api, FeedSection};
use crate::components::portions_dialog::PortionsDialog;
use crate::components::recipe_card::RecipeCard;
use crate::components::recipe_view_dialog::RecipeViewDialog;
use crate::models::Recipe;
use crate::pages::add_to_quick_list;
use crate::toast::use_toasts;

impl FeedSection {
    fn title(self) -> &'static str {
        match self {
            FeedSection::Favorites => "Suas favoritas",
            FeedSection::Suggestions => "Sugestões para você",
            FeedSection::Trending => "Em alta",
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            FeedSection::Favorites => "Você ainda não tem receitas favoritas.",
            FeedSection::Suggestions => "Nenhuma sugestão no momento.",
            FeedSection::Trending => "Nada em alta no momento.",
        }
    }

    fn refreshable(self) -> bool {
        self != FeedSection::Favorites
    }
}

const SECTIONS: [FeedSection; 3] = [
    FeedSection::Favorites,
    FeedSection::Suggestions,
    FeedSection::Trending,
];

#[component]
pub fn HomePage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let toasts = use_toasts();

    let favorites = RwSignal::new(Vec::<Recipe>::new());
    let suggestions = RwSignal::new(Vec::<Recipe>::new());
    let trending = RwSignal::new(Vec::<Recipe>::new());
    let signal_for = move |section: FeedSection| match section {
        FeedSection::Favorites => favorites,
        FeedSection::Suggestions => suggestions,
        FeedSection::Trending => trending,
    };

    // Sections still loading; the page spinner shows until all three settle.
    let (in_flight, set_in_flight) = signal(SECTIONS.len());
    let (refreshing, set_refreshing) = signal::<Option<FeedSection>>(None);
    let (viewing, set_viewing) = signal::<Option<Recipe>>(None);
    let (adding, set_adding) = signal::<Option<Recipe>>(None);

    Effect::new(move |_| {
        for section in SECTIONS {
            let api = api.get_value();
            spawn_local(async move {
                match api.feed(section).await {
                    Ok(recipes) => signal_for(section).set(recipes),
                    Err(e) => {
                        tracing::warn!("feed {:?} failed: {}", section, e);
                        toasts.api_error(&e, "Erro ao carregar receitas");
                    }
                }
                set_in_flight.update(|n| *n = n.saturating_sub(1));
            });
        }
    });

    let refresh = move |section: FeedSection| {
        if refreshing.get_untracked().is_some() {
            return;
        }
        set_refreshing.set(Some(section));
        let api = api.get_value();
        spawn_local(async move {
            match api.refresh_feed(section).await {
                Ok(recipes) => {
                    signal_for(section).set(recipes);
                    toasts.success("Novas receitas geradas!");
                }
                Err(e) => toasts.api_error(&e, "Erro ao gerar novas receitas"),
            }
            set_refreshing.set(None);
        });
    };

    let copy = Callback::new(move |recipe: Recipe| {
        let api = api.get_value();
        spawn_local(async move {
            match api.copy_recipe(&recipe.id).await {
                Ok(()) => toasts.success(format!("\"{}\" salva nas suas receitas!", recipe.name)),
                Err(e) => toasts.api_error(&e, "Erro ao copiar receita"),
            }
        });
    });
    let view_recipe = Callback::new(move |recipe: Recipe| set_viewing.set(Some(recipe)));
    let ask_portions = Callback::new(move |recipe: Recipe| {
        set_viewing.set(None);
        set_adding.set(Some(recipe));
    });

    let section_view = move |section: FeedSection| {
        let recipes = signal_for(section);
        view! {
            <section class="feed-section">
                <div class="section-header">
                    <h3>{section.title()}</h3>
                    {section.refreshable().then(|| view! {
                        <button
                            class="btn btn-outline btn-small"
                            disabled=move || refreshing.get().is_some()
                            on:click=move |_| refresh(section)
                        >
                            {move || if refreshing.get() == Some(section) { "Gerando..." } else { "Gerar novas" }}
                        </button>
                    })}
                </div>
                <Show
                    when=move || !recipes.with(Vec::is_empty)
                    fallback=move || view! { <p class="empty-hint">{section.empty_message()}</p> }
                >
                    <div class="carousel">
                        <For
                            each=move || recipes.get()
                            key=|r| r.id.clone()
                            children=move |recipe| {
                                if section == FeedSection::Favorites {
                                    view! {
                                        <RecipeCard recipe=recipe on_view=view_recipe on_add=ask_portions />
                                    }
                                    .into_any()
                                } else {
                                    view! {
                                        <RecipeCard
                                            recipe=recipe
                                            on_view=view_recipe
                                            on_add=ask_portions
                                            on_copy=copy
                                        />
                                    }
                                    .into_any()
                                }
                            }
                        />
                    </div>
                </Show>
            </section>
        }
    };

    view! {
        <div class="page home-page">
            <h2>"Início"</h2>
            <p class="page-description">"Descubra receitas e monte sua lista de compras."</p>

            <Show when=move || { in_flight.get() > 0 }>
                <div class="loading-bar">"Carregando receitas..."</div>
            </Show>

            {SECTIONS.into_iter().map(section_view).collect::<Vec<_>>()}

            {move || viewing.get().map(|recipe| {
                let own = favorites.with(|f| f.iter().any(|r| r.id == recipe.id));
                if own {
                    view! {
                        <RecipeViewDialog
                            recipe=recipe
                            on_close=move |_: ()| set_viewing.set(None)
                            on_add=ask_portions
                        />
                    }
                    .into_any()
                } else {
                    view! {
                        <RecipeViewDialog
                            recipe=recipe
                            on_close=move |_: ()| set_viewing.set(None)
                            on_add=ask_portions
                            on_copy=copy
                        />
                    }
                    .into_any()
                }
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
