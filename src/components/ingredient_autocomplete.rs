//! Ingredient name input with backend suggestions.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::use_api;
use crate::draft::wants_suggestions;

const DEBOUNCE_MS: i32 = 150;

/// True while `current` is still the newest lookup and the input is mounted.
fn is_latest(generation: StoredValue<u32>, current: u32) -> bool {
    generation.try_get_value() == Some(current)
}

#[component]
pub fn IngredientAutocomplete(
    /// Ingredient name being typed. Picking a suggestion overwrites it.
    value: RwSignal<String>,
    #[prop(optional)] id: Option<&'static str>,
    #[prop(default = "Ingrediente")] placeholder: &'static str,
) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let (suggestions, set_suggestions) = signal(Vec::<String>::new());
    let (is_open, set_is_open) = signal(false);
    let pending_timeout = StoredValue::new(None::<i32>);
    // Incremented per keystroke; late responses for older text are dropped.
    let generation = StoredValue::new(0u32);

    let close = move || {
        set_is_open.set(false);
        set_suggestions.set(vec![]);
    };

    let request_suggestions = move |query: String| {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(handle) = pending_timeout.get_value() {
            window.clear_timeout_with_handle(handle);
        }
        let current = generation.get_value().wrapping_add(1);
        generation.set_value(current);

        if !wants_suggestions(&query) {
            close();
            return;
        }

        let callback = wasm_bindgen::closure::Closure::once(move || {
            // The input may have been unmounted while the timer was pending.
            let Some(api) = api.try_get_value() else {
                return;
            };
            spawn_local(async move {
                match api.ingredient_suggestions(query.trim()).await {
                    Ok(names) if is_latest(generation, current) => {
                        set_is_open.set(!names.is_empty());
                        set_suggestions.set(names);
                    }
                    Ok(_) => {}
                    Err(e) => tracing::debug!("ingredient suggestions failed: {}", e),
                }
            });
        });
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            DEBOUNCE_MS,
        ) {
            Ok(handle) => pending_timeout.set_value(Some(handle)),
            Err(_) => tracing::warn!("could not schedule ingredient lookup"),
        }
        callback.forget();
    };

    let select = move |name: String| {
        generation.update_value(|g| *g = g.wrapping_add(1));
        value.set(name);
        close();
    };

    view! {
        <div class="autocomplete">
            <input
                id=id
                type="text"
                class="input"
                autocomplete="off"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    value.set(text.clone());
                    request_suggestions(text);
                }
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        close();
                    }
                }
            />
            <Show when=move || is_open.get()>
                <ul class="autocomplete-list" role="listbox">
                    <For
                        each=move || suggestions.get()
                        key=|name| name.clone()
                        children=move |name| {
                            let label = name.clone();
                            view! {
                                <li
                                    class="autocomplete-option"
                                    role="option"
                                    on:mousedown=move |ev| {
                                        ev.prevent_default();
                                        select(name.clone());
                                    }
                                >
                                    {label}
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_or_unmounted_lookups_are_ignored() {
        let app = Owner::new();
        app.set();
        let input = app.child();
        let generation = input.with(|| StoredValue::new(3u32));

        assert!(is_latest(generation, 3));
        assert!(!is_latest(generation, 2));

        input.cleanup();
        assert!(!is_latest(generation, 3));
    }
}
