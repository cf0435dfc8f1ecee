use leptos::prelude::*;

use crate::models::Unit;

/// `<select>` over the known units. A unit outside the list (e.g. from an
/// imported recipe) is offered as an extra option so it is not lost.
#[component]
pub fn UnitSelect(value: RwSignal<Unit>, #[prop(optional)] id: Option<&'static str>) -> impl IntoView {
    let extra = move || match value.get() {
        Unit::Other(s) if !s.is_empty() => Some(view! { <option value=s.clone()>{s.clone()}</option> }),
        _ => None,
    };

    view! {
        <select
            id=id
            class="input unit-select"
            prop:value=move || value.get().to_string()
            on:change=move |ev| value.set(Unit::from(event_target_value(&ev)))
        >
            {Unit::CHOICES
                .iter()
                .map(|u| view! { <option value=u.as_str().to_string()>{u.as_str().to_string()}</option> })
                .collect::<Vec<_>>()}
            {extra}
        </select>
    }
}
