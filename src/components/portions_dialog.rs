use leptos::prelude::*;

/// Asks how many portions of a recipe to add to the quick list.
#[component]
pub fn PortionsDialog(
    #[prop(into)] recipe_name: String,
    initial_portions: u32,
    #[prop(into)] on_confirm: Callback<u32>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let (portions, set_portions) = signal(initial_portions.max(1));

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <div class="dialog-header">
                    <h3>"Adicionar à Lista Rápida"</h3>
                </div>
                <div class="dialog-body">
                    <p class="dialog-description">
                        {format!("Quantas porções de \"{}\" você deseja?", recipe_name)}
                    </p>
                    <div class="form-group">
                        <label for="portions-input">"Número de porções"</label>
                        <input
                            id="portions-input"
                            type="number"
                            min="1"
                            class="input"
                            prop:value=move || portions.get().to_string()
                            on:input=move |ev| {
                                let value = event_target_value(&ev).parse::<u32>().unwrap_or(1);
                                set_portions.set(value.max(1));
                            }
                        />
                    </div>
                </div>
                <div class="dialog-footer">
                    <button class="btn btn-outline" on:click=move |_| on_cancel.run(())>"Cancelar"</button>
                    <button class="btn btn-success" on:click=move |_| on_confirm.run(portions.get())>
                        "Adicionar"
                    </button>
                </div>
            </div>
        </div>
    }
}
