use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{use_api, ApiClient};
use crate::error::{ApiError, FormError};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::session::{use_session, Session, StoredSession};
use crate::toast::use_toasts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

/// Username and password are always required; the display name only when
/// registering.
fn check_credentials(username: &str, password: &str, name: Option<&str>) -> Result<(), FormError> {
    let blank = |s: &str| s.trim().is_empty();
    if blank(username) || password.is_empty() || name.is_some_and(blank) {
        return Err(FormError::MissingCredentials);
    }
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let session = StoredValue::new(use_session());
    let toasts = use_toasts();

    let (mode, set_mode) = signal(Mode::Login);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    // Runs after the auth request settles, so it only uses owned handles.
    let finish = move |api: ApiClient, session: Session, response: AuthResponse| {
        let onboarded = response.has_completed_onboarding;
        let display = response.name.clone();
        session.login(StoredSession {
            token: response.token,
            name: response.name,
        });
        toasts.success(format!("Bem-vindo, {}!", display));
        if !onboarded {
            spawn_local(async move {
                if let Err(e) = api.complete_onboarding().await {
                    tracing::warn!("onboarding completion failed: {}", e);
                }
            });
        }
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let current = mode.get_untracked();
        let username = username.get_untracked();
        let password = password.get_untracked();
        let name = name.get_untracked();
        let name_field = (current == Mode::Register).then_some(name.as_str());
        if let Err(e) = check_credentials(&username, &password, name_field) {
            toasts.form_error(&e);
            return;
        }

        set_is_submitting.set(true);
        let api = api.get_value();
        let session = session.get_value();
        spawn_local(async move {
            let result = match current {
                Mode::Login => {
                    api.login(&LoginRequest {
                        username: username.trim().to_string(),
                        password,
                    })
                    .await
                }
                Mode::Register => {
                    api.register(&RegisterRequest {
                        username: username.trim().to_string(),
                        password,
                        name: name.trim().to_string(),
                    })
                    .await
                }
            };
            match result {
                Ok(response) => finish(api, session, response),
                Err(e) => {
                    let fallback = match current {
                        Mode::Login => "Usuário ou senha inválidos",
                        Mode::Register => "Não foi possível criar a conta",
                    };
                    let message = match e {
                        ApiError::Unauthorized => fallback.to_string(),
                        other => other.user_message(fallback),
                    };
                    toasts.error(message);
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="page login-page">
            <div class="login-card card">
                <h1 class="login-title">"Receitas"</h1>
                <p class="page-description">"Suas receitas e listas de compras em um só lugar."</p>

                <div class="tabs">
                    <button
                        class="tab"
                        class:active=move || mode.get() == Mode::Login
                        on:click=move |_| set_mode.set(Mode::Login)
                    >
                        "Entrar"
                    </button>
                    <button
                        class="tab"
                        class:active=move || mode.get() == Mode::Register
                        on:click=move |_| set_mode.set(Mode::Register)
                    >
                        "Criar conta"
                    </button>
                </div>

                <form class="login-form" on:submit=submit>
                    <Show when=move || mode.get() == Mode::Register>
                        <div class="form-group">
                            <label for="name">"Nome"</label>
                            <input
                                id="name"
                                class="input"
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>
                    <div class="form-group">
                        <label for="username">"Usuário"</label>
                        <input
                            id="username"
                            class="input"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Senha"</label>
                        <input
                            id="password"
                            type="password"
                            class="input"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary btn-block" disabled=move || is_submitting.get()>
                        {move || match (mode.get(), is_submitting.get()) {
                            (_, true) => "Aguarde...",
                            (Mode::Login, false) => "Entrar",
                            (Mode::Register, false) => "Cadastrar",
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_required() {
        assert_eq!(check_credentials("", "x", None), Err(FormError::MissingCredentials));
        assert_eq!(check_credentials("ana", "", None), Err(FormError::MissingCredentials));
        assert!(check_credentials("ana", "segredo", None).is_ok());
        assert_eq!(
            check_credentials("ana", "segredo", Some("  ")),
            Err(FormError::MissingCredentials)
        );
        assert!(check_credentials("ana", "segredo", Some("Ana")).is_ok());
    }
}
