pub mod home;
pub mod login;
pub mod recipe_form;
pub mod recipes;
pub mod shopping_list_detail;
pub mod shopping_lists;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::toast::Toasts;

/// Adds `portions` of a recipe to the quick list and reports the outcome.
pub(crate) fn add_to_quick_list(api: ApiClient, toasts: Toasts, recipe_id: String, portions: u32) {
    spawn_local(async move {
        match api.add_to_quick_list(&recipe_id, portions).await {
            Ok(true) => toasts.success("Receita adicionada à Lista Rápida!"),
            Ok(false) => toasts.error("Lista Rápida não encontrada"),
            Err(e) => toasts.api_error(&e, "Erro ao adicionar à lista"),
        }
    });
}

/// Wraps the router's navigate function for use after an `.await`.
///
/// The handle is owned by the current page; once the page is disposed,
/// navigation requests are dropped instead of reaching the router.
pub(crate) fn page_navigator<F>(navigate: F) -> impl Fn(&str) + Copy + 'static
where
    F: Fn(&str, NavigateOptions) + Send + Sync + 'static,
{
    let navigate = StoredValue::new(navigate);
    move |path: &str| {
        if navigate
            .try_with_value(|nav| nav(path, NavigateOptions::default()))
            .is_none()
        {
            tracing::debug!(path, "page closed, navigation dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::session::{MemoryStore, Session};
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str, NavigateOptions) + Send + Sync + 'static) {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&visited);
        (visited, move |path: &str, _: NavigateOptions| {
            sink.lock().unwrap().push(path.to_string());
        })
    }

    #[test]
    fn test_navigation_reaches_router_while_page_is_open() {
        let app = Owner::new();
        app.set();
        let page = app.child();
        let (visited, navigate) = recorder();
        let go = page.with(|| page_navigator(navigate));

        go("/listas");
        go("/receitas");

        assert_eq!(*visited.lock().unwrap(), vec!["/listas", "/receitas"]);
    }

    #[test]
    fn test_navigation_after_page_disposed_is_dropped() {
        let app = Owner::new();
        app.set();
        let page = app.child();
        let (visited, navigate) = recorder();
        let go = page.with(|| page_navigator(navigate));

        page.cleanup();
        go("/listas");

        assert!(visited.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stored_client_is_gone_after_page_disposed() {
        let app = Owner::new();
        app.set();
        let session = Session::restore(Arc::new(MemoryStore::default()));
        let page = app.child();
        let api = page.with(|| StoredValue::new(ApiClient::new(AppConfig::new("http://localhost:8001", "info"), session)));

        assert!(api.try_get_value().is_some());
        page.cleanup();
        assert!(api.try_get_value().is_none());
    }
}
