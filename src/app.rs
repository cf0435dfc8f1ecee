use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::navbar::Navbar;
use crate::config::AppConfig;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::recipe_form::RecipeFormPage;
use crate::pages::recipes::RecipesPage;
use crate::pages::shopping_list_detail::ShoppingListDetailPage;
use crate::pages::shopping_lists::ShoppingListsPage;
use crate::session::{use_session, LocalStorage, Session};
use crate::toast::{Toaster, Toasts};

/// Signed-in layout. Redirects to the login page as soon as the session is
/// cleared, including by a 401 from any request.
#[component]
fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    move || {
        if session.is_authenticated() {
            view! {
                <div class="app-layout">
                    <Navbar />
                    <main class="content">{children()}</main>
                </div>
            }
            .into_any()
        } else {
            view! { <Redirect path="/" /> }.into_any()
        }
    }
}

/// Login layout; signed-in users go straight to the home feed.
#[component]
fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    move || {
        if session.is_authenticated() {
            view! { <Redirect path="/home" /> }.into_any()
        } else {
            children().into_any()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppConfig::load());
    provide_context(Session::restore(Arc::new(LocalStorage)));
    provide_context(Toasts::new());

    view! {
        <style>{include_str!("app.css")}</style>
        <Router>
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=path!("/") view=|| view! { <GuestOnly><LoginPage /></GuestOnly> } />
                <Route path=path!("/home") view=|| view! { <RequireAuth><HomePage /></RequireAuth> } />
                <Route path=path!("/receitas") view=|| view! { <RequireAuth><RecipesPage /></RequireAuth> } />
                <Route
                    path=path!("/receitas/nova")
                    view=|| view! { <RequireAuth><RecipeFormPage /></RequireAuth> }
                />
                <Route
                    path=path!("/receitas/editar/:id")
                    view=|| view! { <RequireAuth><RecipeFormPage /></RequireAuth> }
                />
                <Route path=path!("/listas") view=|| view! { <RequireAuth><ShoppingListsPage /></RequireAuth> } />
                <Route
                    path=path!("/listas/:id")
                    view=|| view! { <RequireAuth><ShoppingListDetailPage /></RequireAuth> }
                />
            </Routes>
            <Toaster />
        </Router>
    }
}
