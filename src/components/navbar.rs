use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::session::use_session;

/// Top navigation for signed-in pages.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let pathname = use_location().pathname;

    let link_class = move |prefix: &'static str| {
        move || {
            if pathname.get().starts_with(prefix) {
                "nav-link active"
            } else {
                "nav-link"
            }
        }
    };

    let user_name = {
        let session = session.clone();
        move || session.user_name()
    };

    let logout = move |_: leptos::ev::MouseEvent| session.logout();

    view! {
        <nav class="navbar">
            <div class="navbar-brand">
                <span class="navbar-logo">"\u{1F373}"</span>
                <h1 class="navbar-title">"Receitas"</h1>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/home" class=link_class("/home")>"Início"</a>
                </li>
                <li class="nav-item">
                    <a href="/receitas" class=link_class("/receitas")>"Receitas"</a>
                </li>
                <li class="nav-item">
                    <a href="/listas" class=link_class("/listas")>"Listas"</a>
                </li>
            </ul>
            <div class="navbar-user">
                <span class="navbar-greeting">"Olá, " <strong>{user_name}</strong></span>
                <button class="btn btn-outline btn-small" on:click=logout>"Sair"</button>
            </div>
        </nav>
    }
}
