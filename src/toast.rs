//! Transient notifications.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{ApiError, FormError};

const DISMISS_AFTER_MS: i32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(vec![]),
            next_id: StoredValue::new(0),
        }
    }

    pub fn items(&self) -> Vec<Toast> {
        self.items.get()
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        let message = message.into();
        match kind {
            ToastKind::Error => tracing::warn!("toast: {}", message),
            _ => tracing::debug!("toast: {}", message),
        }
        self.items.update(|items| items.push(Toast { id, kind, message }));
        self.schedule_dismiss(id);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    /// Shows a backend failure. 401s are not shown: the session gate already
    /// sends the user to the login page.
    pub fn api_error(&self, err: &ApiError, fallback: &str) {
        if *err == ApiError::Unauthorized {
            return;
        }
        self.error(err.user_message(fallback));
    }

    pub fn form_error(&self, err: &FormError) {
        self.error(err.to_string());
    }

    pub fn dismiss(&self, id: u32) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }

    fn schedule_dismiss(&self, id: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let toasts = *self;
        let callback = wasm_bindgen::closure::Closure::once(move || toasts.dismiss(id));
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            DISMISS_AFTER_MS,
        );
        callback.forget();
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toaster">
            <For
                each=move || toasts.items()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div class=t.kind.class() role="status">
                            <span class="toast-message">{t.message}</span>
                            <button
                                class="toast-close"
                                title="Fechar"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                "\u{2715}"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
