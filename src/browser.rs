//! Small wrappers over browser APIs used by the pages.

use wasm_bindgen_futures::JsFuture;

/// `window.confirm`. Returns `false` when no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Reads text from the system clipboard. Browsers may deny access, in which
/// case the user pastes into the dialog instead.
pub async fn read_clipboard() -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "No window".to_string())?;
    let clipboard = window.navigator().clipboard();
    let promise: js_sys::Promise = clipboard.read_text();
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| e.as_string().unwrap_or_else(|| "Clipboard unavailable".to_string()))?;
    Ok(value.as_string().unwrap_or_default())
}
