//! Delegated token persistence in the browser's local storage.

use dioxus::prelude::*;

use crate::client::constant::TOKEN_KEY;

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

pub async fn load_token() -> Option<String> {
    let script = format!(
        "return window.localStorage.getItem({});",
        js_string(TOKEN_KEY)
    );

    document::eval(&script)
        .join::<Option<String>>()
        .await
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

pub fn save_token(token: &str) {
    let _ = document::eval(&format!(
        "window.localStorage.setItem({}, {});",
        js_string(TOKEN_KEY),
        js_string(token)
    ));
}

pub fn clear_token() {
    let _ = document::eval(&format!(
        "window.localStorage.removeItem({});",
        js_string(TOKEN_KEY)
    ));
}

/// Current URL fragment, including the leading `#`.
pub async fn read_fragment() -> String {
    document::eval("return window.location.hash;")
        .join::<String>()
        .await
        .unwrap_or_default()
}
