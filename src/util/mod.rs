use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

fn parse_timestamp(raw: &str) -> Option<js_sys::Date> {
    if raw.trim().is_empty() {
        return None;
    }
    let d = js_sys::Date::new(&JsValue::from_str(raw));
    if d.get_time().is_nan() {
        None
    } else {
        Some(d)
    }
}

/// Locale date for note cards; falls back to the raw string if it does not parse.
pub(crate) fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(d) => String::from(d.to_locale_date_string("default", &JsValue::UNDEFINED)),
        None => raw.to_string(),
    }
}

pub(crate) fn format_date_time(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(d) => String::from(d.to_locale_string("default", &JsValue::UNDEFINED)),
        None => raw.to_string(),
    }
}

/// Write `text` to the system clipboard and wait for the browser to accept it.
///
/// Rejections (no permission, unfocused document, insecure context) come
/// back as `Err`.
pub(crate) async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let clipboard = window.navigator().clipboard();
    // Absent outside secure contexts.
    if clipboard.is_undefined() {
        return Err("clipboard unavailable".to_string());
    }

    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| format!("clipboard write failed: {:?}", e))
}
