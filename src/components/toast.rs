use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::Reflect;
use web_sys::{Document, Window};

use crate::config::{COPIED_MESSAGE, TOAST_SLIDE_MS, TOAST_VISIBLE_MS};

const TOAST_CLASS: &str = "toast";

pub const TOAST_STYLE: &str = "
        position: fixed;
        bottom: 20px;
        right: 20px;
        background: #333;
        color: white;
        padding: 1rem 1.5rem;
        border-radius: 8px;
        box-shadow: 0 4px 12px rgba(0,0,0,0.15);
        z-index: 9999;
        animation: slideInUp 0.3s ease;
    ";

pub fn slide_out_animation() -> String {
    format!("slideOutDown {:.1}s ease", f64::from(TOAST_SLIDE_MS) / 1000.0)
}

/// Shows a short-lived notification in the bottom corner. Only one toast is
/// on screen at a time: a new one replaces whatever is showing.
pub fn show_toast(document: &Document, message: &str) -> Result<(), JsValue> {
    if let Some(existing) = document.query_selector(&format!(".{}", TOAST_CLASS))? {
        existing.remove();
    }
    let Some(body) = document.body() else {
        return Ok(());
    };

    let toast = document.create_element("div")?;
    toast.set_class_name(TOAST_CLASS);
    toast.set_text_content(Some(message));
    toast.set_attribute("style", TOAST_STYLE)?;
    body.append_child(&toast)?;

    // A replaced toast still runs these timers; removing a detached node is a no-op.
    Timeout::new(TOAST_VISIBLE_MS, move || {
        crate::dom::set_style(&toast, "animation", &slide_out_animation());
        Timeout::new(TOAST_SLIDE_MS, move || toast.remove()).forget();
    })
    .forget();

    Ok(())
}

fn has_clipboard(window: &Window) -> bool {
    Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

/// Copies `text` and confirms with a toast. Skipped where the clipboard API
/// is unavailable (insecure origins, old browsers).
pub fn copy_to_clipboard(window: &Window, document: &Document, text: &str) {
    if !has_clipboard(window) {
        log::debug!("Clipboard API unavailable");
        return;
    }

    let promise = window.navigator().clipboard().write_text(text);
    let document = document.clone();
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => {
                let _ = show_toast(&document, COPIED_MESSAGE);
            }
            Err(err) => {
                let reason = err
                    .dyn_ref::<web_sys::js_sys::Error>()
                    .map(|e| String::from(e.message()))
                    .unwrap_or_else(|| format!("{:?}", err));
                gloo_console::error!("Failed to copy to clipboard:", reason);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_is_fixed_above_everything() {
        assert!(TOAST_STYLE.contains("position: fixed;"));
        assert!(TOAST_STYLE.contains("z-index: 9999;"));
        assert!(TOAST_STYLE.contains("animation: slideInUp 0.3s ease;"));
    }

    #[test]
    fn slide_out_matches_removal_delay() {
        assert_eq!(slide_out_animation(), "slideOutDown 0.3s ease");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::dom::{self, test_support::Fixture};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn newest_toast_replaces_the_previous_one() {
        let fixture = Fixture::new("");

        show_toast(&fixture.document, "first").unwrap();
        show_toast(&fixture.document, "second").unwrap();

        let toasts = dom::query_all(&fixture.document, ".toast");
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].text_content().as_deref(), Some("second"));
    }
}
