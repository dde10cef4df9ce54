use wasm_bindgen::prelude::*;
use web_sys::Document;

pub const FADE_IN_STYLE_ID: &str = "fade-in-style";
pub const SLIDE_ANIMATIONS_ID: &str = "slide-animations";

pub const FADE_IN_CSS: &str = r#"
        .feature-card, .download-card {
            opacity: 0;
            transform: translateY(20px);
            transition: opacity 0.6s ease, transform 0.6s ease;
        }
        .feature-card.fade-in, .download-card.fade-in {
            opacity: 1;
            transform: translateY(0);
        }
    "#;

pub const SLIDE_ANIMATIONS_CSS: &str = r#"
        @keyframes slideInUp {
            from {
                transform: translateY(100px);
                opacity: 0;
            }
            to {
                transform: translateY(0);
                opacity: 1;
            }
        }
        @keyframes slideOutDown {
            from {
                transform: translateY(0);
                opacity: 1;
            }
            to {
                transform: translateY(100px);
                opacity: 0;
            }
        }
    "#;

/// Appends a `<style id=...>` to the head unless the id is already taken.
/// Returns whether a stylesheet was added.
pub fn inject_once(document: &Document, id: &str, css: &str) -> Result<bool, JsValue> {
    if document.get_element_by_id(id).is_some() {
        return Ok(false);
    }
    let Some(head) = document.head() else {
        return Ok(false);
    };

    let style = document.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));
    head.append_child(&style)?;
    Ok(true)
}

pub fn inject_all(document: &Document) -> Result<(), JsValue> {
    inject_once(document, FADE_IN_STYLE_ID, FADE_IN_CSS)?;
    inject_once(document, SLIDE_ANIMATIONS_ID, SLIDE_ANIMATIONS_CSS)?;
    Ok(())
}
