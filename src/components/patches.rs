use chrono::{Datelike, Local};
use gloo_events::EventListener;
use log::{debug, info};
use web_sys::{Document, Element, Window};

use crate::components::toast::{copy_to_clipboard, show_toast};
use crate::config::COMING_SOON_MESSAGE;
use crate::dom;

const DOWNLOAD_BUTTONS: &str = ".btn-download";
const DOWNLOAD_CARD: &str = ".download-card";
const FOOTER_PARAGRAPHS: &str = ".footer-bottom p";
const DISABLED_CONTROLS: &str = "button:disabled, .btn[disabled]";
const COPY_TRIGGERS: &str = "[data-copy]";

/// Rewrites the first run of four digits in a copyright line to `year`.
/// Lines without "©", or without four digits in a row, are left alone.
pub fn with_current_year(text: &str, year: i32) -> Option<String> {
    if !text.contains('©') {
        return None;
    }

    let bytes = text.as_bytes();
    let start = (0..bytes.len().saturating_sub(3))
        .find(|&i| bytes[i..i + 4].iter().all(u8::is_ascii_digit))?;

    let mut updated = String::with_capacity(text.len());
    updated.push_str(&text[..start]);
    updated.push_str(&year.to_string());
    updated.push_str(&text[start + 4..]);
    Some(updated)
}

pub fn update_copyright_year(document: &Document, year: i32) {
    for paragraph in dom::query_all(document, FOOTER_PARAGRAPHS) {
        let text = paragraph.text_content().unwrap_or_default();
        if let Some(updated) = with_current_year(&text, year) {
            paragraph.set_text_content(Some(&updated));
        }
    }
}

pub fn current_year() -> i32 {
    Local::now().year()
}

fn download_platform(button: &Element) -> Option<String> {
    let card = button.closest(DOWNLOAD_CARD).ok().flatten()?;
    let heading = card.query_selector("h3").ok().flatten()?;
    heading.text_content()
}

pub fn mount(window: &Window, document: &Document) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    // Diagnostic only, nothing is sent anywhere.
    for button in dom::query_all(document, DOWNLOAD_BUTTONS) {
        let source = button.clone();
        listeners.push(EventListener::new(&button, "click", move |_| {
            if let Some(platform) = download_platform(&source) {
                info!("Download clicked: {}", platform);
            }
        }));
    }

    // Disabled controls still answer clicks, with a notice instead of the action.
    for control in dom::query_all(document, DISABLED_CONTROLS) {
        let document = document.clone();
        listeners.push(dom::on_click(&control, move |event| {
            event.prevent_default();
            let _ = show_toast(&document, COMING_SOON_MESSAGE);
        }));
    }

    for trigger in dom::query_all(document, COPY_TRIGGERS) {
        let window = window.clone();
        let document = document.clone();
        let source = trigger.clone();
        listeners.push(dom::on_click(&trigger, move |event| {
            let Some(text) = source.get_attribute("data-copy") else {
                return;
            };
            event.prevent_default();
            copy_to_clipboard(&window, &document, &text);
        }));
    }

    debug!("Attached {} page patch listeners", listeners.len());
    listeners
}
