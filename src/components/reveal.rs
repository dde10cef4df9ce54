use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use crate::dom::{self, Observer};

pub const REVEAL_TARGETS: &str = ".feature-card, .download-card";
pub const REVEALED_CLASS: &str = "fade-in";

/// Fades cards in the first time they scroll into view, then stops watching
/// them so scrolling away and back does nothing.
pub fn mount(document: &Document) -> Result<Option<Observer>, JsValue> {
    let cards = dom::query_all(document, REVEAL_TARGETS);
    if cards.is_empty() {
        debug!("No cards to reveal");
        return Ok(None);
    }

    let observer = Observer::new(REVEAL_THRESHOLD, Some(REVEAL_ROOT_MARGIN), |entry, observer| {
        let card = entry.target();
        let _ = card.class_list().add_1(REVEALED_CLASS);
        observer.unobserve(&card);
    })?;
    observer.observe_all(&cards);

    Ok(Some(observer))
}
