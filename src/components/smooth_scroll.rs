use gloo_events::EventListener;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::NAV_OFFSET;
use crate::dom;

pub const SCROLL_ANCHORS: &str = "a[data-scroll]";

/// What a click on a scroll anchor should do, decided from its `href`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorAction<'a> {
    /// `href="#"`: let the browser handle the click.
    Passthrough,
    /// Suppress the jump and smooth-scroll to the element with this id.
    ScrollTo(&'a str),
    /// Suppress the jump; there is nothing in the document to scroll to.
    Suppress,
}

pub fn classify(href: Option<&str>) -> AnchorAction<'_> {
    match href {
        Some("#") => AnchorAction::Passthrough,
        Some(href) => match href.strip_prefix('#') {
            Some(id) => AnchorAction::ScrollTo(id),
            None => AnchorAction::Suppress,
        },
        None => AnchorAction::Suppress,
    }
}

/// Window offset that puts a target just below the fixed navbar.
pub fn scroll_top_for(target_top: f64) -> f64 {
    target_top - NAV_OFFSET
}

pub fn mount(window: &Window, document: &Document) -> Vec<EventListener> {
    let anchors = dom::query_all(document, SCROLL_ANCHORS);
    let mut listeners = Vec::with_capacity(anchors.len());

    for anchor in anchors {
        let window = window.clone();
        let document = document.clone();
        let href_source = anchor.clone();
        listeners.push(dom::on_click(&anchor, move |event| {
            let href = href_source.get_attribute("href");
            let id = match classify(href.as_deref()) {
                AnchorAction::Passthrough => return,
                AnchorAction::Suppress => {
                    event.prevent_default();
                    return;
                }
                AnchorAction::ScrollTo(id) => {
                    event.prevent_default();
                    id
                }
            };

            let Some(target) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                debug!("Scroll target #{} not found", id);
                return;
            };

            let options = ScrollToOptions::new();
            options.set_top(scroll_top_for(f64::from(target.offset_top())));
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }));
    }

    listeners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_keeps_default_behavior() {
        assert_eq!(classify(Some("#")), AnchorAction::Passthrough);
    }

    #[test]
    fn fragment_resolves_to_id() {
        assert_eq!(classify(Some("#features")), AnchorAction::ScrollTo("features"));
    }

    #[test]
    fn non_fragment_and_missing_href_are_suppressed() {
        assert_eq!(classify(Some("/pricing")), AnchorAction::Suppress);
        assert_eq!(classify(None), AnchorAction::Suppress);
    }

    #[test]
    fn scroll_lands_below_navbar() {
        assert_eq!(scroll_top_for(1200.0), 1120.0);
        assert_eq!(scroll_top_for(0.0), -80.0);
    }
}
