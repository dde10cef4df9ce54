use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::components::{counter, menu, patches, reveal, scroll_state, smooth_scroll, styles};
use crate::components::scroll_state::ScrollState;
use crate::config::LOADED_MESSAGE;
use crate::dom::Observer;

/// Owns every listener and observer the page behavior registers. Built once
/// per page load; `teardown` (or dropping it) detaches everything.
pub struct PageController {
    listeners: Vec<EventListener>,
    observers: Vec<Observer>,
    scroll: Rc<RefCell<ScrollState>>,
}

impl PageController {
    pub fn mount(window: &Window, document: &Document) -> Result<Self, JsValue> {
        styles::inject_all(document)?;

        let mut listeners = Vec::new();
        listeners.extend(menu::mount(document));
        listeners.extend(smooth_scroll::mount(window, document));

        let (scroll_listeners, scroll) = scroll_state::mount(window, document);
        listeners.extend(scroll_listeners);

        let observers: Vec<Observer> = [reveal::mount(document)?, counter::mount(window, document)?]
            .into_iter()
            .flatten()
            .collect();

        listeners.extend(patches::mount(window, document));
        patches::update_copyright_year(document, patches::current_year());

        debug!(
            "Mounted {} listeners and {} observers",
            listeners.len(),
            observers.len()
        );
        info!("{}", LOADED_MESSAGE);

        Ok(Self {
            listeners,
            observers,
            scroll,
        })
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.listeners.is_empty() || !self.observers.is_empty()
    }

    /// Removes all listeners and disconnects all observers. Counter animations
    /// already running finish on their own.
    pub fn teardown(&mut self) {
        if !self.is_mounted() {
            return;
        }
        debug!("Tearing down page behavior");
        self.listeners.clear();
        self.observers.clear();
        *self.scroll.borrow_mut() = ScrollState::default();
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::dom::{self, test_support::{click, Fixture}};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKUP: &str = r#"
        <nav class="navbar">
            <button class="mobile-menu-toggle"><span></span><span></span><span></span></button>
            <ul class="nav-menu"></ul>
        </nav>
    "#;

    #[wasm_bindgen_test]
    fn teardown_detaches_listeners_and_remount_does_not_double_them() {
        let fixture = Fixture::new(MARKUP);
        let window = web_sys::window().unwrap();
        let panel = dom::query(&fixture.document, ".nav-menu").unwrap();

        let mut controller = PageController::mount(&window, &fixture.document).unwrap();
        controller.teardown();
        assert!(!controller.is_mounted());
        click(&fixture.document, ".mobile-menu-toggle");
        assert!(!panel.class_list().contains("active"));

        let _controller = PageController::mount(&window, &fixture.document).unwrap();
        click(&fixture.document, ".mobile-menu-toggle");
        assert!(panel.class_list().contains("active"));
    }

    #[wasm_bindgen_test]
    fn stylesheets_are_injected_once() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let _first = PageController::mount(&window, &document).unwrap();
        let _second = PageController::mount(&window, &document).unwrap();
        assert_eq!(dom::query_all(&document, "#fade-in-style").len(), 1);
        assert_eq!(dom::query_all(&document, "#slide-animations").len(), 1);
    }
}
