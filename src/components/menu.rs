use std::cell::Cell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use web_sys::{Document, Element};

use crate::dom;

const TOGGLE: &str = ".mobile-menu-toggle";
const PANEL: &str = ".nav-menu";
const NAVBAR: &str = ".navbar";
const OPEN_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    /// Any click that lands outside the navbar closes the menu.
    pub fn after_document_click(self, inside_nav: bool) -> Self {
        if inside_nav {
            self
        } else {
            Self::closed()
        }
    }
}

/// Inline style for one of the three burger bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarStyle {
    pub property: &'static str,
    pub value: &'static str,
}

/// Burger icon bars: an X when open, three lines when closed.
pub fn bar_styles(state: MenuState) -> [BarStyle; 3] {
    if state.is_open() {
        [
            BarStyle { property: "transform", value: "rotate(45deg) translate(5px, 5px)" },
            BarStyle { property: "opacity", value: "0" },
            BarStyle { property: "transform", value: "rotate(-45deg) translate(5px, -5px)" },
        ]
    } else {
        [
            BarStyle { property: "transform", value: "none" },
            BarStyle { property: "opacity", value: "1" },
            BarStyle { property: "transform", value: "none" },
        ]
    }
}

struct MobileMenu {
    toggle: Element,
    panel: Element,
    state: Cell<MenuState>,
}

impl MobileMenu {
    fn set(&self, state: MenuState) {
        self.state.set(state);

        let toggle_classes = self.toggle.class_list();
        let panel_classes = self.panel.class_list();
        let _ = toggle_classes.toggle_with_force(OPEN_CLASS, state.is_open());
        let _ = panel_classes.toggle_with_force(OPEN_CLASS, state.is_open());

        let bars = dom::query_within(&self.toggle, "span");
        for (bar, style) in bars.iter().zip(bar_styles(state)) {
            dom::set_style(bar, style.property, style.value);
        }
    }
}

pub fn mount(document: &Document) -> Vec<EventListener> {
    let (Some(toggle), Some(panel)) = (dom::query(document, TOGGLE), dom::query(document, PANEL)) else {
        debug!("No mobile menu on this page");
        return Vec::new();
    };

    let menu = Rc::new(MobileMenu {
        toggle: toggle.clone(),
        panel: panel.clone(),
        state: Cell::new(MenuState::default()),
    });
    let mut listeners = Vec::new();

    {
        let menu = menu.clone();
        listeners.push(EventListener::new(&toggle, "click", move |_| {
            menu.set(menu.state.get().toggled());
        }));
    }

    // Outside clicks close the menu. A target we cannot inspect counts as outside.
    {
        let menu = menu.clone();
        listeners.push(EventListener::new(document, "click", move |event| {
            let inside_nav = dom::event_element(event)
                .and_then(|target| target.closest(NAVBAR).ok().flatten())
                .is_some();
            menu.set(menu.state.get().after_document_click(inside_nav));
        }));
    }

    for link in dom::query_within(&panel, "a") {
        let menu = menu.clone();
        listeners.push(EventListener::new(&link, "click", move |_| {
            menu.set(MenuState::closed());
        }));
    }

    listeners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_close_is_absorbing() {
        let state = MenuState::default();
        assert!(!state.is_open());
        assert!(state.toggled().is_open());
        assert!(!state.toggled().toggled().is_open());
        assert_eq!(MenuState::closed(), MenuState::default());
    }

    #[test]
    fn outside_click_closes_inside_click_keeps() {
        let open = MenuState::default().toggled();
        assert!(!open.after_document_click(false).is_open());
        assert!(open.after_document_click(true).is_open());
        assert!(!MenuState::closed().after_document_click(false).is_open());
    }

    #[test]
    fn open_icon_is_an_x() {
        let styles = bar_styles(MenuState::default().toggled());
        assert_eq!(styles[0].value, "rotate(45deg) translate(5px, 5px)");
        assert_eq!(styles[1], BarStyle { property: "opacity", value: "0" });
        assert_eq!(styles[2].value, "rotate(-45deg) translate(5px, -5px)");
    }

    #[test]
    fn closed_icon_resets_every_bar() {
        let styles = bar_styles(MenuState::closed());
        assert!(styles
            .iter()
            .all(|s| (s.property == "transform" && s.value == "none") || (s.property == "opacity" && s.value == "1")));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::dom::test_support::{bar_style, click, Fixture};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKUP: &str = r##"
        <nav class="navbar">
            <button class="mobile-menu-toggle"><span></span><span></span><span></span></button>
            <ul class="nav-menu"><li><a href="#features">Features</a></li></ul>
        </nav>
        <p id="outside">Somewhere else</p>
    "##;

    #[wasm_bindgen_test]
    fn outside_click_closes_panel_and_resets_icon() {
        let fixture = Fixture::new(MARKUP);
        let _listeners = mount(&fixture.document);

        click(&fixture.document, ".mobile-menu-toggle");
        let panel = dom::query(&fixture.document, PANEL).unwrap();
        let toggle = dom::query(&fixture.document, TOGGLE).unwrap();
        assert!(panel.class_list().contains(OPEN_CLASS));
        assert!(toggle.class_list().contains(OPEN_CLASS));
        assert_eq!(bar_style(&toggle, 1, "opacity"), "0");

        click(&fixture.document, "#outside");
        assert!(!panel.class_list().contains(OPEN_CLASS));
        assert!(!toggle.class_list().contains(OPEN_CLASS));
        assert_eq!(bar_style(&toggle, 0, "transform"), "none");
        assert_eq!(bar_style(&toggle, 1, "opacity"), "1");
        assert_eq!(bar_style(&toggle, 2, "transform"), "none");
    }

    #[wasm_bindgen_test]
    fn panel_link_click_closes_menu() {
        let fixture = Fixture::new(MARKUP);
        let _listeners = mount(&fixture.document);

        click(&fixture.document, ".mobile-menu-toggle");
        let panel = dom::query(&fixture.document, PANEL).unwrap();
        assert!(panel.class_list().contains(OPEN_CLASS));

        click(&fixture.document, ".nav-menu a");
        assert!(!panel.class_list().contains(OPEN_CLASS));
    }
}
