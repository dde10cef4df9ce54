use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::components::smooth_scroll::SCROLL_ANCHORS;
use crate::config::{NAVBAR_SCROLLED_AFTER, NAV_OFFSET};
use crate::dom;

const ACTIVE_LINK_CLASS: &str = "active-link";
const SCROLLED_CLASS: &str = "scrolled";

/// Vertical extent of a page section, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Scroll-derived state of the page chrome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollState {
    pub last_scroll: f64,
    pub navbar_scrolled: bool,
    /// Index into the section list of the one whose link is highlighted.
    pub active: Option<usize>,
}

impl ScrollState {
    /// Folds one scroll sample in and returns the section matched by it.
    /// Sections are checked in document order and the last match wins; with
    /// no match the previous highlight stays.
    pub fn observe(&mut self, scroll_y: f64, sections: &[SectionBounds]) -> Option<usize> {
        let position = scroll_y + NAV_OFFSET;
        let matched = sections.iter().rposition(|s| s.contains(position));
        if matched.is_some() {
            self.active = matched;
        }
        self.navbar_scrolled = scroll_y > NAVBAR_SCROLLED_AFTER;
        self.last_scroll = scroll_y;
        matched
    }
}

/// A section that has a navigation link pointing at it.
struct LinkedSection {
    section: HtmlElement,
    link: Element,
}

fn bounds(section: &HtmlElement) -> SectionBounds {
    SectionBounds {
        top: f64::from(section.offset_top()),
        height: f64::from(section.offset_height()),
    }
}

// Links are looked up per event, as the markup may change after load.
fn linked_sections(document: &Document, sections: &[HtmlElement]) -> Vec<LinkedSection> {
    sections
        .iter()
        .filter_map(|section| {
            let id = section.get_attribute("id")?;
            let link = dom::query(document, &format!("a[href=\"#{}\"]", id))?;
            Some(LinkedSection {
                section: section.clone(),
                link,
            })
        })
        .collect()
}

pub fn mount(
    window: &Window,
    document: &Document,
) -> (Vec<EventListener>, Rc<RefCell<ScrollState>>) {
    let state = Rc::new(RefCell::new(ScrollState::default()));
    let sections: Vec<HtmlElement> = dom::query_all(document, "section")
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let nav_links = dom::query_all(document, SCROLL_ANCHORS);
    let navbar = dom::query(document, ".navbar");

    let listener = {
        let state = state.clone();
        let window_clone = window.clone();
        let document = document.clone();
        EventListener::new(window, "scroll", move |_| {
            let scroll_y = window_clone.scroll_y().unwrap_or(0.0);
            let linked = linked_sections(&document, &sections);
            let section_bounds: Vec<SectionBounds> =
                linked.iter().map(|l| bounds(&l.section)).collect();

            let mut state = state.borrow_mut();
            let matched = state.observe(scroll_y, &section_bounds);

            if let Some(current) = matched.and_then(|index| linked.get(index)) {
                for link in &nav_links {
                    let _ = link.class_list().remove_1(ACTIVE_LINK_CLASS);
                }
                let _ = current.link.class_list().add_1(ACTIVE_LINK_CLASS);
            }

            if let Some(navbar) = &navbar {
                let _ = navbar
                    .class_list()
                    .toggle_with_force(SCROLLED_CLASS, state.navbar_scrolled);
            }
        })
    };

    (vec![listener], state)
}
