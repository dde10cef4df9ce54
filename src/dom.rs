use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList,
};

/// Click listener that is allowed to call `prevent_default`. gloo registers
/// listeners as passive unless told otherwise.
pub fn on_click<F>(target: &EventTarget, handler: F) -> EventListener
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new_with_options(
        target,
        "click",
        EventListenerOptions::enable_prevent_default(),
        handler,
    )
}

/// An IntersectionObserver plus the closure backing it. Disconnected on drop.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    /// Builds an observer that hands every intersecting entry to `on_visible`.
    pub fn new<F>(threshold: f64, root_margin: Option<&str>, mut on_visible: F) -> Result<Self, JsValue>
    where
        F: FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    if entry.is_intersecting() {
                        on_visible(&entry, &observer);
                    }
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe_all(&self, elements: &[Element]) {
        for element in elements {
            self.observer.observe(element);
        }
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub fn query_within(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Sets an inline style property, ignoring elements that are not HTML.
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

/// The event target as an element, if it is one.
pub fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|target| target.dyn_into::<Element>().ok())
}
