use std::cell::RefCell;

use log::{debug, error, info};

mod config;
mod controller;
mod dom;
mod components {
    pub mod counter;
    pub mod menu;
    pub mod patches;
    pub mod reveal;
    pub mod scroll_state;
    pub mod smooth_scroll;
    pub mod styles;
    pub mod toast;
}

use controller::PageController;

thread_local! {
    // Lives until the page unloads.
    static CONTROLLER: RefCell<Option<PageController>> = RefCell::new(None);
}

fn mount() {
    let Some(window) = web_sys::window() else {
        error!("No window, not running in a browser");
        return;
    };
    let Some(document) = window.document() else {
        error!("Window has no document");
        return;
    };

    CONTROLLER.with(|slot| {
        let mut slot = slot.borrow_mut();
        // Re-mounting replaces the previous registrations instead of doubling them.
        if let Some(mut previous) = slot.take() {
            previous.teardown();
        }
        match PageController::mount(&window, &document) {
            Ok(controller) => {
                debug!("Scroll state at load: {:?}", controller.scroll_state());
                *slot = Some(controller);
            }
            Err(err) => error!("Failed to attach page behavior: {:?}", err),
        }
    });
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting Cardly page script");
    mount();
}
