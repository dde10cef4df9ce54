use log::Level;

/// Height of the fixed navbar, subtracted from scroll targets and added to
/// the scroll position when picking the active section.
pub const NAV_OFFSET: f64 = 80.0;

/// Scroll offset past which the navbar switches to its compact style.
pub const NAVBAR_SCROLLED_AFTER: f64 = 100.0;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const COUNTER_THRESHOLD: f64 = 0.5;
pub const COUNTER_DURATION_MS: f64 = 2000.0;

pub const TOAST_VISIBLE_MS: u32 = 3000;
pub const TOAST_SLIDE_MS: u32 = 300;

pub const COMING_SOON_MESSAGE: &str = "This feature is coming soon!";
pub const COPIED_MESSAGE: &str = "Link copied to clipboard!";
pub const LOADED_MESSAGE: &str = "🎓 Cardly Website Loaded Successfully!";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose when running trunk serve locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
