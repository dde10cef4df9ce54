use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::config::{COUNTER_DURATION_MS, COUNTER_THRESHOLD};
use crate::dom::{self, Observer};

const STAT_BLOCKS: &str = ".stat";
const STAT_NUMBER: &str = ".stat-number";
const ANIMATED_CLASS: &str = "animated";

/// Reads the integer shown in a stat block, ignoring every non-digit
/// ("1,200+" reads as 1200). Values past `u64::MAX` saturate.
pub fn parse_target(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// What happens when a stat block first becomes half visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterStart {
    /// Tagged by an earlier intersection; never restarts.
    AlreadyAnimated,
    /// Tagged now, but the text holds no number to count to.
    NotANumber,
    Start(u64),
}

pub fn counter_start(already_animated: bool, text: &str) -> CounterStart {
    if already_animated {
        return CounterStart::AlreadyAnimated;
    }
    match parse_target(text) {
        Some(target) => CounterStart::Start(target),
        None => CounterStart::NotANumber,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub finished: bool,
}

/// Linear count-up from zero to `target`, driven by elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    duration_ms: f64,
    started_at: f64,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: f64, started_at: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn frame(&self, now: f64) -> CounterFrame {
        let progress = self.progress(now);
        if progress < 1.0 {
            let current = (progress * self.target as f64).floor() as u64;
            CounterFrame {
                text: current.to_string(),
                finished: false,
            }
        } else {
            CounterFrame {
                text: format!("{}+", self.target),
                finished: true,
            }
        }
    }
}

fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Runs the count-up on `element`, one text update per animation frame.
/// There is no cancel path; a detached element just absorbs the writes.
pub fn animate(window: &Window, element: Element, target: u64) {
    let animation = CounterAnimation::new(target, COUNTER_DURATION_MS, now(window));
    schedule_frame(Rc::new(RefCell::new(None)), element, animation);
}

// The pending frame handle lives in `slot` and is released once the
// count reaches its target.
fn schedule_frame(slot: FrameSlot, element: Element, animation: CounterAnimation) {
    let next = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        next.borrow_mut().take();
        let frame = animation.frame(timestamp);
        element.set_text_content(Some(&frame.text));
        if !frame.finished {
            schedule_frame(next, element, animation);
        }
    });
    *slot.borrow_mut() = Some(handle);
}

/// Tags the stat's number as animated and starts its count-up, unless an
/// earlier intersection already did.
pub fn start_counter(window: &Window, stat: &Element) -> Option<CounterStart> {
    let number = stat.query_selector(STAT_NUMBER).ok().flatten()?;
    let classes = number.class_list();
    let text = number.text_content().unwrap_or_default();

    let start = counter_start(classes.contains(ANIMATED_CLASS), &text);
    match start {
        CounterStart::AlreadyAnimated => {}
        CounterStart::NotANumber => {
            let _ = classes.add_1(ANIMATED_CLASS);
            debug!("Stat {:?} is not a number, leaving it as is", text);
        }
        CounterStart::Start(target) => {
            let _ = classes.add_1(ANIMATED_CLASS);
            number.set_text_content(Some("0"));
            animate(window, number, target);
        }
    }
    Some(start)
}

/// Starts a stat block's count-up the first time it is half visible.
pub fn mount(window: &Window, document: &Document) -> Result<Option<Observer>, JsValue> {
    let stats = dom::query_all(document, STAT_BLOCKS);
    if stats.is_empty() {
        debug!("No stat blocks to animate");
        return Ok(None);
    }

    let window = window.clone();
    let observer = Observer::new(COUNTER_THRESHOLD, None, move |entry, _| {
        start_counter(&window, &entry.target());
    })?;
    observer.observe_all(&stats);

    Ok(Some(observer))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::dom::test_support::Fixture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn second_intersection_does_not_restart_counter() {
        let fixture = Fixture::new(r#"<div class="stat" id="users"><span class="stat-number">1200</span></div>"#);
        let window = web_sys::window().unwrap();
        let stat = dom::query(&fixture.document, "#users").unwrap();
        let number = dom::query(&fixture.document, ".stat-number").unwrap();

        assert_eq!(start_counter(&window, &stat), Some(CounterStart::Start(1200)));
        assert!(number.class_list().contains(ANIMATED_CLASS));
        assert_eq!(number.text_content().as_deref(), Some("0"));

        number.set_text_content(Some("1200+"));
        assert_eq!(start_counter(&window, &stat), Some(CounterStart::AlreadyAnimated));
        assert_eq!(number.text_content().as_deref(), Some("1200+"));
    }

    #[wasm_bindgen_test]
    fn unparseable_stat_is_tagged_and_left_alone() {
        let fixture = Fixture::new(r#"<div class="stat" id="free"><span class="stat-number">Free</span></div>"#);
        let window = web_sys::window().unwrap();
        let stat = dom::query(&fixture.document, "#free").unwrap();
        let number = dom::query(&fixture.document, ".stat-number").unwrap();

        assert_eq!(start_counter(&window, &stat), Some(CounterStart::NotANumber));
        assert!(number.class_list().contains(ANIMATED_CLASS));
        assert_eq!(number.text_content().as_deref(), Some("Free"));
    }
}
