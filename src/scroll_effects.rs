// src/scroll_effects.rs
//
// Smooth anchor scrolling, fade-in on visibility, header parallax and the
// statistics count-up.

use crate::error::Result;
use crate::site_config::SiteConfig;
use crate::stats::StatText;
use crate::utils::{query_all, query_all_in, query_one};
use gloo::timers::callback::Interval;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_utils::{document, window};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

pub const FADE_IN_SELECTOR: &str = ".fade-in";
pub const VISIBLE_CLASS: &str = "visible";
const FADE_IN_THRESHOLD: f64 = 0.1;
const FADE_IN_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const STATS_THRESHOLD: f64 = 0.5;

thread_local! {
    static FADE_IN: RefCell<Option<IntersectionObserver>> = RefCell::new(None);
}

type ObserverCallback = dyn FnMut(js_sys::Array, IntersectionObserver);

/// Element id an in-page link points at; `None` for a bare `#`.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn parallax_transform(scroll_y: f64, factor: f64) -> String {
    format!("translateY({}px)", scroll_y * factor)
}

pub fn init(config: &SiteConfig) {
    bind_smooth_scroll();

    match build_fade_in_observer() {
        Ok(observer) => {
            FADE_IN.with(|slot| *slot.borrow_mut() = Some(observer));
            observe_fade_ins(None);
        }
        Err(e) => log::error!("Fade-in observer unavailable: {}", e),
    }

    bind_parallax(config.parallax_factor);

    if let Err(e) = watch_stats(config.stats_steps, config.stats_interval_ms) {
        log::error!("Stats observer unavailable: {}", e);
    }
}

fn bind_smooth_scroll() {
    for anchor in query_all("a[href^=\"#\"]") {
        let link = anchor.clone();
        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let href = link.get_attribute("href").unwrap_or_default();
                let Some(id) = anchor_target_id(&href) else {
                    return;
                };
                if let Some(target) = document().get_element_by_id(id) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            },
        )
        .forget();
    }
}

fn build_fade_in_observer() -> Result<IntersectionObserver> {
    let callback = Closure::wrap(Box::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1(VISIBLE_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<ObserverCallback>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(FADE_IN_THRESHOLD));
    options.set_root_margin(FADE_IN_ROOT_MARGIN);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

/// Registers `.fade-in` elements (under `root`, or the whole document) with
/// the fade-in watcher. Already revealed elements are skipped, so calling
/// this again after a re-render is harmless.
pub fn observe_fade_ins(root: Option<&Element>) {
    let elements = match root {
        Some(root) => query_all_in(root, FADE_IN_SELECTOR),
        None => query_all(FADE_IN_SELECTOR),
    };
    FADE_IN.with(|slot| {
        if let Some(observer) = slot.borrow().as_ref() {
            for el in elements {
                if !el.class_list().contains(VISIBLE_CLASS) {
                    observer.observe(&el);
                }
            }
        }
    });
}

fn bind_parallax(factor: f64) {
    EventListener::new(&window(), "scroll", move |_| {
        let Some(header) = query_one(".header-bg") else {
            return;
        };
        let scrolled = window().scroll_y().unwrap_or(0.0);
        let _ = header
            .style()
            .set_property("transform", &parallax_transform(scrolled, factor));
    })
    .forget();
}

fn watch_stats(steps: u32, interval_ms: u32) -> Result<()> {
    let Some(section) = document().get_element_by_id("stats") else {
        return Ok(());
    };

    let fired = Rc::new(Cell::new(false));
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() && !fired.replace(true) {
                    for stat in query_all_in(&entry.target(), ".stat-item h3") {
                        animate_stat(stat, steps, interval_ms);
                    }
                    observer.disconnect();
                }
            }
        },
    ) as Box<ObserverCallback>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(STATS_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    observer.observe(&section);
    Ok(())
}

fn animate_stat(el: HtmlElement, steps: u32, interval_ms: u32) {
    let Some(stat) = StatText::parse(&el.text_content().unwrap_or_default()) else {
        return;
    };
    let mut frames = stat.count_up(steps);
    let slot: Rc<RefCell<Option<Interval>>> = Rc::default();
    let handle = slot.clone();

    let interval = Interval::new(interval_ms, move || {
        if let Some(frame) = frames.next() {
            el.set_text_content(Some(&frame));
        }
        if frames.finished() {
            // Dropping the interval clears it; defer so the running closure
            // is not freed from inside itself.
            if let Some(done) = handle.borrow_mut().take() {
                spawn_local(async move { drop(done) });
            }
        }
    });
    *slot.borrow_mut() = Some(interval);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_target_id() {
        assert_eq!(anchor_target_id("#gallery"), Some("gallery"));
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id("docs/rider.pdf"), None);
    }

    #[test]
    fn test_parallax_transform() {
        assert_eq!(parallax_transform(0.0, 0.5), "translateY(0px)");
        assert_eq!(parallax_transform(200.0, 0.5), "translateY(100px)");
        assert_eq!(parallax_transform(25.0, 0.5), "translateY(12.5px)");
    }
}
