// src/utils.rs
use gloo_events::EventListener;
use gloo_utils::document;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Element, HtmlElement, NodeList};

/// Protocol of the current page, e.g. `"https:"` or `"file:"`.
pub fn page_protocol() -> String {
    window()
        .and_then(|w| w.location().protocol().ok())
        .unwrap_or_default()
}

/// Whether a protocol string belongs to a network load (`http:`/`https:`).
/// Probes only make sense under these; `file:` pages would always fail them.
pub fn is_network_protocol(protocol: &str) -> bool {
    protocol.starts_with("http")
}

pub fn served_over_network() -> bool {
    is_network_protocol(&page_protocol())
}

/// All `HtmlElement`s in the document matching `selector`.
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    match document().query_selector_all(selector) {
        Ok(list) => collect_html(&list),
        Err(e) => {
            log::warn!("Invalid selector {}: {:?}", selector, e);
            Vec::new()
        }
    }
}

/// Same as [`query_all`], scoped to the descendants of `root`.
pub fn query_all_in(root: &Element, selector: &str) -> Vec<HtmlElement> {
    root.query_selector_all(selector)
        .map(|list| collect_html(&list))
        .unwrap_or_default()
}

pub fn query_one(selector: &str) -> Option<HtmlElement> {
    document()
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn collect_html(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Resolves once the document has finished parsing.
pub async fn dom_ready() {
    let doc = document();
    if doc.ready_state() != "loading" {
        return;
    }
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        EventListener::once(&doc, "DOMContentLoaded", move |_| {
            let _ = resolve.call0(&JsValue::NULL);
        })
        .forget();
    });
    let _ = JsFuture::from(promise).await;
}

/// Restores or suppresses page scrolling behind an overlay.
pub fn set_body_scroll_locked(locked: bool) {
    if let Some(body) = document().body() {
        let value = if locked { "hidden" } else { "auto" };
        let _ = body.style().set_property("overflow", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_protocols() {
        assert!(is_network_protocol("http:"));
        assert!(is_network_protocol("https:"));
        assert!(!is_network_protocol("file:"));
        assert!(!is_network_protocol(""));
    }
}
