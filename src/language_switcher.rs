// src/language_switcher.rs
//
// `set_language` snapshots the tagged nodes, plans the writes that differ
// from the requested language and applies only those.

use crate::lang::{Lang, LANGUAGE_CHANGED_EVENT};
use crate::preference::{LanguagePreference, PreferenceStore};
use crate::utils::query_all;
use gloo_events::EventListener;
use std::rc::Rc;
use web_sys::{Event, HtmlElement};

pub const TOGGLE_SELECTOR: &str = ".lang-btn";

const LANGS: [Lang; 2] = [Lang::Es, Lang::En];

/// Whether a block tagged with `block` stays visible under `current`.
pub fn is_visible(block: Lang, current: Lang) -> bool {
    block == current
}

/// Language a toggle button switches to, read from its `data-lang`.
pub fn button_lang(button: &HtmlElement) -> Option<Lang> {
    button
        .get_attribute("data-lang")
        .as_deref()
        .and_then(Lang::from_code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Content(Lang),
    Toggle(Option<Lang>),
}

/// Current state of one language-tagged node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub role: NodeRole,
    pub displayed: bool,
    pub active: bool,
    pub pressed: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangWrite {
    DocumentLang(Lang),
    Display { node: usize, shown: bool },
    Active { node: usize, active: bool },
    Pressed { node: usize, pressed: bool },
}

/// Writes needed to bring `nodes` in line with `lang`. Empty when the
/// document already shows `lang`.
pub fn plan_writes(lang: Lang, document_lang: Option<&str>, nodes: &[NodeView]) -> Vec<LangWrite> {
    let mut writes = Vec::new();
    if document_lang != Some(lang.code()) {
        writes.push(LangWrite::DocumentLang(lang));
    }

    for (node, view) in nodes.iter().enumerate() {
        match view.role {
            NodeRole::Content(block) => {
                let shown = is_visible(block, lang);
                if view.displayed != shown {
                    writes.push(LangWrite::Display { node, shown });
                }
            }
            NodeRole::Toggle(target) => {
                let active = target == Some(lang);
                if view.active != active {
                    writes.push(LangWrite::Active { node, active });
                }
                if view.pressed.as_deref() != Some(pressed_value(active)) {
                    writes.push(LangWrite::Pressed { node, pressed: active });
                }
            }
        }
    }
    writes
}

fn pressed_value(pressed: bool) -> &'static str {
    if pressed {
        "true"
    } else {
        "false"
    }
}

fn snapshot() -> (Vec<HtmlElement>, Vec<NodeView>) {
    let mut elements = Vec::new();
    let mut views = Vec::new();

    for block in LANGS {
        for el in query_all(&format!(".{}", block.content_class())) {
            let display = el.style().get_property_value("display").unwrap_or_default();
            views.push(NodeView {
                role: NodeRole::Content(block),
                displayed: display != "none",
                active: false,
                pressed: None,
            });
            elements.push(el);
        }
    }

    for button in query_all(TOGGLE_SELECTOR) {
        views.push(NodeView {
            role: NodeRole::Toggle(button_lang(&button)),
            displayed: true,
            active: button.class_list().contains("active"),
            pressed: button.get_attribute("aria-pressed"),
        });
        elements.push(button);
    }

    (elements, views)
}

/// Applies `lang` to the document. Calling it again with the same language
/// leaves the DOM untouched.
pub fn set_language(lang: Lang) {
    let root = gloo_utils::document_element();
    let document_lang = root.get_attribute("lang");
    let (elements, views) = snapshot();
    let writes = plan_writes(lang, document_lang.as_deref(), &views);

    let mut changed = false;
    for write in writes {
        match write {
            LangWrite::DocumentLang(lang) => {
                let _ = root.set_attribute("lang", lang.code());
                changed = true;
            }
            LangWrite::Display { node, shown } => {
                let style = elements[node].style();
                let _ = if shown {
                    style.remove_property("display").map(|_| ())
                } else {
                    style.set_property("display", "none")
                };
            }
            LangWrite::Active { node, active } => {
                let _ = elements[node].class_list().toggle_with_force("active", active);
            }
            LangWrite::Pressed { node, pressed } => {
                let _ = elements[node].set_attribute("aria-pressed", pressed_value(pressed));
            }
        }
    }

    if changed {
        if let Ok(event) = Event::new(LANGUAGE_CHANGED_EVENT) {
            let _ = gloo_utils::document().dispatch_event(&event);
        }
    }
}

/// Applies the stored language and binds the toggle buttons.
pub fn init<S: PreferenceStore + 'static>(preference: LanguagePreference<S>) {
    let lang = preference.load();
    set_language(lang);
    log::info!("Language applied: {}", lang.code());

    let preference = Rc::new(preference);
    for button in query_all(TOGGLE_SELECTOR) {
        let Some(target) = button_lang(&button) else {
            log::warn!("Language toggle without a valid data-lang");
            continue;
        };
        let preference = preference.clone();
        EventListener::new(&button, "click", move |_| {
            set_language(target);
            preference.save(target);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(lang: Lang) -> NodeView {
        NodeView {
            role: NodeRole::Content(lang),
            displayed: true,
            active: false,
            pressed: None,
        }
    }

    fn toggle(lang: Lang) -> NodeView {
        NodeView {
            role: NodeRole::Toggle(Some(lang)),
            displayed: true,
            active: false,
            pressed: None,
        }
    }

    fn page() -> Vec<NodeView> {
        vec![
            content(Lang::Es),
            content(Lang::Es),
            content(Lang::En),
            toggle(Lang::Es),
            toggle(Lang::En),
        ]
    }

    /// Mirrors what `set_language` does to the DOM.
    fn apply(writes: &[LangWrite], document_lang: &mut Option<String>, nodes: &mut [NodeView]) {
        for write in writes {
            match *write {
                LangWrite::DocumentLang(lang) => *document_lang = Some(lang.code().to_string()),
                LangWrite::Display { node, shown } => nodes[node].displayed = shown,
                LangWrite::Active { node, active } => nodes[node].active = active,
                LangWrite::Pressed { node, pressed } => {
                    nodes[node].pressed = Some(pressed_value(pressed).to_string())
                }
            }
        }
    }

    fn switch(lang: Lang, document_lang: &mut Option<String>, nodes: &mut [NodeView]) -> usize {
        let writes = plan_writes(lang, document_lang.as_deref(), nodes);
        apply(&writes, document_lang, nodes);
        writes.len()
    }

    #[test]
    fn test_visibility_rules() {
        assert!(is_visible(Lang::Es, Lang::Es));
        assert!(!is_visible(Lang::En, Lang::Es));
        assert!(is_visible(Lang::En, Lang::En));
        assert!(!is_visible(Lang::Es, Lang::En));
    }

    #[test]
    fn test_no_stored_preference_shows_spanish() {
        let mut nodes = page();
        let mut document_lang = None;
        switch(Lang::from_stored(None), &mut document_lang, &mut nodes);

        assert_eq!(document_lang.as_deref(), Some("es"));
        assert!(nodes[0].displayed && nodes[1].displayed);
        assert!(!nodes[2].displayed);
        assert!(nodes[3].active);
        assert_eq!(nodes[3].pressed.as_deref(), Some("true"));
        assert!(!nodes[4].active);
        assert_eq!(nodes[4].pressed.as_deref(), Some("false"));
    }

    #[test]
    fn test_english_hides_spanish() {
        let mut nodes = page();
        let mut document_lang = None;
        switch(Lang::En, &mut document_lang, &mut nodes);

        assert!(!nodes[0].displayed && !nodes[1].displayed);
        assert!(nodes[2].displayed);
        assert!(!nodes[3].active);
        assert!(nodes[4].active);
    }

    #[test]
    fn test_repeated_calls_write_nothing() {
        for lang in LANGS {
            let mut nodes = page();
            let mut document_lang = None;
            assert!(switch(lang, &mut document_lang, &mut nodes) > 0);
            assert!(plan_writes(lang, document_lang.as_deref(), &nodes).is_empty());
        }
    }

    #[test]
    fn test_switch_back_and_forth() {
        let mut nodes = page();
        let mut document_lang = None;
        switch(Lang::En, &mut document_lang, &mut nodes);
        switch(Lang::Es, &mut document_lang, &mut nodes);
        assert_eq!(document_lang.as_deref(), Some("es"));
        assert!(nodes[0].displayed && !nodes[2].displayed);
        assert!(nodes[3].active && !nodes[4].active);
    }

    #[test]
    fn test_toggle_without_language_is_never_active() {
        let nodes = vec![NodeView {
            role: NodeRole::Toggle(None),
            displayed: true,
            active: true,
            pressed: None,
        }];
        let writes = plan_writes(Lang::Es, Some("es"), &nodes);
        assert_eq!(
            writes,
            vec![
                LangWrite::Active { node: 0, active: false },
                LangWrite::Pressed { node: 0, pressed: false },
            ]
        );
    }
}
