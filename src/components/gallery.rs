// src/components/gallery.rs
use crate::components::photo_modal::PhotoModal;
use crate::error::{Result, SiteError};
use crate::gallery::{GalleryCatalog, GalleryItem};
use crate::lang::{t, Lang, LANGUAGE_CHANGED_EVENT};
use crate::modal::{ModalEvent, ModalState};
use crate::scroll_effects::{observe_fade_ins, VISIBLE_CLASS};
use crate::utils::set_body_scroll_locked;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::document;
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};
use yew::create_portal;
use yew::prelude::*;

pub const GALLERY_CONTAINER_ID: &str = "galleryGrid";
pub const MODAL_ID: &str = "photoModal";
const CARD_SELECTOR: &str = ".gallery-item";
const PHOTO_TRIGGER_SELECTOR: &str = "[data-photo]";

thread_local! {
    static MOUNTED: Cell<bool> = Cell::new(false);
}

#[derive(Properties, PartialEq)]
pub struct GalleryProps {
    pub catalog: Rc<GalleryCatalog>,
    /// `#galleryGrid`; cards are its direct children.
    pub container: Element,
    /// The page's `#photoModal`, acting as backdrop.
    pub modal_host: Element,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryMsg {
    Activate(String),
    /// `revealed` records whether the card had already faded in, so the
    /// re-render that flags it keeps the `visible` class.
    ImageFailed { id: String, revealed: bool },
    Close,
    LanguageChanged(Lang),
}

/// Keys that activate a focused card or the close control.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Everything the gallery renders from, without any DOM handles.
#[derive(Debug, Default)]
pub struct GalleryState {
    pub modal: ModalState,
    pub missing: HashSet<String>,
    pub revealed: HashSet<String>,
    pub lang: Lang,
}

impl GalleryState {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            ..Self::default()
        }
    }

    /// Cards whose image failed to load can no longer be opened.
    pub fn can_activate(&self, id: &str) -> bool {
        !self.missing.contains(id)
    }

    /// Returns whether anything visible changed.
    pub fn update(&mut self, msg: GalleryMsg) -> bool {
        match msg {
            GalleryMsg::Activate(id) => {
                if !self.can_activate(&id) {
                    log::debug!("Ignoring activation of missing photo {}", id);
                    return false;
                }
                let next = self.modal.transition(ModalEvent::Open(id));
                let changed = next != self.modal;
                self.modal = next;
                changed
            }
            GalleryMsg::ImageFailed { id, revealed } => {
                if revealed {
                    self.revealed.insert(id.clone());
                }
                self.missing.insert(id)
            }
            GalleryMsg::Close => {
                if !self.modal.is_open() {
                    return false;
                }
                self.modal = self.modal.transition(ModalEvent::Close);
                true
            }
            GalleryMsg::LanguageChanged(lang) => {
                let changed = lang != self.lang;
                self.lang = lang;
                changed
            }
        }
    }

    pub fn card_classes(&self, item: &GalleryItem) -> Vec<&'static str> {
        let mut classes = vec!["gallery-item", "fade-in", item.size.class()];
        if self.missing.contains(&item.id) {
            classes.push("missing");
        }
        if self.revealed.contains(&item.id) {
            classes.push(VISIBLE_CLASS);
        }
        classes
    }

    pub fn card_label(&self, item: &GalleryItem) -> String {
        if self.missing.contains(&item.id) {
            t(self.lang, "gallery.missing").to_string()
        } else if item.has_caption() {
            item.title.clone()
        } else {
            item.alt.clone()
        }
    }
}

pub struct Gallery {
    state: GalleryState,
    close_ref: NodeRef,
    focus_close: bool,
    modal_shown: bool,
    // Delegated and document-level listeners live exactly as long as the
    // component, so re-renders never add more.
    _listeners: Vec<EventListener>,
}

/// Id of the card an event originated in, if any.
fn card_id(target: Option<Element>) -> Option<String> {
    target?
        .closest(CARD_SELECTOR)
        .ok()
        .flatten()?
        .get_attribute("data-id")
}

fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn set_modal_visible(host: &Element, open: bool) {
    if let Some(host) = host.dyn_ref::<HtmlElement>() {
        let display = if open { "block" } else { "none" };
        let _ = host.style().set_property("display", display);
    }
    let _ = host.class_list().toggle_with_force("open", open);
    let _ = host.set_attribute("aria-hidden", if open { "false" } else { "true" });
}

impl Component for Gallery {
    type Message = GalleryMsg;
    type Properties = GalleryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let doc = document();
        let props = ctx.props();
        let mut listeners = Vec::new();

        let link = ctx.link().clone();
        listeners.push(EventListener::new(&props.container, "click", move |event| {
            if let Some(id) = card_id(event_element(event)) {
                link.send_message(GalleryMsg::Activate(id));
            }
        }));

        let link = ctx.link().clone();
        listeners.push(EventListener::new_with_options(
            &props.container,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if !is_activation_key(&key_event.key()) {
                    return;
                }
                if let Some(id) = card_id(event_element(event)) {
                    event.prevent_default();
                    link.send_message(GalleryMsg::Activate(id));
                }
            },
        ));

        let link = ctx.link().clone();
        let host = props.modal_host.clone();
        listeners.push(EventListener::new(&props.modal_host, "click", move |event| {
            if event_element(event).as_ref() == Some(&host) {
                link.send_message(GalleryMsg::Close);
            }
        }));

        let link = ctx.link().clone();
        listeners.push(EventListener::new(&doc, "keydown", move |event| {
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                if key_event.key() == "Escape" {
                    link.send_message(GalleryMsg::Close);
                }
            }
        }));

        // Page elements outside the grid (e.g. the next-event poster) open
        // photos through `data-photo`.
        let link = ctx.link().clone();
        listeners.push(EventListener::new(&doc, "click", move |event| {
            let trigger = event_element(event)
                .and_then(|el| el.closest(PHOTO_TRIGGER_SELECTOR).ok().flatten());
            if let Some(id) = trigger.and_then(|el| el.get_attribute("data-photo")) {
                link.send_message(GalleryMsg::Activate(id));
            }
        }));

        let link = ctx.link().clone();
        listeners.push(EventListener::new(&doc, LANGUAGE_CHANGED_EVENT, move |_| {
            link.send_message(GalleryMsg::LanguageChanged(Lang::current()));
        }));

        Self {
            state: GalleryState::new(Lang::current()),
            close_ref: NodeRef::default(),
            focus_close: false,
            modal_shown: false,
            _listeners: listeners,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let opening = matches!(msg, GalleryMsg::Activate(_));
        let changed = self.state.update(msg);
        if opening && changed {
            self.focus_close = true;
        }
        changed
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_close = ctx.link().callback(|_| GalleryMsg::Close);

        let modal = html! {
            <PhotoModal
                content={self.state.modal.content(&props.catalog)}
                lang={self.state.lang}
                close_ref={self.close_ref.clone()}
                on_close={on_close}
            />
        };

        html! {
            <>
                { for props.catalog.listed().map(|item| self.render_card(ctx, item)) }
                { create_portal(modal, props.modal_host.clone()) }
            </>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        let props = ctx.props();
        if first_render {
            log::info!("Gallery rendered with {} cards", props.catalog.listed().count());
        }

        observe_fade_ins(Some(&props.container));

        let open = self.state.modal.is_open();
        if first_render || open != self.modal_shown {
            set_modal_visible(&props.modal_host, open);
        }
        if open != self.modal_shown {
            set_body_scroll_locked(open);
            self.modal_shown = open;
        }

        if std::mem::take(&mut self.focus_close) {
            if let Some(close) = self.close_ref.cast::<HtmlElement>() {
                let _ = close.focus();
            }
        }
    }
}

impl Gallery {
    fn render_card(&self, ctx: &Context<Self>, item: &GalleryItem) -> Html {
        let missing = self.state.missing.contains(&item.id);
        let onerror = {
            let id = item.id.clone();
            ctx.link().callback(move |e: Event| {
                let revealed = event_element(&e)
                    .and_then(|img| img.closest(CARD_SELECTOR).ok().flatten())
                    .map(|card| card.class_list().contains(VISIBLE_CLASS))
                    .unwrap_or(false);
                GalleryMsg::ImageFailed {
                    id: id.clone(),
                    revealed,
                }
            })
        };

        html! {
            <div
                key={item.id.clone()}
                class={classes!(self.state.card_classes(item))}
                data-id={item.id.clone()}
                data-missing={missing.then_some("true")}
                role="button"
                tabindex={if missing { "-1" } else { "0" }}
                aria-disabled={missing.then_some("true")}
                aria-label={self.state.card_label(item)}
            >
                <img src={item.image.clone()} alt={item.alt.clone()} loading="lazy" {onerror} />
                if item.has_caption() {
                    <div class="gallery-overlay">
                        <span class="gallery-title">{item.title.clone()}</span>
                    </div>
                }
            </div>
        }
    }
}

/// The page's `#photoModal`, created on `<body>` when the markup lacks one.
fn modal_host(doc: &Document) -> Result<Element> {
    if let Some(host) = doc.get_element_by_id(MODAL_ID) {
        return Ok(host);
    }
    let body = doc
        .body()
        .ok_or_else(|| SiteError::MissingNode("body".to_string()))?;
    let host = doc.create_element("div")?;
    host.set_id(MODAL_ID);
    host.set_class_name("modal");
    host.set_attribute("role", "dialog")?;
    host.set_attribute("aria-modal", "true")?;
    body.append_child(&host)?;
    log::info!("No #{} in markup, created one", MODAL_ID);
    Ok(host)
}

/// Clears the gallery container, renders the cards into it and the viewer
/// into `#photoModal`. Mounting happens at most once per page.
pub fn mount(catalog: GalleryCatalog) -> Result<()> {
    if MOUNTED.with(Cell::get) {
        log::debug!("Gallery already mounted");
        return Ok(());
    }
    let doc = document();
    let container = doc
        .get_element_by_id(GALLERY_CONTAINER_ID)
        .ok_or_else(|| SiteError::MissingNode(format!("#{}", GALLERY_CONTAINER_ID)))?;
    let modal_host = modal_host(&doc)?;
    MOUNTED.with(|m| m.set(true));

    container.set_inner_html("");
    modal_host.set_inner_html("");

    yew::Renderer::<Gallery>::with_root_and_props(
        container.clone(),
        GalleryProps {
            catalog: Rc::new(catalog),
            container,
            modal_host,
        },
    )
    .render();
    Ok(())
}
