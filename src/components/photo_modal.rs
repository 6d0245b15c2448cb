// src/components/photo_modal.rs
//
// Content of the page's `#photoModal`. The host element itself (backdrop,
// visibility) is driven by the gallery component.

use crate::lang::{t, Lang};
use crate::modal::{ModalContent, NOT_FOUND_MESSAGE};
use web_sys::KeyboardEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PhotoModalProps {
    pub content: ModalContent,
    pub lang: Lang,
    pub close_ref: NodeRef,
    pub on_close: Callback<()>,
}

#[function_component(PhotoModal)]
pub fn photo_modal(props: &PhotoModalProps) -> Html {
    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_close_key = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if matches!(e.key().as_str(), "Enter" | " ") {
                e.prevent_default();
                on_close.emit(());
            }
        })
    };

    let body = match &props.content {
        ModalContent::Placeholder => html! {
            <div id="modalImage" class="modal-image placeholder">
                <p class="modal-placeholder">{t(props.lang, "modal.placeholder")}</p>
            </div>
        },
        ModalContent::NotFound => html! {
            <div id="modalImage" class="modal-image not-found">{NOT_FOUND_MESSAGE}</div>
        },
        ModalContent::Photo(item) => html! {
            <div id="modalImage" class="modal-image">
                <img class="modal-photo" src={item.image.clone()} alt={item.alt.clone()} />
                if item.has_caption() {
                    <p class="modal-caption">
                        <strong>{item.title.clone()}</strong>
                        if !item.subtitle.is_empty() {
                            <>
                                <br />
                                {item.subtitle.clone()}
                            </>
                        }
                    </p>
                }
            </div>
        },
    };

    html! {
        <div class="modal-content">
            <span
                class="close-modal"
                role="button"
                tabindex="0"
                aria-label={t(props.lang, "modal.close")}
                ref={props.close_ref.clone()}
                onclick={on_close_click}
                onkeydown={on_close_key}
            >
                {"×"}
            </span>
            { body }
        </div>
    }
}
