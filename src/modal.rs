// src/modal.rs
use crate::gallery::{GalleryCatalog, GalleryItem};

/// Shown when the viewer is asked for an id the catalog does not know.
pub const NOT_FOUND_MESSAGE: &str = "Foto no encontrada";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open { item_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    Open(String),
    Close,
}

/// What the viewer region displays.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalContent {
    Placeholder,
    Photo(GalleryItem),
    NotFound,
}

impl ModalState {
    /// Opening while open replaces the item directly; closing is idempotent.
    pub fn transition(&self, event: ModalEvent) -> ModalState {
        match event {
            ModalEvent::Open(item_id) => ModalState::Open { item_id },
            ModalEvent::Close => ModalState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }

    pub fn content(&self, catalog: &GalleryCatalog) -> ModalContent {
        match self {
            ModalState::Closed => ModalContent::Placeholder,
            ModalState::Open { item_id } => match catalog.get(item_id) {
                Some(item) => ModalContent::Photo(item.clone()),
                None => ModalContent::NotFound,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(id: &str) -> ModalEvent {
        ModalEvent::Open(id.to_string())
    }

    #[test]
    fn test_starts_closed() {
        let state = ModalState::default();
        assert!(!state.is_open());
        assert_eq!(state.content(&GalleryCatalog::builtin()), ModalContent::Placeholder);
    }

    #[test]
    fn test_open_known_item() {
        let catalog = GalleryCatalog::builtin();
        let state = ModalState::Closed.transition(open("concert1"));
        assert!(state.is_open());
        match state.content(&catalog) {
            ModalContent::Photo(item) => {
                assert_eq!(item.image, "img/toque.jpg");
                assert_eq!(item.title, "Skandalo, Tuluá 2025");
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_open_unknown_item() {
        let state = ModalState::Closed.transition(open("nope"));
        assert!(state.is_open());
        assert_eq!(state.content(&GalleryCatalog::builtin()), ModalContent::NotFound);
    }

    #[test]
    fn test_reopen_replaces_item() {
        let state = ModalState::Closed
            .transition(open("concert1"))
            .transition(open("studio1"));
        assert_eq!(
            state,
            ModalState::Open {
                item_id: "studio1".to_string()
            }
        );
    }

    #[test]
    fn test_close() {
        let state = ModalState::Closed.transition(open("band1")).transition(ModalEvent::Close);
        assert_eq!(state, ModalState::Closed);
        assert_eq!(state.transition(ModalEvent::Close), ModalState::Closed);
    }
}
