// src/gallery.rs
use crate::error::{Result, SiteError};
use crate::site_config::SiteConfig;
use crate::utils::served_over_network;
use gloo_net::http::Request;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeHint {
    Hero,
    Tall,
    Wide,
    L,
    #[default]
    M,
}

impl SizeHint {
    pub fn class(self) -> &'static str {
        match self {
            SizeHint::Hero => "size-hero",
            SizeHint::Tall => "size-tall",
            SizeHint::Wide => "size-wide",
            SizeHint::L => "size-l",
            SizeHint::M => "size-m",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub image: String,
    pub alt: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub size: SizeHint,
    /// Unlisted items get no card but can still be opened via `data-photo`.
    #[serde(default = "default_listed")]
    pub listed: bool,
}

fn default_listed() -> bool {
    true
}

impl GalleryItem {
    pub fn new(id: &str, image: &str, alt: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            image: image.to_string(),
            alt: alt.to_string(),
            title: title.to_string(),
            subtitle: String::new(),
            size: SizeHint::default(),
            listed: true,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = subtitle.to_string();
        self
    }

    pub fn with_size(mut self, size: SizeHint) -> Self {
        self.size = size;
        self
    }

    pub fn unlisted(mut self) -> Self {
        self.listed = false;
        self
    }

    pub fn has_caption(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Ordered photo list plus an id index built once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryCatalog {
    items: Vec<GalleryItem>,
    index: HashMap<String, usize>,
}

impl GalleryCatalog {
    pub fn new(items: Vec<GalleryItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(SiteError::EmptyCatalog);
        }
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(SiteError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items, index })
    }

    pub fn builtin() -> Self {
        match Self::new(builtin_items()) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Built-in gallery is invalid: {}", e);
                Self::default()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&GalleryItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// Items shown as cards, in display order.
    pub fn listed(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.iter().filter(|item| item.listed)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

fn builtin_items() -> Vec<GalleryItem> {
    vec![
        GalleryItem::new(
            "concert1",
            "img/toque.jpg",
            "Cinderwood en Skandalo Tulua",
            "Skandalo, Tuluá 2025",
        )
        .with_subtitle("Show épico en vivo")
        .with_size(SizeHint::Hero),
        GalleryItem::new(
            "studio1",
            "img/estudioPID.jpg",
            "Grabación de Pure in Deep",
            "En el estudio",
        )
        .with_subtitle("Grabando \"Pure in Deep\" - 2025")
        .with_size(SizeHint::Tall),
        GalleryItem::new("backstage1", "img/preparacion.jpg", "Cinderwood backstage", "Backstage")
            .with_subtitle("Los momentos antes de salir al escenario"),
        GalleryItem::new(
            "concert2",
            "img/toque3.jpg",
            "Cinderwood en Santo Café Bar Buga",
            "Santo Café Bar, Buga",
        )
        .with_subtitle("Show íntimo en vivo - 2025")
        .with_size(SizeHint::Wide),
        GalleryItem::new(
            "band1",
            "img/grabacion_Until.jpg",
            "Grabación EP Until The Last One Goes",
            "Grabando el EP",
        )
        .with_subtitle("Primer EP \"Until The Last One Goes\"")
        .with_size(SizeHint::L),
        GalleryItem::new(
            "acoustic1",
            "img/toque2.jpg",
            "Cinderwood en Cafetería Vonbayage",
            "Cafetería Vonbayage",
        )
        .with_subtitle("Sesión acústica íntima - 2025"),
        GalleryItem::new(
            "santuario1",
            "img/Santuario.jpg",
            "Cinderwood en Santuario Pub",
            "Santuario Pub",
        )
        .with_subtitle("Show en vivo - 2025")
        .with_size(SizeHint::Wide),
        GalleryItem::new(
            "nextEvent",
            "img/santuario.jpeg",
            "Presentación en Santuario Pub, 17 de enero",
            "Próximo Evento",
        )
        .with_subtitle("17 de enero, Santuario Pub, Buga")
        .unlisted(),
    ]
}

async fn fetch_manifest(path: &str) -> Result<GalleryCatalog> {
    let resp = Request::get(path).send().await?;
    if !resp.ok() {
        return Err(SiteError::Status(resp.status()));
    }
    let items = resp.json::<Vec<GalleryItem>>().await?;
    GalleryCatalog::new(items)
}

/// Manifest from the site config when reachable, built-in photos otherwise.
pub async fn load_catalog(config: &SiteConfig) -> GalleryCatalog {
    let Some(path) = config.gallery_manifest.as_deref() else {
        return GalleryCatalog::builtin();
    };
    if !served_over_network() {
        log::info!("Not served over HTTP, skipping gallery manifest {}", path);
        return GalleryCatalog::builtin();
    }
    match fetch_manifest(path).await {
        Ok(catalog) => {
            log::info!("Loaded {} gallery items from {}", catalog.len(), path);
            catalog
        }
        Err(e) => {
            log::warn!("Gallery manifest {} unusable, using built-in photos: {}", path, e);
            GalleryCatalog::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = GalleryCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.listed().count(), 7);
        assert_eq!(catalog.listed().next().map(|i| i.id.as_str()), Some("concert1"));
        assert_eq!(catalog.get("studio1").map(|i| i.image.as_str()), Some("img/estudioPID.jpg"));
        assert!(catalog.get("nextEvent").is_some());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![
            GalleryItem::new("a", "img/a.jpg", "A", ""),
            GalleryItem::new("a", "img/b.jpg", "B", ""),
        ];
        assert!(matches!(GalleryCatalog::new(items), Err(SiteError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(GalleryCatalog::new(Vec::new()), Err(SiteError::EmptyCatalog)));
    }

    #[test]
    fn test_caption_follows_title() {
        assert!(GalleryItem::new("a", "img/a.jpg", "A", "Live").has_caption());
        assert!(!GalleryItem::new("b", "img/b.jpg", "B", "").has_caption());
    }

    #[test]
    fn test_manifest_defaults() {
        let json = r#"[
            { "id": "live1", "image": "img/live1.jpg", "alt": "Live", "size": "hero" },
            {
                "id": "live2",
                "image": "img/live2.jpg",
                "alt": "Live 2",
                "title": "Encore",
                "listed": false
            }
        ]"#;
        let items: Vec<GalleryItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].size, SizeHint::Hero);
        assert_eq!(items[0].title, "");
        assert!(items[0].listed);
        assert_eq!(items[1].size, SizeHint::M);
        assert!(!items[1].listed);

        let catalog = GalleryCatalog::new(items).unwrap();
        assert_eq!(catalog.listed().count(), 1);
    }

    #[test]
    fn test_size_classes() {
        assert_eq!(SizeHint::Hero.class(), "size-hero");
        assert_eq!(SizeHint::default().class(), "size-m");
    }
}
