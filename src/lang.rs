// src/lang.rs

/// Dispatched on `document` whenever the applied language changes.
pub const LANGUAGE_CHANGED_EVENT: &str = "cinderwood:languagechange";

/// Languages the page is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "es" => Some(Lang::Es),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    /// Stored preference: only an exact `"en"` selects English.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("en") => Lang::En,
            _ => Lang::Es,
        }
    }

    /// Class carried by content blocks written in this language.
    pub fn content_class(self) -> &'static str {
        match self {
            Lang::Es => "lang-es",
            Lang::En => "lang-en",
        }
    }

    /// Language currently applied to the document (`<html lang>`).
    pub fn current() -> Self {
        gloo_utils::document_element()
            .get_attribute("lang")
            .as_deref()
            .and_then(Lang::from_code)
            .unwrap_or_default()
    }
}

/// Localized UI text the script writes itself.
pub fn t(lang: Lang, key: &str) -> &'static str {
    match (lang, key) {
        (Lang::Es, "presskit.soon") => "Press Kit próximamente",
        (Lang::En, "presskit.soon") => "Press Kit coming soon",
        (Lang::Es, "modal.placeholder") => "Selecciona una foto de la galería",
        (Lang::En, "modal.placeholder") => "Select a photo from the gallery",
        (Lang::Es, "modal.close") => "Cerrar",
        (Lang::En, "modal.close") => "Close",
        (Lang::Es, "gallery.missing") => "Imagen no disponible",
        (Lang::En, "gallery.missing") => "Image unavailable",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored() {
        assert_eq!(Lang::from_stored(None), Lang::Es);
        assert_eq!(Lang::from_stored(Some("en")), Lang::En);
        assert_eq!(Lang::from_stored(Some("es")), Lang::Es);
        assert_eq!(Lang::from_stored(Some("EN")), Lang::Es);
        assert_eq!(Lang::from_stored(Some("fr")), Lang::Es);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Lang::from_code(Lang::En.code()), Some(Lang::En));
        assert_eq!(Lang::from_code(Lang::Es.code()), Some(Lang::Es));
        assert_eq!(Lang::from_code("de"), None);
    }

    #[test]
    fn test_translations() {
        assert_eq!(t(Lang::Es, "presskit.soon"), "Press Kit próximamente");
        assert_eq!(t(Lang::En, "presskit.soon"), "Press Kit coming soon");
        assert_eq!(t(Lang::En, "unknown.key"), "");
    }
}
