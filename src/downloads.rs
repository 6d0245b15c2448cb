// src/downloads.rs
use crate::error::{Result, SiteError};
use crate::lang::{t, Lang};
use crate::site_config::SiteConfig;
use crate::utils::{query_all, served_over_network};
use gloo_net::http::{Method, RequestBuilder};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

pub const PRESSKIT_SELECTOR: &str = ".presskit-download";
pub const PRESSKIT_PATH_ATTR: &str = "data-pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Rider and press kit links with fixed ids.
    Document,
    /// Per-song press kit links.
    PressKit,
}

/// What a link should look like once its check has settled.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPresentation {
    pub disabled: bool,
    pub classes: Vec<&'static str>,
    pub label: Option<&'static str>,
}

impl LinkPresentation {
    pub fn enabled() -> Self {
        Self {
            disabled: false,
            classes: Vec::new(),
            label: None,
        }
    }

    /// HTTP failures and transport failures are treated the same way.
    pub fn for_outcome(kind: LinkKind, outcome: &Result<()>, lang: Lang) -> Self {
        if outcome.is_ok() {
            return Self::enabled();
        }
        match kind {
            LinkKind::Document => Self {
                disabled: true,
                classes: vec!["disabled"],
                label: None,
            },
            LinkKind::PressKit => Self {
                disabled: true,
                classes: vec!["disabled", "soon"],
                label: Some(t(lang, "presskit.soon")),
            },
        }
    }
}

pub struct DownloadLink {
    pub element: HtmlElement,
    pub path: String,
    pub kind: LinkKind,
}

/// HEAD request against `path`; only success or failure matters.
pub async fn check_available(path: &str) -> Result<()> {
    let resp = RequestBuilder::new(path).method(Method::HEAD).send().await?;
    if resp.ok() {
        Ok(())
    } else {
        Err(SiteError::Status(resp.status()))
    }
}

fn collect_links(config: &SiteConfig) -> Vec<DownloadLink> {
    let document = gloo_utils::document();
    let mut links = Vec::new();

    for descriptor in &config.downloads {
        match document
            .get_element_by_id(&descriptor.element_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            Some(element) => links.push(DownloadLink {
                element,
                path: descriptor.path.clone(),
                kind: LinkKind::Document,
            }),
            None => log::debug!("Download link #{} not on this page", descriptor.element_id),
        }
    }

    for element in query_all(PRESSKIT_SELECTOR) {
        let path = match element.get_attribute(PRESSKIT_PATH_ATTR) {
            Some(path) if !path.is_empty() => path,
            _ => continue,
        };
        links.push(DownloadLink {
            element,
            path,
            kind: LinkKind::PressKit,
        });
    }

    links
}

fn apply(link: &DownloadLink, presentation: &LinkPresentation) {
    if !presentation.disabled {
        return;
    }
    let el = &link.element;
    let _ = el.set_attribute("aria-disabled", "true");
    for class in &presentation.classes {
        let _ = el.class_list().add_1(class);
    }
    let _ = el.remove_attribute("download");
    let _ = el.remove_attribute("target");

    if let Some(label) = presentation.label {
        if let Ok(Some(span)) = el.query_selector(".btn-text") {
            span.set_text_content(Some(label));
        }
    }
}

/// Points every download link at its path and, for pages served over
/// HTTP(S), checks each one in its own task. Returns immediately.
pub fn spawn_checks(config: &SiteConfig) {
    let checking = served_over_network();
    let links = collect_links(config);
    log::info!("Checking {} download links (checking: {})", links.len(), checking);

    for link in links {
        let _ = link.element.set_attribute("href", &link.path);
        if !checking {
            continue;
        }
        spawn_local(async move {
            let outcome = check_available(&link.path).await;
            if let Err(e) = &outcome {
                log::warn!("Download {} unavailable: {}", link.path, e);
            }
            let presentation = LinkPresentation::for_outcome(link.kind, &outcome, Lang::current());
            apply(&link, &presentation);
        });
    }
}
