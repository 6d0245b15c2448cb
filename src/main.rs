// src/main.rs
mod components;
mod downloads;
mod error;
mod gallery;
mod lang;
mod language_switcher;
mod modal;
mod preference;
mod scroll_effects;
mod site_config;
mod stats;
mod tracks;
mod utils;

use preference::{BrowserStorage, LanguagePreference};
use site_config::SiteConfig;
use wasm_bindgen_futures::spawn_local;

/// Runs after the DOM is parsed: download checks are spawned and not
/// awaited, then the language is applied and the gallery mounted.
async fn startup(config: SiteConfig) {
    utils::dom_ready().await;

    downloads::spawn_checks(&config);

    language_switcher::init(LanguagePreference::new(BrowserStorage, &config.storage_key));

    let catalog = gallery::load_catalog(&config).await;
    match components::gallery::mount(catalog) {
        Ok(()) => {}
        Err(error::SiteError::MissingNode(node)) => {
            log::info!("No gallery on this page ({})", node);
        }
        Err(e) => log::error!("Failed to mount gallery: {}", e),
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    let config = SiteConfig::from_document();
    scroll_effects::init(&config);
    tracks::init();

    spawn_local(startup(config));
}
