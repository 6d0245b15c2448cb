// src/tracks.rs
use crate::lang::Lang;
use crate::utils::query_all;
use gloo_events::EventListener;

const STREAMING_PREFIX: &str = "https://open.spotify.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackAction {
    OpenTab(String),
    Placeholder(String),
}

pub fn action_for(track: &str, lang: Lang) -> TrackAction {
    if track.starts_with(STREAMING_PREFIX) {
        return TrackAction::OpenTab(track.to_string());
    }
    let verb = match lang {
        Lang::Es => "Reproduciendo",
        Lang::En => "Now playing",
    };
    TrackAction::Placeholder(format!("{}: {}", verb, track))
}

pub fn play_track(track: &str) {
    match action_for(track, Lang::current()) {
        TrackAction::OpenTab(url) => {
            let opened = gloo_utils::window().open_with_url_and_target(&url, "_blank");
            if let Err(e) = opened {
                log::warn!("Could not open {}: {:?}", url, e);
            }
        }
        TrackAction::Placeholder(message) => gloo::dialogs::alert(&message),
    }
}

/// Binds every `[data-track]` play button.
pub fn init() {
    for button in query_all("[data-track]") {
        let target = button.clone();
        EventListener::new(&button, "click", move |_| {
            if let Some(track) = target.get_attribute("data-track") {
                play_track(&track);
            }
        })
        .forget();
    }
}
