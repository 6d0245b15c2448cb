// src/site_config.rs
use crate::error::Result;
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub storage_key: String,
    pub downloads: Vec<DownloadDescriptor>,
    pub gallery_manifest: Option<String>,
    pub stats_steps: u32,
    pub stats_interval_ms: u32,
    pub parallax_factor: f64,
}

/// A fixed document link, addressed by element id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DownloadDescriptor {
    pub element_id: String,
    pub path: String,
}

impl DownloadDescriptor {
    pub fn new(element_id: &str, path: &str) -> Self {
        Self {
            element_id: element_id.to_string(),
            path: path.to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: String::from("cinderwood-lang"),
            downloads: vec![
                DownloadDescriptor::new("riderDownload", "docs/Rider_Tecnico_Cinderwood.pdf"),
                DownloadDescriptor::new("epkDownload", "docs/Cinderwood_Electronic_Press_Kit.pdf"),
            ],
            gallery_manifest: None,
            stats_steps: 50,
            stats_interval_ms: 50,
            parallax_factor: 0.5,
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: SiteConfig = serde_json::from_str(json)?;
        if config.stats_steps == 0 {
            config.stats_steps = 1;
        }
        Ok(config)
    }

    /// Reads the embedded `<script id="site-config">` block, if any.
    pub fn from_document() -> Self {
        let text = gloo_utils::document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded site config from #{}", CONFIG_ELEMENT_ID);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring malformed site config: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}
