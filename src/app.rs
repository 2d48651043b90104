use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config;
use crate::data::{
    MetadataService, MockMetadataService, MockPageFetcher, PageFetcher, YouTubeMetadataService,
    YouTubeSearchService,
};
use crate::storage;
use crate::ui;
use crate::youtube;

pub fn run() -> Result<()> {
    let cfg = config::load(config::LoadOptions::default()).context("load config")?;
    let config_path = config::default_path();
    let display_path = friendly_path(config_path.as_ref());

    let store = Arc::new(
        storage::Store::open(storage::Options {
            path: cfg.storage.path.clone(),
        })
        .context("open storage")?,
    );

    let fetcher: Arc<dyn PageFetcher>;
    let metadata: Arc<dyn MetadataService>;
    let status_message: String;

    if cfg.api.key.trim().is_empty() {
        // No API key configured yet; run against sample data so the app is
        // usable out of the box.
        fetcher = Arc::new(MockPageFetcher);
        metadata = Arc::new(MockMetadataService);
        status_message = format!(
            "Offline sample mode. Set api.key in {display_path} to search for real."
        );
    } else {
        let client = Arc::new(
            youtube::Client::new(youtube::ClientConfig {
                api_key: cfg.api.key.clone(),
                user_agent: cfg.api.user_agent.clone(),
                base_url: None,
                timeout: Some(cfg.api.timeout),
                http_client: None,
            })
            .context("create youtube client")?,
        );
        fetcher = Arc::new(YouTubeSearchService::new(client.clone()));
        metadata = Arc::new(YouTubeMetadataService::new(client));
        status_message =
            "Press / to type a query, Enter to search, 2 for your shelf.".to_string();
    }

    let options = ui::Options {
        status_message,
        fetcher,
        metadata,
        store: store.clone(),
        start_tab: cfg.ui.start_tab(),
        config_path: display_path,
    };

    let mut model = ui::Model::new(options)?;
    model.run()?;

    drop(model);
    if let Ok(store) = Arc::try_unwrap(store) {
        let _ = store.close();
    }

    Ok(())
}

fn friendly_path(path: Option<&std::path::PathBuf>) -> String {
    if let Some(path) = path {
        if let Some(home) = dirs::home_dir() {
            if let Ok(stripped) = path.strip_prefix(&home) {
                let mut display = String::from("~");
                if !stripped.as_os_str().is_empty() {
                    display.push_str(&format!("/{}", stripped.display()));
                }
                return display;
            }
        }
        path.display().to_string()
    } else {
        "~/.config/vidstash/config.yaml".to_string()
    }
}
