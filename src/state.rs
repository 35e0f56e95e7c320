use actix_web::web;

use crate::config::AppConfig;
use crate::feed::FeedReader;
use crate::ghl::{GhlClient, MenuInstaller};

/// Shared, read-only per-process state handed to every handler. Per-request
/// choices (which blog a location publishes into) are looked up per request,
/// never stored here.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub ghl: GhlClient,
    pub feed_reader: FeedReader,
    pub menu_installer: MenuInstaller,
}

pub type RqAppState = web::Data<AppState>;

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let http = reqwest::Client::new();
        let ghl = GhlClient::with_http_client(http.clone(), &config.ghl_api_base_url);
        let feed_reader = FeedReader::with_client(http, config.max_items);
        let menu_installer = MenuInstaller::new(ghl.clone());

        Self {
            config,
            ghl,
            feed_reader,
            menu_installer,
        }
    }
}
