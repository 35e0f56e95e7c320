use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::header;
use serde::Deserialize;
use serde_json::json;

use super::client::{decode, read_body, send, GhlClient, GhlError};
use super::oauth::AccessToken;

pub const MENU_CATEGORY: &str = "Custom Links";

fn custom_menus_path(location_id: &str) -> String {
    format!("/v2/locations/{location_id}/custom-menus")
}

/// A custom menu link to place in a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub name: String,
    pub url: String,
}

/// A menu as reported by the platform. Fields are optional because only the
/// ones we compare against matter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExistingMenu {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MenuList {
    #[serde(default)]
    menus: Option<Vec<ExistingMenu>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled,
    Installed,
}

impl InstallOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            InstallOutcome::AlreadyInstalled => "Menu already installed",
            InstallOutcome::Installed => "Menu installed",
        }
    }
}

impl MenuEntry {
    /// Installed when any existing menu has the same url OR the same name.
    pub fn is_installed_in(&self, existing: &[ExistingMenu]) -> bool {
        existing.iter().any(|menu| {
            menu.url.as_deref() == Some(self.url.as_str())
                || menu.name.as_deref() == Some(self.name.as_str())
        })
    }
}

impl GhlClient {
    pub async fn existing_menus(
        &self,
        location_id: &str,
        token: &AccessToken,
    ) -> Result<Vec<ExistingMenu>, GhlError> {
        let endpoint = self.endpoint(&custom_menus_path(location_id));

        let request = self
            .http()
            .get(&endpoint)
            .header(header::AUTHORIZATION, token.bearer());

        let response = send(request, &endpoint).await?;
        let status = response.status();
        let body = read_body(response, &endpoint).await?;

        if !status.is_success() {
            return Err(GhlError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let list: MenuList = decode(&body, &endpoint)?;
        Ok(list.menus.unwrap_or_default())
    }

    /// Creates the menu. A non-2xx response body is surfaced verbatim.
    pub async fn create_menu(
        &self,
        location_id: &str,
        token: &AccessToken,
        entry: &MenuEntry,
    ) -> Result<(), GhlError> {
        let endpoint = self.endpoint(&custom_menus_path(location_id));

        let request = self
            .http()
            .post(&endpoint)
            .header(header::AUTHORIZATION, token.bearer())
            .json(&json!({
                "name": entry.name,
                "url": entry.url,
                "category": MENU_CATEGORY,
            }));

        let response = send(request, &endpoint).await?;
        let status = response.status();

        if !status.is_success() {
            let body = read_body(response, &endpoint).await?;
            return Err(GhlError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}

/// Per-location async locks so two installs for the same location inside this
/// process cannot both observe "absent".
#[derive(Debug, Default)]
pub struct LocationLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl LocationLocks {
    pub fn lock_for(&self, location_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Drop locks nobody is holding or waiting on
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(location_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

/// Idempotent menu installation: look up the location's menus, create the
/// entry only when neither its name nor its url is already present.
///
/// Installs in separate processes can still race; the platform offers no
/// conditional create.
#[derive(Debug)]
pub struct MenuInstaller {
    client: GhlClient,
    locks: LocationLocks,
}

impl MenuInstaller {
    pub fn new(client: GhlClient) -> Self {
        Self {
            client,
            locks: LocationLocks::default(),
        }
    }

    pub async fn install(
        &self,
        location_id: &str,
        token: &AccessToken,
        entry: &MenuEntry,
    ) -> Result<InstallOutcome, GhlError> {
        let lock = self.locks.lock_for(location_id);
        let _guard = lock.lock().await;

        // A failed lookup aborts rather than risk a duplicate menu
        let existing = self.client.existing_menus(location_id, token).await?;
        if entry.is_installed_in(&existing) {
            tracing::info!(location_id, name = %entry.name, "Menu already installed");
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        self.client.create_menu(location_id, token, entry).await?;
        tracing::info!(location_id, name = %entry.name, url = %entry.url, "Menu installed");
        Ok(InstallOutcome::Installed)
    }
}
