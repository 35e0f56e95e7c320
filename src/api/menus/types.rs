use serde::{Deserialize, Serialize};

use crate::api::{missing, present};
use crate::errors::{AppError, AppResult};
use crate::ghl::{AccessToken, MenuEntry};

#[derive(Debug, Deserialize)]
pub struct InstallMenuRequest {
    pub location_id: Option<String>,
    pub access_token: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Validated install request.
#[derive(Debug)]
pub struct MenuInstall {
    pub location_id: String,
    pub token: AccessToken,
    pub entry: MenuEntry,
}

impl InstallMenuRequest {
    /// All four fields are required; fails before any network call.
    pub fn validate(&self) -> AppResult<MenuInstall> {
        let absent = missing(&[
            ("location_id", &self.location_id),
            ("access_token", &self.access_token),
            ("name", &self.name),
            ("url", &self.url),
        ]);
        if !absent.is_empty() {
            return Err(AppError::missing_parameters(&absent));
        }

        let field = |v: &Option<String>| present(v).unwrap_or_default().to_string();
        // Menu fields are compared and posted exactly as sent
        let raw = |v: &Option<String>| v.clone().unwrap_or_default();
        Ok(MenuInstall {
            location_id: field(&self.location_id),
            token: AccessToken::new(field(&self.access_token)),
            entry: MenuEntry {
                name: raw(&self.name),
                url: raw(&self.url),
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            status: "ok",
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(location: &str, token: &str, name: &str, url: &str) -> InstallMenuRequest {
        let opt = |v: &str| if v.is_empty() { None } else { Some(v.to_string()) };
        InstallMenuRequest {
            location_id: opt(location),
            access_token: opt(token),
            name: opt(name),
            url: opt(url),
        }
    }

    #[test]
    fn test_complete_request_validates() {
        let install = request("loc-1", "tok", "Blog Selector", "https://x.example/s")
            .validate()
            .unwrap();
        assert_eq!(install.location_id, "loc-1");
        assert_eq!(install.token.as_str(), "tok");
        assert_eq!(install.entry.name, "Blog Selector");
    }

    #[test]
    fn test_menu_fields_are_not_trimmed() {
        let install = request("loc-1", "tok", " Blog Selector", "https://x.example/s ")
            .validate()
            .unwrap();
        assert_eq!(install.entry.name, " Blog Selector");
        assert_eq!(install.entry.url, "https://x.example/s ");
        assert!(!install.entry.is_installed_in(&[crate::ghl::menus::ExistingMenu {
            name: Some("Blog Selector".to_string()),
            url: Some("https://x.example/s".to_string()),
        }]));
    }

    #[test]
    fn test_blank_menu_name_rejected() {
        let err = request("loc-1", "tok", "   ", "https://x.example/s")
            .validate()
            .unwrap_err();
        match err {
            AppError::InvalidInput { field, .. } => assert_eq!(field, "name"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = request("loc-1", "", "Blog Selector", "").validate().unwrap_err();
        match err {
            AppError::InvalidInput { field, .. } => assert_eq!(field, "access_token, url"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }
}
