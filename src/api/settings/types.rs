use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SettingsQuery {
    pub location_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettingsUpdate {
    pub location_id: Option<String>,
    pub blog_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub location_id: String,
    pub blog_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingsSaved {
    pub status: &'static str,
    pub location_id: String,
    pub blog_id: String,
}
