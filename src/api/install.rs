use actix_web::{get, http::header, web, HttpResponse};
use serde::Deserialize;

use crate::api::{missing, present};
use crate::errors::{AppError, AppResult};
use crate::state::RqAppState;

#[derive(Debug, Deserialize)]
pub struct InstallQuery {
    pub access_token: Option<String>,
    pub location_id: Option<String>,
}

/// Landing route after the app is installed in a location: forwards the
/// location and token to the blog selector page.
#[get("/install")]
pub async fn install_redirect(
    state: RqAppState,
    query: web::Query<InstallQuery>,
) -> AppResult<HttpResponse> {
    let absent = missing(&[
        ("access_token", &query.access_token),
        ("location_id", &query.location_id),
    ]);
    if !absent.is_empty() {
        return Err(AppError::missing_parameters(&absent));
    }

    let mut target = state.config.selector_url.clone().ok_or_else(|| {
        AppError::ConfigurationError("GHLFEED_SELECTOR_URL is not set".to_string())
    })?;
    target
        .query_pairs_mut()
        .append_pair("location_id", present(&query.location_id).unwrap_or_default())
        .append_pair("access_token", present(&query.access_token).unwrap_or_default());

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, target.as_str()))
        .finish())
}
