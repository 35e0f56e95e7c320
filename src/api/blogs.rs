use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::api::{missing, present};
use crate::errors::{AppError, AppResult};
use crate::ghl::AccessToken;
use crate::state::RqAppState;

#[derive(Debug, Deserialize)]
pub struct BlogsQuery {
    pub location_id: Option<String>,
    pub access_token: Option<String>,
}

/// Lists the location's blogs so the selector page can offer them.
#[get("/blogs")]
pub async fn list_blogs(
    state: RqAppState,
    query: web::Query<BlogsQuery>,
) -> AppResult<HttpResponse> {
    let absent = missing(&[
        ("location_id", &query.location_id),
        ("access_token", &query.access_token),
    ]);
    if !absent.is_empty() {
        return Err(AppError::missing_parameters(&absent));
    }
    let location_id = present(&query.location_id).unwrap_or_default();
    let token = AccessToken::new(present(&query.access_token).unwrap_or_default());

    let blogs = state.ghl.list_blogs(location_id, &token).await?;
    Ok(HttpResponse::Ok().json(json!({ "blogs": blogs })))
}
