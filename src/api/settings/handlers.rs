use actix_web::{get, post, web, HttpResponse};

use super::types::{SettingsQuery, SettingsResponse, SettingsSaved, SettingsUpdate};
use crate::api::{missing, present};
use crate::db::RqDbPool;
use crate::errors::{AppError, AppResult};
use crate::models::location_setting::LocationSetting;

#[get("/settings")]
pub async fn get_settings(
    pool: RqDbPool,
    query: web::Query<SettingsQuery>,
) -> AppResult<HttpResponse> {
    let location_id = present(&query.location_id)
        .ok_or_else(|| AppError::missing_parameters(&["location_id"]))?;

    let mut conn = pool.get()?;
    let setting = LocationSetting::get(&mut conn, location_id)?;

    Ok(HttpResponse::Ok().json(SettingsResponse {
        location_id: location_id.to_string(),
        blog_id: setting.map(|s| s.blog_id),
    }))
}

#[post("/settings")]
pub async fn save_settings(
    pool: RqDbPool,
    update: web::Json<SettingsUpdate>,
) -> AppResult<HttpResponse> {
    let absent = missing(&[
        ("location_id", &update.location_id),
        ("blog_id", &update.blog_id),
    ]);
    if !absent.is_empty() {
        return Err(AppError::missing_parameters(&absent));
    }
    let location_id = present(&update.location_id).unwrap_or_default();
    let blog_id = present(&update.blog_id).unwrap_or_default();

    let mut conn = pool.get()?;
    let saved = LocationSetting::upsert(&mut conn, location_id, blog_id)?;
    tracing::info!(location_id, blog_id, "Blog selection saved");

    Ok(HttpResponse::Ok().json(SettingsSaved {
        status: "ok",
        location_id: saved.location_id,
        blog_id: saved.blog_id,
    }))
}
