use actix_web::{post, web, HttpResponse};

use super::types::{InstallMenuRequest, StatusResponse};
use crate::errors::AppResult;
use crate::state::RqAppState;

/// Adds a custom menu link to a location unless one with the same name or
/// url already exists.
#[post("/install-menu")]
pub async fn install_menu(
    state: RqAppState,
    req: web::Json<InstallMenuRequest>,
) -> AppResult<HttpResponse> {
    let install = req.validate()?;

    let outcome = state
        .menu_installer
        .install(&install.location_id, &install.token, &install.entry)
        .await?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok(outcome.message())))
}
