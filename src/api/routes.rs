use super::{blogs, health, install, menus, publish, settings};
use actix_web::{error, web, HttpResponse};
use serde_json::json;

/// Registers every route on an app or test service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::routes())
        .service(menus::handlers::install_menu)
        .service(settings::handlers::get_settings)
        .service(settings::handlers::save_settings)
        .service(publish::publish_from_rss)
        .service(blogs::list_blogs)
        .service(install::install_redirect);
}

/// Malformed JSON bodies get the same `{status, message}` shape as every
/// other client error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        tracing::info!(error = %message, "Rejected request body");
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": message
            })),
        )
        .into()
    })
}
