pub mod health;
pub mod profile;
pub mod projects;
pub mod search;
pub mod skills;

use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and query strings answer with the same `{"error": ...}` shape.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid profile document: {err}");
        InternalError::from_response(
            err,
            HttpResponse::UnprocessableEntity().json(serde_json::json!({ "error": message })),
        )
        .into()
    }));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid query parameters: {err}");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        )
        .into()
    }));

    cfg.service(web::resource("/health").route(web::get().to(health::health)));

    // ── Profile routes (writes require admin Basic auth) ──
    cfg.service(
        web::resource("/profile")
            .route(web::get().to(profile::get_profile))
            .route(web::post().to(profile::create_profile))
            .route(web::put().to(profile::replace_profile)),
    );

    // ── Read-only query routes ──
    cfg.service(web::resource("/projects").route(web::get().to(projects::list_projects)));
    cfg.service(web::resource("/skills/top").route(web::get().to(skills::top_skills)));
    cfg.service(web::resource("/search").route(web::get().to(search::search)));
}
