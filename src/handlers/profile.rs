use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AdminUser;
use crate::db::profile as profile_db;
use crate::error::ProfileError;
use crate::models::profiles::ProfileInput;

/// GET /profile: the full profile tree.
pub async fn get_profile(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ProfileError> {
    let profile = profile_db::read_profile(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /profile: create the profile (requires admin credentials).
pub async fn create_profile(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<ProfileInput>,
) -> Result<HttpResponse, ProfileError> {
    let profile = profile_db::create_profile(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// PUT /profile: replace the whole profile (requires admin credentials).
pub async fn replace_profile(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<ProfileInput>,
) -> Result<HttpResponse, ProfileError> {
    let profile = profile_db::replace_profile(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}
