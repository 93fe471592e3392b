use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::db::skills as skill_db;
use crate::error::ProfileError;
use crate::models::TopSkillsQuery;

/// GET /skills/top?limit=: skills ranked by how many projects use them.
pub async fn top_skills(
    db: web::Data<DatabaseConnection>,
    query: web::Query<TopSkillsQuery>,
) -> Result<HttpResponse, ProfileError> {
    let ranking = skill_db::top_skills(db.get_ref(), query.limit()).await?;
    Ok(HttpResponse::Ok().json(ranking))
}
