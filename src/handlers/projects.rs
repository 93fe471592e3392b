use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::db::begin_read;
use crate::db::projects as project_db;
use crate::error::ProfileError;
use crate::models::ProjectListQuery;

/// GET /projects?skill=&q=&limit=&offset=
pub async fn list_projects(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectListQuery>,
) -> Result<HttpResponse, ProfileError> {
    let txn = begin_read(db.get_ref()).await?;
    let projects = project_db::list_projects(
        &txn,
        query.skill.as_deref(),
        query.q.as_deref(),
        query.limit(),
        query.offset(),
    )
    .await?;
    txn.commit().await?;

    Ok(HttpResponse::Ok().json(projects))
}
