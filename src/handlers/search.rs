use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::db::begin_read;
use crate::db::projects as project_db;
use crate::db::skills as skill_db;
use crate::error::ProfileError;
use crate::models::SearchQuery;
use crate::models::projects::ProjectOut;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub projects: Vec<ProjectOut>,
    pub skills: Vec<String>,
}

/// GET /search?q=&limit=&offset=
///
/// Projects and skills matching `q` are paginated independently with the same
/// limit and offset.
pub async fn search(
    db: web::Data<DatabaseConnection>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ProfileError> {
    let (limit, offset) = (query.limit(), query.offset());

    let txn = begin_read(db.get_ref()).await?;
    let projects = project_db::list_projects(&txn, None, Some(&query.q), limit, offset).await?;
    let skills = skill_db::search_skill_names(&txn, &query.q, limit, offset).await?;
    txn.commit().await?;

    Ok(HttpResponse::Ok().json(SearchResults { projects, skills }))
}
