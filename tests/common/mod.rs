#![allow(dead_code)]

use meapi::create_pool;
use meapi::models::profiles::ProfileInput;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::json;

/// A fresh, migrated in-memory SQLite database.
///
/// A single pooled connection keeps the in-memory database alive for the
/// whole test and serializes transactions the way one writer would.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// A SQLite database file under `dir`, opened the way the server opens it:
/// a pool of several connections, so transactions really run side by side.
pub async fn setup_file_db(dir: &std::path::Path) -> DatabaseConnection {
    let url = format!("sqlite://{}?mode=rwc", dir.join("meapi.db").display());
    create_pool(&url).await.expect("Failed to open database file")
}

pub fn profile_input(value: serde_json::Value) -> ProfileInput {
    serde_json::from_value(value).expect("Test document should deserialize")
}

/// A profile with two projects, shared skills and two jobs.
pub fn sample_document() -> serde_json::Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "education": "B.Sc. Mathematics",
        "skills": ["Rust", "Python", "SQL"],
        "projects": [
            {
                "title": "Engine",
                "description": "An analytical engine emulator written in Rust",
                "links": [
                    { "label": "source", "url": "https://git.example.com/engine" },
                    { "label": "demo", "url": "https://engine.example.com" }
                ],
                "skills": ["Rust", "WebAssembly"]
            },
            {
                "title": "Notes",
                "description": "Annotated translations",
                "links": [{ "label": "site", "url": "https://notes.example.com" }],
                "skills": ["python", "SQL"]
            }
        ],
        "work": [
            {
                "company": "Difference Co",
                "title": "Engineer",
                "start_date": "2021-01-01",
                "end_date": "2023-06-30",
                "description": "Built things"
            },
            {
                "company": "Analytical Ltd",
                "title": "Lead",
                "start_date": "2023-07-01"
            }
        ],
        "links": { "github": "https://github.com/ada", "linkedin": "", "portfolio": null }
    })
}

pub fn sample_profile() -> ProfileInput {
    profile_input(sample_document())
}

pub async fn count_rows<E: EntityTrait>(db: &DatabaseConnection) -> u64
where
    E::Model: Send + Sync + 'static,
{
    E::find().count(db).await.expect("count query")
}
