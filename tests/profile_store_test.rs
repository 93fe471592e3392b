//! Integration tests for profile create / replace / read and the skill dictionary.
//!
//! Each test runs against its own migrated SQLite database: in memory, or a
//! temporary file when transactions must overlap.
//!
//! Run with: `cargo test --test profile_store_test`
mod common;

use common::{
    count_rows, profile_input, sample_document, sample_profile, setup_db, setup_file_db,
};
use meapi::db::begin_read;
use meapi::db::profile::{create_profile, load_profile, read_profile, replace_profile};
use meapi::db::reconcile::reconcile_projects;
use meapi::db::seed::seed_if_empty;
use meapi::db::skills::resolve_skill;
use meapi::error::ProfileError;
use meapi::models::profiles::ProfileOut;
use meapi::models::{
    profile_skills, profiles, project_links, project_skills, projects, skills, work,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde_json::json;

/// Drop the ids of rebuilt children so two reads can be compared structurally.
fn without_child_ids(mut tree: ProfileOut) -> ProfileOut {
    for project in &mut tree.projects {
        project.id = 0;
        for link in &mut project.links {
            link.id = 0;
        }
    }
    for job in &mut tree.work {
        job.id = 0;
    }
    tree
}

async fn skill_rows(db: &sea_orm::DatabaseConnection) -> Vec<skills::Model> {
    skills::Entity::find()
        .order_by_asc(skills::Column::Id)
        .all(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_then_read_returns_the_full_tree() {
    let db = setup_db().await;

    let created = create_profile(&db, sample_profile()).await.unwrap();
    let read = read_profile(&db).await.unwrap();
    assert_eq!(created, read);

    assert_eq!(read.name, "Ada Lovelace");
    assert_eq!(read.email, "ada@example.com");
    assert_eq!(read.skills, vec!["Python", "Rust", "SQL"]);
    assert_eq!(read.links.github.as_deref(), Some("https://github.com/ada"));
    assert_eq!(read.links.linkedin, None);

    assert_eq!(read.projects.len(), 2);
    let engine = &read.projects[0];
    assert_eq!(engine.title, "Engine");
    assert_eq!(engine.skills, vec!["Rust", "WebAssembly"]);
    let labels: Vec<&str> = engine.links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["source", "demo"]);

    // "python" resolves to the "Python" entry created from the profile skills
    assert_eq!(read.projects[1].skills, vec!["Python", "SQL"]);

    assert_eq!(read.work.len(), 2);
    assert_eq!(read.work[0].end_date.as_deref(), Some("2023-06-30"));
    assert_eq!(read.work[1].end_date, None);
    assert_eq!(read.work[1].description, "");

    assert_eq!(count_rows::<skills::Entity>(&db).await, 4);
}

#[tokio::test]
async fn test_read_and_replace_without_profile_are_not_found() {
    let db = setup_db().await;

    assert!(matches!(read_profile(&db).await, Err(ProfileError::NotFound)));
    assert!(matches!(
        replace_profile(&db, sample_profile()).await,
        Err(ProfileError::NotFound)
    ));
    assert_eq!(count_rows::<skills::Entity>(&db).await, 0);
}

#[tokio::test]
async fn test_second_create_fails_with_already_exists() {
    let db = setup_db().await;
    create_profile(&db, sample_profile()).await.unwrap();

    let mut other = sample_document();
    other["email"] = json!("other@example.com");
    let result = create_profile(&db, profile_input(other)).await;

    assert!(matches!(result, Err(ProfileError::AlreadyExists)));
    assert_eq!(count_rows::<profiles::Entity>(&db).await, 1);
    assert_eq!(read_profile(&db).await.unwrap().email, "ada@example.com");
}

#[tokio::test]
async fn test_duplicate_skill_names_collapse_to_one_entry() {
    let db = setup_db().await;

    let input = profile_input(json!({
        "name": "A",
        "email": "a@x.com",
        "education": "",
        "skills": ["Go", "go"],
        "projects": [],
        "work": [],
        "links": {}
    }));
    let tree = create_profile(&db, input).await.unwrap();

    assert_eq!(tree.skills, vec!["Go"]);
    assert_eq!(count_rows::<skills::Entity>(&db).await, 1);
    assert_eq!(count_rows::<profile_skills::Entity>(&db).await, 1);
}

#[tokio::test]
async fn test_resolve_skill_is_case_and_whitespace_insensitive() {
    let db = setup_db().await;

    let first = resolve_skill(&db, " python ").await.unwrap();
    let second = resolve_skill(&db, "PYTHON").await.unwrap();
    let third = resolve_skill(&db, "Python").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.id, third.id);
    assert_eq!(first.name, "python");
    assert_eq!(first.name_key, "python");
    assert_eq!(count_rows::<skills::Entity>(&db).await, 1);
}

#[tokio::test]
async fn test_replace_twice_is_idempotent_and_keeps_skill_ids() {
    let db = setup_db().await;
    create_profile(&db, sample_profile()).await.unwrap();

    let first = replace_profile(&db, sample_profile()).await.unwrap();
    let skills_after_first = skill_rows(&db).await;

    let second = replace_profile(&db, sample_profile()).await.unwrap();
    let skills_after_second = skill_rows(&db).await;

    assert_eq!(without_child_ids(first.clone()), without_child_ids(second.clone()));
    assert_eq!(first.id, second.id);
    assert_eq!(skills_after_first, skills_after_second);

    assert_eq!(count_rows::<projects::Entity>(&db).await, 2);
    assert_eq!(count_rows::<project_links::Entity>(&db).await, 3);
    assert_eq!(count_rows::<project_skills::Entity>(&db).await, 4);
    assert_eq!(count_rows::<work::Entity>(&db).await, 2);
}

#[tokio::test]
async fn test_replace_matches_a_fresh_create_of_the_same_input() {
    let replaced_db = setup_db().await;
    let mut original = sample_document();
    original["projects"][0]["title"] = json!("Old engine");
    create_profile(&replaced_db, profile_input(original)).await.unwrap();
    let replaced = replace_profile(&replaced_db, sample_profile()).await.unwrap();

    let fresh_db = setup_db().await;
    let fresh = create_profile(&fresh_db, sample_profile()).await.unwrap();

    assert_eq!(without_child_ids(replaced), without_child_ids(fresh));
    assert_eq!(
        count_rows::<projects::Entity>(&replaced_db).await,
        count_rows::<projects::Entity>(&fresh_db).await
    );
    assert_eq!(
        count_rows::<project_links::Entity>(&replaced_db).await,
        count_rows::<project_links::Entity>(&fresh_db).await
    );
    assert_eq!(
        count_rows::<project_skills::Entity>(&replaced_db).await,
        count_rows::<project_skills::Entity>(&fresh_db).await
    );
}

#[tokio::test]
async fn test_replace_removes_rows_of_omitted_projects() {
    let db = setup_db().await;
    let created = create_profile(&db, sample_profile()).await.unwrap();
    let dropped_id = created.projects[0].id;

    let mut next = sample_document();
    next["projects"].as_array_mut().unwrap().remove(0);
    next["work"] = json!([]);
    let replaced = replace_profile(&db, profile_input(next)).await.unwrap();

    assert_eq!(replaced.projects.len(), 1);
    assert_eq!(replaced.projects[0].title, "Notes");
    assert!(replaced.work.is_empty());

    let leftover_links = project_links::Entity::find()
        .filter(project_links::Column::ProjectId.eq(dropped_id))
        .all(&db)
        .await
        .unwrap();
    let leftover_tags = project_skills::Entity::find()
        .filter(project_skills::Column::ProjectId.eq(dropped_id))
        .all(&db)
        .await
        .unwrap();
    assert!(leftover_links.is_empty());
    assert!(leftover_tags.is_empty());
    assert_eq!(count_rows::<project_links::Entity>(&db).await, 1);
    assert_eq!(count_rows::<work::Entity>(&db).await, 0);

    // the dictionary keeps entries that are no longer referenced
    assert_eq!(count_rows::<skills::Entity>(&db).await, 4);
}

#[tokio::test]
async fn test_replace_updates_scalar_fields_in_place() {
    let db = setup_db().await;
    let created = create_profile(&db, sample_profile()).await.unwrap();

    let mut next = sample_document();
    next["name"] = json!("Augusta Ada King");
    next["email"] = json!("countess@example.com");
    next["links"] = json!({ "portfolio": "https://ada.example.com" });
    let replaced = replace_profile(&db, profile_input(next)).await.unwrap();

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.name, "Augusta Ada King");
    assert_eq!(replaced.email, "countess@example.com");
    assert_eq!(replaced.links.github, None);
    assert_eq!(replaced.links.portfolio.as_deref(), Some("https://ada.example.com"));
    assert_eq!(count_rows::<profiles::Entity>(&db).await, 1);
}

#[tokio::test]
async fn test_invalid_replace_leaves_state_unchanged() {
    let db = setup_db().await;
    create_profile(&db, sample_profile()).await.unwrap();
    let before = read_profile(&db).await.unwrap();
    let skills_before = skill_rows(&db).await;

    let mut bad = sample_document();
    bad["name"] = json!("Changed");
    bad["skills"] = json!(["Haskell"]);
    bad["projects"].as_array_mut().unwrap().push(json!({
        "title": "",
        "description": "missing a title",
        "skills": ["Erlang"]
    }));

    match replace_profile(&db, profile_input(bad)).await {
        Err(ProfileError::InvalidInput(e)) => assert_eq!(e.field, "projects[2].title"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }

    assert_eq!(read_profile(&db).await.unwrap(), before);
    assert_eq!(skill_rows(&db).await, skills_before);
}

#[tokio::test]
async fn test_invalid_create_writes_nothing() {
    let db = setup_db().await;

    let mut bad = sample_document();
    bad["email"] = json!("not-an-email");
    let result = create_profile(&db, profile_input(bad)).await;

    assert!(matches!(result, Err(ProfileError::InvalidInput(_))));
    assert_eq!(count_rows::<profiles::Entity>(&db).await, 0);
    assert_eq!(count_rows::<skills::Entity>(&db).await, 0);
}

#[tokio::test]
async fn test_uncommitted_reconciliation_is_rolled_back() {
    let db = setup_db().await;
    let created = create_profile(&db, sample_profile()).await.unwrap();
    let before = read_profile(&db).await.unwrap();

    {
        let txn = db.begin().await.unwrap();
        reconcile_projects(&txn, created.id, &[]).await.unwrap();
        // dropped without commit
    }

    assert_eq!(read_profile(&db).await.unwrap(), before);
    assert_eq!(count_rows::<project_links::Entity>(&db).await, 3);
}

async fn assert_one_create_wins(db: &sea_orm::DatabaseConnection) {
    let mut other = sample_document();
    other["email"] = json!("rival@example.com");

    let (a, b) = tokio::join!(
        create_profile(db, sample_profile()),
        create_profile(db, profile_input(other)),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);

    let loser = if a.is_ok() { b } else { a };
    assert!(
        matches!(
            loser,
            Err(ProfileError::AlreadyExists | ProfileError::Conflict)
        ),
        "unexpected loser result: {loser:?}"
    );
    assert_eq!(count_rows::<profiles::Entity>(db).await, 1);
}

#[tokio::test]
async fn test_concurrent_creates_store_exactly_one_profile() {
    let db = setup_db().await;
    assert_one_create_wins(&db).await;
}

#[tokio::test]
async fn test_concurrent_creates_on_a_shared_database_file() {
    for _ in 0..5 {
        let dir = tempfile::tempdir().unwrap();
        let db = setup_file_db(dir.path()).await;
        assert_one_create_wins(&db).await;
        db.close().await.unwrap();
    }
}

#[tokio::test]
async fn test_read_sees_one_snapshot_while_a_replace_commits() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_file_db(dir.path()).await;
    create_profile(&db, sample_profile()).await.unwrap();

    let reader = begin_read(&db).await.unwrap();
    let before = load_profile(&reader).await.unwrap();

    let mut doc = sample_document();
    doc["projects"] = json!([{
        "title": "Replacement",
        "description": "Rebuilt",
        "links": [{ "label": "new", "url": "https://new.example.com" }],
        "skills": ["Haskell"]
    }]);
    let replaced = replace_profile(&db, profile_input(doc)).await.unwrap();
    assert_ne!(replaced, before);

    // the open read still sees the old tree, children included
    assert_eq!(load_profile(&reader).await.unwrap(), before);
    reader.commit().await.unwrap();

    assert_eq!(read_profile(&db).await.unwrap(), replaced);
}

#[tokio::test]
async fn test_seed_creates_profile_only_when_empty() {
    let db = setup_db().await;
    let path = std::env::temp_dir().join(format!("meapi-seed-{}.json", std::process::id()));
    std::fs::write(&path, sample_document().to_string()).unwrap();

    assert!(seed_if_empty(&db, &path).await.unwrap());
    assert_eq!(read_profile(&db).await.unwrap().name, "Ada Lovelace");

    // a second run leaves the stored profile alone
    assert!(!seed_if_empty(&db, &path).await.unwrap());
    assert_eq!(count_rows::<profiles::Entity>(&db).await, 1);

    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_seed_without_file_is_a_no_op() {
    let db = setup_db().await;
    let path = std::env::temp_dir().join("meapi-seed-does-not-exist.json");

    assert!(!seed_if_empty(&db, &path).await.unwrap());
    assert_eq!(count_rows::<profiles::Entity>(&db).await, 0);
}
