use sea_orm::sea_query::{Expr, Func, OnConflict, SimpleExpr};
use sea_orm::*;
use std::collections::HashMap;

use super::contains_pattern;
use crate::models::project_skills;
use crate::models::skills::{self, SkillUsage, SkillUsageRow};

/// Dictionary key for a skill name: trimmed, then lowercased with Unicode rules.
/// Two names are the same skill exactly when their keys are equal.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Return the dictionary row for `name`, inserting it if no row with the same
/// key exists. The first spelling to be inserted is the one kept.
///
/// A concurrent insert of the same key is absorbed by `ON CONFLICT DO NOTHING`
/// on the unique `name_key` index, followed by a re-read.
pub async fn resolve_skill<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<skills::Model, DbErr> {
    let name = name.trim();
    let key = fold_name(name);

    if let Some(existing) = find_by_key(conn, &key).await? {
        return Ok(existing);
    }

    let new_skill = skills::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        name_key: Set(key.clone()),
        level: Set(None),
    };

    skills::Entity::insert(new_skill)
        .on_conflict(
            OnConflict::column(skills::Column::NameKey)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_key(conn, &key)
        .await?
        .ok_or(DbErr::RecordNotFound(format!("Skill {name} not found after insert")))
}

/// Look up a skill by its folded key.
pub async fn find_by_key<C: ConnectionTrait>(
    conn: &C,
    key: &str,
) -> Result<Option<skills::Model>, DbErr> {
    skills::Entity::find()
        .filter(skills::Column::NameKey.eq(key))
        .one(conn)
        .await
}

/// Fetch many skills in one query and return an id -> skill map.
pub async fn get_skills_by_ids<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, skills::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = skills::Entity::find()
        .filter(skills::Column::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(rows.into_iter().map(|s| (s.id, s)).collect())
}

/// Rank every dictionary skill by the number of projects referencing it.
///
/// Skills with no project references are included with a count of 0. Ties are
/// broken by the folded name, ascending, so ordering does not depend on the
/// database collation.
pub async fn top_skills<C: ConnectionTrait>(
    conn: &C,
    limit: u64,
) -> Result<Vec<SkillUsage>, DbErr> {
    let mut rows = skills::Entity::find()
        .select_only()
        .column(skills::Column::Name)
        .column(skills::Column::NameKey)
        .column_as(
            SimpleExpr::from(Func::count(Expr::col((
                project_skills::Entity,
                project_skills::Column::ProjectId,
            )))),
            "count",
        )
        .join(JoinType::LeftJoin, skills::Relation::ProjectSkills.def())
        .group_by(skills::Column::Id)
        .group_by(skills::Column::Name)
        .group_by(skills::Column::NameKey)
        .into_model::<SkillUsageRow>()
        .all(conn)
        .await?;

    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name_key.cmp(&b.name_key))
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(rows
        .into_iter()
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .map(|row| SkillUsage {
            skill: row.name,
            count: row.count,
        })
        .collect())
}

/// Skill names containing `query` (case-insensitive), ordered by folded name.
pub async fn search_skill_names<C: ConnectionTrait>(
    conn: &C,
    query: &str,
    limit: u64,
    offset: u64,
) -> Result<Vec<String>, DbErr> {
    skills::Entity::find()
        .select_only()
        .column(skills::Column::Name)
        .filter(skills::Column::NameKey.like(contains_pattern(query)))
        .order_by_asc(skills::Column::NameKey)
        .limit(limit)
        .offset(offset)
        .into_tuple::<String>()
        .all(conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_name_ignores_case_and_surrounding_whitespace() {
        assert_eq!(fold_name("Python"), "python");
        assert_eq!(fold_name(" python "), "python");
        assert_eq!(fold_name("PYTHON"), "python");
        assert_eq!(fold_name("\tÉlixir\n"), "élixir");
        assert_ne!(fold_name("C"), fold_name("C#"));
    }

    #[test]
    fn test_folded_key_of_longest_name_fits_key_column() {
        let name = "İ".repeat(skills::NAME_MAX_LEN);
        let key = fold_name(&name);
        assert_eq!(key.chars().count(), 2 * skills::NAME_MAX_LEN);
        assert!(key.chars().count() <= skills::NAME_KEY_MAX_LEN);
    }
}
