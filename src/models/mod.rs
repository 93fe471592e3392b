pub mod profile_skills;
pub mod profiles;
pub mod project_links;
pub mod project_skills;
pub mod projects;
pub mod skills;
pub mod work;

use serde::Deserialize;

/// A field of a profile document that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub(crate) fn check_required(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    check_len(field, value.trim(), max)
}

pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

pub(crate) fn check_optional_len(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => check_len(field, v.trim(), max),
        None => Ok(()),
    }
}

/// Structural email check: one `@`, a non-empty local part and a dotted domain.
pub(crate) fn check_email(field: &str, value: &str) -> Result<(), ValidationError> {
    let email = value.trim();
    check_required(field, email, 255)?;

    let invalid = || ValidationError::new(field, "is not a valid email address");
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

// ── Query strings ──

const MAX_LIMIT: u64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListQuery {
    pub skill: Option<String>,
    pub q: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ProjectListQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(MAX_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopSkillsQuery {
    pub limit: Option<u64>,
}

impl TopSkillsQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(5).min(MAX_LIMIT)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SearchQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(MAX_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(check_email("email", "a@x.com").is_ok());
        assert!(check_email("email", "  first.last@sub.example.org ").is_ok());
        assert!(check_email("email", "no-at-sign.com").is_err());
        assert!(check_email("email", "@x.com").is_err());
        assert!(check_email("email", "a@localhost").is_err());
        assert!(check_email("email", "a@@x.com").is_err());
        assert!(check_email("email", "a b@x.com").is_err());
        assert!(check_email("email", "a@x..com").is_err());
    }

    #[test]
    fn test_required_rejects_blank_and_long_values() {
        assert!(check_required("name", "Ada", 120).is_ok());
        let err = check_required("name", "   ", 120).unwrap_err();
        assert_eq!(err.field, "name");
        assert!(check_required("title", &"x".repeat(201), 200).is_err());
        assert!(check_required("title", &"x".repeat(200), 200).is_ok());
    }

    #[test]
    fn test_limits_are_capped() {
        let query = ProjectListQuery {
            limit: Some(1000),
            ..Default::default()
        };
        assert_eq!(query.limit(), 100);
        assert_eq!(query.offset(), 0);
        assert_eq!(TopSkillsQuery::default().limit(), 5);
    }
}
