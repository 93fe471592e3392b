use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, read from the environment (and `.env` via `dotenv`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub admin: AdminCredentials,
    pub allowed_origins: AllowedOrigins,
    pub rate_limit_per_minute: u32,
    /// Key rate limits on proxy-supplied client addresses.
    pub trust_proxy_headers: bool,
    pub frontend_dir: PathBuf,
    pub seed_file: PathBuf,
}

/// Credentials accepted by the Basic auth check on mutating routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "*" || raw.is_empty() {
            return AllowedOrigins::Any;
        }
        AllowedOrigins::List(
            raw.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env_or("DATABASE_URL", "sqlite://meapi.db?mode=rwc"),
            port: parse_or("PORT", 8000),
            admin: AdminCredentials {
                username: env_or("ADMIN_USER", "admin"),
                password: env_or("ADMIN_PASS", "change-me"),
            },
            allowed_origins: AllowedOrigins::parse(&env_or("ALLOWED_ORIGINS", "*")),
            rate_limit_per_minute: parse_or("RATE_LIMIT_PER_MINUTE", 60),
            trust_proxy_headers: parse_or("TRUST_PROXY_HEADERS", false),
            frontend_dir: PathBuf::from(env_or("FRONTEND_DIR", "./frontend")),
            seed_file: PathBuf::from(env_or("SEED_FILE", "sample_profile.json")),
        }
    }

    /// Length of one rate-limiting window.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(60)
    }
}

fn env_or(env_var: &str, default: &str) -> String {
    env::var(env_var).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins() {
        assert_eq!(AllowedOrigins::parse("*"), AllowedOrigins::Any);
        assert_eq!(
            AllowedOrigins::parse("https://a.dev, https://b.dev,"),
            AllowedOrigins::List(vec!["https://a.dev".into(), "https://b.dev".into()])
        );
    }
}
