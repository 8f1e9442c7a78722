use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// PostgreSQL connection string. Without it the API runs on the in-memory store.
    pub database_url: Option<String>,
    pub port: u16,
    /// HMAC secret for signing access tokens
    pub token_secret: String,
    pub token_ttl_minutes: i64,
    /// Sustained requests per second allowed on the authentication routes (0 disables)
    pub auth_rate_limit_per_second: u64,
    pub auth_rate_limit_burst: u32,
    /// Apply the bundled schema on startup
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            port: parse_var("PORT", 8080),
            token_secret: env::var("TOKEN_SECRET")
                .unwrap_or_else(|_| "dev-secret-not-for-production".to_string()),
            token_ttl_minutes: parse_var("TOKEN_TTL_MINUTES", 60),
            auth_rate_limit_per_second: parse_var("AUTH_RATE_LIMIT_PER_SECOND", 2),
            auth_rate_limit_burst: parse_var("AUTH_RATE_LIMIT_BURST", 5),
            run_migrations: parse_var("RUN_MIGRATIONS", true),
        }
    }

    /// Check if the authentication routes should be rate limited
    pub fn auth_rate_limit_enabled(&self) -> bool {
        self.auth_rate_limit_per_second > 0 && self.auth_rate_limit_burst > 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            port: 8080,
            token_secret: "dev-secret-not-for-production".to_string(),
            token_ttl_minutes: 60,
            auth_rate_limit_per_second: 0,
            auth_rate_limit_burst: 0,
            run_migrations: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_disables_rate_limit() {
        let config = Config::default();
        assert!(!config.auth_rate_limit_enabled());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn rate_limit_needs_rate_and_burst() {
        let config = Config {
            auth_rate_limit_per_second: 2,
            auth_rate_limit_burst: 0,
            ..Config::default()
        };
        assert!(!config.auth_rate_limit_enabled());

        let config = Config {
            auth_rate_limit_per_second: 2,
            auth_rate_limit_burst: 5,
            ..Config::default()
        };
        assert!(config.auth_rate_limit_enabled());
    }

    #[test]
    fn parse_var_falls_back_on_missing() {
        let value: u16 = parse_var("ELIXIR_TEST_SURELY_UNSET_VAR", 1234);
        assert_eq!(value, 1234);
    }
}
