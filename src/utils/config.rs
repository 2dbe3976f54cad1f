use dotenv::dotenv;
use std::env;

const DEV_JWT_SECRET: &str = "skybook-dev-secret";

/// Runtime configuration, collected once at startup. `DATABASE_URL`
/// selects the MySQL backend; without it the in-memory stores are used
/// and a demo catalog is seeded.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            database_url: env::var("DATABASE_URL").ok(),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            token_ttl_hours: env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(24),
        }
    }
}
