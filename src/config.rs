use anyhow::Context;
use serde::Deserialize;

const DEFAULT_JWT_SECRET: &str = "secret-key";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Credentials used by the `seed` binary to create the first administrator.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub date_of_birth: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub admin: AdminSeed,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using the built-in development secret");
            DEFAULT_JWT_SECRET.into()
        });
        let jwt = JwtConfig {
            secret,
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
        };

        let admin = AdminSeed {
            email: std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin1234?".into()),
            full_name: std::env::var("ADMIN_FULL_NAME").unwrap_or_else(|_| "Administrator".into()),
            date_of_birth: std::env::var("ADMIN_DATE_OF_BIRTH")
                .unwrap_or_else(|_| "1995-07-30".into()),
        };

        Ok(Self {
            database_url,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .or_else(|_| std::env::var("APP_PORT"))
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(3000),
            jwt,
            admin,
        })
    }

    /// Configuration for tests: no database URL, caller-chosen signing secret.
    pub fn for_tests(secret: &str) -> Self {
        Self {
            database_url: String::new(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt: JwtConfig {
                secret: secret.into(),
                ttl_minutes: 60 * 24,
            },
            admin: AdminSeed {
                email: "admin@example.com".into(),
                password: "admin1234?".into(),
                full_name: "Administrator".into(),
                date_of_birth: "1995-07-30".into(),
            },
        }
    }
}
