use anyhow::Context;

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
    /// Base URL the SPA is served from, used to build password-reset links.
    pub public_base_url: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub gcs_bucket: Option<String>,
    pub smtp: Option<SmtpConfig>,
    pub font_dir: String,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let smtp = match std::env::var("SMTP_HOST") {
            Ok(host) => Some(SmtpConfig {
                host,
                port: env_or("SMTP_PORT", 587)?,
                username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
                password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
                from: std::env::var("SMTP_FROM").context("SMTP_FROM must be set when SMTP_HOST is")?,
            }),
            Err(_) => None,
        };

        Ok(Self {
            database_url,
            port: env_or("PORT", 8000)?,
            jwt_secret,
            access_token_ttl_minutes: env_or("ACCESS_TOKEN_TTL_MINUTES", 15)?,
            refresh_token_ttl_days: env_or("REFRESH_TOKEN_TTL_DAYS", 14)?,
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            gcs_bucket: std::env::var("GCS_BUCKET_NAME").ok(),
            smtp,
            font_dir: std::env::var("FONT_DIR").unwrap_or_else(|_| "./fonts".to_string()),
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} is not a valid value", key)),
        Err(_) => Ok(default),
    }
}
