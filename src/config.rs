use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub max_page_limit: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "4040".to_string()).parse().context("PORT")?;

        let database_url = database_url(|key| std::env::var(key).ok());

        let max_page_limit: u64 =
            std::env::var("MAX_PAGE_LIMIT").ok().and_then(|s| s.parse().ok()).unwrap_or(100);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            max_page_limit,
        })
    }
}

/// `DATABASE_URL` wins; otherwise a MySQL URL is assembled from the
/// `DB_*` variables when `DB_HOST` is set, falling back to a local SQLite file.
fn database_url(var: impl Fn(&str) -> Option<String>) -> String {
    if let Some(url) = var("DATABASE_URL") {
        return url;
    }

    let Some(host) = var("DB_HOST") else {
        return "sqlite://movies.db?mode=rwc".to_string();
    };
    let port = var("DB_PORT").unwrap_or_else(|| "3306".to_string());
    let user = var("DB_USER").unwrap_or_else(|| "root".to_string());
    let pass = var("DB_PASS").unwrap_or_default();
    let name = var("DB_NAME").unwrap_or_else(|| "movies_collection".to_string());

    let credentials = if pass.is_empty() {
        urlencoding::encode(&user).into_owned()
    } else {
        format!("{}:{}", urlencoding::encode(&user), urlencoding::encode(&pass))
    };

    format!("mysql://{credentials}@{host}:{port}/{name}")
}
