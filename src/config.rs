use std::net::SocketAddr;

use anyhow::Context;

use crate::resolver::PinnedPagePolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub first_page_size: u64,
    pub section_concurrency: usize,
    pub pinned_page_policy: PinnedPagePolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://reelshelf.db?mode=rwc".to_string());

        let first_page_size: u64 =
            std::env::var("FIRST_PAGE_SIZE").ok().and_then(|s| s.parse().ok()).unwrap_or(20);

        let section_concurrency: usize =
            std::env::var("SECTION_CONCURRENCY").ok().and_then(|s| s.parse().ok()).unwrap_or(4);

        let pinned_page_policy = match std::env::var("PINNED_PAGE_POLICY") {
            Ok(raw) => raw.parse::<PinnedPagePolicy>().context("PINNED_PAGE_POLICY")?,
            Err(_) => PinnedPagePolicy::default(),
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            first_page_size,
            section_concurrency,
            pinned_page_policy,
        })
    }
}
