use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::auth::{ClientStore, SessionStore};
use crate::http::server::Server;
use crate::util::hash::HashingService;

pub mod authorization;
pub mod error;
pub mod session;

use error::Error;

const CLEAN_UP_INTERVAL_SECS: u64 = 15;

#[derive(Debug)]
pub struct OAuth2Provider<C, S> {
    clients: C,
    sessions: S,
    hasher: HashingService,
    login_url: Url,
}

impl<C, S> OAuth2Provider<C, S>
where
    C: ClientStore,
    S: SessionStore,
{
    pub fn new(clients: C, sessions: S, hasher: HashingService, login_url: Url) -> Self {
        Self {
            clients,
            sessions,
            hasher,
            login_url,
        }
    }

    pub async fn start_clean_up_worker(&self) {
        use std::time::Duration;
        use tokio::time::interval;

        let mut interval = interval(Duration::from_secs(CLEAN_UP_INTERVAL_SECS));

        loop {
            interval.tick().await;
            if let Err(e) = self.sessions.clean_up().await {
                tracing::warn!(error = %e, "Failed to clean up expired sessions");
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub login_url: Url,
    pub hash_secret: String,
    pub clients_file: Option<PathBuf>,
    #[cfg(feature = "postgres")]
    pub database_url: String,
}

impl Config {
    const DEFAULT_LISTEN_ADDR: &'static str = "0.0.0.0:8001";
    const DEFAULT_LOGIN_URL: &'static str = "http://localhost:8002/login";

    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| Error::Config(format!("Supply {}", name)))
        };

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| Self::DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e| Error::Config(format!("LISTEN_ADDR: {}", e)))?;

        let login_url = lookup("LOGIN_URL").unwrap_or_else(|| Self::DEFAULT_LOGIN_URL.to_string());
        let login_url = Url::parse(&login_url)?;

        Ok(Self {
            listen_addr,
            login_url,
            hash_secret: required("HASH_SECRET")?,
            clients_file: lookup("CLIENTS_FILE").map(PathBuf::from),
            #[cfg(feature = "postgres")]
            database_url: required("DATABASE_URL")?,
        })
    }
}

#[cfg(feature = "postgres")]
async fn acquire_store(config: &Config, _hasher: &HashingService) -> Result<crate::db::diesel::DbStore, Error> {
    let store = crate::db::diesel::DbStore::acquire(&config.database_url)?;
    store.migrate()?;
    Ok(store)
}

#[cfg(not(feature = "postgres"))]
async fn acquire_store(config: &Config, hasher: &HashingService) -> Result<crate::db::memory::MemoryStore, Error> {
    let store = crate::db::memory::MemoryStore::new();
    match &config.clients_file {
        Some(path) => store.load_clients_file(path, hasher).await?,
        None => tracing::warn!("CLIENTS_FILE not set, starting without registered clients"),
    }
    Ok(store)
}

async fn shiorid(config: Config) -> Result<(), Error> {
    let hasher = HashingService::with_secret_key(config.hash_secret.clone());
    let store = Arc::new(acquire_store(&config, &hasher).await?);

    let provider = Arc::new(OAuth2Provider::new(
        Arc::clone(&store),
        store,
        hasher,
        config.login_url.clone(),
    ));

    let _clean_up = {
        let provider = Arc::clone(&provider);
        tokio::spawn(async move { provider.start_clean_up_worker().await })
    };

    tracing::info!(addr = %config.listen_addr, login_url = %config.login_url, "Starting shiorid");
    Server::new(provider).serve(config.listen_addr).await;
    Ok(())
}

pub async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    shiorid(config).await
}
