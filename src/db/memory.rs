use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::{ClientStore, SessionStore};
use crate::core::models::{Client, Session};
use crate::core::types::{ClientId, ClientSecret, RedirectUri, SessionId};
use crate::provider::error::Error;
use crate::util::hash::HashingService;

/// Client registration as written in a clients file. Secrets are plain text
/// on disk and hashed when loaded.
#[derive(Debug)]
#[derive(serde::Deserialize)]
pub struct ClientRecord {
    pub client_id: String,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    clients: RwLock<HashMap<ClientId, Client>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_client(&self, client: Client) {
        self.clients.write().await.insert(client.id.clone(), client);
    }

    pub async fn load_clients(
        &self,
        records: Vec<ClientRecord>,
        hasher: &HashingService,
    ) -> Result<(), Error> {
        for record in records {
            let secret = record
                .secret
                .filter(|s| !s.is_empty())
                .map(|s| hasher.hash(&ClientSecret(s)))
                .transpose()?;
            self.put_client(Client {
                id: ClientId(record.client_id),
                secret,
                redirect_uris: record.redirect_uris.into_iter().map(RedirectUri).collect(),
            })
            .await;
        }
        Ok(())
    }

    pub async fn load_clients_file(
        &self,
        path: &Path,
        hasher: &HashingService,
    ) -> Result<(), Error> {
        let contents = std::fs::read_to_string(path)?;
        let records: Vec<ClientRecord> = serde_json::from_str(&contents)?;
        let count = records.len();
        self.load_clients(records, hasher).await?;
        tracing::info!(count, path = %path.display(), "Loaded clients");
        Ok(())
    }

    /// Snapshot of every stored session, expired ones included.
    pub async fn sessions(&self) -> Vec<Session> {
        self.sessions.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>, Error> {
        Ok(self.clients.read().await.get(client_id).cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn save_session(&self, session: &Session) -> Result<(), Error> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>, Error> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn clean_up(&self) -> Result<(), Error> {
        self.sessions.write().await.retain(|_, s| !s.is_expired());
        Ok(())
    }
}
