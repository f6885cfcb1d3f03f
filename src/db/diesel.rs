use std::fmt::Debug;

use crate::auth::{ClientStore, SessionStore};
use crate::core::models::{Client, Session};
use crate::core::types::{ClientId, HashedClientSecret, RedirectUri, SessionId};
use crate::provider::error::Error;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{Builder as PoolBuilder, ConnectionManager, Pool, PooledConnection};
use tokio::task::block_in_place;

use super::models;
use super::schema;

diesel_migrations::embed_migrations!("migrations");

pub struct DbStore {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl DbStore {
    pub fn acquire(uri: &str) -> Result<Self, Error> {
        let pool = PoolBuilder::new()
            .max_size(10)
            .build(ConnectionManager::new(uri))?;
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, Error> {
        Ok(self.pool.get()?)
    }

    pub fn migrate(&self) -> Result<(), Error> {
        embedded_migrations::run_with_output(&self.conn()?, &mut std::io::stderr())
            .map_err(|e| Error::Store(format!("migration failed: {}", e)))?;
        tracing::info!("Ran migrations");
        Ok(())
    }
}

impl Debug for DbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbStore").finish()
    }
}

fn to_session(s: models::Session) -> Session {
    Session {
        id: SessionId(s.id),
        client_id: ClientId(s.client_id),
        response_type: s.response_type.and_then(|r| r.parse().ok()),
        redirect_uri: s.redirect_uri.map(RedirectUri),
        state: s.state,
        invalid_after: s.invalid_after.into(),
    }
}

#[async_trait]
impl ClientStore for DbStore {
    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, Error> {
        use schema::clients::dsl::clients;
        use schema::uris::dsl::{self as uris_dsl, uris};

        let conn = self.conn()?;

        let found = block_in_place(|| {
            clients
                .find(&id.0)
                .first::<models::Client>(&conn)
                .optional()
        })?;

        let found = match found {
            Some(c) => c,
            None => return Ok(None),
        };

        let redirect_uris = block_in_place(|| {
            uris.filter(uris_dsl::client_id.eq(&id.0))
                .select(uris_dsl::uri)
                .get_results::<String>(&conn)
        })?;

        Ok(Some(Client {
            id: ClientId(found.client_id),
            secret: found.secret_hash.map(HashedClientSecret),
            redirect_uris: redirect_uris.into_iter().map(RedirectUri).collect(),
        }))
    }
}

#[async_trait]
impl SessionStore for DbStore {
    async fn save_session(&self, session: &Session) -> Result<(), Error> {
        use schema::sessions::dsl::sessions;

        let model = models::Session {
            id: session.id.0.clone(),
            client_id: session.client_id.0.clone(),
            response_type: session.response_type.map(|r| r.as_str().to_string()),
            redirect_uri: session.redirect_uri.as_ref().map(|u| u.0.clone()),
            state: session.state.clone(),
            invalid_after: session.invalid_after.into(),
        };

        let conn = self.conn()?;
        block_in_place(|| diesel::insert_into(sessions).values(model).execute(&conn))?;

        Ok(())
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>, Error> {
        use schema::sessions::dsl::sessions;

        let conn = self.conn()?;
        let found = block_in_place(|| {
            sessions
                .find(&id.0)
                .get_result::<models::Session>(&conn)
                .optional()
        })?;

        Ok(found.map(to_session))
    }

    async fn clean_up(&self) -> Result<(), Error> {
        use crate::core::types::Expiry;
        use schema::sessions::dsl::{self, sessions};
        use std::time::SystemTime;

        let now: i64 = Expiry(SystemTime::now()).into();

        let conn = self.conn()?;
        let deleted = block_in_place(|| {
            diesel::delete(sessions.filter(dsl::invalid_after.le(now))).execute(&conn)
        })?;

        tracing::debug!(deleted, "Cleaned up expired sessions");
        Ok(())
    }
}

/// Client administration, used by `shiori-util`.
impl DbStore {
    pub fn list_clients(&self) -> Result<Vec<(ClientId, String)>, Error> {
        use schema::clients::dsl::{client_id, clients};

        let results = clients
            .order(client_id)
            .get_results::<models::Client>(&self.conn()?)?;

        Ok(results
            .into_iter()
            .map(|c| (ClientId(c.client_id), c.name))
            .collect())
    }

    pub fn put_client(
        &self,
        id: ClientId,
        name: String,
        secret: Option<HashedClientSecret>,
    ) -> Result<(), Error> {
        use schema::clients::dsl::clients;

        let model = models::Client {
            client_id: id.0,
            name,
            secret_hash: secret.map(|s| s.0),
        };

        diesel::insert_into(clients)
            .values(model)
            .execute(&self.conn()?)?;
        Ok(())
    }

    pub fn delete_client(&self, id: &ClientId) -> Result<(), Error> {
        use schema::clients::dsl::clients;

        diesel::delete(clients.find(&id.0)).execute(&self.conn()?)?;
        Ok(())
    }

    pub fn list_client_uris(&self, id: &ClientId) -> Result<Vec<RedirectUri>, Error> {
        use schema::clients::dsl::clients;
        use schema::uris::dsl::{client_id, uri, uris};

        let conn = self.conn()?;

        clients.find(&id.0).first::<models::Client>(&conn)?;

        let results = uris
            .filter(client_id.eq(&id.0))
            .order(uri)
            .get_results::<models::Uri>(&conn)?;

        Ok(results.into_iter().map(|u| RedirectUri(u.uri)).collect())
    }

    pub fn add_client_uri(&self, id: &ClientId, redirect_uri: &RedirectUri) -> Result<(), Error> {
        use schema::uris::dsl::uris;

        let model = models::Uri {
            client_id: id.0.clone(),
            uri: redirect_uri.0.clone(),
        };

        diesel::insert_into(uris).values(model).execute(&self.conn()?)?;
        Ok(())
    }

    pub fn delete_client_uri(&self, id: &ClientId, redirect_uri: &RedirectUri) -> Result<(), Error> {
        use schema::uris::dsl::uris;

        diesel::delete(uris.find((&id.0, &redirect_uri.0))).execute(&self.conn()?)?;
        Ok(())
    }
}
