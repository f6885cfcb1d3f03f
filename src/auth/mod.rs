use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::core::models::{Client, Session};
use crate::core::types::{ClientId, ClientSecret, RedirectUri, ResponseType, SessionId};
use crate::provider::error::Error;

pub mod error;

pub use error::*;

/// Query parameters of an authorization request.
///
/// Every field is optional here; what is missing or malformed is decided
/// by the provider, not the extractor.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize)]
pub struct AuthorizationRequest {
    pub client_id: Option<ClientId>,
    pub client_secret: Option<ClientSecret>,
    pub redirect_uri: Option<RedirectUri>,
    pub response_type: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug)]
pub struct LoginRedirect {
    pub session: Session,
    pub location: Url,
}

#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub client_id: ClientId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<RedirectUri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl From<Session> for SessionInfo {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            client_id: session.client_id,
            response_type: session.response_type,
            redirect_uri: session.redirect_uri,
            state: session.state,
        }
    }
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>, Error>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save_session(&self, session: &Session) -> Result<(), Error>;
    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>, Error>;
    /// Drops every session whose expiry has passed.
    async fn clean_up(&self) -> Result<(), Error>;
}

#[async_trait]
impl<T: ClientStore + ?Sized> ClientStore for Arc<T> {
    async fn get_client(&self, client_id: &ClientId) -> Result<Option<Client>, Error> {
        (**self).get_client(client_id).await
    }
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn save_session(&self, session: &Session) -> Result<(), Error> {
        (**self).save_session(session).await
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>, Error> {
        (**self).get_session(id).await
    }

    async fn clean_up(&self) -> Result<(), Error> {
        (**self).clean_up().await
    }
}
