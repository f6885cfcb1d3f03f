use crate::{
    auth::{AuthorizationRequest, AuthorizeError, ClientStore, LoginRedirect, SessionStore},
    core::{
        models::{Client, Session},
        types::ResponseType,
    },
    provider::error::ResultExt,
};

use tracing::{event, Level};

use super::OAuth2Provider;

impl<C, S> OAuth2Provider<C, S>
where
    C: ClientStore,
    S: SessionStore,
{
    #[tracing::instrument(skip_all, fields(client_id = ?req.client_id))]
    pub async fn authorization_request(
        &self,
        req: AuthorizationRequest,
    ) -> Result<LoginRedirect, AuthorizeError> {
        let client = self.validate_client(&req).await.map_err(|e| {
            event!(Level::WARN, kind = ?e.kind, "Rejected authorization request");
            e
        })?;

        let response_type = req
            .response_type
            .as_deref()
            .and_then(|r| match r.parse::<ResponseType>() {
                Ok(t) => Some(t),
                Err(e) => {
                    event!(Level::WARN, response_type = ?e.0, "Ignoring unsupported response type");
                    None
                }
            });

        let session = Session::new(client.id, response_type, req.redirect_uri, req.state);
        self.sessions.save_session(&session).await.or_server_error()?;

        let location = session.login_url(&self.login_url);

        event!(
            Level::DEBUG,
            client_id = ?session.client_id,
            session_id = ?session.id,
            "Issuing login session"
        );
        Ok(LoginRedirect { session, location })
    }

    async fn validate_client(&self, req: &AuthorizationRequest) -> Result<Client, AuthorizeError> {
        let client_id = req
            .client_id
            .as_ref()
            .ok_or_else(AuthorizeError::invalid_client_id)?;

        let client = self
            .clients
            .get_client(client_id)
            .await
            .or_server_error()?
            .ok_or_else(AuthorizeError::invalid_client_id)?;

        let supplied = req.client_secret.as_ref().filter(|s| !s.is_empty());
        if let (Some(supplied), Some(secret)) = (supplied, &client.secret) {
            if !self.hasher.verify_blocking(supplied, secret).await.or_server_error()? {
                return Err(AuthorizeError::invalid_client_secret());
            }
        }

        // NOTE: this rejects a redirect uri that IS registered for the client,
        // the opposite of RFC 6749 section 3.1.2.3. Existing clients rely on
        // it, so it stays until they are migrated.
        if let Some(uri) = &req.redirect_uri {
            if client.has_redirect_uri(uri) {
                return Err(AuthorizeError::invalid_redirect_uri());
            }
        }

        Ok(client)
    }
}
