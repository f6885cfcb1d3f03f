use crate::auth::{ClientStore, SessionInfo, SessionStore};
use crate::core::types::SessionId;

use super::{error::Error, OAuth2Provider};

impl<C, S> OAuth2Provider<C, S>
where
    C: ClientStore,
    S: SessionStore,
{
    /// Looks up a pending session for the login frontend. Expired sessions
    /// are reported as missing even before the clean-up worker drops them.
    #[tracing::instrument(skip_all)]
    pub async fn get_session_info(&self, id: &SessionId) -> Result<Option<SessionInfo>, Error> {
        let session = self.sessions.get_session(id).await?;
        Ok(session.filter(|s| !s.is_expired()).map(Into::into))
    }
}
