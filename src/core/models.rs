use url::Url;

use super::types::*;
use crate::util::random::FromRandom;

#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    pub secret: Option<HashedClientSecret>,
    pub redirect_uris: Vec<RedirectUri>,
}

impl Client {
    pub fn has_redirect_uri(&self, uri: &RedirectUri) -> bool {
        self.redirect_uris.iter().any(|u| u == uri)
    }
}

/// An authorization request waiting on the user to log in.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub client_id: ClientId,
    pub response_type: Option<ResponseType>,
    pub redirect_uri: Option<RedirectUri>,
    pub state: Option<String>,
    pub invalid_after: Expiry,
}

impl Expire for Session {
    const EXPIRES_IN_SECS: u64 = 5 * 60;
}

impl Session {
    pub fn new(
        client_id: ClientId,
        response_type: Option<ResponseType>,
        redirect_uri: Option<RedirectUri>,
        state: Option<String>,
    ) -> Self {
        Self {
            id: SessionId::from_random(),
            client_id,
            response_type,
            redirect_uri,
            state,
            invalid_after: Self::expiry(),
        }
    }

    /// The login page URL for this session, `base` with `session_id` appended.
    pub fn login_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut().append_pair("session_id", &self.id.0);
        url
    }

    pub fn is_expired(&self) -> bool {
        self.invalid_after.has_passed()
    }
}
