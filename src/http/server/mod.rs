use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use crate::auth::{ClientStore, SessionStore};
use crate::provider::OAuth2Provider;

mod endpoints;

use endpoints::{oauth::oauth_endpoint, session::session_endpoint};

use super::encoding::error::handle_reject;

#[derive(Debug)]
pub struct Server<C, S> {
    provider: Arc<OAuth2Provider<C, S>>,
}

impl<C, S> Server<C, S>
where
    C: ClientStore + 'static,
    S: SessionStore + 'static,
{
    pub fn new(provider: Arc<OAuth2Provider<C, S>>) -> Self {
        Self { provider }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let provider = Arc::clone(&self.provider);

        let oauth = warp::path("oauth").and(oauth_endpoint(provider.clone()));

        let session = warp::path("session").and(session_endpoint(provider));

        let cors = warp::cors().allow_any_origin().allow_method("GET");

        oauth
            .or(session)
            .recover(handle_reject)
            .with(warp::log("http-api"))
            .with(cors)
    }

    pub async fn serve(self, addr: SocketAddr) {
        warp::serve(self.routes()).run(addr).await;
    }
}
