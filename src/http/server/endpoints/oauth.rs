use std::sync::Arc;

use warp::Filter;

use crate::auth::{AuthorizationRequest, ClientStore, SessionStore};
use crate::http::encoding::{self, reply};
use crate::provider::OAuth2Provider;

pub fn oauth_endpoint<C, S>(
    provider: Arc<OAuth2Provider<C, S>>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
where
    C: ClientStore + 'static,
    S: SessionStore + 'static,
{
    let with_provider = warp::any().map(move || provider.clone());

    // Either a redirect to the login page or a direct error
    let authorize = warp::path("authorize")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_provider)
        .and(encoding::lenient_query::<AuthorizationRequest>())
        .and_then(|provider: Arc<OAuth2Provider<C, S>>, req| async move {
            let result = provider.authorization_request(req).await;
            reply::reply(result)
        });

    warp::path("v1").and(authorize)
}
