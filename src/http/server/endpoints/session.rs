use std::sync::Arc;

use warp::Filter;

use crate::auth::{ClientStore, SessionStore};
use crate::core::types::SessionId;
use crate::http::encoding::{error::AuthRejection, reply};
use crate::provider::OAuth2Provider;

pub fn session_endpoint<C, S>(
    provider: Arc<OAuth2Provider<C, S>>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
where
    C: ClientStore + 'static,
    S: SessionStore + 'static,
{
    let with_provider = warp::any().map(move || provider.clone());

    let info = warp::path!("info" / SessionId)
        .and(warp::get())
        .and(with_provider)
        .and_then(|id: SessionId, provider: Arc<OAuth2Provider<C, S>>| async move {
            let result = provider
                .get_session_info(&id)
                .await
                .map_err(AuthRejection::from)
                .and_then(|info| info.ok_or(AuthRejection::NotFound));
            reply::json_encode(result)
        });

    warp::path("v1").and(info)
}
