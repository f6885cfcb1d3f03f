use crate::auth::{AuthorizeError, AuthorizeErrorKind};
use crate::provider::error::Error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

#[derive(Debug, Clone)]
pub enum AuthRejection {
    Authorize(AuthorizeError),
    NotFound,
}

impl warp::reject::Reject for AuthRejection {}

impl From<AuthorizeError> for AuthRejection {
    fn from(error: AuthorizeError) -> Self {
        Self::Authorize(error)
    }
}

impl From<Error> for AuthRejection {
    fn from(error: Error) -> Self {
        tracing::error!(error = %error, "Internal failure while handling request");
        Self::Authorize(AuthorizeError::server_error(error.to_string()))
    }
}

pub fn status(kind: AuthorizeErrorKind) -> StatusCode {
    match kind {
        AuthorizeErrorKind::InvalidClient | AuthorizeErrorKind::InvalidGrant => {
            StatusCode::UNAUTHORIZED
        }
        AuthorizeErrorKind::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn handle_reject(err: Rejection) -> Result<impl Reply, Rejection> {
    match err.find::<AuthRejection>() {
        Some(AuthRejection::Authorize(e)) => {
            let resp = warp::reply::json(e);
            Ok(warp::reply::with_status(resp, status(e.kind)).into_response())
        }
        Some(AuthRejection::NotFound) => {
            Ok(warp::reply::with_status(warp::reply(), StatusCode::NOT_FOUND).into_response())
        }
        None => Err(err),
    }
}
