use crate::auth::LoginRedirect;
use warp::http::{header, HeaderValue, StatusCode};
use warp::reply::{Reply, Response};

impl Reply for LoginRedirect {
    fn into_response(self) -> Response {
        let location = match HeaderValue::from_str(self.location.as_str()) {
            Ok(v) => v,
            Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        };

        let mut response = Response::new(warp::hyper::Body::empty());
        *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
        response.headers_mut().insert(header::LOCATION, location);
        response
    }
}
