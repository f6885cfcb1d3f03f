pub mod error;
pub mod reply;

use serde::de::DeserializeOwned;
use warp::{Filter, Rejection};

/// Query string extraction that never rejects. A query that does not
/// deserialize (duplicate keys, bad encoding) is treated as empty.
pub fn lenient_query<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Default + Send + 'static,
{
    warp::query::<T>().or_else(|_| async {
        tracing::debug!("Unreadable query string, treating it as empty");
        Ok::<_, Rejection>((T::default(),))
    })
}
