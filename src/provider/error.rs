use crate::auth::AuthorizeError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Store(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Hash(#[from] argon2::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Task(#[from] tokio::task::JoinError),
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Db(#[from] diesel::result::Error),
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Pool(#[from] diesel::r2d2::PoolError),
}

pub trait ResultExt<T> {
    /// Anything that went wrong inside the server becomes a `server_error`
    /// carrying the failure's message.
    fn or_server_error(self) -> Result<T, AuthorizeError>;
}

impl<T> ResultExt<T> for Result<T, Error> {
    fn or_server_error(self) -> Result<T, AuthorizeError> {
        self.map_err(|e| {
            tracing::error!(error = %e, "Internal failure while handling request");
            AuthorizeError::server_error(e.to_string())
        })
    }
}
