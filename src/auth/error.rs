#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ErrorResponse<K> {
    #[serde(rename = "error")]
    pub kind: K,
    #[serde(rename = "error_description")]
    pub description: Option<String>,
    #[serde(rename = "error_uri")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizeErrorKind {
    InvalidClient,
    InvalidGrant,
    ServerError,
}

pub type AuthorizeError = ErrorResponse<AuthorizeErrorKind>;

impl From<AuthorizeErrorKind> for AuthorizeError {
    fn from(kind: AuthorizeErrorKind) -> Self {
        Self {
            kind,
            description: None,
            uri: None,
        }
    }
}

macro_rules! make_helper {
    ($name: ident, $variant: path, $description: literal) => {
        pub fn $name() -> Self {
            Self {
                kind: $variant,
                description: Some($description.to_string()),
                uri: None,
            }
        }
    };
}

impl AuthorizeError {
    make_helper!(
        invalid_client_id,
        AuthorizeErrorKind::InvalidClient,
        "Request contains an invalid client id."
    );
    make_helper!(
        invalid_client_secret,
        AuthorizeErrorKind::InvalidClient,
        "Request contains an invalid client secret."
    );
    make_helper!(
        invalid_redirect_uri,
        AuthorizeErrorKind::InvalidGrant,
        "Request contains an invalid redirect uri."
    );

    pub fn server_error(description: impl Into<String>) -> Self {
        Self {
            kind: AuthorizeErrorKind::ServerError,
            description: Some(description.into()),
            uri: None,
        }
    }
}
