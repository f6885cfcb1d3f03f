use std::sync::Arc;

use async_trait::async_trait;
use url::Url;
use warp::http::StatusCode;

use shiori::auth::{ClientStore, SessionStore};
use shiori::core::models::{Client, Session};
use shiori::core::types::{
    ClientId, ClientSecret, Expiry, RedirectUri, ResponseType, SessionId,
};
use shiori::db::memory::MemoryStore;
use shiori::http::server::Server;
use shiori::provider::error::Error;
use shiori::provider::OAuth2Provider;
use shiori::util::hash::HashingService;

const LOGIN_URL: &str = "https://login.test/login";

fn hasher() -> HashingService {
    HashingService::with_secret_key("pepper".to_string())
}

fn client(id: &str, secret: Option<&str>, uris: &[&str]) -> Client {
    Client {
        id: ClientId(id.to_string()),
        secret: secret.map(|s| hasher().hash(&ClientSecret(s.to_string())).unwrap()),
        redirect_uris: uris.iter().map(|u| RedirectUri(u.to_string())).collect(),
    }
}

async fn server(clients: Vec<Client>) -> (Arc<MemoryStore>, Server<Arc<MemoryStore>, Arc<MemoryStore>>) {
    let store = Arc::new(MemoryStore::new());
    for c in clients {
        store.put_client(c).await;
    }
    let provider = OAuth2Provider::new(
        Arc::clone(&store),
        Arc::clone(&store),
        hasher(),
        Url::parse(LOGIN_URL).unwrap(),
    );
    (store, Server::new(Arc::new(provider)))
}

fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn redirects_to_login_page_and_persists_session() {
    let (store, server) = server(vec![client("app", None, &[])]).await;

    let res = warp::test::request()
        .method("GET")
        .path("/oauth/v1/authorize?client_id=app&response_type=code&redirect_uri=https%3A%2F%2Fapp.test%2Fcb&state=af0ifjsldkj")
        .reply(&server.routes())
        .await;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);

    let sessions = store.sessions().await;
    assert_eq!(sessions.len(), 1);
    let session = &sessions[0];
    assert_eq!(session.client_id, ClientId("app".to_string()));
    assert_eq!(session.response_type, Some(ResponseType::Code));
    assert_eq!(session.redirect_uri, Some(RedirectUri("https://app.test/cb".to_string())));
    assert_eq!(session.state.as_deref(), Some("af0ifjsldkj"));

    let expected = session.login_url(&Url::parse(LOGIN_URL).unwrap());
    assert_eq!(res.headers()["location"], expected.as_str());
}

#[tokio::test]
async fn unknown_client_is_unauthorized() {
    let (store, server) = server(vec![]).await;

    let res = warp::test::request()
        .path("/oauth/v1/authorize?client_id=ghost&redirect_uri=https%3A%2F%2Fa%2Fcb")
        .reply(&server.routes())
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json(res.body()),
        serde_json::json!({
            "error": "invalid_client",
            "error_description": "Request contains an invalid client id."
        })
    );
    assert!(store.sessions().await.is_empty());
}

#[tokio::test]
async fn empty_query_is_unauthorized() {
    let (_, server) = server(vec![client("app", None, &[])]).await;

    let res = warp::test::request()
        .path("/oauth/v1/authorize")
        .reply(&server.routes())
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json(res.body())["error"], "invalid_client");
}

#[tokio::test]
async fn wrong_secret_is_unauthorized() {
    let (_, server) = server(vec![client("app", Some("right"), &[])]).await;

    let res = warp::test::request()
        .path("/oauth/v1/authorize?client_id=app&client_secret=wrong")
        .reply(&server.routes())
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json(res.body())["error_description"],
        "Request contains an invalid client secret."
    );
}

#[tokio::test]
async fn matching_secret_redirects() {
    let (_, server) = server(vec![client("app", Some("right"), &[])]).await;

    let res = warp::test::request()
        .path("/oauth/v1/authorize?client_id=app&client_secret=right&response_type=token")
        .reply(&server.routes())
        .await;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn registered_redirect_uri_is_refused() {
    // Documented behaviour: a registered uri is refused, an unregistered one passes.
    let (_, server) = server(vec![client("app", None, &["https://a/cb"])]).await;

    let res = warp::test::request()
        .path("/oauth/v1/authorize?client_id=app&redirect_uri=https%3A%2F%2Fa%2Fcb")
        .reply(&server.routes())
        .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json(res.body()),
        serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Request contains an invalid redirect uri."
        })
    );

    let res = warp::test::request()
        .path("/oauth/v1/authorize?client_id=app&redirect_uri=https%3A%2F%2Fb%2Fcb")
        .reply(&server.routes())
        .await;

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

struct BrokenSessions;

#[async_trait]
impl SessionStore for BrokenSessions {
    async fn save_session(&self, _: &Session) -> Result<(), Error> {
        Err(Error::Store("sessions table is locked".to_string()))
    }

    async fn get_session(&self, _: &SessionId) -> Result<Option<Session>, Error> {
        Err(Error::Store("sessions table is locked".to_string()))
    }

    async fn clean_up(&self) -> Result<(), Error> {
        Ok(())
    }
}

struct BrokenClients;

#[async_trait]
impl ClientStore for BrokenClients {
    async fn get_client(&self, _: &ClientId) -> Result<Option<Client>, Error> {
        Err(Error::Store("clients table is missing".to_string()))
    }
}

#[tokio::test]
async fn session_store_failure_is_a_server_error() {
    let clients = Arc::new(MemoryStore::new());
    clients.put_client(client("app", None, &[])).await;
    let provider = OAuth2Provider::new(
        clients,
        BrokenSessions,
        hasher(),
        Url::parse(LOGIN_URL).unwrap(),
    );
    let routes = Server::new(Arc::new(provider)).routes();

    for _ in 0..2 {
        let res = warp::test::request()
            .path("/oauth/v1/authorize?client_id=app")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json(res.body()),
            serde_json::json!({
                "error": "server_error",
                "error_description": "sessions table is locked"
            })
        );
    }
}

#[tokio::test]
async fn client_store_failure_is_a_server_error() {
    let provider = OAuth2Provider::new(
        BrokenClients,
        Arc::new(MemoryStore::new()),
        hasher(),
        Url::parse(LOGIN_URL).unwrap(),
    );
    let routes = Server::new(Arc::new(provider)).routes();

    let res = warp::test::request()
        .path("/oauth/v1/authorize?client_id=app")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(res.body())["error_description"], "clients table is missing");
}

#[tokio::test]
async fn session_info_is_served_for_login_page() {
    let (store, server) = server(vec![client("app", None, &[])]).await;
    let routes = server.routes();

    let res = warp::test::request()
        .path("/oauth/v1/authorize?client_id=app&response_type=code&state=xyz")
        .reply(&routes)
        .await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);

    let id = store.sessions().await[0].id.clone();
    let res = warp::test::request()
        .path(&format!("/session/v1/info/{}", id.0))
        .reply(&routes)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json(res.body()),
        serde_json::json!({
            "id": id.0,
            "client_id": "app",
            "response_type": "code",
            "state": "xyz"
        })
    );
}

#[tokio::test]
async fn unknown_or_expired_session_is_not_found() {
    let (store, server) = server(vec![]).await;
    let routes = server.routes();

    let mut expired = Session::new(ClientId("app".to_string()), None, None, None);
    expired.invalid_after = Expiry::from(0);
    store.save_session(&expired).await.unwrap();

    for id in &["missing", expired.id.0.as_str()] {
        let res = warp::test::request()
            .path(&format!("/session/v1/info/{}", id))
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn session_store_failure_on_lookup_is_a_server_error() {
    let provider = OAuth2Provider::new(
        Arc::new(MemoryStore::new()),
        BrokenSessions,
        hasher(),
        Url::parse(LOGIN_URL).unwrap(),
    );
    let routes = Server::new(Arc::new(provider)).routes();

    let res = warp::test::request()
        .path("/session/v1/info/abc")
        .reply(&routes)
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(res.body())["error"], "server_error");
}
