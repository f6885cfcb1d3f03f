use super::schema::*;

#[derive(Debug)]
#[derive(Queryable, Insertable)]
pub struct Uri {
    pub client_id: String,
    pub uri: String
}

#[derive(Debug)]
#[derive(Queryable, Insertable)]
pub struct Client {
    pub client_id: String,
    pub name: String,
    pub secret_hash: Option<String>,
}

#[derive(Debug)]
#[derive(Queryable, Insertable)]
pub struct Session {
    pub id: String,
    pub client_id: String,
    pub response_type: Option<String>,
    pub redirect_uri: Option<String>,
    pub state: Option<String>,
    pub invalid_after: i64
}
