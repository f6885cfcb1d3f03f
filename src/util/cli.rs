use crate::core::types::{ClientId, ClientSecret, RedirectUri};
use crate::db::diesel::DbStore;
use crate::provider::error::Error;
use crate::util::hash::HashingService;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(
    name = "shiori-util",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Options {
    #[clap(long, env = "DATABASE_URL")]
    database_url: String,
    #[clap(long, env = "HASH_SECRET")]
    hash_secret: String,
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    ListClients(ListClients),
    CreateClient(CreateClient),
    DeleteClient(DeleteClient),
    ListClientUris(ListClientUris),
    AddClientUri(AddClientUri),
    DeleteClientUri(DeleteClientUri),
}

#[derive(Args)]
struct ListClients {}

#[derive(Args)]
struct CreateClient {
    #[clap(short, long)]
    id: String,
    #[clap(short, long)]
    name: String,
    /// Leave out, or pass an empty string, for public clients
    #[clap(short, long)]
    secret: Option<String>,
}

#[derive(Args)]
struct DeleteClient {
    #[clap(short, long)]
    id: String,
}

#[derive(Args)]
struct ListClientUris {
    #[clap(short, long)]
    id: String,
}

#[derive(Args)]
struct AddClientUri {
    #[clap(short, long)]
    id: String,
    #[clap(short, long)]
    uri: String,
}

#[derive(Args)]
struct DeleteClientUri {
    #[clap(short, long)]
    id: String,
    #[clap(short, long)]
    uri: String,
}

fn list_clients(_c: &ListClients, db: &DbStore) -> Result<(), Error> {
    for (id, name) in db.list_clients()? {
        println!("{} (name: \"{}\")", id.0, name);
    }
    Ok(())
}

fn create_client(c: &CreateClient, db: &DbStore, opts: &Options) -> Result<(), Error> {
    let hasher = HashingService::with_secret_key(opts.hash_secret.clone());

    let secret = c
        .secret
        .as_ref()
        .filter(|s| !s.is_empty())
        .map(|s| hasher.hash(&ClientSecret(s.to_string())))
        .transpose()?;

    db.put_client(ClientId(c.id.to_string()), c.name.to_string(), secret)
}

fn delete_client(c: &DeleteClient, db: &DbStore) -> Result<(), Error> {
    db.delete_client(&ClientId(c.id.to_string()))
}

fn list_client_uris(c: &ListClientUris, db: &DbStore) -> Result<(), Error> {
    for uri in db.list_client_uris(&ClientId(c.id.to_string()))? {
        println!("{}", uri.0);
    }
    Ok(())
}

fn add_client_uri(c: &AddClientUri, db: &DbStore) -> Result<(), Error> {
    db.add_client_uri(&ClientId(c.id.to_string()), &RedirectUri(c.uri.to_string()))
}

fn delete_client_uri(c: &DeleteClientUri, db: &DbStore) -> Result<(), Error> {
    db.delete_client_uri(&ClientId(c.id.to_string()), &RedirectUri(c.uri.to_string()))
}

pub fn run_cli_action(opts: Options) -> Result<(), Error> {
    use SubCommand::*;

    let db = DbStore::acquire(&opts.database_url)?;
    db.migrate()?;

    match &opts.command {
        ListClients(c) => list_clients(c, &db),
        CreateClient(c) => create_client(c, &db, &opts),
        DeleteClient(c) => delete_client(c, &db),
        ListClientUris(c) => list_client_uris(c, &db),
        AddClientUri(c) => add_client_uri(c, &db),
        DeleteClientUri(c) => delete_client_uri(c, &db),
    }
}
