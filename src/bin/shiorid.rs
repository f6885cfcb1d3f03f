#[tokio::main]
async fn main() -> Result<(), shiori::provider::error::Error> {
    shiori::provider::main().await
}
