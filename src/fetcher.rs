/// Retrieves content-addressed objects in full.
#[async_trait::async_trait]
pub trait ContentFetcher {
    async fn fetch(&self, hash: &str) -> Result<bytes::Bytes, anyhow::Error>;
}

pub fn new_fetcher_from_config(config: &crate::config::GatewayConfig) -> Result<Box<dyn ContentFetcher + Send + Sync>, anyhow::Error> {
    Ok(Box::new(crate::ipfs::Client::new(&config.host)?))
}
