use futures_util::StreamExt;

pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("request: {0} ({1})")]
    ReqwestWithBody(reqwest::Error, String),
}

/// Turns a configured gateway into a base URL. Bare hosts get `https://`, anything that
/// already names a scheme is kept as is.
fn base_url_for_gateway(gateway: &str) -> String {
    let gateway = gateway.trim_end_matches('/');
    if gateway.contains("://") {
        gateway.to_string()
    } else {
        format!("https://{}", gateway)
    }
}

impl Client {
    pub fn new(gateway: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Self {
            client: reqwest::ClientBuilder::new().build()?,
            base_url: base_url_for_gateway(gateway.as_ref()),
        })
    }

    pub fn url_for(&self, hash: &str) -> String {
        format!("{}/ipfs/{}", self.base_url, hash)
    }

    /// Starts retrieving `hash`, yielding body chunks as they arrive.
    pub async fn stream(&self, hash: &str) -> Result<impl futures_core::stream::Stream<Item = Result<bytes::Bytes, Error>>, Error> {
        let resp = self.client.get(self.url_for(hash)).send().await.map_err(|e| e.without_url())?;

        if let Err(e) = resp.error_for_status_ref() {
            let body = resp.text().await.map_err(|e| e.without_url())?;
            return Err(Error::ReqwestWithBody(e.without_url(), body));
        }

        Ok(resp.bytes_stream().map(|c| c.map_err(|e| Error::Reqwest(e.without_url()))))
    }

    /// Downloads the whole object behind `hash`. Resolves only once the body has been read to the end.
    pub async fn cat(&self, hash: &str) -> Result<bytes::Bytes, Error> {
        let mut stream = Box::pin(self.stream(hash).await?);

        let mut buf = bytes::BytesMut::new();
        while let Some(c) = stream.next().await {
            buf.extend_from_slice(&c?);
        }
        log::info!("fetched {} bytes for {}", buf.len(), hash);

        Ok(buf.freeze())
    }
}

#[async_trait::async_trait]
impl crate::fetcher::ContentFetcher for Client {
    async fn fetch(&self, hash: &str) -> Result<bytes::Bytes, anyhow::Error> {
        Ok(self.cat(hash).await?)
    }
}
