pub mod evaluate;

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

pub struct Client {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("request: {0} ({1})")]
    ReqwestWithBody(reqwest::Error, String),

    #[error("serde: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("invalid subscription key: {0}")]
    InvalidSubscriptionKey(#[from] reqwest::header::InvalidHeaderValue),

    #[error("content moderator: {code}: {message}")]
    Api { code: String, message: String },
}

/// Picks an image content type from the leading magic bytes. The service only accepts
/// image types, so anything unrecognized goes out as JPEG.
pub fn sniff_content_type(buf: &[u8]) -> &'static str {
    if buf.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if buf.starts_with(b"GIF87a") || buf.starts_with(b"GIF89a") {
        "image/gif"
    } else if buf.starts_with(b"BM") {
        "image/bmp"
    } else if buf.starts_with(b"II*\0") || buf.starts_with(b"MM\0*") {
        "image/tiff"
    } else {
        "image/jpeg"
    }
}

impl Client {
    pub fn new(subscription_key: impl AsRef<str>, endpoint: impl AsRef<str>) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut key = reqwest::header::HeaderValue::from_str(subscription_key.as_ref())?;
        key.set_sensitive(true);
        headers.insert(SUBSCRIPTION_KEY_HEADER, key);
        Ok(Self {
            client: reqwest::ClientBuilder::new().default_headers(headers).build()?,
            endpoint: endpoint.as_ref().trim_end_matches('/').to_string(),
        })
    }

    pub async fn evaluate_file_input(&self, image: bytes::Bytes) -> Result<evaluate::Response, Error> {
        let resp = self
            .client
            .post(format!("{}/contentmoderator/moderate/v1.0/ProcessImage/Evaluate", self.endpoint))
            .header(reqwest::header::CONTENT_TYPE, sniff_content_type(&image))
            .body(image)
            .send()
            .await
            .map_err(|e| e.without_url())?;

        if let Err(e) = resp.error_for_status_ref() {
            let body = resp.text().await.map_err(|e| e.without_url())?;

            // Check if the service explained itself first.
            if let Ok(error_response) = serde_json::from_str::<evaluate::ErrorResponse>(&body) {
                return Err(Error::Api {
                    code: error_response.error.code,
                    message: error_response.error.message,
                });
            }

            return Err(Error::ReqwestWithBody(e.without_url(), body));
        }

        let body = resp.bytes().await.map_err(|e| e.without_url())?;
        Ok(serde_json::from_slice::<evaluate::Response>(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EVALUATE_PATH: &str = "/contentmoderator/moderate/v1.0/ProcessImage/Evaluate";

    #[test]
    fn test_sniff_content_type() {
        assert_eq!(sniff_content_type(b"\x89PNG\r\n\x1a\nrest"), "image/png");
        assert_eq!(sniff_content_type(b"GIF89a..."), "image/gif");
        assert_eq!(sniff_content_type(b"BM...."), "image/bmp");
        assert_eq!(sniff_content_type(b"II*\0...."), "image/tiff");
        assert_eq!(sniff_content_type(b"\xff\xd8\xff\xe0"), "image/jpeg");
        assert_eq!(sniff_content_type(b""), "image/jpeg");
    }

    #[tokio::test]
    async fn test_evaluate_file_input() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(EVALUATE_PATH))
            .and(header(SUBSCRIPTION_KEY_HEADER, "test-key"))
            .and(header("content-type", "image/png"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "AdultClassificationScore": 0.25,
                "IsImageAdultClassified": false,
                "RacyClassificationScore": 0.75,
                "IsImageRacyClassified": true,
                "Status": {"Code": 3000, "Description": "OK"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new("test-key", format!("{}/", server.uri())).unwrap();
        let resp = client
            .evaluate_file_input(bytes::Bytes::from_static(b"\x89PNG\r\n\x1a\nfake"))
            .await
            .unwrap();
        assert_eq!(resp.adult_classification_score, 0.25);
        assert_eq!(resp.racy_classification_score, 0.75);
        assert_eq!(resp.is_image_racy_classified, Some(true));
    }

    #[tokio::test]
    async fn test_evaluate_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(EVALUATE_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"code": "401", "message": "Access denied due to invalid subscription key."}
            })))
            .mount(&server)
            .await;

        let client = Client::new("wrong-key", server.uri()).unwrap();
        let err = client.evaluate_file_input(bytes::Bytes::from_static(b"img")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "content moderator: 401: Access denied due to invalid subscription key."
        );
    }

    #[tokio::test]
    async fn test_evaluate_unstructured_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(EVALUATE_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = Client::new("test-key", server.uri()).unwrap();
        let err = client.evaluate_file_input(bytes::Bytes::from_static(b"img")).await.unwrap_err();
        assert!(matches!(err, Error::ReqwestWithBody(_, ref body) if body == "bad gateway"));
    }

    #[tokio::test]
    async fn test_evaluate_missing_scores() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(EVALUATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Status": {"Code": 3000, "Description": "OK"}})))
            .mount(&server)
            .await;

        let client = Client::new("test-key", server.uri()).unwrap();
        let err = client.evaluate_file_input(bytes::Bytes::from_static(b"img")).await.unwrap_err();
        assert!(matches!(err, Error::SerdeJson(..)));
    }

    #[tokio::test]
    async fn test_evaluate_keeps_exact_scores() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(EVALUATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"AdultClassificationScore":0.11061398684978485,"RacyClassificationScore":0.9687211960554123,"CacheID":"c-1"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = Client::new("test-key", server.uri()).unwrap();
        let resp = client.evaluate_file_input(bytes::Bytes::from_static(b"img")).await.unwrap();
        assert_eq!(resp.adult_classification_score.to_string(), "0.11061398684978485");
        assert_eq!(resp.racy_classification_score.to_string(), "0.9687211960554123");
        assert_eq!(resp.cache_id.as_deref(), Some("c-1"));
        assert!(resp.extra.is_empty());
    }

    #[test]
    fn test_rejects_unprintable_key() {
        assert!(matches!(Client::new("bad\nkey", "https://example.com"), Err(Error::InvalidSubscriptionKey(..))));
    }
}
