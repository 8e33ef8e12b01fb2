pub struct Classifier {
    client: crate::contentmoderator::Client,
}

#[derive(serde::Deserialize)]
pub struct Config {
    subscription_key: String,
    endpoint: String,
}

impl Classifier {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        Ok(Self {
            client: crate::contentmoderator::Client::new(&config.subscription_key, &config.endpoint)?,
        })
    }
}

fn convert_response(resp: crate::contentmoderator::evaluate::Response) -> Result<super::Classification, anyhow::Error> {
    let scores = crate::labels::Scores {
        adult: resp.adult_classification_score,
        racy: resp.racy_classification_score,
    };
    let fields = match serde_json::to_value(&resp)? {
        serde_json::Value::Object(fields) => fields,
        v => return Err(anyhow::format_err!("classification is not an object: {}", v)),
    };
    Ok(super::Classification { scores, fields })
}

#[async_trait::async_trait]
impl super::Classifier for Classifier {
    async fn classify(&self, image: bytes::Bytes) -> Result<super::Classification, anyhow::Error> {
        log::info!("content moderator request: {} bytes", image.len());
        let resp = self.client.evaluate_file_input(image).await?;
        log::info!(
            "content moderator response: tracking id {:?}, adult {}, racy {}",
            resp.tracking_id,
            resp.adult_classification_score,
            resp.racy_classification_score
        );
        convert_response(resp)
    }
}
