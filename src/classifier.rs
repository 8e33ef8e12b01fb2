pub mod azure;

/// Outcome of classifying a single image.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub scores: crate::labels::Scores,

    /// The classifier's full response, handed back to the caller untouched.
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[async_trait::async_trait]
pub trait Classifier {
    async fn classify(&self, image: bytes::Bytes) -> Result<Classification, anyhow::Error>;
}

pub fn new_classifier_from_config(typ: &str, config: toml::Value) -> Result<Box<dyn Classifier + Send + Sync>, anyhow::Error> {
    Ok(match typ {
        "azure_content_moderator" => {
            let config = config.try_into()?;
            Box::new(azure::Classifier::new(&config)?)
        }
        _ => {
            return Err(anyhow::format_err!("unknown classifier type: {}", typ));
        }
    })
}
