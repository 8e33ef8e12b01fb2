use crate::classifier::Classifier;
use crate::fetcher::ContentFetcher;
use crate::job::{Envelope, JobRequest};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No data")]
    NoData,

    #[error("Job run ID required")]
    JobRunIdRequired,

    #[error("Content hash required")]
    ContentHashRequired,
}

/// A job that passed validation.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidJob<'a> {
    pub job_run_id: &'a str,
    pub hash: &'a str,
}

pub fn validate(input: &JobRequest) -> Result<ValidJob<'_>, ValidationError> {
    let data = input.data.as_ref().ok_or(ValidationError::NoData)?;
    let job_run_id = input.id.as_deref().ok_or(ValidationError::JobRunIdRequired)?;
    let hash = data.hash.as_deref().ok_or(ValidationError::ContentHashRequired)?;
    Ok(ValidJob { job_run_id, hash })
}

/// Runs jobs through fetch, classify and normalize.
pub struct Adapter {
    fetcher: Box<dyn ContentFetcher + Send + Sync>,
    classifier: Box<dyn Classifier + Send + Sync>,
}

impl Adapter {
    pub fn new(fetcher: Box<dyn ContentFetcher + Send + Sync>, classifier: Box<dyn Classifier + Send + Sync>) -> Self {
        Self { fetcher, classifier }
    }

    async fn moderate(&self, hash: &str) -> Result<serde_json::Map<String, serde_json::Value>, anyhow::Error> {
        let image = self.fetcher.fetch(hash).await?;
        let classification = self.classifier.classify(image).await?;
        let result = crate::labels::normalize(classification.scores)?;

        let mut data = classification.fields;
        data.insert("result".to_string(), serde_json::Value::String(result));
        Ok(data)
    }

    /// Handles one job, returning the HTTP-ish status code alongside the envelope. Never fails:
    /// every error becomes an errored envelope with status 500.
    pub async fn handle(&self, input: &JobRequest) -> (u16, Envelope) {
        let job = match validate(input) {
            Ok(job) => job,
            Err(e) => {
                log::error!("job {:?} rejected: {}", input.id, e);
                return (500, Envelope::errored(input.id.as_deref(), e));
            }
        };

        match self.moderate(job.hash).await {
            Ok(data) => {
                log::info!(
                    "job {} succeeded: {}",
                    job.job_run_id,
                    data.get("result").and_then(|v| v.as_str()).unwrap_or_default()
                );
                (200, Envelope::success(job.job_run_id, data))
            }
            Err(e) => {
                log::error!("job {} failed: {:?}", job.job_run_id, e);
                (500, Envelope::errored(Some(job.job_run_id), format!("{:#}", e)))
            }
        }
    }
}
