/// Job run ID reported when the caller did not supply one.
pub const DEFAULT_JOB_RUN_ID: &str = "1";

#[derive(Default, Clone, Debug, PartialEq)]
pub struct JobData {
    pub hash: Option<String>,
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct JobRequest {
    pub id: Option<String>,
    pub data: Option<JobData>,
}

impl JobRequest {
    /// Parses a job from raw JSON. Input that isn't JSON is treated as an empty job, which
    /// validation then rejects.
    pub fn from_slice(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                log::warn!("unparseable job input: {}", e);
                Self::default()
            }
        }
    }

    /// Picks `id`, `data` and `data.hash` out of a job independently, so a malformed field
    /// never takes the others down with it.
    ///
    /// Any non-null `id` is kept (non-strings as their JSON text). Any non-null `data` counts
    /// as present. A `hash` that isn't a string counts as missing.
    pub fn from_value(value: serde_json::Value) -> Self {
        let mut fields = match value {
            serde_json::Value::Object(fields) => fields,
            v => {
                log::warn!("job input is not an object: {}", v);
                return Self::default();
            }
        };

        let id = match fields.remove("id") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s),
            Some(v) => Some(v.to_string()),
        };

        let data = match fields.remove("data") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Object(mut data)) => Some(JobData {
                hash: match data.remove("hash") {
                    Some(serde_json::Value::String(s)) => Some(s),
                    None | Some(serde_json::Value::Null) => None,
                    Some(v) => {
                        log::warn!("job {:?}: hash is not a string: {}", id, v);
                        None
                    }
                },
            }),
            Some(v) => {
                log::warn!("job {:?}: data is not an object: {}", id, v);
                Some(JobData::default())
            }
        };

        Self { id, data }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Errored,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct Envelope {
    #[serde(rename = "jobRunID")]
    pub job_run_id: String,

    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(job_run_id: impl Into<String>, data: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            job_run_id: job_run_id.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn errored(job_run_id: Option<&str>, error: impl std::fmt::Display) -> Self {
        Self {
            job_run_id: job_run_id.unwrap_or(DEFAULT_JOB_RUN_ID).to_string(),
            status: Status::Errored,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_job() {
        let job = JobRequest::from_slice(br#"{"id": "abc", "data": {"hash": "Qm123", "extra": true}, "meta": 1}"#);
        assert_eq!(
            job,
            JobRequest {
                id: Some("abc".to_string()),
                data: Some(JobData { hash: Some("Qm123".to_string()) }),
            }
        );
    }

    #[test]
    fn test_parse_numeric_id() {
        let job = JobRequest::from_slice(br#"{"id": 42, "data": {}}"#);
        assert_eq!(job.id.as_deref(), Some("42"));
        assert_eq!(job.data, Some(JobData { hash: None }));
    }

    #[test]
    fn test_parse_null_fields() {
        let job = JobRequest::from_slice(br#"{"id": null, "data": null}"#);
        assert_eq!(job, JobRequest::default());
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        assert_eq!(JobRequest::from_slice(b"not json"), JobRequest::default());
        assert_eq!(JobRequest::from_slice(br#""a string""#), JobRequest::default());
        assert_eq!(JobRequest::from_value(serde_json::json!([1, 2])), JobRequest::default());
    }

    #[test]
    fn test_parse_keeps_id_when_data_is_not_an_object() {
        let job = JobRequest::from_slice(br#"{"id": "abc", "data": "oops"}"#);
        assert_eq!(
            job,
            JobRequest {
                id: Some("abc".to_string()),
                data: Some(JobData { hash: None }),
            }
        );
    }

    #[test]
    fn test_parse_non_string_hash_is_missing() {
        let job = JobRequest::from_value(serde_json::json!({"id": "abc", "data": {"hash": 5}}));
        assert_eq!(
            job,
            JobRequest {
                id: Some("abc".to_string()),
                data: Some(JobData { hash: None }),
            }
        );
    }

    #[test]
    fn test_parse_keeps_odd_id() {
        let job = JobRequest::from_value(serde_json::json!({"id": true}));
        assert_eq!(job.id.as_deref(), Some("true"));
        assert_eq!(job.data, None);
    }

    #[test]
    fn test_errored_envelope_shape() {
        let envelope = Envelope::errored(Some("7"), "No data");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            serde_json::json!({"jobRunID": "7", "status": "errored", "error": "No data"})
        );
    }

    #[test]
    fn test_errored_envelope_without_id_uses_default() {
        let envelope = Envelope::errored(None, "Job run ID required");
        assert_eq!(envelope.job_run_id, DEFAULT_JOB_RUN_ID);
    }

    #[test]
    fn test_success_envelope_shape() {
        let mut data = serde_json::Map::new();
        data.insert("result".to_string(), "1,2,,,".into());
        assert_eq!(
            serde_json::to_value(&Envelope::success("7", data)).unwrap(),
            serde_json::json!({"jobRunID": "7", "status": "success", "data": {"result": "1,2,,,"}})
        );
    }
}
