// Wire names are PascalCase; we hand the object on to callers in camelCase.

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "camelCase"))]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "camelCase"))]
pub struct Status {
    pub code: i64,
    pub description: String,
    #[serde(default)]
    pub exception: Option<String>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all(deserialize = "PascalCase", serialize = "camelCase"))]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,

    #[serde(
        default,
        rename(deserialize = "CacheID", serialize = "cacheID"),
        skip_serializing_if = "Option::is_none"
    )]
    pub cache_id: Option<String>,

    pub adult_classification_score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_image_adult_classified: Option<bool>,

    pub racy_classification_score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_image_racy_classified: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,

    #[serde(default)]
    pub advanced_info: Vec<KeyValuePair>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: ApiError,
}
