use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One opportunity listing as served by the jobs service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: Option<String>,
    pub org_name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub required_skills: Vec<String>,
    pub responsibilities: Option<String>,
    pub ideal_candidate: Option<String>,
    pub when_and_where: Option<String>,
    pub date_posted: Option<String>,
    pub deadline: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub logo_url: Option<String>,
}

/// Wrapper the service puts around every payload. Only `data` is consumed;
/// the metadata is kept untyped so odd shapes never fail a read.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub success: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
    #[serde(default)]
    pub count: Option<Value>,
}

impl<T> Envelope<T> {
    pub fn empty() -> Self {
        Envelope {
            data: None,
            success: None,
            message: None,
            error: None,
            errors: None,
            count: None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> core::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(v.unwrap_or_default())
}
