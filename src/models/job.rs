use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A job posting sourced from the third-party platform.
///
/// Passed through to clients as received: absent or `null` fields stay
/// absent, and fields not listed here are carried in `extra`. Only the
/// request category is translated on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalJob {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExternalJob {
    /// Decode the records of a jobs page one by one. Records that cannot be
    /// read (no `id`, wrong types) are dropped without losing the rest.
    pub fn decode_page(records: Vec<Value>) -> Vec<ExternalJob> {
        records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(job) => Some(job),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable external job record");
                    None
                }
            })
            .collect()
    }
}

/// Request body of `POST /external-jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct JobsRequest {
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<ExternalJob>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_fields_do_not_drop_the_page() {
        let jobs = ExternalJob::decode_page(vec![
            json!({
                "id": "ext-1",
                "title": "Ménage",
                "hourlyRate": 18.5,
                "externalUrl": "https://jobs.example.com/ext-1"
            }),
            json!({
                "id": "ext-2",
                "title": null,
                "description": null,
                "hourlyRate": null,
                "availability": null
            }),
        ]);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].hourly_rate, Some(18.5));
        assert_eq!(jobs[1].id, "ext-2");
        assert!(jobs[1].hourly_rate.is_none());
    }

    #[test]
    fn test_unreadable_record_skipped() {
        let jobs = ExternalJob::decode_page(vec![
            json!({ "title": "no id" }),
            json!({ "id": "ext-3", "hourlyRate": "vingt" }),
            json!({ "id": "ext-4" }),
        ]);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "ext-4");
    }

    #[test]
    fn test_passthrough_keeps_unknown_fields_and_omits_missing() {
        let record = json!({
            "id": "ext-5",
            "category": "childcare",
            "rating": 4.8,
            "tags": ["urgent"]
        });
        let job: ExternalJob = serde_json::from_value(record.clone()).unwrap();
        assert_eq!(job.extra["rating"], 4.8);

        let out = serde_json::to_value(&job).unwrap();
        assert_eq!(out, record);
        assert!(out.get("hourlyRate").is_none());
    }
}
