// Application domain types
//
// An application records that someone applied to a job. Apart from the job
// reference, its contents are whatever the applicant submitted; the board does
// not interpret them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::id::{parse_id, IdError};

/// Key carrying the referenced job identifier.
pub const JOB_ID_FIELD: &str = "jobId";

/// A submitted application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedJob {
    /// Unique identifier, serialized as `_id`. Time-ordered, so it also
    /// encodes when the application was submitted.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Identifier of the job applied to. Not checked against existing jobs.
    #[serde(rename = "jobId")]
    pub job_id: Uuid,
    /// Applicant-supplied fields, stored verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Application as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApplicationPayload {
    #[serde(rename = "jobId", default)]
    pub job_id: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApplicationPayload {
    /// Resolve the referenced job identifier.
    pub fn job_id(&self) -> Result<Uuid, IdError> {
        match &self.job_id {
            Some(Value::String(raw)) => parse_id(raw),
            Some(other) => Err(IdError::Malformed(other.to_string())),
            None => Err(IdError::Missing(JOB_ID_FIELD)),
        }
    }

    /// Build the stored application under `id`.
    ///
    /// A client-supplied `_id` is dropped: identifiers are always assigned by
    /// the store.
    pub fn into_applied_job(self, id: Uuid) -> Result<AppliedJob, IdError> {
        let job_id = self.job_id()?;
        let mut fields = self.fields;
        fields.remove("_id");
        Ok(AppliedJob { id, job_id, fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_keeps_free_form_fields() {
        let job_id = Uuid::now_v7();
        let payload: ApplicationPayload = serde_json::from_value(json!({
            "jobId": job_id.to_string(),
            "applicantEmail": "a@x.com",
            "resumeLink": "https://cv.example.com/a",
            "answers": {"years": 4}
        }))
        .unwrap();

        let application = payload.into_applied_job(Uuid::nil()).unwrap();
        assert_eq!(application.job_id, job_id);
        assert_eq!(application.fields["applicantEmail"], json!("a@x.com"));
        assert_eq!(application.fields["answers"], json!({"years": 4}));
        assert!(!application.fields.contains_key("jobId"));
    }

    #[test]
    fn test_client_id_is_discarded() {
        let payload: ApplicationPayload = serde_json::from_value(json!({
            "_id": "client-chosen",
            "jobId": Uuid::now_v7().to_string()
        }))
        .unwrap();

        let id = Uuid::now_v7();
        let application = payload.into_applied_job(id).unwrap();
        assert_eq!(application.id, id);
        assert!(!application.fields.contains_key("_id"));

        let value = serde_json::to_value(&application).unwrap();
        assert_eq!(value["_id"], json!(id.to_string()));
    }

    #[test]
    fn test_job_id_errors() {
        let missing = ApplicationPayload::default();
        assert_eq!(missing.job_id(), Err(IdError::Missing("jobId")));

        let malformed: ApplicationPayload =
            serde_json::from_value(json!({"jobId": "nope"})).unwrap();
        assert!(matches!(malformed.job_id(), Err(IdError::Malformed(_))));

        let numeric: ApplicationPayload = serde_json::from_value(json!({"jobId": 12})).unwrap();
        assert!(matches!(numeric.job_id(), Err(IdError::Malformed(_))));
    }
}
