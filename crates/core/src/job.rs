// Job domain types
//
// A Job is a posting on the board. The applicant count is the only field the
// system mutates on its own (one increment per application); everything else
// changes only through a full overwrite.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The fixed field set of a job posting.
///
/// This is exactly what an update overwrites; the identifier is kept apart so
/// the same set can be written to an existing or a brand-new document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFields {
    /// URL of the banner image shown with the posting.
    #[serde(rename = "jobBannerURL")]
    pub job_banner_url: String,
    pub job_title: String,
    /// Display name of the user who posted the job.
    pub logged_in_user_name: String,
    pub job_category: String,
    /// Free-form salary range, e.g. "$40k - $60k".
    pub salary_range: String,
    pub job_description: String,
    pub job_posting_date: String,
    pub application_deadline: String,
    /// Number of applications received. Never negative.
    pub job_applicants_number: i64,
    /// Email of the poster; identifies the owner of the posting.
    pub user_email: String,
}

/// Job posting as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    /// Unique identifier, serialized as `_id`.
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: JobFields,
}

impl Job {
    pub fn new(id: Uuid, fields: JobFields) -> Self {
        Self { id, fields }
    }
}

/// Job fields as submitted by a client on create or update.
///
/// Text fields default to empty strings when omitted or null, and any other
/// JSON value is kept as its text form. The applicant count is accepted in
/// whatever shape the client sends and coerced with
/// [`coerce_applicant_count`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPayload {
    #[serde(rename = "jobBannerURL", deserialize_with = "lenient_text")]
    pub job_banner_url: String,
    #[serde(deserialize_with = "lenient_text")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub logged_in_user_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub job_category: String,
    #[serde(deserialize_with = "lenient_text")]
    pub salary_range: String,
    #[serde(deserialize_with = "lenient_text")]
    pub job_description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub job_posting_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub application_deadline: String,
    pub job_applicants_number: Value,
    #[serde(deserialize_with = "lenient_text")]
    pub user_email: String,
}

/// Read any JSON value as text: null is empty, strings are taken as-is and
/// everything else keeps its JSON rendering.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl JobPayload {
    /// Convert into the stored field set, coercing the applicant count.
    pub fn into_fields(self) -> JobFields {
        JobFields {
            job_applicants_number: coerce_applicant_count(&self.job_applicants_number),
            job_banner_url: self.job_banner_url,
            job_title: self.job_title,
            logged_in_user_name: self.logged_in_user_name,
            job_category: self.job_category,
            salary_range: self.salary_range,
            job_description: self.job_description,
            job_posting_date: self.job_posting_date,
            application_deadline: self.application_deadline,
            user_email: self.user_email,
        }
    }
}

impl From<JobFields> for JobPayload {
    fn from(fields: JobFields) -> Self {
        Self {
            job_applicants_number: Value::from(fields.job_applicants_number),
            job_banner_url: fields.job_banner_url,
            job_title: fields.job_title,
            logged_in_user_name: fields.logged_in_user_name,
            job_category: fields.job_category,
            salary_range: fields.salary_range,
            job_description: fields.job_description,
            job_posting_date: fields.job_posting_date,
            application_deadline: fields.application_deadline,
            user_email: fields.user_email,
        }
    }
}

/// Largest applicant count accepted from a client; leaves room for increments.
pub const MAX_APPLICANT_COUNT: i64 = i32::MAX as i64;

/// Coerce a client-supplied applicant count to a non-negative integer.
///
/// Follows base-10 `parseInt` rules: numbers are truncated, strings are read
/// up to the first non-digit after an optional sign and leading whitespace.
/// Anything unparseable becomes 0. Results are clamped to
/// `0..=MAX_APPLICANT_COUNT`.
pub fn coerce_applicant_count(value: &Value) -> i64 {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    };
    parsed.unwrap_or(0).clamp(0, MAX_APPLICANT_COUNT)
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce_applicant_count(&json!(0)), 0);
        assert_eq!(coerce_applicant_count(&json!(7)), 7);
        assert_eq!(coerce_applicant_count(&json!(3.9)), 3);
    }

    #[test]
    fn test_coerce_strings_like_parse_int() {
        assert_eq!(coerce_applicant_count(&json!("12")), 12);
        assert_eq!(coerce_applicant_count(&json!("  42")), 42);
        assert_eq!(coerce_applicant_count(&json!("15 applicants")), 15);
        assert_eq!(coerce_applicant_count(&json!("+4")), 4);
        assert_eq!(coerce_applicant_count(&json!("abc")), 0);
        assert_eq!(coerce_applicant_count(&json!("")), 0);
    }

    #[test]
    fn test_coerce_bounds_huge_counts() {
        assert_eq!(
            coerce_applicant_count(&json!("9223372036854775807")),
            MAX_APPLICANT_COUNT
        );
        assert_eq!(
            coerce_applicant_count(&json!("99999999999999999999999")),
            MAX_APPLICANT_COUNT
        );
        assert_eq!(coerce_applicant_count(&json!(i64::MAX)), MAX_APPLICANT_COUNT);
        assert_eq!(coerce_applicant_count(&json!(1e300)), MAX_APPLICANT_COUNT);
    }

    #[test]
    fn test_coerce_clamps_negative_and_defaults_missing() {
        assert_eq!(coerce_applicant_count(&json!(-5)), 0);
        assert_eq!(coerce_applicant_count(&json!("-5")), 0);
        assert_eq!(coerce_applicant_count(&Value::Null), 0);
        assert_eq!(coerce_applicant_count(&json!(true)), 0);
        assert_eq!(coerce_applicant_count(&json!([1])), 0);
    }

    #[test]
    fn test_job_wire_format() {
        let id = Uuid::nil();
        let job = Job::new(
            id,
            JobFields {
                job_banner_url: "https://img.example.com/b.png".to_string(),
                job_title: "Rust Engineer".to_string(),
                job_applicants_number: 3,
                user_email: "poster@example.com".to_string(),
                ..Default::default()
            },
        );

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["_id"], json!(id.to_string()));
        assert_eq!(value["jobBannerURL"], json!("https://img.example.com/b.png"));
        assert_eq!(value["jobTitle"], json!("Rust Engineer"));
        assert_eq!(value["jobApplicantsNumber"], json!(3));
        assert_eq!(value["userEmail"], json!("poster@example.com"));
        assert_eq!(value["loggedInUserName"], json!(""));

        let back: Job = serde_json::from_value(value).unwrap();
        assert_eq!(back, job);
    }

    #[test]
    fn test_payload_into_fields() {
        let payload: JobPayload = serde_json::from_value(json!({
            "jobTitle": "Designer",
            "jobCategory": "Remote",
            "salaryRange": "$50k-$70k",
            "jobApplicantsNumber": "2"
        }))
        .unwrap();

        let fields = payload.into_fields();
        assert_eq!(fields.job_title, "Designer");
        assert_eq!(fields.job_category, "Remote");
        assert_eq!(fields.salary_range, "$50k-$70k");
        assert_eq!(fields.job_applicants_number, 2);
        assert_eq!(fields.job_description, "");
    }

    #[test]
    fn test_payload_accepts_non_string_text() {
        let payload: JobPayload = serde_json::from_value(json!({
            "jobTitle": "Analyst",
            "jobDescription": null,
            "salaryRange": 50000,
            "jobCategory": true,
            "jobPostingDate": 1.5
        }))
        .unwrap();

        let fields = payload.into_fields();
        assert_eq!(fields.job_title, "Analyst");
        assert_eq!(fields.job_description, "");
        assert_eq!(fields.salary_range, "50000");
        assert_eq!(fields.job_category, "true");
        assert_eq!(fields.job_posting_date, "1.5");
    }

    #[test]
    fn test_payload_ignores_unknown_keys() {
        let payload: JobPayload = serde_json::from_value(json!({
            "jobTitle": "Writer",
            "_id": "whatever",
            "extra": {"nested": true}
        }))
        .unwrap();
        assert_eq!(payload.into_fields().job_title, "Writer");
    }
}
