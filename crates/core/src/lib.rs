// Job board domain types
//
// This crate holds the DB-agnostic entities shared by the HTTP layer and the
// storage backends.
//
// Key design decisions:
// - Wire format mirrors the documents clients already exchange: camelCase keys
//   and the identifier serialized as `_id`
// - Identifiers are UUIDv7, so creation order is recoverable from the key
// - Applicant-count coercion lives here so every write path applies the same rule
// - Write results report what the store did (matched/modified/upserted) instead
//   of echoing documents back

pub mod applied_job;
pub mod id;
pub mod job;
pub mod telemetry;
pub mod write_result;

pub use applied_job::{AppliedJob, ApplicationPayload};
pub use id::{new_id, parse_id, IdError};
pub use job::{coerce_applicant_count, Job, JobFields, JobPayload, MAX_APPLICANT_COUNT};
pub use write_result::{DeleteResult, InsertResult, UpdateResult};
