// Services layer for business logic
// Services own business logic and validation, calling storage directly

pub mod application;
pub mod job;

pub use application::ApplicationService;
pub use job::JobService;
