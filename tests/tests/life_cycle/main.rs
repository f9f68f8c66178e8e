#[path = "../fixtures/mod.rs"]
mod fixtures;

mod t10_resolve_at_deadline;
mod t30_restart_resumes_election;
mod t31_restart_after_deadline;
mod t32_status_after_restart;
