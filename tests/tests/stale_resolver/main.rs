#[path = "../fixtures/mod.rs"]
mod fixtures;

mod t10_stop_before_deadline;
mod t30_stop_announce_once;
