#[path = "../fixtures/mod.rs"]
mod fixtures;

mod t20_vote;
mod t40_stop;
mod t50_command;
