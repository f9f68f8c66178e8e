//! Elector status for observability.
//!
//! The status is observed on a running elector via [`Elector::status()`] for
//! the latest value, or [`Elector::status_watcher()`] for a
//! `watch::Receiver<Status>` to follow changes.
//!
//! It is published after every handled request and resolution, before the
//! reply is sent, so a caller reading the status after its request returns
//! sees the effect of that request.
//!
//! Status is not a stream: it only guarantees to provide the latest state
//! but not every change of the state.
//!
//! [`Elector::status()`]: crate::Elector::status
//! [`Elector::status_watcher()`]: crate::Elector::status_watcher

mod status;
mod wait;

pub use status::ActiveStatus;
pub use status::Status;
pub use wait::Wait;
pub use wait::WaitError;
