//! The `Core` is the single task that owns the election state.
//!
//! It receives requests from [`Elector`](crate::Elector) handles and
//! notifications from resolver tasks, and handles them one at a time:
//! deciding, mutating, persisting and publishing status of one request
//! completes before the next one is looked at.

#[allow(clippy::module_inception)]
pub(crate) mod core;
pub(crate) mod core_state;
pub(crate) mod io;
pub(crate) mod resolver;
