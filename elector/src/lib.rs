#![doc = include_str!("lib_readme.md")]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::bool_comparison)]
#![allow(clippy::result_large_err)]
#![allow(clippy::type_complexity)]

macro_rules! func_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let n = &name[..name.len() - 3];
        let nn = n.replace("::{{closure}}", "");
        nn
    }};
}

pub extern crate openraft_macros;

mod config;
mod core;

pub mod announcer;
pub mod clock;
pub mod command;
pub mod election;
pub mod elector;
pub mod errors;
pub mod metrics;
pub mod storage;
pub mod testing;

pub use anyerror;
pub use anyerror::AnyError;
pub use openraft_macros::add_async_trait;

pub use crate::announcer::Announcement;
pub use crate::announcer::Announcer;
pub use crate::clock::Clock;
pub use crate::clock::ManualClock;
pub use crate::clock::SystemClock;
pub use crate::command::Command;
pub use crate::command::Outcome;
pub use crate::config::Config;
pub use crate::config::ConfigError;
pub use crate::election::ParticipantId;
pub use crate::election::Tally;
pub use crate::elector::Elector;
pub use crate::metrics::Status;
pub use crate::storage::Snapshot;
pub use crate::storage::SnapshotStore;
pub use crate::storage::SnapshotStoreExt;
