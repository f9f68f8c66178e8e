//! Public interface and data types.
//!
//! [`Elector`] serves as the primary interface to an election engine,
//! facilitating all interactions with the underlying Core.
//!
//! While `Core` operates as a singleton within an application, [`Elector`]
//! instances are designed to be cheaply cloneable.
//! This allows every command handler of a host to share access.

mod inner;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::watch;
use tracing::trace_span;
use tracing::Instrument;
use tracing::Level;

use crate::announcer::Announcer;
use crate::clock::Clock;
use crate::command::Command;
use crate::command::Outcome;
use crate::config::Config;
use crate::core::core::Core;
use crate::core::core_state::CoreState;
use crate::core::io::api_message::APIMessage;
use crate::election::Election;
use crate::election::Resolution;
use crate::election::Started;
use crate::election::VoteAccepted;
use crate::election::Withdrawn;
use crate::elector::inner::ElectorInner;
use crate::errors::ElectionError;
use crate::errors::Fatal;
use crate::errors::StartError;
use crate::errors::StopError;
use crate::errors::VoteError;
use crate::errors::WithdrawError;
use crate::metrics::Status;
use crate::metrics::Wait;
use crate::storage::SnapshotStore;

/// The Elector API.
///
/// ### Clone
///
/// This type implements `Clone`, and cloning itself is very cheap and helps to
/// facilitate use with async workflows.
///
/// ### Results
///
/// Requests return `Result<Result<T, E>, Fatal>`. The inner `E` is an
/// expected outcome of the request, e.g. voting when no election runs, and
/// should be rendered as a reply. The outer [`Fatal`] means the elector has
/// shut down.
///
/// ### Shutting down
///
/// Call [`Elector::shutdown`] to stop the Core and the pending resolver. An
/// election that is running at that time stays in the snapshot and resumes
/// when a new `Elector` is built on the same store.
#[derive(Clone)]
pub struct Elector {
    inner: Arc<ElectorInner>,
}

impl Elector {
    /// Create and spawn a new elector Core task.
    ///
    /// It must be called within a tokio runtime.
    ///
    /// The Core first loads the snapshot from `store`. An election found
    /// there is resumed, or, if its deadline has passed, resolved and
    /// announced before any request is served.
    ///
    /// ### `config`
    /// Elector's runtime config. See the docs on the `Config` object for more
    /// details.
    ///
    /// ### `clock`
    /// The time source, [`SystemClock`](crate::SystemClock) in production.
    ///
    /// ### `store`
    /// An implementation of the [`SnapshotStore`] trait that keeps the
    /// election across restarts.
    ///
    /// ### `announcer`
    /// Receives the result of every election that ends at its deadline.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new<Clk, Sto, Ann>(
        config: Arc<Config>,
        clock: Clk,
        store: Sto,
        announcer: Ann,
    ) -> Self
    where
        Clk: Clock,
        Sto: SnapshotStore,
        Ann: Announcer,
    {
        let (tx_api, rx_api) = mpsc::unbounded_channel();
        let (tx_notify, rx_notify) = mpsc::unbounded_channel();
        let (tx_status, rx_status) = watch::channel(Status::new_initial());
        let (tx_shutdown, rx_shutdown) = watch::channel(false);

        let core_span = tracing::span!(
            parent: tracing::Span::current(),
            Level::DEBUG,
            "Core",
            key = display(&config.snapshot_key),
        );

        let core: Core<Clk, Sto, Ann> = Core {
            config: config.clone(),
            clock,
            store,
            announcer,

            election: Election::new(),
            resolver: None,
            resolved: 0,
            stale_wakeups: 0,

            rx_api,

            tx_notification: tx_notify,
            rx_notification: rx_notify,

            tx_status,
            rx_shutdown,

            span: core_span,
        };

        let core_handle = tokio::spawn(
            core.main().instrument(trace_span!("spawn").or_current()),
        );

        let inner = ElectorInner {
            config,
            tx_api,
            rx_status,
            tx_shutdown,
            core_state: std::sync::Mutex::new(CoreState::Running(core_handle)),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Return the config of this elector.
    pub fn config(&self) -> &Arc<Config> {
        &self.inner.config
    }

    /// Start an election lasting `duration_secs` seconds.
    ///
    /// An absent or non-positive duration uses
    /// [`Config::default_duration`]. Fails with `AlreadyActive` and changes
    /// nothing if an election is running.
    pub async fn start(
        &self,
        duration_secs: Option<i64>,
    ) -> Result<Result<Started, StartError>, Fatal> {
        tracing::info!(duration_secs = debug(duration_secs), "start()");

        let (tx, rx) = oneshot::channel();
        let msg = APIMessage::Start {
            duration: duration_secs,
            tx,
        };
        self.inner.call_core(msg, rx).await
    }

    /// Record `participant`'s vote for `option`, replacing their earlier
    /// vote.
    ///
    /// Returns the stored option and the current leader. Fails with
    /// `NotActive` when no election runs and `InvalidOption` when `option`
    /// is blank.
    pub async fn vote(
        &self,
        participant: impl ToString,
        option: impl ToString,
    ) -> Result<Result<VoteAccepted, VoteError>, Fatal> {
        let (tx, rx) = oneshot::channel();
        let msg = APIMessage::Vote {
            participant: participant.to_string(),
            option: option.to_string(),
            tx,
        };
        self.inner.call_core(msg, rx).await
    }

    /// Remove `participant`'s vote. It is not an error if they have none.
    pub async fn withdraw(
        &self,
        participant: impl ToString,
    ) -> Result<Result<Withdrawn, WithdrawError>, Fatal> {
        let (tx, rx) = oneshot::channel();
        let msg = APIMessage::Withdraw {
            participant: participant.to_string(),
            tx,
        };
        self.inner.call_core(msg, rx).await
    }

    /// End the running election now and return its tally.
    ///
    /// The result is returned to the caller only; it is passed to the
    /// announcer only if [`Config::announce_on_stop`] is set. The pending
    /// resolver of the election will not announce it.
    pub async fn stop(&self) -> Result<Result<Resolution, StopError>, Fatal> {
        tracing::info!("stop()");

        let (tx, rx) = oneshot::channel();
        self.inner.call_core(APIMessage::Stop { tx }, rx).await
    }

    /// Dispatch a parsed [`Command`] on behalf of `participant`.
    ///
    /// `start` takes minutes. Expected refusals are returned as
    /// [`Outcome::Failed`].
    pub async fn handle(
        &self,
        participant: impl ToString,
        command: Command,
    ) -> Result<Outcome, Fatal> {
        tracing::debug!(command = display(&command), "handle()");

        let res: Result<Outcome, ElectionError> = match command {
            Command::Start { minutes } => {
                let secs = minutes.map(|m| m.saturating_mul(60));
                self.start(secs)
                    .await?
                    .map(Outcome::Started)
                    .map_err(ElectionError::from)
            }
            Command::Stop => self
                .stop()
                .await?
                .map(Outcome::Stopped)
                .map_err(ElectionError::from),
            Command::Vote(option) => self
                .vote(participant, option)
                .await?
                .map(Outcome::Voted)
                .map_err(ElectionError::from),
            Command::Withdraw => self
                .withdraw(participant)
                .await?
                .map(Outcome::Withdrawn)
                .map_err(ElectionError::from),
            Command::Status => {
                Ok(Outcome::Status(self.current_status().await?))
            }
            Command::Help => Ok(Outcome::Help(Command::USAGE)),
        };

        Ok(res.unwrap_or_else(Outcome::Failed))
    }

    /// The status as of every request sent before this one.
    ///
    /// Unlike [`Elector::status`] it is answered by the Core, so right after
    /// [`Elector::new`] it reflects the loaded snapshot.
    pub async fn current_status(&self) -> Result<Status, Fatal> {
        let (tx, rx) = oneshot::channel();
        self.inner.call_core(APIMessage::Status { tx }, rx).await
    }

    /// The latest published status: the running election and its tally, or
    /// idle.
    ///
    /// It does not wait: until the Core has loaded the snapshot it returns
    /// the initial idle status. Use [`Elector::current_status`] or
    /// [`Elector::wait`] to observe a restored election.
    pub fn status(&self) -> Status {
        self.inner.rx_status.borrow().clone()
    }

    /// Get a handle to the status channel.
    pub fn status_watcher(&self) -> watch::Receiver<Status> {
        self.inner.rx_status.clone()
    }

    /// Get a handle to wait for the status to satisfy some condition.
    ///
    /// If `timeout` is `None`, then it will wait forever(10 years).
    /// If `timeout` is `Some`, then it will wait for the specified duration.
    ///
    /// ```ignore
    /// # use std::time::Duration;
    ///
    /// let timeout = Duration::from_millis(200);
    ///
    /// // wait for the election to be resolved:
    /// elector.wait(Some(timeout)).idle("resolved").await?;
    /// ```
    pub fn wait(&self, timeout: Option<Duration>) -> Wait {
        let timeout = match timeout {
            Some(t) => t,
            None => Duration::from_secs(86400 * 365 * 10),
        };
        Wait {
            timeout,
            rx: self.inner.rx_status.clone(),
        }
    }

    /// Shut down the Core and the pending resolver.
    ///
    /// The resolver quits without announcing or writing. Returns the error
    /// the Core quit with, if it did not quit normally.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn shutdown(&self) -> Result<(), Fatal> {
        if self.inner.is_core_running() {
            tracing::info!("signal Core to shut down");
            self.inner.tx_shutdown.send_replace(true);
        }

        self.inner.join_core_task().await;

        let core_res = {
            let state = self.inner.core_state.lock().unwrap();
            if let CoreState::Done(core_task_res) = &*state {
                core_task_res.clone()
            } else {
                unreachable!("Core should have already quit")
            }
        };

        match core_res {
            Ok(never) => match never {},
            Err(Fatal::Stopped) => Ok(()),
            Err(fatal) => Err(fatal),
        }
    }
}
