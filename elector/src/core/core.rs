use std::io;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::watch;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing::Instrument;
use tracing::Level;
use tracing::Span;

use crate::announcer::Announcer;
use crate::clock::Clock;
use crate::config::Config;
use crate::core::io::api_message::APIMessage;
use crate::core::io::notification::Notification;
use crate::core::resolver::Resolver;
use crate::core::resolver::ResolverHandle;
use crate::election::Election;
use crate::election::Resolution;
use crate::election::Started;
use crate::election::VoteAccepted;
use crate::election::Withdrawn;
use crate::errors::CorruptSnapshot;
use crate::errors::Fatal;
use crate::errors::Infallible;
use crate::errors::NotActive;
use crate::errors::PersistenceUnavailable;
use crate::errors::StartError;
use crate::errors::StopError;
use crate::errors::VoteError;
use crate::errors::WithdrawError;
use crate::metrics::ActiveStatus;
use crate::metrics::Status;
use crate::storage::SnapshotStore;
use crate::storage::SnapshotStoreExt;

/// The task that owns the election state and serializes every change to it.
pub(crate) struct Core<Clk, Sto, Ann>
where
    Clk: Clock,
    Sto: SnapshotStore,
    Ann: Announcer,
{
    pub(crate) config: Arc<Config>,

    pub(crate) clock: Clk,

    /// The [`SnapshotStore`] implementation.
    pub(crate) store: Sto,

    pub(crate) announcer: Ann,

    pub(crate) election: Election,

    /// The resolver spawned for the latest started election, if it has not
    /// reported back yet.
    pub(crate) resolver: Option<ResolverHandle>,

    /// Number of elections ended, by deadline or by stop.
    pub(crate) resolved: u64,

    /// Number of resolver wake-ups discarded because their generation is no
    /// longer running.
    pub(crate) stale_wakeups: u64,

    pub(crate) rx_api: mpsc::UnboundedReceiver<APIMessage>,

    /// Kept so that resolvers can be given a weak sender and the receiver
    /// never closes while Core runs.
    pub(crate) tx_notification: mpsc::UnboundedSender<Notification>,

    pub(crate) rx_notification: mpsc::UnboundedReceiver<Notification>,

    pub(crate) tx_status: watch::Sender<Status>,

    pub(crate) rx_shutdown: watch::Receiver<bool>,

    pub(crate) span: Span,
}

impl<Clk, Sto, Ann> Core<Clk, Sto, Ann>
where
    Clk: Clock,
    Sto: SnapshotStore,
    Ann: Announcer,
{
    /// The main loop of the elector.
    pub(crate) async fn main(mut self) -> Result<Infallible, Fatal> {
        debug!("Elector core started");

        let span = self.span.clone();
        self.load().instrument(span).await;
        self.report_status();

        let span = tracing::span!(parent: &self.span, Level::DEBUG, "main");
        let res = self.runtime_loop().instrument(span).await;

        // A resolver quits on the shutdown signal without notifying.
        if let Some(resolver) = self.resolver.take() {
            resolver.join().await;
        }

        let err = match res {
            Ok(never) => match never {},
            Err(e) => e,
        };

        match err {
            Fatal::Stopped => { /* Normal quit */ }
            _ => {
                error!(error = display(&err), "quit Core::main on error");
            }
        }

        debug!("update the status for shutdown");
        {
            let mut curr = self.tx_status.borrow().clone();
            curr.running_state = Err(err.clone());

            let _ = self.tx_status.send(curr);
        }

        info!("Core shutdown complete");

        Err(err)
    }

    /// Restore the election from the store.
    ///
    /// An unreadable store or a corrupt snapshot starts the engine idle. An
    /// election whose deadline passed while the process was down is resolved
    /// before any request is served.
    async fn load(&mut self) {
        let key = self.config.snapshot_key.clone();

        let read_res = self.store.read_snapshot(&key).await;

        let snapshot = match read_res {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                info!(key = display(&key), "no snapshot found, start idle");
                return;
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                self.reset_corrupt(CorruptSnapshot::new(e)).await;
                return;
            }
            Err(e) => {
                warn!(
                    key = display(&key),
                    error = display(&e),
                    "snapshot store unavailable, start idle"
                );
                return;
            }
        };

        info!(key = display(&key), "loaded snapshot: {}", snapshot);

        self.election = match Election::from_snapshot(snapshot) {
            Ok(election) => election,
            Err(corrupt) => {
                self.reset_corrupt(corrupt).await;
                return;
            }
        };

        let Some(active) = self.election.active() else {
            return;
        };

        let (generation, deadline) = (active.generation, active.deadline);

        if self.election.is_due(self.clock.now()) {
            info!(
                generation,
                deadline, "deadline passed while down, resolve now"
            );
            self.resolve().await;
        } else {
            info!(generation, deadline, "resume election");
            self.spawn_resolver(generation, deadline);
        }
    }

    async fn reset_corrupt(&mut self, corrupt: CorruptSnapshot) {
        warn!(
            error = display(&corrupt),
            "discard corrupt snapshot, start idle"
        );

        self.election = Election::new();
        self.save().await.ok();
    }

    /// Run an event handling loop
    ///
    /// It always returns a [`Fatal`] error upon returning.
    #[tracing::instrument(level = "debug", skip_all)]
    async fn runtime_loop(&mut self) -> Result<Infallible, Fatal> {
        loop {
            debug!("runtime_loop: wait for next event");

            futures::select_biased! {
                _ = self.rx_shutdown.changed().fuse() => {
                    info!("received shutdown signal");
                    return Err(Fatal::Stopped);
                }

                notify_res = self.rx_notification.recv().fuse() => {
                    match notify_res {
                        Some(notify) => self.handle_notification(notify).await,
                        None => {
                            tracing::error!("all rx_notification senders are dropped");
                            return Err(Fatal::Stopped);
                        }
                    };
                }

                msg_res = self.rx_api.recv().fuse() => {
                    match msg_res {
                        Some(msg) => self.handle_api_msg(msg).await,
                        None => {
                            tracing::info!("all rx_api senders are dropped");
                            return Err(Fatal::Stopped);
                        }
                    };
                }
            }
        }
    }

    pub(crate) async fn handle_api_msg(&mut self, msg: APIMessage) {
        debug!("received APIMessage: {}", msg);

        match msg {
            APIMessage::Start { duration, tx } => {
                let res = self.start(duration).await;
                self.report_status();
                send_reply(tx, res);
            }
            APIMessage::Vote {
                participant,
                option,
                tx,
            } => {
                let res = self.vote(&participant, &option).await;
                self.report_status();
                send_reply(tx, res);
            }
            APIMessage::Withdraw { participant, tx } => {
                let res = self.withdraw(&participant).await;
                self.report_status();
                send_reply(tx, res);
            }
            APIMessage::Stop { tx } => {
                let res = self.stop().await;
                self.report_status();
                send_reply(tx, res);
            }
            APIMessage::Status { tx } => {
                send_reply(tx, self.current_status());
            }
        }
    }

    pub(crate) async fn handle_notification(&mut self, notify: Notification) {
        debug!("received Notification: {}", notify);

        match notify {
            Notification::DeadlineReached {
                generation,
                deadline,
            } => {
                if self.resolver.as_ref().map(|r| r.generation)
                    == Some(generation)
                {
                    // The task has finished its job.
                    self.resolver = None;
                }

                let running = self.election.active().map(|a| a.generation);

                if running != Some(generation) {
                    info!(
                        generation,
                        running = debug(running),
                        "stale resolver wake-up, ignore"
                    );
                    self.stale_wakeups += 1;
                    self.report_status();
                    return;
                }

                // The clock may have been set back.
                if !self.election.is_due(self.clock.now()) {
                    warn!(generation, deadline, "woke up before deadline");
                    self.spawn_resolver(generation, deadline);
                    return;
                }

                self.resolve().await;
                self.report_status();
            }
        }
    }

    async fn start(
        &mut self,
        duration: Option<i64>,
    ) -> Result<Started, StartError> {
        let now = self.clock.now();
        let duration = self.config.election_duration(duration);

        let started = self.election.start(now, duration)?;

        info!(
            generation = started.generation,
            deadline = started.deadline,
            "election started, lasts {:?}",
            duration
        );

        self.spawn_resolver(started.generation, started.deadline);
        self.save().await?;

        Ok(started)
    }

    async fn vote(
        &mut self,
        participant: &str,
        option: &str,
    ) -> Result<VoteAccepted, VoteError> {
        let accepted = self.election.cast_vote(participant, option)?;

        debug!(
            participant,
            option = display(&accepted.option),
            leader = display(&accepted.leader),
            "vote recorded"
        );

        self.save().await?;
        Ok(accepted)
    }

    async fn withdraw(
        &mut self,
        participant: &str,
    ) -> Result<Withdrawn, WithdrawError> {
        let withdrawn = self.election.withdraw(participant)?;

        debug!(
            participant,
            previous = debug(&withdrawn.previous),
            "vote withdrawn"
        );

        self.save().await?;
        Ok(withdrawn)
    }

    /// End the running election at once.
    ///
    /// Its resolver keeps sleeping and is discarded as stale when it wakes.
    async fn stop(&mut self) -> Result<Resolution, StopError> {
        let resolution = self.election.finish().ok_or(NotActive {})?;

        info!("election stopped: {}", resolution);

        if self.config.announce_on_stop {
            self.announce(&resolution);
        }
        self.resolved += 1;

        self.save().await?;
        Ok(resolution)
    }

    /// Tally, announce and reset the running election.
    async fn resolve(&mut self) {
        let Some(resolution) = self.election.finish() else {
            return;
        };

        info!("election resolved: {}", resolution);

        self.announce(&resolution);
        self.resolved += 1;

        // No caller to report to; `save()` has logged it.
        self.save().await.ok();
    }

    fn announce(&self, resolution: &Resolution) {
        let announcement = resolution.announcement();
        info!("announce: {}", announcement);
        self.announcer.announce(&announcement);
    }

    fn spawn_resolver(&mut self, generation: u64, deadline: u64) {
        if let Some(prev) = self.resolver.take() {
            debug!(prev = prev.generation, "abort previous resolver");
            prev.abort();
        }

        let handle = Resolver::spawn(
            generation,
            deadline,
            self.clock.clone(),
            self.tx_notification.downgrade(),
            self.rx_shutdown.clone(),
        );

        self.resolver = Some(handle);
    }

    /// Write the current election to the store.
    async fn save(&mut self) -> Result<(), PersistenceUnavailable> {
        let snapshot = self.election.to_snapshot();
        let key = &self.config.snapshot_key;

        let res = self.store.write_snapshot(key, &snapshot).await;

        if let Err(e) = &res {
            error!(
                key = display(key),
                error = display(e),
                "failed to save snapshot: {}",
                snapshot
            );
        }

        res.map_err(|e| PersistenceUnavailable::new(&e))
    }

    /// Publish the current state to [`Elector::status`] watchers.
    ///
    /// [`Elector::status`]: crate::Elector::status
    pub(crate) fn report_status(&mut self) {
        let status = self.current_status();

        debug!("report_status: {}", status);
        let res = self.tx_status.send(status);

        if let Err(err) = res {
            error!(error=%err, "error reporting status");
        }
    }

    pub(crate) fn current_status(&self) -> Status {
        let election = self.election.active().map(|a| ActiveStatus {
            generation: a.generation,
            deadline: a.deadline,
            voters: a.votes.len(),
            tally: a.votes.tally(),
        });

        Status {
            running_state: Ok(()),
            last_generation: self.election.last_generation(),
            election,
            resolved: self.resolved,
            stale_wakeups: self.stale_wakeups,
        }
    }
}

fn send_reply<T>(tx: oneshot::Sender<T>, res: T) {
    if tx.send(res).is_err() {
        warn!("caller dropped the reply receiver");
    }
}
