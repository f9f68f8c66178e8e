use anyhow::Result;
use elector::Config;
use pretty_assertions::assert_eq;

use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;

/// A resolver whose election has been stopped wakes up, finds its
/// generation no longer running and does nothing.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn stop_before_deadline() -> Result<()> {
    let f = Fixture::new(Config::default())?;

    f.elector.start(Some(600)).await??;
    f.elector.vote("alice", "Kitchen").await??;
    f.elector.stop().await??;

    let snapshot = f.snapshot()?;

    f.clock.advance(600);
    let status = f.wait().stale_wakeups(1, "stale resolver woke up").await?;

    assert!(status.is_idle());
    assert_eq!(1, status.resolved);
    assert_eq!(0, f.announcer.count());
    assert_eq!(snapshot, f.snapshot()?);

    Ok(())
}
