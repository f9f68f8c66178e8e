use anyhow::Result;
use elector::errors::NotActive;
use elector::errors::StopError;
use elector::Announcement;
use elector::Config;
use pretty_assertions::assert_eq;

use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;

/// With `announce_on_stop`, a stopped election is announced by the stop and
/// never again: not by a second stop, not by its resolver at the deadline.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn stop_announce_once() -> Result<()> {
    let config = Config::build(&["teatime", "--announce-on-stop"])?;
    let f = Fixture::new(config)?;

    f.elector.start(Some(600)).await??;
    f.elector.vote("alice", "Kitchen").await??;

    tracing::info!("--- stop announces");
    {
        let resolution = f.elector.stop().await??;
        assert_eq!(1, resolution.generation);
        assert_eq!(1, f.announcer.count());
    }

    tracing::info!("--- stop again");
    {
        let res = f.elector.stop().await?;
        assert_eq!(Err(StopError::NotActive(NotActive {})), res);
        assert_eq!(1, f.announcer.count());
    }

    tracing::info!("--- the stopped election's deadline");
    {
        f.clock.advance(600);
        let status =
            f.wait().stale_wakeups(1, "stale resolver woke up").await?;

        assert!(status.is_idle());
        assert_eq!(1, status.resolved);
    }

    assert_eq!(
        vec![Announcement::Chosen {
            generation: 1,
            option: "Kitchen".to_string(),
            votes: 1,
        }],
        f.announcer.announcements()
    );

    Ok(())
}
