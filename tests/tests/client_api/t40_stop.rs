use anyhow::Result;
use elector::errors::NotActive;
use elector::errors::StopError;
use elector::Announcement;
use elector::Config;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;

/// Stop returns the tally to the caller without announcing it.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn stop() -> Result<()> {
    let f = Fixture::new(Config::default())?;

    f.elector.start(None).await??;
    f.elector.vote("alice", "Kitchen").await??;
    f.elector.vote("bob", "Kitchen").await??;
    f.elector.vote("carol", "Hall").await??;

    let resolution = f.elector.stop().await??;
    assert_eq!(1, resolution.generation);
    assert_eq!(vec![("Kitchen", 2), ("Hall", 1)], resolution.tally.pairs());
    assert_eq!("Kitchen", resolution.winner().unwrap().option);

    let status = f.elector.status();
    assert!(status.is_idle());
    assert_eq!(1, status.resolved);
    assert_eq!(0, f.announcer.count());
    assert_eq!(
        Some(json!({"started": false, "generation": 1})),
        f.snapshot()?
    );

    tracing::info!("--- stop again");
    {
        let res = f.elector.stop().await?;
        assert_eq!(Err(StopError::NotActive(NotActive {})), res);
        assert_eq!(1, f.elector.status().resolved);
    }

    Ok(())
}

/// With `announce_on_stop` a stopped election is also announced.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn stop_announce() -> Result<()> {
    let config = Config::build(&["teatime", "--announce-on-stop"])?;
    let f = Fixture::new(config)?;

    f.elector.start(None).await??;
    f.elector.vote("alice", "Kitchen").await??;
    f.elector.stop().await??;

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
