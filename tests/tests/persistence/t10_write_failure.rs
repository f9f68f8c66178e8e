use anyhow::Result;
use elector::errors::StartError;
use elector::errors::VoteError;
use elector::Config;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;

/// A failed write is reported to the caller while the in-memory change
/// stands, and the election still resolves at its deadline.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn write_failure() -> Result<()> {
    let f = Fixture::new(Config::default())?;

    f.store.set_fail_writes(true);

    tracing::info!("--- start is not durable");
    {
        let res = f.elector.start(Some(60)).await?;
        assert!(
            matches!(res, Err(StartError::PersistenceUnavailable(_))),
            "got: {:?}",
            res
        );
        assert_eq!(None, f.snapshot()?);
        assert_eq!(Some(1), f.elector.status().active_generation());
    }

    tracing::info!("--- vote is not durable");
    {
        let res = f.elector.vote("alice", "Kitchen").await?;
        assert!(
            matches!(res, Err(VoteError::PersistenceUnavailable(_))),
            "got: {:?}",
            res
        );
        assert_eq!(1, f.elector.status().election.unwrap().voters);
    }

    tracing::info!("--- store recovers, next write carries everything");
    {
        f.store.set_fail_writes(false);
        f.elector.vote("bob", "Kitchen").await??;

        assert_eq!(
            Some(json!({"alice": "Kitchen", "bob": "Kitchen"})),
            f.snapshot()?.map(|s| s["votes"].clone())
        );
    }

    tracing::info!("--- resolution with a failing store still announces");
    {
        f.store.set_fail_writes(true);
        f.clock.advance(60);
        let status = f.wait().resolved(1, "resolved").await?;

        assert!(status.is_idle());
        assert_eq!(
            vec!["Kitchen was chosen with 2 votes".to_string()],
            f.announcer.texts()
        );
        assert_eq!(Some(json!(true)), f.snapshot()?.map(|s| s["started"].clone()));
    }

    Ok(())
}
