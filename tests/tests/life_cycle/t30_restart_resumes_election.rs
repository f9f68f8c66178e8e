use anyhow::Result;
use elector::Config;
use pretty_assertions::assert_eq;

use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;
use crate::fixtures::T0;

/// An election survives a restart with its deadline, votes and tie-break
/// order, and is resolved at the original deadline.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn restart_resumes_election() -> Result<()> {
    let mut f = Fixture::new(Config::default())?;

    tracing::info!("--- start and vote, a tie");
    {
        f.elector.start(Some(600)).await??;
        f.elector.vote("alice", "Hall").await??;
        f.elector.vote("bob", "Kitchen").await??;
    }

    tracing::info!("--- restart halfway");
    {
        f.clock.advance(300);
        f.restart().await?;

        let status = f.wait().active(1, "election restored").await?;
        let active = status.election.unwrap();

        assert_eq!(T0 + 600, active.deadline);
        assert_eq!(2, active.voters);
        assert_eq!(vec![("Hall", 1), ("Kitchen", 1)], active.tally.pairs());
    }

    tracing::info!("--- the restored election takes requests");
    {
        let res = f.elector.start(None).await?;
        assert!(res.is_err(), "already running: {:?}", res);

        f.elector.vote("carol", "Kitchen").await??;
    }

    tracing::info!("--- resolved at the persisted deadline");
    {
        f.clock.advance(300);
        f.wait().resolved(1, "resolved after restart").await?;

        assert_eq!(
            vec!["Kitchen was chosen with 2 votes".to_string()],
            f.announcer.texts()
        );
    }

    tracing::info!("--- generation keeps increasing after another restart");
    {
        f.restart().await?;
        let started = f.elector.start(None).await??;
        assert_eq!(2, started.generation);
    }

    Ok(())
}
