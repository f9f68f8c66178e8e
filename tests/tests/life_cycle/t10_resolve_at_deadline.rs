use anyhow::Result;
use elector::Announcement;
use elector::Config;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;
use crate::fixtures::T0;

/// An election is resolved and announced when its deadline comes.
///
/// - start a 10 minute election; three guests vote.
/// - advance the clock to the deadline.
/// - the winner is announced once and the engine goes idle.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn resolve_at_deadline() -> Result<()> {
    let f = Fixture::new(Config::default())?;
    let el = &f.elector;

    tracing::info!("--- start");
    {
        let started = el.start(Some(600)).await??;
        assert_eq!(1, started.generation);
        assert_eq!(T0 + 600, started.deadline);
    }

    tracing::info!("--- vote");
    {
        el.vote("alice", "Kitchen").await??;
        el.vote("bob", "Hall").await??;
        let accepted = el.vote("carol", "Kitchen").await??;

        assert_eq!("Kitchen", accepted.option);
        assert_eq!("Kitchen", accepted.leader.option);
        assert_eq!(2, accepted.leader.votes);

        let status = el.status();
        let active = status.election.clone().unwrap();
        assert_eq!(1, active.generation);
        assert_eq!(3, active.voters);
        assert_eq!(vec![("Kitchen", 2), ("Hall", 1)], active.tally.pairs());

        assert_eq!(
            Some(json!({
                "started": true,
                "deadline": T0 + 600,
                "votes": {"alice": "Kitchen", "bob": "Hall", "carol": "Kitchen"},
                "generation": 1,
            })),
            f.snapshot()?
        );
    }

    tracing::info!("--- nothing happens before the deadline");
    {
        f.clock.advance(599);
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        assert_eq!(Some(1), el.status().active_generation());
        assert_eq!(0, f.announcer.count());
    }

    tracing::info!("--- deadline");
    {
        f.clock.advance(1);
        let status = f.wait().resolved(1, "resolved at deadline").await?;

        assert!(status.is_idle());
        assert_eq!(1, status.last_generation);

        assert_eq!(
            vec![Announcement::Chosen {
                generation: 1,
                option: "Kitchen".to_string(),
                votes: 2,
            }],
            f.announcer.announcements()
        );
        assert_eq!(
            vec!["Kitchen was chosen with 2 votes".to_string()],
            f.announcer.texts()
        );

        assert_eq!(
            Some(json!({"started": false, "generation": 1})),
            f.snapshot()?
        );
    }

    tracing::info!("--- a new election gets the next generation");
    {
        let started = el.start(None).await??;
        assert_eq!(2, started.generation);
        assert_eq!(T0 + 600 + f.config.default_duration, started.deadline);
    }

    Ok(())
}
