use anyhow::Result;
use elector::errors::InvalidOption;
use elector::errors::NotActive;
use elector::errors::VoteError;
use elector::Config;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;

/// One vote per participant: voting again replaces the earlier vote.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn vote_replaces() -> Result<()> {
    let f = Fixture::new(Config::default())?;

    f.elector.start(None).await??;

    let accepted = f.elector.vote("alice", "  Kitchen ").await??;
    assert_eq!("Kitchen", accepted.option);
    assert_eq!(None, accepted.replaced);

    let accepted = f.elector.vote("alice", "Hall").await??;
    assert_eq!("Hall", accepted.option);
    assert_eq!(Some("Kitchen".to_string()), accepted.replaced);
    assert_eq!("Hall", accepted.leader.option);
    assert_eq!(1, accepted.leader.votes);

    let status = f.elector.status();
    let active = status.election.unwrap();
    assert_eq!(1, active.voters);
    assert_eq!(vec![("Hall", 1)], active.tally.pairs());

    assert_eq!(
        Some(json!({"alice": "Hall"})),
        f.snapshot()?.map(|s| s["votes"].clone())
    );

    Ok(())
}

/// Ties go to the option whose earliest standing vote came first.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn vote_tie_break() -> Result<()> {
    let f = Fixture::new(Config::default())?;

    f.elector.start(None).await??;

    f.elector.vote("alice", "Hall").await??;
    let accepted = f.elector.vote("bob", "Kitchen").await??;
    assert_eq!("Hall", accepted.leader.option);

    // alice re-votes: her Hall vote is now newer than bob's Kitchen vote.
    f.elector.vote("alice", "Garden").await??;
    let accepted = f.elector.vote("alice", "Hall").await??;
    assert_eq!("Kitchen", accepted.leader.option);

    Ok(())
}

/// Voting without an election or with a blank option is refused and
/// changes nothing.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn vote_refused() -> Result<()> {
    let f = Fixture::new(Config::default())?;

    let res = f.elector.vote("alice", "Kitchen").await?;
    assert_eq!(Err(VoteError::NotActive(NotActive {})), res);
    assert_eq!(None, f.snapshot()?);

    f.elector.start(None).await??;
    f.elector.vote("alice", "Kitchen").await??;
    let before = f.snapshot()?;

    for blank in ["", "   ", "\t"] {
        let res = f.elector.vote("alice", blank).await?;
        assert_eq!(
            Err(VoteError::InvalidOption(InvalidOption::new(blank))),
            res
        );
    }

    assert_eq!(before, f.snapshot()?);

    Ok(())
}
