use anyhow::Result;
use elector::Command;
use elector::Config;
use elector::Outcome;
use memstore::MemStore;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::put_snapshot;
use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;
use crate::fixtures::T0;

/// A status request sent right after the elector is built is answered after
/// the snapshot is loaded, so it sees the restored election.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn status_right_after_restart() -> Result<()> {
    let config = Config::default();

    for i in 0..10 {
        tracing::info!("--- round {}", i);

        let store = MemStore::new();
        put_snapshot(
            &store,
            &config,
            &json!({
                "started": true,
                "deadline": T0 + 600,
                "votes": {"alice": "Kitchen"},
                "generation": 7,
            }),
        );

        let f = Fixture::with_store(config.clone(), store)?;

        let Outcome::Status(status) =
            f.elector.handle("bob", Command::Status).await?
        else {
            panic!("expect status");
        };

        assert_eq!(7, status.last_generation);
        let active = status.election.unwrap();
        assert_eq!(7, active.generation);
        assert_eq!(T0 + 600, active.deadline);
        assert_eq!(vec![("Kitchen", 1)], active.tally.pairs());

        f.elector.shutdown().await?;
    }

    Ok(())
}

/// `current_status` is queued behind loading, including a resolution of an
/// election whose deadline passed while down.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn current_status_after_overdue_restart() -> Result<()> {
    let config = Config::default();
    let store = MemStore::new();

    put_snapshot(
        &store,
        &config,
        &json!({
            "started": true,
            "deadline": T0 - 1,
            "votes": {"alice": "Kitchen"},
            "generation": 3,
        }),
    );

    let f = Fixture::with_store(config, store)?;

    let status = f.elector.current_status().await?;
    assert!(status.is_idle());
    assert_eq!(3, status.last_generation);
    assert_eq!(1, status.resolved);
    assert_eq!(
        vec!["Kitchen was chosen with 1 votes".to_string()],
        f.announcer.texts()
    );

    Ok(())
}
