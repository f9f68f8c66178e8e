use anyhow::Result;
use elector::Config;
use memstore::MemStore;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::put_snapshot;
use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;
use crate::fixtures::T0;

/// An election whose deadline passed while the process was down is resolved
/// and announced when the elector starts, before any request is served.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn restart_after_deadline() -> Result<()> {
    let config = Config::default();
    let store = MemStore::new();

    put_snapshot(
        &store,
        &config,
        &json!({
            "started": true,
            "deadline": T0 - 10,
            "votes": {"alice": "Kitchen", "bob": "Hall", "carol": "Hall"},
            "generation": 7,
        }),
    );

    let f = Fixture::with_store(config, store)?;

    tracing::info!("--- the first request sees the resolved state");
    {
        let started = f.elector.start(None).await??;
        assert_eq!(8, started.generation);
    }

    assert_eq!(
        vec!["Hall was chosen with 2 votes".to_string()],
        f.announcer.texts()
    );
    assert_eq!(1, f.elector.status().resolved);

    Ok(())
}

/// A snapshot written by a plain `{"started": false}` host loads as idle.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn restart_from_minimal_idle_snapshot() -> Result<()> {
    let config = Config::default();
    let store = MemStore::new();

    put_snapshot(&store, &config, &json!({"started": false}));

    let f = Fixture::with_store(config, store)?;

    let res = f.elector.stop().await?;
    assert!(res.is_err(), "nothing to stop: {:?}", res);

    let started = f.elector.start(None).await??;
    assert_eq!(1, started.generation);
    assert_eq!(0, f.announcer.count());

    Ok(())
}
