use anyhow::Result;
use elector::Config;
use memstore::MemStore;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fixtures::put_snapshot;
use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;

/// A corrupt snapshot is discarded: the elector starts idle and overwrites
/// it with an idle one.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn corrupt_snapshot() -> Result<()> {
    let config = Config::default();

    let corrupt = [
        "not json".to_string(),
        json!({"started": true}).to_string(),
        json!({"started": true, "deadline": 1}).to_string(),
        json!({"started": false, "votes": {"alice": "Kitchen"}}).to_string(),
        json!({"started": true, "deadline": 1, "generation": 1, "votes": ["Kitchen"]})
            .to_string(),
        json!({"deadline": 1}).to_string(),
    ];

    for raw in corrupt {
        tracing::info!("--- load: {}", raw);

        let store = MemStore::new();
        store.put(&config.snapshot_key, raw.as_str());

        let f = Fixture::with_store(config.clone(), store)?;

        let res = f.elector.stop().await?;
        assert!(res.is_err(), "idle after {}: {:?}", raw, res);

        assert_eq!(
            Some(json!({"started": false, "generation": 0})),
            f.snapshot()?,
            "rewritten after {}",
            raw
        );
        assert_eq!(0, f.announcer.count());

        let started = f.elector.start(None).await??;
        assert_eq!(1, started.generation);

        f.elector.shutdown().await?;
    }

    Ok(())
}

/// Extra fields a snapshot may carry are ignored.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn unknown_fields() -> Result<()> {
    let config = Config::default();
    let store = MemStore::new();

    put_snapshot(
        &store,
        &config,
        &json!({"started": false, "generation": 4, "owner": "tophat"}),
    );

    let f = Fixture::with_store(config, store)?;

    let started = f.elector.start(None).await??;
    assert_eq!(5, started.generation);

    Ok(())
}
