use anyhow::Result;
use elector::errors::AlreadyActive;
use elector::errors::ElectionError;
use elector::Command;
use elector::Config;
use elector::Outcome;
use pretty_assertions::assert_eq;

use crate::fixtures::ut_harness;
use crate::fixtures::Fixture;
use crate::fixtures::T0;

/// Chat commands are parsed and dispatched to the elector.
#[tracing::instrument]
#[test_harness::test(harness = ut_harness)]
async fn command_dispatch() -> Result<()> {
    let f = Fixture::new(Config::default())?;
    let el = &f.elector;

    let handle = |who: &'static str, params: Option<&'static str>| {
        let el = el.clone();
        async move { el.handle(who, Command::parse(params)).await }
    };

    tracing::info!("--- idle");
    {
        let Outcome::Status(status) = handle("alice", None).await? else {
            panic!("expect status");
        };
        assert!(status.is_idle());

        let Outcome::Failed(ElectionError::NotActive(_)) =
            handle("alice", Some("Kitchen")).await?
        else {
            panic!("expect NotActive");
        };

        let Outcome::Help(usage) = handle("alice", Some("help")).await? else {
            panic!("expect help");
        };
        assert_eq!(Command::USAGE, usage);
    }

    tracing::info!("--- start takes minutes");
    {
        let Outcome::Started(started) =
            handle("alice", Some("start 5")).await?
        else {
            panic!("expect started");
        };
        assert_eq!(T0 + 300, started.deadline);

        let Outcome::Failed(err) = handle("bob", Some("start")).await? else {
            panic!("expect failure");
        };
        let already: AlreadyActive = err.try_into()?;
        assert_eq!(1, already.generation);
        assert_eq!(T0 + 300, already.deadline);
    }

    tracing::info!("--- votes");
    {
        let Outcome::Voted(v) =
            handle("alice", Some("suggest The Red Lion")).await?
        else {
            panic!("expect voted");
        };
        assert_eq!("The Red Lion", v.option);

        handle("bob", Some("Kitchen")).await?;
        handle("carol", Some("Kitchen")).await?;

        let Outcome::Failed(ElectionError::InvalidOption(_)) =
            handle("dave", Some("suggest")).await?
        else {
            panic!("expect InvalidOption");
        };

        let Outcome::Withdrawn(w) = handle("carol", Some("withdraw")).await?
        else {
            panic!("expect withdrawn");
        };
        assert_eq!(Some("Kitchen".to_string()), w.previous);

        let Outcome::Status(status) = handle("dave", Some("status")).await?
        else {
            panic!("expect status");
        };
        assert_eq!(
            vec![("The Red Lion", 1), ("Kitchen", 1)],
            status.election.unwrap().tally.pairs()
        );
    }

    tracing::info!("--- stop");
    {
        let Outcome::Stopped(res) = handle("alice", Some("stop")).await? else {
            panic!("expect stopped");
        };
        assert_eq!("The Red Lion", res.winner().unwrap().option);
        assert_eq!(0, f.announcer.count());
    }

    Ok(())
}
