//! A butler that organizes teatime.
//!
//! Every stdin line is `<who> <params>`, as if `<who>` typed
//! `.teatime <params>` in a chat channel, e.g.:
//!
//! ```text
//! alice start 5
//! bob Kitchen
//! carol suggest The Red Lion
//! alice
//! ```

mod butler;
mod logging;

use std::sync::Arc;

use clap::Parser;
use elector::Command;
use elector::Elector;
use elector::SystemClock;
use filestore::FileStore;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::butler::Butler;
use crate::logging::init_logging;

#[derive(Debug, Parser)]
#[clap(name = "teatime", about = "Vote on where to take tea")]
struct Args {
    #[clap(flatten)]
    config: elector::Config,

    /// Where the election snapshot is kept.
    #[clap(long, default_value = "_teatime")]
    dir: String,

    #[clap(long, default_value = "_log")]
    log_dir: String,

    /// Used when `RUST_LOG` is not set.
    #[clap(long, default_value = "INFO")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let g = init_logging("teatime", &args.log_dir, &args.log_level);
    Box::leak(Box::new(g));

    let config = Arc::new(args.config.validate()?);
    tracing::info!("config: {:?}", config);

    let elector = Elector::new(
        config,
        SystemClock,
        FileStore::new(&args.dir),
        Butler,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (who, params) = match line.split_once(char::is_whitespace) {
            Some((w, p)) => (w, Some(p)),
            None => (line, None),
        };

        let command = Command::parse(params);
        let outcome = elector.handle(who, command).await?;

        println!("{}: {}", who, butler::reply(&outcome));
    }

    elector.shutdown().await?;
    Ok(())
}
