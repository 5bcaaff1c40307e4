//! Prints statistics about the nginx logs stored in MongoDB, including the
//! ten most frequent client addresses.

use nosql_kit::docs::{connect_collection, LogStats, TOP_IPS_LIMIT};
use nosql_kit::logging::init_tracing;
use nosql_kit::Config;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env();
    let collection =
        connect_collection(&config.mongo_uri, &config.log_db, &config.log_collection).await?;

    let stats = LogStats::collect(&collection, true).await?;
    print!("{stats}");

    info!(
        "Reported {} logs with top {} addresses",
        stats.total, TOP_IPS_LIMIT
    );
    Ok(())
}
