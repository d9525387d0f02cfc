//! # Fixture Server Command
//!
//! ```text
//! rocketshoes serve --db fixtures/db.json --port 3333
//!      │
//!      ├── Fixture::load(db)
//!      ├── FixtureHandle::spawn(fixture, host:port)
//!      ├── wait for Ctrl-C
//!      └── handle.shutdown()   ← graceful, in-flight requests finish
//! ```

use std::path::Path;

use tracing::info;

use rocketshoes_api::{Fixture, FixtureHandle};

pub async fn run(db: &Path, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::load(db)?;
    let bind_addr = format!("{}:{}", host, port);

    let handle = FixtureHandle::spawn(fixture, &bind_addr).await?;
    info!(url = %handle.base_url(), "Fixture server running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;

    info!("Shutting down fixture server");
    handle.shutdown().await?;
    Ok(())
}
