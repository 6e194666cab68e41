//! blocker - check values against DNS-based and text-based blocklists.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    blocker_cli::run().await
}
