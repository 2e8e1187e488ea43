use std::time::Duration;

use bluezrs::{Adapter, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let adapter = Adapter::default_adapter().await?;
    adapter.set_powered(true).await?;

    // Print scan state transitions while the window runs
    let watcher = {
        let adapter = adapter.clone();
        tokio::spawn(async move {
            let _ = adapter
                .monitor_discovering(|active| println!("discovering: {active}"))
                .await;
        })
    };

    println!("Scanning for 10 seconds...");
    adapter.discover_nearby(Duration::from_secs(10)).await?;

    watcher.abort();
    Ok(())
}
