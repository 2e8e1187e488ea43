use bluezrs::{Adapter, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let adapter = Adapter::default_adapter().await?;

    adapter.set_powered(true).await?;
    adapter.set_discoverable_timeout(180).await?;
    adapter.set_discoverable(true).await?;

    println!(
        "Adapter {} discoverable for {} seconds",
        adapter.address().await?,
        adapter.discoverable_timeout().await?
    );

    Ok(())
}
