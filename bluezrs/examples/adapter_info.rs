use bluezrs::{Adapter, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Pass an address to pick a specific adapter, default to the first one
    let adapter = match std::env::args().nth(1) {
        Some(address) => Adapter::new(&address).await?,
        None => Adapter::default_adapter().await?,
    };

    println!("{}", adapter.info().await?);

    println!("\nFull property set:");
    for (key, value) in adapter.get_all().await? {
        println!("  {key}: {value:?}");
    }

    println!("\nService UUIDs:");
    for uuid in adapter.uuids().await? {
        println!("  {uuid}");
    }

    Ok(())
}
