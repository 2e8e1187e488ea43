use bluezrs::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let adapters = bluezrs::list_adapters().await?;

    if adapters.is_empty() {
        println!("No Bluetooth adapters registered");
        return Ok(());
    }

    for address in adapters {
        println!("{address}");
    }

    Ok(())
}
