//! BlueZ adapter proxy.

use zbus::{Result, proxy};

/// Proxy for the `org.bluez.Adapter1` interface.
///
/// Represents a local Bluetooth controller (e.g. hci0). Provides typed
/// access to the adapter's properties and its discovery methods.
///
/// # Example
///
/// ```ignore
/// use zbus::Connection;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let conn = Connection::system().await?;
/// let proxy = BluezAdapterProxy::builder(&conn)
///     .path("/org/bluez/hci0")?
///     .build()
///     .await?;
///
/// println!("{} powered: {}", proxy.address().await?, proxy.powered().await?);
/// # Ok(())
/// # }
/// ```
#[proxy(interface = "org.bluez.Adapter1", default_service = "org.bluez")]
pub(crate) trait BluezAdapter {
    /// Start scanning for nearby Bluetooth devices.
    fn start_discovery(&self) -> Result<()>;

    /// Stop an ongoing discovery session started by this client.
    fn stop_discovery(&self) -> Result<()>;

    /// The Bluetooth hardware address of this adapter ("XX:XX:XX:XX:XX:XX").
    #[zbus(property)]
    fn address(&self) -> Result<String>;

    /// The system-assigned adapter name. Read-only; use the alias to rename.
    #[zbus(property)]
    fn name(&self) -> Result<String>;

    /// User-friendly name for this adapter.
    #[zbus(property)]
    fn alias(&self) -> Result<String>;

    /// Set the adapter alias.
    #[zbus(property)]
    fn set_alias(&self, value: &str) -> Result<()>;

    /// The Class of Device bitmask (service classes, major and minor class).
    #[zbus(property, name = "Class")]
    fn class(&self) -> Result<u32>;

    /// Whether the adapter radio is powered on.
    #[zbus(property)]
    fn powered(&self) -> Result<bool>;

    /// Set the adapter power state.
    #[zbus(property)]
    fn set_powered(&self, value: bool) -> Result<()>;

    /// Whether the adapter is visible to nearby devices.
    #[zbus(property)]
    fn discoverable(&self) -> Result<bool>;

    /// Set the discoverable state.
    #[zbus(property)]
    fn set_discoverable(&self, value: bool) -> Result<()>;

    /// Seconds the adapter stays discoverable; 0 means forever.
    #[zbus(property)]
    fn discoverable_timeout(&self) -> Result<u32>;

    /// Set the discoverable timeout in seconds.
    #[zbus(property)]
    fn set_discoverable_timeout(&self, value: u32) -> Result<()>;

    /// Whether the adapter accepts incoming pairing requests.
    #[zbus(property)]
    fn pairable(&self) -> Result<bool>;

    /// Set the pairable state.
    #[zbus(property)]
    fn set_pairable(&self, value: bool) -> Result<()>;

    /// Seconds the adapter stays pairable; 0 means forever.
    #[zbus(property)]
    fn pairable_timeout(&self) -> Result<u32>;

    /// Set the pairable timeout in seconds.
    #[zbus(property)]
    fn set_pairable_timeout(&self, value: u32) -> Result<()>;

    /// Whether a device discovery scan is currently active.
    #[zbus(property)]
    fn discovering(&self) -> Result<bool>;

    /// Service UUIDs supported by the local adapter.
    #[zbus(property, name = "UUIDs")]
    fn uuids(&self) -> Result<Vec<String>>;
}
