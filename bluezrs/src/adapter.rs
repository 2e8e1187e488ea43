//! The public adapter handle and enumeration functions.

use std::collections::HashMap;
use std::time::Duration;

use futures_timer::Delay;
use log::{debug, warn};
use uuid::Uuid;
use zbus::Connection;
use zvariant::{OwnedObjectPath, OwnedValue};

use crate::Result;
use crate::constants::timeouts;
use crate::core::{discovery, properties};
use crate::models::{AdapterError, AdapterInfo};
use crate::monitoring;
use crate::utils;

/// Lists the hardware addresses of all Bluetooth adapters registered with
/// BlueZ, in registry iteration order.
///
/// # Errors
///
/// Returns `ServiceUnavailable` if the system bus or the BlueZ daemon
/// cannot be reached.
pub async fn list_adapters() -> Result<Vec<String>> {
    let conn = Connection::system()
        .await
        .map_err(AdapterError::ServiceUnavailable)?;
    list_adapters_on(&conn).await
}

/// Like [`list_adapters`], but over an existing D-Bus connection.
pub async fn list_adapters_on(conn: &Connection) -> Result<Vec<String>> {
    discovery::list_adapters(conn).await
}

/// A handle to one local Bluetooth adapter exposed by BlueZ.
///
/// The handle holds the D-Bus connection and the object path resolved at
/// construction; nothing else. Every accessor is a live round-trip to the
/// daemon, so concurrent external changes (another process powering the
/// radio off, say) show up on the next read.
///
/// # Example
///
/// ```no_run
/// use bluezrs::Adapter;
///
/// # async fn example() -> bluezrs::Result<()> {
/// let adapter = Adapter::new("00:AA:01:00:00:23").await?;
/// adapter.set_powered(true).await?;
/// println!("{}", adapter.info().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Adapter {
    conn: Connection,
    path: OwnedObjectPath,
    address: String,
}

impl Adapter {
    /// Creates a handle for the adapter with the given hardware address,
    /// connecting to the system bus.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddress` for a malformed address string,
    /// `ServiceUnavailable` if the bus cannot be reached, and `NotFound`
    /// if no registered adapter carries the address.
    pub async fn new(address: &str) -> Result<Self> {
        let conn = Connection::system()
            .await
            .map_err(AdapterError::ServiceUnavailable)?;
        Self::with_connection(conn, address).await
    }

    /// Like [`Adapter::new`], but over an existing D-Bus connection.
    ///
    /// Passing the connection explicitly keeps the handle testable against
    /// a fake service on a private bus.
    pub async fn with_connection(conn: Connection, address: &str) -> Result<Self> {
        if !utils::is_valid_address(address) {
            return Err(AdapterError::InvalidAddress(address.to_owned()));
        }
        let address = utils::normalize_address(address);
        let path = discovery::find_adapter(&conn, &address).await?;
        debug!("Resolved adapter {address} to {}", path.as_str());
        Ok(Self {
            conn,
            path,
            address,
        })
    }

    /// Creates a handle for the first adapter BlueZ has registered.
    pub async fn default_adapter() -> Result<Self> {
        let conn = Connection::system()
            .await
            .map_err(AdapterError::ServiceUnavailable)?;
        let (path, address) = discovery::first_adapter(&conn).await?;
        debug!("Using default adapter {address} at {}", path.as_str());
        Ok(Self {
            conn,
            path,
            address,
        })
    }

    /// The remote object path this handle resolved to.
    pub fn object_path(&self) -> &OwnedObjectPath {
        &self.path
    }

    /// The hardware address of this adapter.
    pub async fn address(&self) -> Result<String> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .address()
            .await
            .map_err(|e| AdapterError::from_call("Address", e))
    }

    /// The system-assigned adapter name. Read-only; write the alias instead.
    pub async fn name(&self) -> Result<String> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .name()
            .await
            .map_err(|e| AdapterError::from_call("Name", e))
    }

    /// The user-friendly adapter name.
    pub async fn alias(&self) -> Result<String> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .alias()
            .await
            .map_err(|e| AdapterError::from_call("Alias", e))
    }

    /// Sets the adapter alias.
    pub async fn set_alias(&self, value: &str) -> Result<()> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .set_alias(value)
            .await
            .map_err(|e| AdapterError::from_call("Alias", e))
    }

    /// The raw Class of Device bitmask.
    ///
    /// Use [`crate::DeviceClass`] to decode the service and device class
    /// fields.
    pub async fn bt_class(&self) -> Result<u32> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .class()
            .await
            .map_err(|e| AdapterError::from_call("Class", e))
    }

    /// Whether the radio is powered on.
    pub async fn powered(&self) -> Result<bool> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .powered()
            .await
            .map_err(|e| AdapterError::from_call("Powered", e))
    }

    /// Powers the radio on or off.
    pub async fn set_powered(&self, value: bool) -> Result<()> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .set_powered(value)
            .await
            .map_err(|e| AdapterError::from_call("Powered", e))
    }

    /// Whether the adapter is visible to nearby devices.
    pub async fn discoverable(&self) -> Result<bool> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .discoverable()
            .await
            .map_err(|e| AdapterError::from_call("Discoverable", e))
    }

    /// Makes the adapter visible or invisible to nearby devices.
    pub async fn set_discoverable(&self, value: bool) -> Result<()> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .set_discoverable(value)
            .await
            .map_err(|e| AdapterError::from_call("Discoverable", e))
    }

    /// Seconds the adapter stays discoverable; 0 means forever.
    pub async fn discoverable_timeout(&self) -> Result<u32> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .discoverable_timeout()
            .await
            .map_err(|e| AdapterError::from_call("DiscoverableTimeout", e))
    }

    /// Sets the discoverable timeout in seconds.
    ///
    /// No local range check; BlueZ rejects values it will not accept and
    /// that surfaces as the `Rejected` error kind.
    pub async fn set_discoverable_timeout(&self, value: u32) -> Result<()> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .set_discoverable_timeout(value)
            .await
            .map_err(|e| AdapterError::from_call("DiscoverableTimeout", e))
    }

    /// Whether the adapter accepts incoming pairing requests.
    pub async fn pairable(&self) -> Result<bool> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .pairable()
            .await
            .map_err(|e| AdapterError::from_call("Pairable", e))
    }

    /// Sets the pairable state.
    pub async fn set_pairable(&self, value: bool) -> Result<()> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .set_pairable(value)
            .await
            .map_err(|e| AdapterError::from_call("Pairable", e))
    }

    /// Seconds the adapter stays pairable; 0 means forever.
    pub async fn pairable_timeout(&self) -> Result<u32> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .pairable_timeout()
            .await
            .map_err(|e| AdapterError::from_call("PairableTimeout", e))
    }

    /// Sets the pairable timeout in seconds.
    pub async fn set_pairable_timeout(&self, value: u32) -> Result<()> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .set_pairable_timeout(value)
            .await
            .map_err(|e| AdapterError::from_call("PairableTimeout", e))
    }

    /// Whether a discovery scan is currently active on this adapter.
    ///
    /// Read-only; the scan state machine belongs to the daemon and is
    /// observed passively.
    pub async fn discovering(&self) -> Result<bool> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .discovering()
            .await
            .map_err(|e| AdapterError::from_call("Discovering", e))
    }

    /// Service UUIDs supported by the local adapter.
    ///
    /// Entries BlueZ reports that do not parse as UUIDs are skipped with a
    /// warning.
    pub async fn uuids(&self) -> Result<Vec<Uuid>> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        let raw = adapter
            .uuids()
            .await
            .map_err(|e| AdapterError::from_call("UUIDs", e))?;
        Ok(raw
            .iter()
            .filter_map(|s| match Uuid::parse_str(s) {
                Ok(uuid) => Some(uuid),
                Err(e) => {
                    warn!("Skipping unparseable service UUID '{s}': {e}");
                    None
                }
            })
            .collect())
    }

    /// Fetches every property the adapter object currently exposes in one
    /// round-trip.
    ///
    /// The result is a superset of the named accessors and may include
    /// service-defined keys such as `UUIDs` or `Modalias`.
    pub async fn get_all(&self) -> Result<HashMap<String, OwnedValue>> {
        properties::get_all(&self.conn, &self.path).await
    }

    /// A decoded snapshot of the adapter's property set, from one
    /// [`Adapter::get_all`] round-trip.
    pub async fn info(&self) -> Result<AdapterInfo> {
        Ok(AdapterInfo::from_properties(&self.get_all().await?))
    }

    /// Starts a device discovery scan.
    pub async fn start_discovery(&self) -> Result<()> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .start_discovery()
            .await
            .map_err(|e| AdapterError::from_call("StartDiscovery", e))
    }

    /// Stops the discovery scan started by this client.
    pub async fn stop_discovery(&self) -> Result<()> {
        let adapter = properties::adapter_proxy(&self.conn, &self.path).await?;
        adapter
            .stop_discovery()
            .await
            .map_err(|e| AdapterError::from_call("StopDiscovery", e))
    }

    /// Runs a discovery scan for the given window, then stops it.
    pub async fn discover_nearby(&self, window: Duration) -> Result<()> {
        self.start_discovery().await?;
        debug!(
            "Discovery running for {:?} on {}",
            window,
            self.address
        );
        Delay::new(window).await;
        self.stop_discovery().await
    }

    /// Runs a discovery scan for the default window.
    pub async fn nearby_discovery(&self) -> Result<()> {
        self.discover_nearby(timeouts::discovery_window()).await
    }

    /// Invokes `callback` with each new value of the `Powered` property.
    ///
    /// Subscribes to BlueZ's `PropertiesChanged` signal instead of polling.
    /// Runs until an error occurs; spawn it in a background task.
    pub async fn monitor_powered<F>(&self, callback: F) -> Result<()>
    where
        F: Fn(bool),
    {
        monitoring::adapter::watch_powered(&self.conn, &self.path, callback).await
    }

    /// Invokes `callback` with each new value of the `Discovering` property.
    ///
    /// Same contract as [`Adapter::monitor_powered`].
    pub async fn monitor_discovering<F>(&self, callback: F) -> Result<()>
    where
        F: Fn(bool),
    {
        monitoring::adapter::watch_discovering(&self.conn, &self.path, callback).await
    }
}
