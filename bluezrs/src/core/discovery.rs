//! Adapter enumeration over the BlueZ object registry.
//!
//! Provides functions for listing registered adapters and resolving a
//! hardware address to its object path. The registry filtering itself is
//! pure so it can be tested against a fake managed-objects map.

use std::collections::HashMap;

use log::debug;
use zbus::Connection;
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::Result;
use crate::constants::bluez;
use crate::models::AdapterError;
use crate::proxies::BluezObjectManagerProxy;

/// The shape returned by `GetManagedObjects`:
/// `{ object_path: { interface_name: { property: value } } }`.
pub(crate) type ManagedObjects =
    HashMap<OwnedObjectPath, HashMap<String, HashMap<String, OwnedValue>>>;

/// Fetches the full BlueZ object registry.
async fn managed_objects(conn: &Connection) -> Result<ManagedObjects> {
    let om = BluezObjectManagerProxy::new(conn).await?;
    om.get_managed_objects()
        .await
        .map_err(|e| AdapterError::from_call("GetManagedObjects", e))
}

/// Lists the hardware addresses of all registered adapters.
///
/// Addresses come back in registry iteration order; no sort is applied.
pub(crate) async fn list_adapters(conn: &Connection) -> Result<Vec<String>> {
    let objects = managed_objects(conn).await?;
    let addresses = adapter_addresses(&objects);
    debug!("Found {} adapter(s): {:?}", addresses.len(), addresses);
    Ok(addresses)
}

/// Resolves a hardware address to its adapter object path.
///
/// Returns `NotFound` if no registered adapter carries the address.
pub(crate) async fn find_adapter(conn: &Connection, address: &str) -> Result<OwnedObjectPath> {
    let objects = managed_objects(conn).await?;
    adapter_path_for(&objects, address)
        .ok_or_else(|| AdapterError::NotFound(address.to_owned()))
}

/// Returns the first registered adapter as `(path, address)`.
pub(crate) async fn first_adapter(conn: &Connection) -> Result<(OwnedObjectPath, String)> {
    let objects = managed_objects(conn).await?;
    objects
        .iter()
        .find_map(|(path, ifaces)| {
            adapter_address(ifaces).map(|addr| (path.clone(), addr))
        })
        .ok_or(AdapterError::NoAdapter)
}

/// The `Address` property of an object, if it implements the adapter interface.
fn adapter_address(ifaces: &HashMap<String, HashMap<String, OwnedValue>>) -> Option<String> {
    ifaces
        .get(bluez::ADAPTER_IFACE)?
        .get(bluez::PROP_ADDRESS)
        .and_then(|v| String::try_from(Value::clone(v)).ok())
}

/// Extracts the addresses of all adapter objects in the registry.
fn adapter_addresses(objects: &ManagedObjects) -> Vec<String> {
    objects.values().filter_map(adapter_address).collect()
}

/// Finds the object path whose adapter address matches, case-insensitively.
fn adapter_path_for(objects: &ManagedObjects, address: &str) -> Option<OwnedObjectPath> {
    objects.iter().find_map(|(path, ifaces)| {
        adapter_address(ifaces)
            .filter(|addr| addr.eq_ignore_ascii_case(address))
            .map(|_| path.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter_object(address: &str) -> HashMap<String, HashMap<String, OwnedValue>> {
        let mut props = HashMap::new();
        props.insert(
            bluez::PROP_ADDRESS.to_owned(),
            Value::from(address).try_to_owned().unwrap(),
        );
        let mut ifaces = HashMap::new();
        ifaces.insert(bluez::ADAPTER_IFACE.to_owned(), props);
        ifaces
    }

    fn device_object(address: &str) -> HashMap<String, HashMap<String, OwnedValue>> {
        // Remote devices also carry an Address, on a different interface
        let mut props = HashMap::new();
        props.insert(
            bluez::PROP_ADDRESS.to_owned(),
            Value::from(address).try_to_owned().unwrap(),
        );
        let mut ifaces = HashMap::new();
        ifaces.insert("org.bluez.Device1".to_owned(), props);
        ifaces
    }

    fn registry() -> ManagedObjects {
        let mut objects = ManagedObjects::new();
        objects.insert(
            OwnedObjectPath::try_from("/org/bluez/hci0").unwrap(),
            adapter_object("00:AA:01:00:00:23"),
        );
        objects.insert(
            OwnedObjectPath::try_from("/org/bluez/hci1").unwrap(),
            adapter_object("00:AA:01:00:00:24"),
        );
        objects.insert(
            OwnedObjectPath::try_from("/org/bluez/hci0/dev_C8_1F_E8_F0_51_57").unwrap(),
            device_object("C8:1F:E8:F0:51:57"),
        );
        objects
    }

    #[test]
    fn addresses_include_each_adapter_exactly_once() {
        let addresses = adapter_addresses(&registry());
        assert_eq!(addresses.len(), 2);
        assert_eq!(
            addresses
                .iter()
                .filter(|a| *a == "00:AA:01:00:00:23")
                .count(),
            1
        );
        assert_eq!(
            addresses
                .iter()
                .filter(|a| *a == "00:AA:01:00:00:24")
                .count(),
            1
        );
    }

    #[test]
    fn addresses_skip_non_adapter_objects() {
        let addresses = adapter_addresses(&registry());
        assert!(!addresses.contains(&"C8:1F:E8:F0:51:57".to_owned()));
    }

    #[test]
    fn path_resolution_finds_matching_adapter() {
        let path = adapter_path_for(&registry(), "00:AA:01:00:00:23").unwrap();
        assert_eq!(path.as_str(), "/org/bluez/hci0");
    }

    #[test]
    fn path_resolution_is_case_insensitive() {
        let path = adapter_path_for(&registry(), "00:aa:01:00:00:24").unwrap();
        assert_eq!(path.as_str(), "/org/bluez/hci1");
    }

    #[test]
    fn path_resolution_misses_unregistered_address() {
        assert!(adapter_path_for(&registry(), "00:00:00:00:00:01").is_none());
    }

    #[test]
    fn path_resolution_ignores_device_objects() {
        // A remote device's address must not resolve to an adapter
        assert!(adapter_path_for(&registry(), "C8:1F:E8:F0:51:57").is_none());
    }

    #[test]
    fn empty_registry_yields_nothing() {
        let objects = ManagedObjects::new();
        assert!(adapter_addresses(&objects).is_empty());
        assert!(adapter_path_for(&objects, "00:AA:01:00:00:23").is_none());
    }
}
