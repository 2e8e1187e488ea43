//! BlueZ object registry proxy.

use std::collections::HashMap;
use zbus::proxy;
use zvariant::{OwnedObjectPath, OwnedValue};

/// Proxy for `org.freedesktop.DBus.ObjectManager` on the BlueZ service.
///
/// Used to enumerate every object BlueZ has registered, together with the
/// interfaces each object implements and their current property values.
/// Adapter discovery filters this registry for objects implementing
/// `org.bluez.Adapter1`.
#[proxy(
    interface = "org.freedesktop.DBus.ObjectManager",
    default_service = "org.bluez",
    default_path = "/"
)]
pub(crate) trait BluezObjectManager {
    /// Get all managed objects with their interfaces and properties.
    ///
    /// Returns: `{ object_path: { interface_name: { property: value } } }`
    fn get_managed_objects(
        &self,
    ) -> zbus::Result<HashMap<OwnedObjectPath, HashMap<String, HashMap<String, OwnedValue>>>>;
}
