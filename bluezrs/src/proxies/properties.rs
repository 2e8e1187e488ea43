//! Generic property access proxy.

use std::collections::HashMap;
use zbus::proxy;
use zvariant::OwnedValue;

/// Proxy for `org.freedesktop.DBus.Properties` on BlueZ objects.
///
/// The typed adapter proxy covers the named properties; this one provides
/// the bulk `GetAll` fetch, which returns every property the remote object
/// currently exposes, including service-defined keys the typed surface does
/// not name.
#[proxy(
    interface = "org.freedesktop.DBus.Properties",
    default_service = "org.bluez"
)]
pub(crate) trait BluezProperties {
    /// Get every property of the given interface as a name-to-value mapping.
    fn get_all(&self, interface: &str) -> zbus::Result<HashMap<String, OwnedValue>>;
}
