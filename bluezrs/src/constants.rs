//! Constants for BlueZ D-Bus interface values.
//!
//! Well-known bus names, interface names, Class of Device field layout,
//! and timing defaults used across the crate.

/// BlueZ well-known names.
///
/// The service name itself ("org.bluez") lives in the proxy attributes,
/// which require literals.
pub mod bluez {
    /// The adapter interface implemented by each local controller object.
    pub const ADAPTER_IFACE: &str = "org.bluez.Adapter1";
    /// Property key holding an adapter's hardware address.
    pub const PROP_ADDRESS: &str = "Address";
}

/// Class of Device field layout (Bluetooth Assigned Numbers, baseband).
///
/// Bits 2-7 are the minor device class, bits 8-12 the major device class,
/// bits 13-23 the major service classes.
pub mod device_class {
    pub const MINOR_SHIFT: u32 = 2;
    pub const MINOR_MASK: u32 = 0x3F;
    pub const MAJOR_SHIFT: u32 = 8;
    pub const MAJOR_MASK: u32 = 0x1F;
}

/// D-Bus error names grouped by failure kind.
pub mod error_name {
    /// The daemon prefix for refusals it raises itself. Anything in this
    /// namespace means BlueZ understood the request and turned it down.
    pub const BLUEZ_PREFIX: &str = "org.bluez.Error.";

    /// The bus or the service behind it cannot be reached.
    pub const UNAVAILABLE: &[&str] = &[
        "org.freedesktop.DBus.Error.ServiceUnknown",
        "org.freedesktop.DBus.Error.NameHasNoOwner",
        "org.freedesktop.DBus.Error.NoReply",
        "org.freedesktop.DBus.Error.Timeout",
        "org.freedesktop.DBus.Error.Disconnected",
        "org.freedesktop.DBus.Error.NoServer",
        "org.freedesktop.DBus.Error.UnknownObject",
    ];

    /// The request reached the service and was refused.
    pub const REJECTED: &[&str] = &[
        "org.freedesktop.DBus.Error.InvalidArgs",
        "org.freedesktop.DBus.Error.PropertyReadOnly",
        "org.freedesktop.DBus.Error.AccessDenied",
        "org.freedesktop.DBus.Error.UnknownProperty",
        "org.freedesktop.DBus.Error.UnknownInterface",
    ];
}

/// Timeout and delay constants.
pub mod timeouts {
    use std::time::Duration;

    /// Default scan window for [`crate::Adapter::nearby_discovery`].
    pub const DISCOVERY_WINDOW_SECS: u64 = 10;

    pub fn discovery_window() -> Duration {
        Duration::from_secs(DISCOVERY_WINDOW_SECS)
    }
}
