use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use zvariant::{OwnedValue, Value};

use crate::constants::{device_class, error_name};

/// Errors that can occur during adapter operations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The system bus or the BlueZ service cannot be reached.
    #[error("BlueZ service unavailable: {0}")]
    ServiceUnavailable(#[source] zbus::Error),

    /// No adapter with the requested address is registered with BlueZ.
    #[error("no adapter with address {0}")]
    NotFound(String),

    /// No Bluetooth adapter is present on the system.
    #[error("no Bluetooth adapter found")]
    NoAdapter,

    /// BlueZ refused a property write or discovery request.
    #[error("'{target}' rejected by BlueZ")]
    Rejected {
        /// The property or method the service refused.
        target: String,
        #[source]
        source: zbus::Error,
    },

    /// The supplied address is not in `XX:XX:XX:XX:XX:XX` form.
    #[error("invalid Bluetooth address: {0}")]
    InvalidAddress(String),

    /// Any other D-Bus communication error, passed through unmodified.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),
}

impl AdapterError {
    /// Classifies a failed remote call by its D-Bus error name.
    ///
    /// `target` names the property or method being accessed and is carried
    /// on the `Rejected` variant so callers can tell which write the
    /// service refused.
    pub(crate) fn from_call(target: &str, err: zbus::Error) -> Self {
        match &err {
            zbus::Error::MethodError(name, _, _) if is_unavailable_name(name.as_str()) => {
                Self::ServiceUnavailable(err)
            }
            zbus::Error::MethodError(name, _, _) if is_rejection_name(name.as_str()) => {
                Self::Rejected {
                    target: target.to_owned(),
                    source: err,
                }
            }
            zbus::Error::InputOutput(_) => Self::ServiceUnavailable(err),
            _ => Self::Dbus(err),
        }
    }
}

/// Whether a D-Bus error name means the bus or the daemon is unreachable.
fn is_unavailable_name(name: &str) -> bool {
    error_name::UNAVAILABLE.contains(&name)
}

/// Whether a D-Bus error name means the daemon refused the request.
///
/// Anything in the `org.bluez.Error` namespace is a daemon-side refusal.
fn is_rejection_name(name: &str) -> bool {
    name.starts_with(error_name::BLUEZ_PREFIX) || error_name::REJECTED.contains(&name)
}

/// A decoded snapshot of an adapter's property set.
///
/// Built from a single bulk property fetch; holds no live state. Missing
/// keys decode to empty/zero/false defaults since BlueZ is authoritative
/// for which properties exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterInfo {
    pub address: String,
    pub name: String,
    pub alias: String,
    pub class: u32,
    pub powered: bool,
    pub discoverable: bool,
    pub discoverable_timeout: u32,
    pub pairable: bool,
    pub pairable_timeout: u32,
    pub discovering: bool,
    pub uuids: Vec<String>,
}

impl AdapterInfo {
    pub(crate) fn from_properties(props: &HashMap<String, OwnedValue>) -> Self {
        Self {
            address: prop_string(props, "Address"),
            name: prop_string(props, "Name"),
            alias: prop_string(props, "Alias"),
            class: prop_u32(props, "Class"),
            powered: prop_bool(props, "Powered"),
            discoverable: prop_bool(props, "Discoverable"),
            discoverable_timeout: prop_u32(props, "DiscoverableTimeout"),
            pairable: prop_bool(props, "Pairable"),
            pairable_timeout: prop_u32(props, "PairableTimeout"),
            discovering: prop_bool(props, "Discovering"),
            uuids: prop_string_list(props, "UUIDs"),
        }
    }

    /// The decoded Class of Device field.
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass(self.class)
    }
}

impl Display for AdapterInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' class={} powered={} discoverable={} pairable={} discovering={}",
            self.address,
            self.alias,
            self.device_class(),
            self.powered,
            self.discoverable,
            self.pairable,
            self.discovering
        )
    }
}

fn prop_string(props: &HashMap<String, OwnedValue>, key: &str) -> String {
    props
        .get(key)
        .and_then(|v| String::try_from(Value::clone(v)).ok())
        .unwrap_or_default()
}

fn prop_u32(props: &HashMap<String, OwnedValue>, key: &str) -> u32 {
    props
        .get(key)
        .and_then(|v| u32::try_from(Value::clone(v)).ok())
        .unwrap_or_default()
}

fn prop_bool(props: &HashMap<String, OwnedValue>, key: &str) -> bool {
    props
        .get(key)
        .and_then(|v| bool::try_from(Value::clone(v)).ok())
        .unwrap_or_default()
}

fn prop_string_list(props: &HashMap<String, OwnedValue>, key: &str) -> Vec<String> {
    props
        .get(key)
        .and_then(|v| Vec::<String>::try_from(Value::clone(v)).ok())
        .unwrap_or_default()
}

/// The raw Class of Device bitmask reported by an adapter.
///
/// Bits 2-7 are the minor device class, bits 8-12 the major device class,
/// bits 13-23 the major service classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceClass(pub u32);

impl DeviceClass {
    /// The major service class bits.
    pub fn service_classes(self) -> MajorServiceClass {
        MajorServiceClass::from_bits_truncate(self.0)
    }

    /// The major device class field.
    pub fn major(self) -> MajorDeviceClass {
        ((self.0 >> device_class::MAJOR_SHIFT) & device_class::MAJOR_MASK).into()
    }

    /// The raw minor device class field; its meaning depends on the major class.
    pub fn minor(self) -> u32 {
        (self.0 >> device_class::MINOR_SHIFT) & device_class::MINOR_MASK
    }
}

impl From<u32> for DeviceClass {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for DeviceClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:06X})", self.major(), self.0)
    }
}

bitflags! {
    /// Major service class bits of the Class of Device field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MajorServiceClass: u32 {
        const LIMITED_DISCOVERABLE = 1 << 13;
        const POSITIONING = 1 << 16;
        const NETWORKING = 1 << 17;
        const RENDERING = 1 << 18;
        const CAPTURING = 1 << 19;
        const OBJECT_TRANSFER = 1 << 20;
        const AUDIO = 1 << 21;
        const TELEPHONY = 1 << 22;
        const INFORMATION = 1 << 23;
    }
}

/// Major device class codes of the Class of Device field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorDeviceClass {
    Miscellaneous,
    Computer,
    Phone,
    LanAccess,
    AudioVideo,
    Peripheral,
    Imaging,
    Wearable,
    Toy,
    Health,
    Uncategorized,
    /// Unknown code not mapped to a specific variant.
    Other(u32),
}

impl From<u32> for MajorDeviceClass {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::Miscellaneous,
            1 => Self::Computer,
            2 => Self::Phone,
            3 => Self::LanAccess,
            4 => Self::AudioVideo,
            5 => Self::Peripheral,
            6 => Self::Imaging,
            7 => Self::Wearable,
            8 => Self::Toy,
            9 => Self::Health,
            31 => Self::Uncategorized,
            v => Self::Other(v),
        }
    }
}

impl Display for MajorDeviceClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Miscellaneous => write!(f, "Miscellaneous"),
            Self::Computer => write!(f, "Computer"),
            Self::Phone => write!(f, "Phone"),
            Self::LanAccess => write!(f, "LAN Access"),
            Self::AudioVideo => write!(f, "Audio/Video"),
            Self::Peripheral => write!(f, "Peripheral"),
            Self::Imaging => write!(f, "Imaging"),
            Self::Wearable => write!(f, "Wearable"),
            Self::Toy => write!(f, "Toy"),
            Self::Health => write!(f, "Health"),
            Self::Uncategorized => write!(f, "Uncategorized"),
            Self::Other(v) => write!(f, "Other({v})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(value: Value<'_>) -> OwnedValue {
        value.try_to_owned().expect("no fds in test values")
    }

    fn sample_properties() -> HashMap<String, OwnedValue> {
        let mut props = HashMap::new();
        props.insert("Address".into(), owned(Value::from("00:AA:01:00:00:23")));
        props.insert("Name".into(), owned(Value::from("test-unit")));
        props.insert("Alias".into(), owned(Value::from("my-test-dev")));
        props.insert("Class".into(), owned(Value::from(786700u32)));
        props.insert("Powered".into(), owned(Value::from(true)));
        props.insert("Discoverable".into(), owned(Value::from(false)));
        props.insert("DiscoverableTimeout".into(), owned(Value::from(180u32)));
        props.insert("Pairable".into(), owned(Value::from(true)));
        props.insert("PairableTimeout".into(), owned(Value::from(0u32)));
        props.insert("Discovering".into(), owned(Value::from(false)));
        props.insert(
            "UUIDs".into(),
            owned(Value::from(zvariant::Array::from(vec![
                "00001800-0000-1000-8000-00805f9b34fb",
                "00001801-0000-1000-8000-00805f9b34fb",
            ]))),
        );
        props
    }

    #[test]
    fn adapter_info_from_properties() {
        let info = AdapterInfo::from_properties(&sample_properties());
        assert_eq!(info.address, "00:AA:01:00:00:23");
        assert_eq!(info.name, "test-unit");
        assert_eq!(info.alias, "my-test-dev");
        assert_eq!(info.class, 786700);
        assert!(info.powered);
        assert!(!info.discoverable);
        assert_eq!(info.discoverable_timeout, 180);
        assert!(info.pairable);
        assert_eq!(info.pairable_timeout, 0);
        assert!(!info.discovering);
        assert_eq!(info.uuids.len(), 2);
    }

    #[test]
    fn adapter_info_missing_keys_default() {
        let info = AdapterInfo::from_properties(&HashMap::new());
        assert_eq!(info.address, "");
        assert_eq!(info.class, 0);
        assert!(!info.powered);
        assert!(info.uuids.is_empty());
    }

    #[test]
    fn adapter_info_ignores_wrongly_typed_values() {
        let mut props = HashMap::new();
        props.insert("Powered".into(), owned(Value::from("yes")));
        let info = AdapterInfo::from_properties(&props);
        assert!(!info.powered);
    }

    #[test]
    fn device_class_decodes_computer() {
        // 0x000104: major class computer, minor desktop, no service bits
        let class = DeviceClass(0x000104);
        assert_eq!(class.major(), MajorDeviceClass::Computer);
        assert_eq!(class.minor(), 1);
        assert!(class.service_classes().is_empty());
    }

    #[test]
    fn device_class_decodes_service_bits() {
        // Captured from btvirt: computer with rendering and capturing services
        let class = DeviceClass(786700);
        assert_eq!(class.major(), MajorDeviceClass::Computer);
        let services = class.service_classes();
        assert!(services.contains(MajorServiceClass::RENDERING));
        assert!(services.contains(MajorServiceClass::CAPTURING));
        assert!(!services.contains(MajorServiceClass::AUDIO));
    }

    #[test]
    fn major_device_class_from_u32() {
        assert_eq!(MajorDeviceClass::from(0), MajorDeviceClass::Miscellaneous);
        assert_eq!(MajorDeviceClass::from(1), MajorDeviceClass::Computer);
        assert_eq!(MajorDeviceClass::from(2), MajorDeviceClass::Phone);
        assert_eq!(MajorDeviceClass::from(5), MajorDeviceClass::Peripheral);
        assert_eq!(MajorDeviceClass::from(9), MajorDeviceClass::Health);
        assert_eq!(MajorDeviceClass::from(31), MajorDeviceClass::Uncategorized);
        assert_eq!(MajorDeviceClass::from(12), MajorDeviceClass::Other(12));
    }

    #[test]
    fn major_device_class_display() {
        assert_eq!(format!("{}", MajorDeviceClass::Computer), "Computer");
        assert_eq!(format!("{}", MajorDeviceClass::AudioVideo), "Audio/Video");
        assert_eq!(format!("{}", MajorDeviceClass::Other(12)), "Other(12)");
    }

    #[test]
    fn device_class_display() {
        assert_eq!(format!("{}", DeviceClass(0x000104)), "Computer (0x000104)");
    }

    #[test]
    fn unavailable_names_classified() {
        assert!(is_unavailable_name(
            "org.freedesktop.DBus.Error.ServiceUnknown"
        ));
        assert!(is_unavailable_name("org.freedesktop.DBus.Error.NoReply"));
        assert!(is_unavailable_name(
            "org.freedesktop.DBus.Error.Disconnected"
        ));
        assert!(!is_unavailable_name("org.bluez.Error.Rejected"));
        assert!(!is_unavailable_name("org.freedesktop.DBus.Error.Failed"));
    }

    #[test]
    fn rejection_names_classified() {
        assert!(is_rejection_name("org.bluez.Error.Rejected"));
        assert!(is_rejection_name("org.bluez.Error.InvalidArguments"));
        assert!(is_rejection_name("org.bluez.Error.NotReady"));
        assert!(is_rejection_name("org.freedesktop.DBus.Error.InvalidArgs"));
        assert!(is_rejection_name(
            "org.freedesktop.DBus.Error.PropertyReadOnly"
        ));
        assert!(!is_rejection_name(
            "org.freedesktop.DBus.Error.ServiceUnknown"
        ));
        assert!(!is_rejection_name("org.freedesktop.DBus.Error.Failed"))
    }

    #[test]
    fn from_call_passes_through_other_errors() {
        let err = AdapterError::from_call("Powered", zbus::Error::Unsupported);
        assert!(matches!(err, AdapterError::Dbus(_)));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            format!("{}", AdapterError::NotFound("00:00:00:00:00:01".into())),
            "no adapter with address 00:00:00:00:00:01"
        );
        assert_eq!(
            format!("{}", AdapterError::NoAdapter),
            "no Bluetooth adapter found"
        );
        assert_eq!(
            format!("{}", AdapterError::InvalidAddress("hci0".into())),
            "invalid Bluetooth address: hci0"
        );
        assert_eq!(
            format!(
                "{}",
                AdapterError::Rejected {
                    target: "PairableTimeout".into(),
                    source: zbus::Error::Unsupported,
                }
            ),
            "'PairableTimeout' rejected by BlueZ"
        );
    }
}
