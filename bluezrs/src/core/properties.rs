//! Per-call proxy construction and bulk property fetch.
//!
//! Proxies are built fresh for each accessor call with property caching
//! disabled, so every read is a live round-trip to BlueZ and no stale
//! state is held between calls.

use std::collections::HashMap;

use zbus::Connection;
use zbus::proxy::CacheProperties;
use zvariant::{OwnedObjectPath, OwnedValue};

use crate::Result;
use crate::constants::bluez;
use crate::models::AdapterError;
use crate::proxies::{BluezAdapterProxy, BluezPropertiesProxy};

/// Builds an uncached adapter proxy for the given object path.
pub(crate) async fn adapter_proxy(
    conn: &Connection,
    path: &OwnedObjectPath,
) -> Result<BluezAdapterProxy<'static>> {
    Ok(BluezAdapterProxy::builder(conn)
        .path(path.clone())?
        .cache_properties(CacheProperties::No)
        .build()
        .await?)
}

/// Fetches every property the adapter object currently exposes.
pub(crate) async fn get_all(
    conn: &Connection,
    path: &OwnedObjectPath,
) -> Result<HashMap<String, OwnedValue>> {
    let props = BluezPropertiesProxy::builder(conn)
        .path(path.clone())?
        .build()
        .await?;
    props
        .get_all(bluez::ADAPTER_IFACE)
        .await
        .map_err(|e| AdapterError::from_call("GetAll", e))
}
