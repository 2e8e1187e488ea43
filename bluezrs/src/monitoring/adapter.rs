//! Adapter property change streams.

use futures::StreamExt;
use log::debug;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::models::AdapterError;
use crate::proxies::BluezAdapterProxy;

/// Invokes `callback` with each new value of the `Powered` property.
///
/// Runs until the property stream ends or a read fails. Run it in a
/// background task.
pub(crate) async fn watch_powered<F>(
    conn: &Connection,
    path: &OwnedObjectPath,
    callback: F,
) -> Result<()>
where
    F: Fn(bool),
{
    let proxy = BluezAdapterProxy::builder(conn).path(path.clone())?.build().await?;
    let mut changes = proxy.receive_powered_changed().await;
    debug!("Watching Powered on {}", path.as_str());
    while let Some(change) = changes.next().await {
        let value = change
            .get()
            .await
            .map_err(|e| AdapterError::from_call("Powered", e))?;
        callback(value);
    }
    Ok(())
}

/// Invokes `callback` with each new value of the `Discovering` property.
///
/// Same contract as [`watch_powered`].
pub(crate) async fn watch_discovering<F>(
    conn: &Connection,
    path: &OwnedObjectPath,
    callback: F,
) -> Result<()>
where
    F: Fn(bool),
{
    let proxy = BluezAdapterProxy::builder(conn).path(path.clone())?.build().await?;
    let mut changes = proxy.receive_discovering_changed().await;
    debug!("Watching Discovering on {}", path.as_str());
    while let Some(change) = changes.next().await {
        let value = change
            .get()
            .await
            .map_err(|e| AdapterError::from_call("Discovering", e))?;
        callback(value);
    }
    Ok(())
}
