//! A Rust library for BlueZ Bluetooth adapters over D-Bus.
//!
//! This crate provides a high-level async API for local adapter control:
//!
//! - Listing registered adapters by hardware address
//! - Reading and writing adapter properties (power, discoverability,
//!   pairing timeouts, alias)
//! - Bulk property snapshots and decoded Class of Device views
//! - Running and observing discovery scans
//!
//! # Example
//!
//! ```no_run
//! use bluezrs::Adapter;
//!
//! # async fn example() -> bluezrs::Result<()> {
//! // Enumerate adapters by address
//! for address in bluezrs::list_adapters().await? {
//!     println!("{address}");
//! }
//!
//! // Open a handle and flip some state
//! let adapter = Adapter::new("00:AA:01:00:00:23").await?;
//! adapter.set_powered(true).await?;
//! adapter.set_alias("my-test-dev").await?;
//! println!("{}", adapter.info().await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, AdapterError>`. The error type keeps
//! "the link is down" (`ServiceUnavailable`) distinct from "my input was
//! invalid" (`Rejected`), and construction with an unregistered address is
//! a `NotFound`, never a generic failure. Nothing is retried locally;
//! retry policy is a caller concern.
//!
//! # Caching
//!
//! None. Every accessor is a live round-trip to the daemon, so a read
//! always reflects what BlueZ reports at that moment. The
//! `monitor_powered`/`monitor_discovering` helpers subscribe to BlueZ's
//! change signals for callers who want push updates instead.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To
//! see log output, add a logging implementation like `env_logger`:
//!
//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Internal implementation modules
mod constants;
mod core;
mod monitoring;
mod proxies;
mod utils;

// Public API modules
pub mod adapter;
pub mod models;

// Re-exported public API
pub use adapter::{Adapter, list_adapters, list_adapters_on};
pub use models::{AdapterError, AdapterInfo, DeviceClass, MajorDeviceClass, MajorServiceClass};

/// A specialized `Result` type for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
