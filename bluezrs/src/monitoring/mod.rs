//! Signal-based observation of adapter state.
//!
//! BlueZ emits `PropertiesChanged` whenever adapter state moves; these
//! helpers subscribe to those signals instead of polling. The wrapper only
//! observes — the state machine behind `Powered`/`Discovering` belongs to
//! the daemon.

pub(crate) mod adapter;
