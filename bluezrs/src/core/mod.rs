//! Core internal logic for adapter access.
//!
//! This module contains the internal implementation details for resolving
//! adapter objects and marshaling property round-trips.

pub(crate) mod discovery;
pub(crate) mod properties;
