//! Base trait for module state.

use serde::Serialize;

/// Marker trait for the state held by one store module.
///
/// States should be:
/// - Replaced wholesale (Clone to derive the next state)
/// - Comparable (PartialEq for detecting no-op mutations)
/// - Serializable (root state snapshots are JSON)
pub trait ModuleState: Clone + PartialEq + Default + Serialize + Send + Sync + 'static {}
