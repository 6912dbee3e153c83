//! Base trait for mutation intents.

/// Marker trait for intent objects.
///
/// An intent is the typed form of a mutation: the store decodes the JSON
/// payload of a dispatched operation into one of these and hands it to the
/// module's reducer.
pub trait Intent: Send + 'static {}
