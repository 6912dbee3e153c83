//! Reducer trait for state modules.

use super::intent::Intent;
use super::state::ModuleState;

/// Reducer transforms module state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: ModuleState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    ///
    /// No I/O, and no access to any other module's state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
