use thiserror::Error;

/// Errors raised by the state container.
///
/// All of these indicate a wiring mistake made at startup, or a caller
/// addressing something that was never registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Module '{name}' is already registered")]
    DuplicateModule { name: String },

    #[error("Module '{name}' is not registered")]
    ModuleNotFound { name: String },

    #[error("Unknown mutation '{mutation_type}'")]
    OperationNotFound { mutation_type: String },

    #[error("Mutation '{mutation_type}' is declared more than once")]
    DuplicateMutation { mutation_type: String },

    #[error("Module '{name}' is static; it can only be declared when the store is initialized")]
    StaticModule { name: String },

    #[error("Invalid payload for mutation '{mutation_type}': {message}")]
    InvalidPayload {
        mutation_type: String,
        message: String,
    },

    #[error("Module '{name}' does not hold state of type {expected}")]
    StateTypeMismatch { name: String, expected: &'static str },

    #[error("Failed to snapshot state of module '{name}': {message}")]
    Snapshot { name: String, message: String },
}
