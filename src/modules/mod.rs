//! State modules registered by the application.

pub mod foo;

use crate::store::{Store, StoreError};

/// Register every application module into `store`.
pub fn register_all(store: &mut Store) -> Result<(), StoreError> {
    store.register_module(foo::module())?;
    Ok(())
}
