//! Shared store handle passed explicitly to UI collaborators.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::mvi::{ModuleState, Reducer};
use crate::store::{Module, MutationSubscriber, Store, StoreError, SubscriptionId};

/// Clonable reference to one [`Store`].
///
/// Every call takes the lock exactly once, so a reader sees either the
/// state before a mutation or the state after it. Subscribers run after
/// the lock is released and may use the handle themselves.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<RwLock<Store>>,
}

impl StoreHandle {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` against the store under a read lock.
    pub fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        f(&self.inner.read())
    }

    /// Owned copy of a module's state.
    pub fn module_state<S: ModuleState>(&self, name: &str) -> Result<S, StoreError> {
        self.inner.read().module_state::<S>(name).cloned()
    }

    pub fn state_value(&self, name: &str) -> Result<Value, StoreError> {
        self.inner.read().state_value(name)
    }

    pub fn root_state(&self) -> Result<Value, StoreError> {
        self.inner.read().root_state()
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.inner.read().has_module(name)
    }

    pub fn register_module<R: Reducer + 'static>(
        &self,
        module: Module<R>,
    ) -> Result<(), StoreError> {
        self.inner.write().register_module(module)
    }

    pub fn unregister_module(&self, name: &str) -> Result<(), StoreError> {
        self.inner.write().unregister_module(name)
    }

    pub fn dispatch_mutation(
        &self,
        name: &str,
        operation: &str,
        payload: Value,
    ) -> Result<(), StoreError> {
        let pending = self.inner.write().apply_mutation(name, operation, payload)?;
        if let Some(pending) = pending {
            pending.deliver();
        }
        Ok(())
    }

    pub fn commit(&self, mutation_type: &str, payload: Value) -> Result<(), StoreError> {
        let pending = self.inner.write().apply_commit(mutation_type, payload)?;
        if let Some(pending) = pending {
            pending.deliver();
        }
        Ok(())
    }

    pub fn subscribe(&self, subscriber: impl MutationSubscriber + 'static) -> SubscriptionId {
        self.inner.write().subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.write().unsubscribe(id)
    }
}
