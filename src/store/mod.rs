//! Centralized state container.
//!
//! The store owns a set of named modules. Each module's state can be read
//! by anyone holding the store, but only replaced by dispatching one of the
//! module's declared mutations.

mod error;
mod handle;
mod module;
mod subscriber;

use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

pub use error::StoreError;
pub use handle::StoreHandle;
pub use module::{Module, ModuleDescriptor};
pub use subscriber::{MutationLogger, MutationRecord, MutationSubscriber, SubscriptionId};

use crate::mvi::{ModuleState, Reducer};
use module::{IntoModuleEntry, ModuleEntry};
use subscriber::PendingNotification;

/// Options applied when the store is created.
#[derive(Default)]
pub struct StoreOptions {
    strict: bool,
    modules: Vec<Box<dyn IntoModuleEntry>>,
}

impl StoreOptions {
    /// In strict mode mutations that leave state unchanged are reported.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Declare a module as part of the initial store.
    ///
    /// This is the only way to register a module whose descriptor is not
    /// `dynamic`.
    pub fn module<R: Reducer + 'static>(mut self, module: Module<R>) -> Self {
        self.modules.push(Box::new(module));
        self
    }
}

/// Address of one operation inside the store.
#[derive(Debug, Clone)]
struct MutationTarget {
    module: String,
    operation: String,
}

pub struct Store {
    strict: bool,
    modules: Vec<ModuleEntry>,
    /// Store-wide mutation type -> owning module and local operation name.
    mutation_types: HashMap<String, MutationTarget>,
    subscribers: Vec<(SubscriptionId, Arc<dyn MutationSubscriber>)>,
    next_subscription: u64,
}

impl Store {
    /// Create the store, declaring any static modules.
    ///
    /// # Errors
    /// Returns `DuplicateModule` or `DuplicateMutation` if the declared
    /// modules collide.
    pub fn initialize(options: StoreOptions) -> Result<Self, StoreError> {
        let mut store = Self {
            strict: options.strict,
            modules: Vec::new(),
            mutation_types: HashMap::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        };

        for module in options.modules {
            store.insert(module.into_module_entry()?)?;
        }

        tracing::debug!(
            strict = store.strict,
            modules = store.modules.len(),
            "Store initialized"
        );
        Ok(store)
    }

    /// Register a dynamic module after the store has been created.
    ///
    /// # Errors
    /// - `StaticModule` if the descriptor is not `dynamic`
    /// - `DuplicateModule` if the name is taken; the existing module is kept
    /// - `DuplicateMutation` if one of its mutation types is already in use
    pub fn register_module<R: Reducer + 'static>(
        &mut self,
        module: Module<R>,
    ) -> Result<(), StoreError> {
        if !module.descriptor().dynamic {
            return Err(StoreError::StaticModule {
                name: module.descriptor().name.clone(),
            });
        }
        self.insert(module.into_entry()?)
    }

    /// Remove a dynamically registered module and its mutations.
    pub fn unregister_module(&mut self, name: &str) -> Result<(), StoreError> {
        let index = self.position(name)?;
        if !self.modules[index].descriptor.dynamic {
            return Err(StoreError::StaticModule {
                name: name.to_string(),
            });
        }

        let entry = self.modules.remove(index);
        self.mutation_types.retain(|_, target| target.module != name);
        tracing::info!(module = %entry.descriptor.name, "Module unregistered");
        Ok(())
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.iter().any(|m| m.descriptor.name == name)
    }

    /// Names of registered modules, in registration order.
    pub fn module_names(&self) -> Vec<String> {
        self.modules
            .iter()
            .map(|m| m.descriptor.name.clone())
            .collect()
    }

    pub fn descriptor(&self, name: &str) -> Result<&ModuleDescriptor, StoreError> {
        self.entry(name).map(|m| &m.descriptor)
    }

    /// Read-only view of a module's current state.
    pub fn module_state<S: ModuleState>(&self, name: &str) -> Result<&S, StoreError> {
        self.entry(name)?
            .slice
            .state_any()
            .downcast_ref::<S>()
            .ok_or_else(|| StoreError::StateTypeMismatch {
                name: name.to_string(),
                expected: type_name::<S>(),
            })
    }

    /// JSON snapshot of one module's state.
    pub fn state_value(&self, name: &str) -> Result<Value, StoreError> {
        snapshot(self.entry(name)?)
    }

    /// JSON snapshot of the whole state tree, keyed by module name.
    pub fn root_state(&self) -> Result<Value, StoreError> {
        let mut root = Map::new();
        for entry in &self.modules {
            root.insert(entry.descriptor.name.clone(), snapshot(entry)?);
        }
        Ok(Value::Object(root))
    }

    /// All store-wide mutation types, sorted.
    pub fn mutation_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.mutation_types.keys().cloned().collect();
        types.sort();
        types
    }

    /// Run a module's mutation and replace its state with the result.
    ///
    /// # Errors
    /// `ModuleNotFound`, `OperationNotFound`, or `InvalidPayload`. State is
    /// unchanged on error.
    pub fn dispatch_mutation(
        &mut self,
        name: &str,
        operation: &str,
        payload: Value,
    ) -> Result<(), StoreError> {
        if let Some(pending) = self.apply_mutation(name, operation, payload)? {
            pending.deliver();
        }
        Ok(())
    }

    /// Dispatch by store-wide mutation type (`"foo/addBar"` for namespaced
    /// modules, the bare operation name otherwise).
    pub fn commit(&mut self, mutation_type: &str, payload: Value) -> Result<(), StoreError> {
        if let Some(pending) = self.apply_commit(mutation_type, payload)? {
            pending.deliver();
        }
        Ok(())
    }

    /// Apply a mutation without notifying subscribers.
    ///
    /// The returned notification must be delivered once the caller no longer
    /// holds any lock on the store.
    pub(crate) fn apply_mutation(
        &mut self,
        name: &str,
        operation: &str,
        payload: Value,
    ) -> Result<Option<PendingNotification>, StoreError> {
        let index = self.position(name)?;
        let notify = !self.subscribers.is_empty();
        let record_payload = if notify { payload.clone() } else { Value::Null };

        let entry = &mut self.modules[index];
        let mutation_type = entry.descriptor.mutation_type(operation);
        let changed = entry.slice.apply(operation, payload, &mutation_type)?;

        tracing::debug!(module = %name, mutation = %mutation_type, changed, "Mutation applied");
        if self.strict && !changed {
            tracing::warn!(mutation = %mutation_type, "Mutation left state unchanged");
        }

        if !notify {
            return Ok(None);
        }

        // The mutation is committed at this point; a failed snapshot only
        // costs the subscribers their notification.
        let state = match snapshot(&self.modules[index]) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(mutation = %mutation_type, error = %err, "Skipping subscribers");
                return Ok(None);
            }
        };

        Ok(Some(PendingNotification {
            record: MutationRecord {
                module: name.to_string(),
                operation: operation.to_string(),
                mutation_type,
                payload: record_payload,
            },
            state,
            subscribers: self.subscribers.iter().map(|(_, s)| s.clone()).collect(),
        }))
    }

    pub(crate) fn apply_commit(
        &mut self,
        mutation_type: &str,
        payload: Value,
    ) -> Result<Option<PendingNotification>, StoreError> {
        let target = self
            .mutation_types
            .get(mutation_type)
            .cloned()
            .ok_or_else(|| StoreError::OperationNotFound {
                mutation_type: mutation_type.to_string(),
            })?;
        self.apply_mutation(&target.module, &target.operation, payload)
    }

    /// Register a subscriber called after every successful mutation.
    pub fn subscribe(&mut self, subscriber: impl MutationSubscriber + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Arc::new(subscriber)));
        tracing::debug!(subscription = id.as_u64(), "Subscriber added");
        id
    }

    /// Returns false if the subscription was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn insert(&mut self, entry: ModuleEntry) -> Result<(), StoreError> {
        let name = entry.descriptor.name.clone();
        if self.has_module(&name) {
            return Err(StoreError::DuplicateModule { name });
        }

        let mut targets = Vec::with_capacity(entry.slice.operations().len());
        for operation in entry.slice.operations() {
            let mutation_type = entry.descriptor.mutation_type(operation);
            if self.mutation_types.contains_key(&mutation_type) {
                return Err(StoreError::DuplicateMutation { mutation_type });
            }
            targets.push((
                mutation_type,
                MutationTarget {
                    module: name.clone(),
                    operation: operation.clone(),
                },
            ));
        }
        self.mutation_types.extend(targets);

        tracing::info!(
            module = %name,
            namespaced = entry.descriptor.namespaced,
            dynamic = entry.descriptor.dynamic,
            "Module registered"
        );
        self.modules.push(entry);
        Ok(())
    }

    fn position(&self, name: &str) -> Result<usize, StoreError> {
        self.modules
            .iter()
            .position(|m| m.descriptor.name == name)
            .ok_or_else(|| StoreError::ModuleNotFound {
                name: name.to_string(),
            })
    }

    fn entry(&self, name: &str) -> Result<&ModuleEntry, StoreError> {
        self.position(name).map(|index| &self.modules[index])
    }
}

fn snapshot(entry: &ModuleEntry) -> Result<Value, StoreError> {
    entry.slice.snapshot().map_err(|e| StoreError::Snapshot {
        name: entry.descriptor.name.clone(),
        message: e.to_string(),
    })
}
