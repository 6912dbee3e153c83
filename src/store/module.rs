//! Module declaration: a descriptor plus named mutations over one reducer.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::mvi::Reducer;
use crate::store::error::StoreError;

/// Registration options for one state module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Unique key of the module inside the store.
    pub name: String,
    /// When true, mutation types are qualified as `"<name>/<operation>"`.
    pub namespaced: bool,
    /// When true, initial state is built fresh from `Default` on every
    /// registration. Otherwise the module's stored initial value is cloned.
    pub state_factory: bool,
    /// When true, the module may be registered after the store is created.
    pub dynamic: bool,
}

impl ModuleDescriptor {
    /// Descriptor for a namespaced, dynamically registered module with a
    /// state factory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespaced: true,
            state_factory: true,
            dynamic: true,
        }
    }

    pub fn namespaced(mut self, namespaced: bool) -> Self {
        self.namespaced = namespaced;
        self
    }

    pub fn state_factory(mut self, state_factory: bool) -> Self {
        self.state_factory = state_factory;
        self
    }

    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// The store-wide mutation type for one of this module's operations.
    pub fn mutation_type(&self, operation: &str) -> String {
        if self.namespaced {
            format!("{}/{}", self.name, operation)
        } else {
            operation.to_string()
        }
    }
}

type IntentDecoder<I> = Box<dyn Fn(Value) -> Result<I, serde_json::Error> + Send + Sync>;

/// A module definition ready to be registered into a [`Store`](super::Store).
///
/// ```ignore
/// let module = Module::<FooReducer>::new(ModuleDescriptor::new("foo"))
///     .mutation("addBar", FooIntent::AddBar)
///     .mutation("removeBar", FooIntent::RemoveBar);
/// ```
pub struct Module<R: Reducer> {
    descriptor: ModuleDescriptor,
    initial: R::State,
    mutations: Vec<(String, IntentDecoder<R::Intent>)>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer + 'static> Module<R> {
    pub fn new(descriptor: ModuleDescriptor) -> Self {
        Self {
            descriptor,
            initial: R::State::default(),
            mutations: Vec::new(),
            _reducer: PhantomData,
        }
    }

    /// Initial value used when the descriptor has no state factory.
    pub fn with_state(mut self, state: R::State) -> Self {
        self.initial = state;
        self
    }

    /// Declare a mutation whose JSON payload decodes to `P`.
    pub fn mutation<P, F>(mut self, operation: impl Into<String>, to_intent: F) -> Self
    where
        P: DeserializeOwned + 'static,
        F: Fn(P) -> R::Intent + Send + Sync + 'static,
    {
        let decoder: IntentDecoder<R::Intent> =
            Box::new(move |payload| serde_json::from_value::<P>(payload).map(&to_intent));
        self.mutations.push((operation.into(), decoder));
        self
    }

    pub fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    pub(crate) fn into_entry(self) -> Result<ModuleEntry, StoreError> {
        let mut decoders = HashMap::with_capacity(self.mutations.len());
        let mut operations = Vec::with_capacity(self.mutations.len());
        for (operation, decoder) in self.mutations {
            if decoders.contains_key(&operation) {
                return Err(StoreError::DuplicateMutation {
                    mutation_type: self.descriptor.mutation_type(&operation),
                });
            }
            operations.push(operation.clone());
            decoders.insert(operation, decoder);
        }

        let state = if self.descriptor.state_factory {
            R::State::default()
        } else {
            self.initial
        };

        Ok(ModuleEntry {
            descriptor: self.descriptor,
            slice: Box::new(ReducerSlice::<R> {
                state,
                decoders,
                operations,
                _reducer: PhantomData,
            }),
        })
    }
}

/// Type-erased module for static declaration in [`StoreOptions`](super::StoreOptions).
pub(crate) trait IntoModuleEntry {
    fn into_module_entry(self: Box<Self>) -> Result<ModuleEntry, StoreError>;
}

impl<R: Reducer + 'static> IntoModuleEntry for Module<R> {
    fn into_module_entry(self: Box<Self>) -> Result<ModuleEntry, StoreError> {
        (*self).into_entry()
    }
}

/// A registered module as held by the store.
pub(crate) struct ModuleEntry {
    pub(crate) descriptor: ModuleDescriptor,
    pub(crate) slice: Box<dyn Slice>,
}

/// Object-safe view over a module's state and mutations.
pub(crate) trait Slice: Send + Sync {
    /// Apply a named operation. Returns whether the state changed.
    ///
    /// On error the state is left untouched.
    fn apply(
        &mut self,
        operation: &str,
        payload: Value,
        mutation_type: &str,
    ) -> Result<bool, StoreError>;

    fn operations(&self) -> &[String];

    fn state_any(&self) -> &dyn Any;

    fn snapshot(&self) -> Result<Value, serde_json::Error>;
}

struct ReducerSlice<R: Reducer> {
    state: R::State,
    decoders: HashMap<String, IntentDecoder<R::Intent>>,
    operations: Vec<String>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer + 'static> Slice for ReducerSlice<R> {
    fn apply(
        &mut self,
        operation: &str,
        payload: Value,
        mutation_type: &str,
    ) -> Result<bool, StoreError> {
        let decoder = self
            .decoders
            .get(operation)
            .ok_or_else(|| StoreError::OperationNotFound {
                mutation_type: mutation_type.to_string(),
            })?;
        let intent = decoder(payload).map_err(|e| StoreError::InvalidPayload {
            mutation_type: mutation_type.to_string(),
            message: e.to_string(),
        })?;

        let next = R::reduce(self.state.clone(), intent);
        let changed = next != self.state;
        self.state = next;
        Ok(changed)
    }

    fn operations(&self) -> &[String] {
        &self.operations
    }

    fn state_any(&self) -> &dyn Any {
        &self.state
    }

    fn snapshot(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvi::{Intent, ModuleState};
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Default, Serialize)]
    struct Counter {
        value: i64,
    }

    impl ModuleState for Counter {}

    enum CounterIntent {
        Add(i64),
    }

    impl Intent for CounterIntent {}

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = Counter;
        type Intent = CounterIntent;

        fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
            match intent {
                CounterIntent::Add(n) => Counter {
                    value: state.value + n,
                },
            }
        }
    }

    #[test]
    fn mutation_type_is_qualified_when_namespaced() {
        let descriptor = ModuleDescriptor::new("counter");
        assert_eq!(descriptor.mutation_type("add"), "counter/add");
        let descriptor = descriptor.namespaced(false);
        assert_eq!(descriptor.mutation_type("add"), "add");
    }

    #[test]
    fn state_factory_ignores_stored_initial_value() {
        let entry = Module::<CounterReducer>::new(ModuleDescriptor::new("counter"))
            .with_state(Counter { value: 7 })
            .into_entry()
            .unwrap();
        let state = entry.slice.state_any().downcast_ref::<Counter>().unwrap();
        assert_eq!(state.value, 0);
    }

    #[test]
    fn without_state_factory_initial_value_is_used() {
        let entry = Module::<CounterReducer>::new(
            ModuleDescriptor::new("counter").state_factory(false),
        )
        .with_state(Counter { value: 7 })
        .into_entry()
        .unwrap();
        let state = entry.slice.state_any().downcast_ref::<Counter>().unwrap();
        assert_eq!(state.value, 7);
    }

    #[test]
    fn duplicate_operation_is_rejected() {
        let result = Module::<CounterReducer>::new(ModuleDescriptor::new("counter"))
            .mutation("add", CounterIntent::Add)
            .mutation("add", CounterIntent::Add)
            .into_entry();
        assert!(matches!(
            result,
            Err(StoreError::DuplicateMutation { mutation_type }) if mutation_type == "counter/add"
        ));
    }

    #[test]
    fn bad_payload_leaves_state_untouched() {
        let mut entry = Module::<CounterReducer>::new(ModuleDescriptor::new("counter"))
            .mutation("add", CounterIntent::Add)
            .into_entry()
            .unwrap();
        let err = entry
            .slice
            .apply("add", Value::String("x".into()), "counter/add")
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidPayload { .. }));
        assert_eq!(entry.slice.snapshot().unwrap(), serde_json::json!({ "value": 0 }));
    }

    #[test]
    fn apply_reports_whether_state_changed() {
        let mut entry = Module::<CounterReducer>::new(ModuleDescriptor::new("counter"))
            .mutation("add", CounterIntent::Add)
            .into_entry()
            .unwrap();
        assert!(entry.slice.apply("add", Value::from(2), "counter/add").unwrap());
        assert!(!entry.slice.apply("add", Value::from(0), "counter/add").unwrap());
    }
}
